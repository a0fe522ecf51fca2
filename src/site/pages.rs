//! Static page templates.
//!
//! Every page shares the shell: header navigation, the sidebar with its
//! expandable projects submenu, and a footer stamped with the current year.

use chrono::Datelike;
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::manifest::{ArtManifestEntry, BlogPostEntry, ProjectEntry};

/// Sidebar/projects state shared by all pages.
pub enum ProjectsNav<'a> {
    Loaded(&'a [ProjectEntry]),
    Failed,
}

fn sidebar(projects: &ProjectsNav<'_>) -> Markup {
    html! {
        aside .sidebar {
            nav {
                ul {
                    li { a href="index.html" { "Home" } }
                    li { a href="blog.html" { "Blog" } }
                    li { a href="art.html" { "Art" } }
                    li {
                        button #projects-toggle-btn aria-expanded="false" {
                            "Projects " span .expander-icon { "\u{25BC}" }
                        }
                        ul #projects-submenu hidden {
                            @match projects {
                                ProjectsNav::Loaded(entries) if entries.is_empty() => {
                                    li .submenu-note { "No projects yet." }
                                }
                                ProjectsNav::Loaded(entries) => {
                                    @for project in *entries {
                                        li {
                                            a href=(project.url()) target="_blank" rel="noopener noreferrer" {
                                                (project.title)
                                            }
                                        }
                                    }
                                }
                                ProjectsNav::Failed => {
                                    li .submenu-error { "Error loading projects." }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn shell(title: &str, projects: &ProjectsNav<'_>, content: Markup) -> String {
    let year = chrono::Local::now().year();
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href="styles.css";
            }
            body {
                (sidebar(projects))
                main { (content) }
                footer {
                    p { "\u{00A9} " span #current-year { (year) } }
                }
            }
        }
    }
    .into_string()
}

/// Landing page: the about text rendered from markdown (or its error
/// message when the markdown could not be loaded).
pub fn index_page(about_html: &str, projects: &ProjectsNav<'_>) -> String {
    shell(
        "Home",
        projects,
        html! {
            section #about-content { (PreEscaped(about_html.to_string())) }
        },
    )
}

pub fn markdown_load_error(path: &str) -> String {
    html! {
        p .error-message { "Sorry, couldn't load content from " (path) "." }
    }
    .into_string()
}

/// The art grid. `rendered` pairs each manifest entry with the image file
/// the builder produced for it; `message` replaces the grid for the empty
/// and load-failure cases.
pub fn art_page(
    rendered: &[(ArtManifestEntry, String)],
    message: Option<&str>,
    projects: &ProjectsNav<'_>,
) -> String {
    shell(
        "Art",
        projects,
        html! {
            h1 { "Generative Art" }
            section .art-grid {
                @if let Some(message) = message {
                    p { (message) }
                } @else {
                    @for (entry, image) in rendered {
                        article .art-item {
                            h3 { (entry.title) }
                            p { (entry.description) }
                            img src=(image) alt=(entry.title) width="300" height="200";
                        }
                    }
                }
            }
        },
    )
}

pub fn projects_page(projects: &ProjectsNav<'_>) -> String {
    shell(
        "Projects",
        projects,
        html! {
            h1 { "Projects" }
            section .project-grid {
                @match projects {
                    ProjectsNav::Loaded(entries) if entries.is_empty() => {
                        p { "No projects found yet. Stay tuned!" }
                    }
                    ProjectsNav::Loaded(entries) => {
                        @for project in *entries {
                            article .project-card {
                                @if let Some(thumbnail) = &project.thumbnail {
                                    img .project-thumbnail
                                        src=(format!("content/projects/{}/{}", project.folder_name, thumbnail))
                                        alt=(format!("{} thumbnail", project.title));
                                }
                                h3 { (project.title) }
                                p { (project.description) }
                                a .btn-view-project href=(project.url())
                                    target="_blank" rel="noopener noreferrer" {
                                    "View Project"
                                }
                            }
                        }
                    }
                    ProjectsNav::Failed => {
                        p .error-message {
                            "Sorry, there was an issue loading projects. Please try again later."
                        }
                    }
                }
            }
        },
    )
}

/// Blog summaries, assumed already sorted newest first.
pub fn blog_page(posts: Option<&[BlogPostEntry]>, projects: &ProjectsNav<'_>) -> String {
    shell(
        "Blog",
        projects,
        html! {
            h1 { "Blog" }
            section #blog-posts-container {
                @match posts {
                    None => {
                        p .error-message { "Sorry, there was an issue loading blog posts." }
                    }
                    Some([]) => {
                        p { "No blog posts yet. Check back soon!" }
                    }
                    Some(posts) => {
                        @for post in posts {
                            article .blog-post-summary {
                                h3 { (post.title) }
                                p .post-meta {
                                    "Published on "
                                    time datetime=(post.date.format("%Y-%m-%d")) {
                                        (post.date.format("%B %-d, %Y"))
                                    }
                                }
                                p { (post.snippet) }
                            }
                        }
                    }
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_projects() -> Vec<ProjectEntry> {
        vec![ProjectEntry {
            folder_name: "nicu".to_string(),
            title: "NICU Dashboard".to_string(),
            description: "A monitoring dashboard.".to_string(),
            thumbnail: None,
            entry_point: None,
        }]
    }

    #[test]
    fn sidebar_lists_projects_in_submenu() {
        let projects = sample_projects();
        let html = projects_page(&ProjectsNav::Loaded(&projects));
        assert!(html.contains("NICU Dashboard"));
        assert!(html.contains("projects-submenu"));
        assert!(html.contains("content/projects/nicu/index.html"));
    }

    #[test]
    fn art_page_shows_message_instead_of_grid() {
        let html = art_page(&[], Some("No art pieces yet. Check back soon!"), &ProjectsNav::Loaded(&[]));
        assert!(html.contains("No art pieces yet"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn blog_page_formats_dates_long_form() {
        let posts = vec![BlogPostEntry {
            file_name: "hello.md".to_string(),
            title: "Hello".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            snippet: "First post".to_string(),
        }];
        let html = blog_page(Some(&posts), &ProjectsNav::Loaded(&[]));
        assert!(html.contains("March 9, 2025"));
        assert!(html.contains("datetime=\"2025-03-09\""));
    }

    #[test]
    fn failed_states_render_error_messages() {
        let html = blog_page(None, &ProjectsNav::Failed);
        assert!(html.contains("issue loading blog posts"));
        assert!(html.contains("Error loading projects."));
    }

    #[test]
    fn titles_are_escaped_by_the_template() {
        let entries = vec![(
            ArtManifestEntry {
                file_name: "x".to_string(),
                title: "<script>".to_string(),
                description: String::new(),
            },
            "art/x.png".to_string(),
        )];
        let html = art_page(&entries, None, &ProjectsNav::Loaded(&[]));
        assert!(html.contains("&lt;script&gt;"));
    }
}
