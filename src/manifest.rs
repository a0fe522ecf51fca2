use std::path::Path;

use anyhow::Context as _;
use regex::Regex;

use crate::error::{EaselError, EaselResult};

/// One art piece as described by `content/art/manifest.json`.
///
/// `file_name` is the stable identifier resolved against the registry;
/// collection order is display order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtManifestEntry {
    pub file_name: String,
    pub title: String,
    pub description: String,
}

/// One project card as described by `content/projects/manifest.json`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub folder_name: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
}

impl ProjectEntry {
    /// Relative URL of the project's entry page.
    pub fn url(&self) -> String {
        let entry = self.entry_point.as_deref().unwrap_or("index.html");
        format!("content/projects/{}/{}", self.folder_name, entry)
    }
}

/// One blog post summary as described by `content/blog/manifest.json`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostEntry {
    pub file_name: String,
    pub title: String,
    pub date: chrono::NaiveDate,
    pub snippet: String,
}

pub fn load_art_manifest(path: &Path) -> EaselResult<Vec<ArtManifestEntry>> {
    load_json(path)
}

pub fn load_projects(path: &Path) -> EaselResult<Vec<ProjectEntry>> {
    load_json(path)
}

/// Load blog summaries, sorted newest first for display.
pub fn load_blog_posts(path: &Path) -> EaselResult<Vec<BlogPostEntry>> {
    let mut posts: Vec<BlogPostEntry> = load_json(path)?;
    posts.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(posts)
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> EaselResult<Vec<T>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read manifest '{}'", path.display()))
        .map_err(|e| EaselError::manifest(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| {
        EaselError::serde(format!("parse manifest '{}': {e}", path.display()))
    })
}

pub fn write_json<T: serde::Serialize>(path: &Path, entries: &[T]) -> EaselResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create manifest dir '{}'", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(entries)
        .map_err(|e| EaselError::serde(e.to_string()))?;
    std::fs::write(path, json)
        .with_context(|| format!("write manifest '{}'", path.display()))?;
    Ok(())
}

/// Generate the art manifest by scanning `dir` for module sources.
///
/// The scan is flat, like the content directory it mirrors: each top-level
/// `.rs` file (excluding `mod.rs`) becomes one entry, sorted by file name so
/// output is stable across filesystems. Title and description are
/// regex-extracted from the `Metadata::new("…", "…")` literal in the file;
/// when extraction fails the entry falls back to a title-cased file stem and
/// a generic description.
#[tracing::instrument]
pub fn generate_art_manifest(dir: &Path) -> EaselResult<Vec<ArtManifestEntry>> {
    let metadata_re = metadata_regex();
    let mut files = Vec::new();

    for entry in walkdir::WalkDir::new(dir).max_depth(1).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("scan art dir '{}'", dir.display()))
            .map_err(|e| EaselError::manifest(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("rs") {
            continue;
        }
        let stem = match path.file_stem().and_then(|s| s.to_str()) {
            Some("mod") | None => continue,
            Some(stem) => stem.to_string(),
        };
        files.push((stem, path.to_path_buf()));
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut entries = Vec::with_capacity(files.len());
    for (stem, path) in files {
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("read art module '{}'", path.display()))
            .map_err(|e| EaselError::manifest(e.to_string()))?;

        let file_name = stem.replace('_', "-");
        let entry = match metadata_re.captures(&source) {
            Some(caps) => ArtManifestEntry {
                file_name,
                title: caps[1].to_string(),
                description: caps[2].to_string(),
            },
            None => {
                tracing::debug!(path = %path.display(), "no metadata literal; using fallback");
                ArtManifestEntry {
                    title: title_case(&file_name),
                    description: "A generative art piece.".to_string(),
                    file_name,
                }
            }
        };
        entries.push(entry);
    }

    Ok(entries)
}

fn metadata_regex() -> Regex {
    // Matches the Metadata::new("title", "description") literal each module
    // carries, tolerating whitespace and line breaks between arguments.
    Regex::new(r#"Metadata::new\(\s*"([^"]+)"\s*,\s*"([^"]+)"\s*,?\s*\)"#)
        .expect("metadata literal regex is valid")
}

/// `"flow-field"` -> `"Flow Field"`.
pub fn title_case(stem: &str) -> String {
    stem.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
