//! Markdown rendering for site pages.
//!
//! Parsing is delegated to `pulldown-cmark`; rendering is a small custom
//! event walk so output stays within the subset the site uses: headings
//! (clamped to h1-h3), paragraphs, ordered/unordered lists, bold, italic,
//! and links. Links open in a new tab with the usual rel hardening.
//! Anything outside the subset degrades to its plain text content.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

pub fn markdown_to_html(md: &str) -> String {
    let mut html = String::new();

    for event in Parser::new(md) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                html.push_str(&format!("<h{}>", clamp_heading(level)));
            }
            Event::End(TagEnd::Heading(level)) => {
                html.push_str(&format!("</h{}>\n", clamp_heading(level)));
            }
            Event::Start(Tag::Paragraph) => html.push_str("<p>"),
            Event::End(TagEnd::Paragraph) => html.push_str("</p>\n"),
            Event::Start(Tag::List(start)) => match start {
                Some(_) => html.push_str("<ol>\n"),
                None => html.push_str("<ul>\n"),
            },
            Event::End(TagEnd::List(ordered)) => {
                html.push_str(if ordered { "</ol>\n" } else { "</ul>\n" });
            }
            Event::Start(Tag::Item) => html.push_str("<li>"),
            Event::End(TagEnd::Item) => html.push_str("</li>\n"),
            Event::Start(Tag::Strong) => html.push_str("<strong>"),
            Event::End(TagEnd::Strong) => html.push_str("</strong>"),
            Event::Start(Tag::Emphasis) => html.push_str("<em>"),
            Event::End(TagEnd::Emphasis) => html.push_str("</em>"),
            Event::Start(Tag::Link { dest_url, .. }) => {
                html.push_str(&format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">",
                    escape(&dest_url)
                ));
            }
            Event::End(TagEnd::Link) => html.push_str("</a>"),
            // Raw HTML is outside the subset; render it as literal text.
            Event::Text(text)
            | Event::Code(text)
            | Event::InlineHtml(text)
            | Event::Html(text) => html.push_str(&escape(&text)),
            Event::SoftBreak | Event::HardBreak => html.push(' '),
            // Outside the subset: drop the markup, keep the text flow.
            _ => {}
        }
    }

    html.trim().to_string()
}

fn clamp_heading(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        _ => 3,
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn headings_paragraphs_and_inline_marks() {
        let html = markdown_to_html("# Title\n\nSome **bold** and *italic* text.");
        assert_eq!(
            html,
            "<h1>Title</h1>\n<p>Some <strong>bold</strong> and <em>italic</em> text.</p>"
        );
    }

    #[test]
    fn deep_headings_clamp_to_h3() {
        let html = markdown_to_html("##### Deep");
        assert_eq!(html, "<h3>Deep</h3>");
    }

    #[test]
    fn links_open_in_new_tabs() {
        let html = markdown_to_html("[site](https://example.com)");
        assert_eq!(
            html,
            "<p><a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">site</a></p>"
        );
    }

    #[test]
    fn ordered_and_unordered_lists() {
        let html = markdown_to_html("- a\n- b\n\n1. x\n2. y");
        assert_eq!(
            html,
            "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n<ol>\n<li>x</li>\n<li>y</li>\n</ol>"
        );
    }

    #[test]
    fn text_is_escaped() {
        let html = markdown_to_html("a <b> & \"c\"");
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("&amp;"));
        assert!(html.contains("&quot;c&quot;"));
    }

    #[test]
    fn soft_breaks_join_paragraph_lines_with_spaces() {
        let html = markdown_to_html("line one\nline two");
        assert_eq!(html, "<p>line one line two</p>");
    }
}
