//! The page shell: markdown rendering, page templates, and the static
//! site builder that stitches manifests and rendered art together.

pub mod builder;
pub mod markdown;
pub mod pages;

pub use builder::{BuildSummary, SiteBuilder, render_piece_to_png};
pub use markdown::markdown_to_html;
