use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::{
    canvas::Typeface,
    core::{Surface, WallClock},
    error::EaselResult,
    gallery::Gallery,
    loader::Loader,
    manifest::{self, ArtManifestEntry},
    module::RenderEnv,
    site::{markdown, pages},
    stage::Stage,
};

/// Frames of animation warm-up before snapshotting an animated tile, so
/// trail-based pieces don't photograph as their first blank-ish frame.
const WARMUP_TICKS: u32 = 24;

/// Generates the whole static site: pages plus one rendered PNG per art
/// manifest entry. Every content failure degrades to the matching error
/// message in the page; nothing here is fatal.
pub struct SiteBuilder {
    content_dir: PathBuf,
    out_dir: PathBuf,
    typeface: Option<Typeface>,
    seed: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub pieces: usize,
    pub placeholders: usize,
}

impl SiteBuilder {
    pub fn new(content_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            out_dir: out_dir.into(),
            typeface: None,
            seed: 0,
        }
    }

    pub fn with_typeface(mut self, typeface: Option<Typeface>) -> Self {
        self.typeface = typeface;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[tracing::instrument(skip(self), fields(out = %self.out_dir.display()))]
    pub fn build(&self) -> EaselResult<BuildSummary> {
        std::fs::create_dir_all(self.out_dir.join("art"))
            .with_context(|| format!("create output dir '{}'", self.out_dir.display()))?;

        let mut summary = BuildSummary::default();

        // Art grid: manifest load failure and the empty manifest each keep
        // their own message; otherwise render every tile.
        let art_manifest = manifest::load_art_manifest(&self.content_dir.join("art/manifest.json"));
        let (rendered, art_message) = match art_manifest {
            Ok(entries) if entries.is_empty() => (Vec::new(), Some(Gallery::EMPTY_MESSAGE)),
            Ok(entries) => {
                let rendered = self.render_all(&entries)?;
                summary.pieces = rendered.len();
                summary.placeholders = rendered.iter().filter(|r| r.2).count();
                (rendered, None)
            }
            Err(err) => {
                tracing::warn!(%err, "art manifest failed to load");
                (Vec::new(), Some(Gallery::LOAD_FAILED_MESSAGE))
            }
        };

        let projects = manifest::load_projects(&self.content_dir.join("projects/manifest.json"));
        let projects_nav = match &projects {
            Ok(entries) => pages::ProjectsNav::Loaded(entries),
            Err(err) => {
                tracing::warn!(%err, "projects manifest failed to load");
                pages::ProjectsNav::Failed
            }
        };

        let blog = manifest::load_blog_posts(&self.content_dir.join("blog/manifest.json"));
        let blog_posts = match &blog {
            Ok(posts) => Some(posts.as_slice()),
            Err(err) => {
                tracing::warn!(%err, "blog manifest failed to load");
                None
            }
        };

        let about_path = self.content_dir.join("about.md");
        let about_html = match std::fs::read_to_string(&about_path) {
            Ok(md) => markdown::markdown_to_html(&md),
            Err(err) => {
                tracing::warn!(%err, path = %about_path.display(), "about page failed to load");
                pages::markdown_load_error("content/about.md")
            }
        };

        let art_entries: Vec<(ArtManifestEntry, String)> = rendered
            .into_iter()
            .map(|(entry, image, _)| (entry, image))
            .collect();

        for (name, html) in [
            ("index.html", pages::index_page(&about_html, &projects_nav)),
            ("art.html", pages::art_page(&art_entries, art_message, &projects_nav)),
            ("projects.html", pages::projects_page(&projects_nav)),
            ("blog.html", pages::blog_page(blog_posts, &projects_nav)),
        ] {
            let path = self.out_dir.join(name);
            std::fs::write(&path, html)
                .with_context(|| format!("write page '{}'", path.display()))?;
            summary.pages += 1;
        }

        Ok(summary)
    }

    /// Render every manifest entry to `art/<fileName>.png`. Tiles are
    /// independent, so they render on the rayon pool.
    fn render_all(
        &self,
        entries: &[ArtManifestEntry],
    ) -> EaselResult<Vec<(ArtManifestEntry, String, bool)>> {
        entries
            .par_iter()
            .enumerate()
            .map(|(index, entry)| {
                let image = format!("art/{}.png", entry.file_name);
                let placeholder = self.render_piece(entry, index as u64, &self.out_dir.join(&image))?;
                Ok((entry.clone(), image, placeholder))
            })
            .collect()
    }

    fn render_piece(
        &self,
        entry: &ArtManifestEntry,
        index: u64,
        out_path: &Path,
    ) -> EaselResult<bool> {
        let loader = Loader::new();
        let mut stage = Stage::with_typeface(Surface::GRID, self.typeface.clone())?;
        let clock = WallClock::system();
        let env = RenderEnv::new(self.seed.wrapping_add(index), clock);

        let outcome = loader.invoke(&entry.file_name, &mut stage, &env);
        for _ in 0..WARMUP_TICKS {
            if !stage.tick(clock)? {
                break;
            }
        }
        stage.cancel_live();

        save_png(&stage, out_path)?;
        Ok(outcome.is_placeholder())
    }
}

fn save_png(stage: &Stage, path: &Path) -> EaselResult<()> {
    let surface = stage.surface();
    image::save_buffer_with_format(
        path,
        stage.pixels(),
        surface.width,
        surface.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Render one piece to a PNG at an arbitrary size; the CLI's single-piece
/// verb. An unknown `file_name` still writes a PNG, the placeholder one,
/// and reports it through the returned flag.
pub fn render_piece_to_png(
    file_name: &str,
    surface: Surface,
    seed: u64,
    typeface: Option<Typeface>,
    out_path: &Path,
) -> EaselResult<bool> {
    let loader = Loader::new();
    let mut stage = Stage::with_typeface(surface, typeface)?;
    let clock = WallClock::system();
    let outcome = loader.invoke(file_name, &mut stage, &RenderEnv::new(seed, clock));
    for _ in 0..WARMUP_TICKS {
        if !stage.tick(clock)? {
            break;
        }
    }
    stage.cancel_live();

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    save_png(&stage, out_path)?;
    Ok(outcome.is_placeholder())
}
