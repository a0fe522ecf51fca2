use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "easel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan an art module directory and write the art manifest JSON.
    Manifest(ManifestArgs),
    /// Render a single art piece as a PNG.
    Render(RenderArgs),
    /// Render every manifest entry as a PNG into a directory.
    Gallery(GalleryArgs),
    /// Build the full static site: pages plus rendered art.
    Build(BuildArgs),
}

#[derive(Parser, Debug)]
struct ManifestArgs {
    /// Directory of art module sources to scan.
    #[arg(long, default_value = "src/art")]
    dir: PathBuf,

    /// Output manifest path.
    #[arg(long, default_value = "content/art/manifest.json")]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Module identifier (manifest fileName).
    piece: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Seed for randomized pieces.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// TTF/OTF font for numerals, labels and the error placeholder.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct GalleryArgs {
    /// Art manifest to render.
    #[arg(long = "in", default_value = "content/art/manifest.json")]
    in_path: PathBuf,

    /// Output directory for the PNGs.
    #[arg(long)]
    out_dir: PathBuf,

    /// Seed base; each entry offsets from it.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// TTF/OTF font for numerals, labels and the error placeholder.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Content root holding the manifests and markdown.
    #[arg(long, default_value = "content")]
    content: PathBuf,

    /// Site output directory.
    #[arg(long, default_value = "dist")]
    out: PathBuf,

    /// Seed base for randomized pieces.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// TTF/OTF font for numerals, labels and the error placeholder.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Manifest(args) => cmd_manifest(args),
        Command::Render(args) => cmd_render(args),
        Command::Gallery(args) => cmd_gallery(args),
        Command::Build(args) => cmd_build(args),
    }
}

fn load_font(path: Option<&PathBuf>) -> anyhow::Result<Option<easel::Typeface>> {
    path.map(|p| {
        easel::Typeface::load(p).with_context(|| format!("load font '{}'", p.display()))
    })
    .transpose()
}

fn cmd_manifest(args: ManifestArgs) -> anyhow::Result<()> {
    let entries = easel::manifest::generate_art_manifest(&args.dir)?;

    // Flag manifest/registry drift at generation time, where it is cheap.
    let registry = easel::Registry::builtin();
    for entry in &entries {
        if registry.resolve(&entry.file_name).is_none() {
            eprintln!(
                "warning: '{}' has no registry entry and will render the placeholder",
                entry.file_name
            );
        }
    }

    easel::manifest::write_json(&args.out, &entries)?;
    eprintln!("wrote {} ({} entries)", args.out.display(), entries.len());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let surface = easel::Surface::new(args.width, args.height)?;
    let typeface = load_font(args.font.as_ref())?;

    let placeholder =
        easel::site::render_piece_to_png(&args.piece, surface, args.seed, typeface, &args.out)?;
    if placeholder {
        eprintln!("warning: '{}' rendered the error placeholder", args.piece);
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_gallery(args: GalleryArgs) -> anyhow::Result<()> {
    let entries = easel::manifest::load_art_manifest(&args.in_path)?;
    let typeface = load_font(args.font.as_ref())?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut placeholders = 0usize;
    for (index, entry) in entries.iter().enumerate() {
        let out = args.out_dir.join(format!("{}.png", entry.file_name));
        let placeholder = easel::site::render_piece_to_png(
            &entry.file_name,
            easel::Surface::GRID,
            args.seed.wrapping_add(index as u64),
            typeface.clone(),
            &out,
        )?;
        if placeholder {
            placeholders += 1;
        }
    }

    eprintln!(
        "wrote {} pieces to {} ({} placeholders)",
        entries.len(),
        args.out_dir.display(),
        placeholders
    );
    Ok(())
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let typeface = load_font(args.font.as_ref())?;

    let summary = easel::SiteBuilder::new(&args.content, &args.out)
        .with_typeface(typeface)
        .with_seed(args.seed)
        .build()?;

    eprintln!(
        "wrote {} pages, {} art pieces ({} placeholders) to {}",
        summary.pages,
        summary.pieces,
        summary.placeholders,
        args.out.display()
    );
    Ok(())
}
