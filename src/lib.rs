#![forbid(unsafe_code)]

pub mod art;
pub mod canvas;
pub mod core;
pub mod error;
pub mod gallery;
pub mod loader;
pub mod manifest;
pub mod module;
pub mod registry;
pub mod rng;
pub mod site;
pub mod stage;
pub mod viewer;

pub use canvas::{Color, Sketch, Typeface};
pub use core::{FrameIndex, Surface, WallClock};
pub use error::{EaselError, EaselResult};
pub use gallery::{Gallery, Tile};
pub use loader::{InvokeOutcome, Loader};
pub use manifest::{ArtManifestEntry, BlogPostEntry, ProjectEntry};
pub use module::{ArtModule, FrameLoop, Metadata, RenderEnv, TickCtx};
pub use registry::{ModuleHandle, Registry};
pub use site::{BuildSummary, SiteBuilder};
pub use stage::{CancelHandle, Stage};
pub use viewer::Viewer;
