use crate::{
    canvas::Typeface,
    core::{Surface, WallClock},
    error::EaselResult,
    loader::{InvokeOutcome, Loader},
    manifest::ArtManifestEntry,
    module::RenderEnv,
    stage::Stage,
};

/// One rendered grid cell: the manifest entry plus its live surface.
pub struct Tile {
    pub entry: ArtManifestEntry,
    pub stage: Stage,
    pub outcome: InvokeOutcome,
}

/// The grid view: one stage per manifest entry, rendered in manifest order.
///
/// An empty manifest produces no tiles and a "no pieces yet" message; a
/// failed manifest load produces the error message instead of a grid. Either
/// way the gallery never panics and never leaves a tile blank. Live loops
/// are cancelled explicitly on [`clear`] and on drop; nothing is left
/// running when the grid goes away.
///
/// [`clear`]: Gallery::clear
pub struct Gallery {
    tiles: Vec<Tile>,
    message: Option<String>,
}

impl Gallery {
    pub const EMPTY_MESSAGE: &str = "No art pieces yet. Check back soon!";
    pub const LOAD_FAILED_MESSAGE: &str = "Sorry, there was an issue loading art pieces.";

    /// Build the grid for `entries` on default grid-size tiles.
    pub fn from_manifest(loader: Loader, entries: &[ArtManifestEntry], seed: u64) -> EaselResult<Self> {
        Self::build(loader, entries, Surface::GRID, None, seed)
    }

    pub fn build(
        loader: Loader,
        entries: &[ArtManifestEntry],
        tile_surface: Surface,
        typeface: Option<Typeface>,
        seed: u64,
    ) -> EaselResult<Self> {
        if entries.is_empty() {
            return Ok(Self {
                tiles: Vec::new(),
                message: Some(Self::EMPTY_MESSAGE.to_string()),
            });
        }

        let clock = WallClock::system();
        let mut tiles = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let mut stage = Stage::with_typeface(tile_surface, typeface.clone())?;
            let env = RenderEnv::new(seed.wrapping_add(index as u64), clock);
            let outcome = loader.invoke(&entry.file_name, &mut stage, &env);
            tiles.push(Tile {
                entry: entry.clone(),
                stage,
                outcome,
            });
        }

        Ok(Self {
            tiles,
            message: None,
        })
    }

    /// The grid shown when the manifest itself could not be loaded.
    pub fn load_failed() -> Self {
        Self {
            tiles: Vec::new(),
            message: Some(Self::LOAD_FAILED_MESSAGE.to_string()),
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn live_loops(&self) -> usize {
        self.tiles.iter().filter(|t| t.stage.has_live_loop()).count()
    }

    /// Advance every animated tile by one frame. Tiles are independent; one
    /// erroring tile degrades alone.
    pub fn tick_all(&mut self, clock: WallClock) -> EaselResult<()> {
        for tile in &mut self.tiles {
            tile.stage.tick(clock)?;
        }
        Ok(())
    }

    /// Cancel every live loop and drop all tiles. Teardown is explicit;
    /// nothing waits for host shutdown to stop a loop.
    pub fn clear(&mut self) {
        for tile in &mut self.tiles {
            tile.stage.cancel_live();
        }
        self.tiles.clear();
    }
}

impl Drop for Gallery {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(file_name: &str) -> ArtManifestEntry {
        ArtManifestEntry {
            file_name: file_name.to_string(),
            title: file_name.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn empty_manifest_yields_message_and_no_tiles() {
        let gallery = Gallery::from_manifest(Loader::new(), &[], 1).unwrap();
        assert!(gallery.tiles().is_empty());
        assert_eq!(gallery.message(), Some(Gallery::EMPTY_MESSAGE));
    }

    #[test]
    fn unknown_entry_placeholders_only_that_tile() {
        let entries = [entry("geometric-maze"), entry("missing"), entry("flow-field")];
        let gallery = Gallery::from_manifest(Loader::new(), &entries, 1).unwrap();
        assert_eq!(gallery.tiles().len(), 3);
        assert!(!gallery.tiles()[0].outcome.is_placeholder());
        assert!(gallery.tiles()[1].outcome.is_placeholder());
        assert!(!gallery.tiles()[2].outcome.is_placeholder());
    }

    #[test]
    fn clear_cancels_all_live_loops() {
        let entries = [entry("spiral-motion"), entry("particle-waves")];
        let mut gallery = Gallery::from_manifest(Loader::new(), &entries, 1).unwrap();
        assert_eq!(gallery.live_loops(), 2);

        let handles: Vec<_> = gallery
            .tiles()
            .iter()
            .filter_map(|t| t.outcome.cancel_handle().cloned())
            .collect();
        gallery.clear();
        assert!(handles.iter().all(|h| h.is_cancelled()));
        assert_eq!(gallery.live_loops(), 0);
    }

    #[test]
    fn tick_all_advances_animated_tiles() {
        let entries = [entry("spiral-motion"), entry("geometric-maze")];
        let mut gallery = Gallery::from_manifest(Loader::new(), &entries, 1).unwrap();
        gallery.tick_all(WallClock::fixed(10, 30, 0, 0)).unwrap();
        assert_eq!(gallery.live_loops(), 1);
    }
}
