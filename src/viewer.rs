use crate::{
    canvas::Typeface,
    core::{Surface, WallClock},
    error::EaselResult,
    loader::{InvokeOutcome, Loader},
    module::RenderEnv,
    stage::Stage,
};

/// Full-size piece viewer with a regenerate action.
///
/// Lifecycle: `Closed -> Open(piece) -> [regenerate]* -> Closed`. Opening
/// creates the larger surface and invokes the loader; regenerate tears down
/// the previous invocation before re-invoking on the same surface, so the
/// viewer holds at most one live animation loop no matter how many times it
/// regenerates; close tears down the invocation and discards the surface.
pub struct Viewer {
    loader: Loader,
    typeface: Option<Typeface>,
    surface: Surface,
    open: Option<OpenPiece>,
}

struct OpenPiece {
    file_name: String,
    stage: Stage,
    seed_counter: u64,
}

impl Viewer {
    pub fn new(loader: Loader) -> Self {
        Self::with_surface(loader, Surface::VIEWER)
    }

    pub fn with_surface(loader: Loader, surface: Surface) -> Self {
        Self {
            loader,
            typeface: None,
            surface,
            open: None,
        }
    }

    pub fn set_typeface(&mut self, typeface: Option<Typeface>) {
        self.typeface = typeface;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open_file_name(&self) -> Option<&str> {
        self.open.as_ref().map(|o| o.file_name.as_str())
    }

    pub fn stage(&self) -> Option<&Stage> {
        self.open.as_ref().map(|o| &o.stage)
    }

    /// Open `file_name` full size. An already-open piece is closed first.
    pub fn open(&mut self, file_name: &str, env: &RenderEnv) -> EaselResult<InvokeOutcome> {
        self.close();

        let mut stage = Stage::with_typeface(self.surface, self.typeface.clone())?;
        let outcome = self.loader.invoke(file_name, &mut stage, env);
        self.open = Some(OpenPiece {
            file_name: file_name.to_string(),
            stage,
            seed_counter: env.seed,
        });
        Ok(outcome)
    }

    /// Re-run the open piece's render for a fresh variation. The previous
    /// invocation's loop is cancelled before the new render starts; N
    /// regenerates leave exactly one live loop.
    pub fn regenerate(&mut self) -> EaselResult<Option<InvokeOutcome>> {
        let Some(open) = self.open.as_mut() else {
            return Ok(None);
        };

        open.stage.cancel_live();
        open.seed_counter = open.seed_counter.wrapping_add(1);
        let env = RenderEnv::new(open.seed_counter, WallClock::system());
        let outcome = self.loader.invoke(&open.file_name, &mut open.stage, &env);
        Ok(Some(outcome))
    }

    /// Advance the open piece's animation by one frame.
    pub fn tick(&mut self, clock: WallClock) -> EaselResult<bool> {
        match self.open.as_mut() {
            Some(open) => open.stage.tick(clock),
            None => Ok(false),
        }
    }

    /// Cancel the live loop and discard the surface.
    pub fn close(&mut self) {
        if let Some(mut open) = self.open.take() {
            open.stage.cancel_live();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_viewer() -> Viewer {
        Viewer::with_surface(Loader::new(), Surface::new(80, 60).unwrap())
    }

    #[test]
    fn open_then_close_discards_surface() {
        let mut viewer = small_viewer();
        viewer
            .open("spiral-motion", &RenderEnv::seeded(1))
            .unwrap();
        assert!(viewer.is_open());
        assert_eq!(viewer.open_file_name(), Some("spiral-motion"));

        viewer.close();
        assert!(!viewer.is_open());
        assert!(viewer.stage().is_none());
    }

    #[test]
    fn regenerate_on_closed_viewer_is_a_no_op() {
        let mut viewer = small_viewer();
        assert!(viewer.regenerate().unwrap().is_none());
    }

    #[test]
    fn regenerate_is_leak_idempotent() {
        let mut viewer = small_viewer();
        let outcome = viewer
            .open("particle-waves", &RenderEnv::seeded(1))
            .unwrap();
        let first_handle = outcome.cancel_handle().cloned().unwrap();

        for _ in 0..5 {
            viewer.regenerate().unwrap();
        }

        assert!(first_handle.is_cancelled());
        let stage = viewer.stage().unwrap();
        assert!(stage.has_live_loop(), "exactly one live loop remains");
    }

    #[test]
    fn reopening_cancels_previous_piece() {
        let mut viewer = small_viewer();
        let handle = viewer
            .open("spiral-motion", &RenderEnv::seeded(1))
            .unwrap()
            .cancel_handle()
            .cloned()
            .unwrap();
        viewer
            .open("geometric-maze", &RenderEnv::seeded(1))
            .unwrap();
        assert!(handle.is_cancelled());
        assert_eq!(viewer.open_file_name(), Some("geometric-maze"));
    }
}
