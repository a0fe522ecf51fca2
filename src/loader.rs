use crate::{
    canvas::Color,
    core::Point,
    error::EaselResult,
    module::RenderEnv,
    registry::{ModuleHandle, Registry},
    stage::{CancelHandle, Stage},
};

/// What an invocation left on the surface.
#[derive(Clone, Debug)]
pub enum InvokeOutcome {
    /// The module rendered; animated pieces also carry their cancel handle.
    Painted(Option<CancelHandle>),
    /// Resolution or render failed; the fixed placeholder was painted.
    Placeholder,
}

impl InvokeOutcome {
    pub fn cancel_handle(&self) -> Option<&CancelHandle> {
        match self {
            Self::Painted(handle) => handle.as_ref(),
            Self::Placeholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// Resolves manifest entries against the registry and runs the render
/// contract, degrading every failure to the placeholder.
#[derive(Clone, Copy)]
pub struct Loader {
    registry: &'static Registry,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    pub fn new() -> Self {
        Self {
            registry: Registry::builtin(),
        }
    }

    pub fn with_registry(registry: &'static Registry) -> Self {
        Self { registry }
    }

    /// Look up `file_name` in the registry. `None` signals a
    /// manifest/registry mismatch, not a transient error.
    pub fn resolve(&self, file_name: &str) -> Option<&ModuleHandle> {
        self.registry.resolve(file_name)
    }

    /// Run the full contract against `stage`: tear down any previous
    /// invocation, clear the surface, obtain a fresh drawing context, call
    /// the module's render, and adopt a returned frame loop.
    ///
    /// The surface is never left in its pre-invocation state: either the
    /// module painted, or the placeholder did.
    #[tracing::instrument(skip(self, stage, env))]
    pub fn invoke(&self, file_name: &str, stage: &mut Stage, env: &RenderEnv) -> InvokeOutcome {
        let Some(handle) = self.resolve(file_name) else {
            tracing::warn!(file_name, "art module not found in registry");
            return self.placeholder(stage);
        };

        stage.cancel_live();
        stage.clear(Color::TRANSPARENT);

        let module = handle.instantiate();
        let mut sketch = match stage.sketch() {
            Ok(sketch) => sketch,
            Err(err) => {
                tracing::warn!(%err, file_name, "could not create drawing context");
                return self.placeholder(stage);
            }
        };

        match module.render(&mut sketch, env) {
            Ok(frame_loop) => {
                if let Err(err) = stage.present(sketch) {
                    tracing::warn!(%err, file_name, "presenting sketch failed");
                    return self.placeholder(stage);
                }
                InvokeOutcome::Painted(stage.adopt(frame_loop))
            }
            Err(err) => {
                tracing::warn!(%err, file_name, "art module failed to render");
                self.placeholder(stage)
            }
        }
    }

    fn placeholder(&self, stage: &mut Stage) -> InvokeOutcome {
        if let Err(err) = paint_placeholder(stage) {
            // The placeholder itself failing leaves only the cleared fill.
            tracing::error!(%err, "placeholder paint failed");
        }
        InvokeOutcome::Placeholder
    }
}

/// Paint the fixed "Error loading art" placeholder: light gray panel,
/// centered message when a typeface is available, crossed box otherwise.
pub(crate) fn paint_placeholder(stage: &mut Stage) -> EaselResult<()> {
    stage.cancel_live();
    stage.clear(Color::TRANSPARENT);

    let surface = stage.surface();
    let (w, h) = (surface.width_f64(), surface.height_f64());
    let center = surface.center();

    let mut sketch = stage.sketch()?;
    sketch.fill_rect(0.0, 0.0, w, h, Color::gray(0xF0));

    if sketch.has_typeface() {
        sketch.fill_text("Error loading art", center.x, center.y, 14.0, Color::gray(0x99));
    } else {
        let (bw, bh) = (w * 0.25, h * 0.25);
        let origin = Point::new(center.x - bw / 2.0, center.y - bh / 2.0);
        sketch.set_stroke_width(1.5);
        sketch.stroke_rect(origin.x, origin.y, bw, bh, Color::gray(0x99));
        sketch.line(origin.x, origin.y, origin.x + bw, origin.y + bh, Color::gray(0x99));
        sketch.line(origin.x + bw, origin.y, origin.x, origin.y + bh, Color::gray(0x99));
    }

    stage.present(sketch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Surface;

    fn stage() -> Stage {
        Stage::new(Surface::new(64, 48).unwrap()).unwrap()
    }

    #[test]
    fn unknown_file_name_paints_placeholder() {
        let loader = Loader::new();
        let mut stage = stage();
        let outcome = loader.invoke("no-such-piece", &mut stage, &RenderEnv::seeded(1));
        assert!(outcome.is_placeholder());
        assert!(stage.pixels().iter().any(|&b| b != 0));
    }

    #[test]
    fn surface_never_left_in_pre_invocation_state() {
        let loader = Loader::new();
        for name in ["geometric-maze", "definitely-missing"] {
            let mut stage = stage();
            let before = stage.pixels().to_vec();
            loader.invoke(name, &mut stage, &RenderEnv::seeded(3));
            assert_ne!(stage.pixels(), &before[..], "{name} left surface untouched");
        }
    }

    #[test]
    fn single_shot_invocation_returns_no_handle() {
        let loader = Loader::new();
        let mut stage = stage();
        let outcome = loader.invoke("geometric-maze", &mut stage, &RenderEnv::seeded(5));
        assert!(outcome.cancel_handle().is_none());
        assert!(!stage.has_live_loop());
    }

    #[test]
    fn animated_invocation_returns_handle_and_live_loop() {
        let loader = Loader::new();
        let mut stage = stage();
        let outcome = loader.invoke("spiral-motion", &mut stage, &RenderEnv::seeded(5));
        assert!(outcome.cancel_handle().is_some());
        assert!(stage.has_live_loop());
    }
}
