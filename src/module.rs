use crate::{
    canvas::Sketch,
    core::{FrameIndex, WallClock},
    error::EaselResult,
};

/// Display metadata carried by every art module and mirrored into the art
/// manifest at build time.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
}

impl Metadata {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Host-provided inputs for a single render invocation.
#[derive(Clone, Copy, Debug)]
pub struct RenderEnv {
    /// Seed for the invocation's randomness. Equal seeds reproduce equal
    /// pictures for every module that draws from [`crate::rng::Rng`].
    pub seed: u64,
    /// Wall-clock reading at invocation time.
    pub clock: WallClock,
}

impl RenderEnv {
    pub fn new(seed: u64, clock: WallClock) -> Self {
        Self { seed, clock }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(seed, WallClock::system())
    }
}

/// Per-frame inputs for animated pieces.
#[derive(Clone, Copy, Debug)]
pub struct TickCtx {
    pub frame: FrameIndex,
    pub clock: WallClock,
}

/// The recurring-frame half of the render contract.
///
/// All mutable state of an animated piece (particle positions, counters)
/// lives in the implementing struct, owned by the invocation that created
/// it and dropped when that invocation is replaced or cancelled. The host
/// calls [`advance`] once per frame onto a fresh sketch whose pixmap still
/// holds the previous frame, mirroring how a canvas persists between
/// animation callbacks.
///
/// [`advance`]: FrameLoop::advance
pub trait FrameLoop {
    fn advance(&mut self, sketch: &mut Sketch, tick: &TickCtx) -> EaselResult<()>;
}

/// A self-contained procedural drawing routine.
///
/// `render` paints onto a freshly cleared sketch and either completes
/// (single-shot pieces, returning `None`) or hands back a [`FrameLoop`] the
/// host steps until cancellation. Modules never retain the sketch or the
/// underlying surface beyond the call.
pub trait ArtModule: Send + Sync {
    fn metadata(&self) -> Metadata;

    fn render(
        &self,
        sketch: &mut Sketch,
        env: &RenderEnv,
    ) -> EaselResult<Option<Box<dyn FrameLoop>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_json_uses_plain_field_names() {
        let meta = Metadata::new("Flow Field", "Lines following a vector field");
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"title\":\"Flow Field\""));
        let back: Metadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
    }
}
