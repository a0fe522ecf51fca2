use crate::{
    canvas::Sketch,
    error::EaselResult,
    module::{ArtModule, FrameLoop, Metadata, RenderEnv},
    rng::SineSeq,
};

use super::common::rects::{BEIGE, PALETTE, rect_tangle};

/// The rectangle figure driven by the fixed sine-fraction sequence: every
/// invocation reproduces the identical picture, by construction.
pub struct SeededRects;

impl ArtModule for SeededRects {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Seeded Rectangles",
            "Deterministic colorful rectangles using seeded random generation",
        )
    }

    fn render(
        &self,
        sketch: &mut Sketch,
        _env: &RenderEnv,
    ) -> EaselResult<Option<Box<dyn FrameLoop>>> {
        sketch.fill_rect(0.0, 0.0, sketch.width(), sketch.height(), BEIGE);

        for color in PALETTE {
            // Sequence restarts at 1 for every color band, as the piece is
            // defined: the bands overlay the same walk in five colors.
            let mut seq = SineSeq::new(1.0);
            rect_tangle(sketch, color, || seq.next(), 100);
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Surface;
    use crate::stage::Stage;

    #[test]
    fn output_is_byte_identical_regardless_of_host_seed() {
        let pixels = |seed: u64| {
            let mut stage = Stage::new(Surface::new(100, 80).unwrap()).unwrap();
            let mut sketch = stage.sketch().unwrap();
            SeededRects
                .render(&mut sketch, &RenderEnv::seeded(seed))
                .unwrap();
            stage.present(sketch).unwrap();
            stage.pixels().to_vec()
        };
        assert_eq!(pixels(1), pixels(99));
    }
}
