use crate::{
    canvas::Sketch,
    error::EaselResult,
    module::{ArtModule, FrameLoop, Metadata, RenderEnv},
    rng::Rng,
};

use super::common::rects::{BEIGE, PALETTE, rect_tangle};

/// Multi-colored overlapping rectangles, fresh randomness each invocation.
pub struct ColorfulRects;

impl ArtModule for ColorfulRects {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Colorful Rectangles",
            "Multi-colored overlapping rectangles with random positioning",
        )
    }

    fn render(
        &self,
        sketch: &mut Sketch,
        env: &RenderEnv,
    ) -> EaselResult<Option<Box<dyn FrameLoop>>> {
        sketch.fill_rect(0.0, 0.0, sketch.width(), sketch.height(), BEIGE);

        let mut rng = Rng::seeded(env.seed);
        for color in PALETTE {
            rect_tangle(sketch, color, || rng.next_f64(), 100);
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Surface;
    use crate::stage::Stage;

    fn pixels(seed: u64) -> Vec<u8> {
        let mut stage = Stage::new(Surface::new(100, 80).unwrap()).unwrap();
        let mut sketch = stage.sketch().unwrap();
        ColorfulRects
            .render(&mut sketch, &RenderEnv::seeded(seed))
            .unwrap();
        stage.present(sketch).unwrap();
        stage.pixels().to_vec()
    }

    #[test]
    fn same_seed_same_picture_different_seed_different_picture() {
        assert_eq!(pixels(8), pixels(8));
        assert_ne!(pixels(8), pixels(9));
    }
}
