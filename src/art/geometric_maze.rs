use crate::{
    canvas::{Color, Sketch},
    core::BezPath,
    error::EaselResult,
    module::{ArtModule, FrameLoop, Metadata, RenderEnv},
    rng::Rng,
};

/// Recursive square subdivision with randomly included quadrants.
pub struct GeometricMaze;

const MAX_DEPTH: u32 = 6;
const MIN_SIZE: f64 = 4.0;
const SHRINK: f64 = 0.4;
const BRANCH_PROBABILITY: f64 = 0.7;

impl ArtModule for GeometricMaze {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Geometric Maze",
            "Recursive geometric patterns forming maze-like structures",
        )
    }

    fn render(
        &self,
        sketch: &mut Sketch,
        env: &RenderEnv,
    ) -> EaselResult<Option<Box<dyn FrameLoop>>> {
        let (w, h) = (sketch.width(), sketch.height());
        let mut rng = Rng::seeded(env.seed);

        sketch.fill_rect(0.0, 0.0, w, h, Color::WHITE);
        sketch.set_stroke_width(1.0);

        let center = sketch.surface().center();
        let max_size = sketch.surface().min_side() * 0.8;
        subdivide(sketch, &mut rng, center.x, center.y, max_size, MAX_DEPTH);

        Ok(None)
    }
}

fn subdivide(sketch: &mut Sketch, rng: &mut Rng, x: f64, y: f64, size: f64, depth: u32) -> u64 {
    if depth == 0 || size < MIN_SIZE {
        return 0;
    }

    let half = size / 2.0;
    sketch.stroke_rect(x - half, y - half, size, size, Color::BLACK);

    // Internal cross dividing the square into quadrants.
    let mut cross = BezPath::new();
    cross.move_to((x - half, y));
    cross.line_to((x + half, y));
    cross.move_to((x, y - half));
    cross.line_to((x, y + half));
    sketch.stroke_path(&cross, Color::BLACK);

    let quarter = size / 4.0;
    let child = size * SHRINK;
    let mut calls = 1u64;
    for (qx, qy) in [
        (x - quarter, y - quarter),
        (x + quarter, y - quarter),
        (x - quarter, y + quarter),
        (x + quarter, y + quarter),
    ] {
        if rng.chance(BRANCH_PROBABILITY) {
            calls += subdivide(sketch, rng, qx, qy, child, depth - 1);
        }
    }
    calls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Surface;
    use crate::stage::Stage;

    /// Worst case is the full 4-ary tree of depth 6.
    const CALL_BOUND: u64 = (4u64.pow(MAX_DEPTH) - 1) / 3;

    #[test]
    fn recursion_terminates_within_bound_for_any_size() {
        for (w, h, seed) in [(32u32, 32u32, 1u64), (300, 200, 2), (800, 600, 3), (2000, 2000, 4)] {
            let stage = Stage::new(Surface::new(w, h).unwrap()).unwrap();
            let mut sketch = stage.sketch().unwrap();
            let mut rng = Rng::seeded(seed);
            let size = stage.surface().min_side() * 0.8;
            let center = stage.surface().center();
            let calls = subdivide(&mut sketch, &mut rng, center.x, center.y, size, MAX_DEPTH);
            assert!(calls <= CALL_BOUND, "{calls} exceeds bound {CALL_BOUND}");
            assert!(calls >= 1);
        }
    }

    #[test]
    fn size_floor_stops_recursion_on_tiny_canvases() {
        let stage = Stage::new(Surface::new(8, 8).unwrap()).unwrap();
        let mut sketch = stage.sketch().unwrap();
        let mut rng = Rng::seeded(9);
        // 8 * 0.8 = 6.4; one subdivision brings children under the 4px floor.
        let calls = subdivide(&mut sketch, &mut rng, 4.0, 4.0, 6.4, MAX_DEPTH);
        assert_eq!(calls, 1);
    }

    #[test]
    fn renders_single_shot() {
        let mut stage = Stage::new(Surface::GRID).unwrap();
        let mut sketch = stage.sketch().unwrap();
        let outcome = GeometricMaze
            .render(&mut sketch, &RenderEnv::seeded(1))
            .unwrap();
        assert!(outcome.is_none());
        stage.present(sketch).unwrap();
        assert!(stage.pixels().iter().any(|&b| b != 0));
    }
}
