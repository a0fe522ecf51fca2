use crate::{
    canvas::{Color, Sketch},
    core::BezPath,
    error::EaselResult,
    module::{ArtModule, FrameLoop, Metadata, RenderEnv},
    rng::Rng,
};

/// Walkers tracing a closed-form pseudo-noise vector field.
pub struct FlowField;

const NUM_LINES: usize = 80;
const STEP_SIZE: f64 = 2.0;
const MAX_STEPS: usize = 200;

fn noise(x: f64, y: f64) -> f64 {
    (x * 0.01).sin() * (y * 0.01).cos()
        + (x * 0.02 + 10.0).sin() * (y * 0.02 + 10.0).cos() * 0.5
}

fn flow_angle(x: f64, y: f64) -> f64 {
    noise(x, y) * std::f64::consts::PI * 4.0
}

impl ArtModule for FlowField {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Flow Field",
            "Organic flowing lines following mathematical vector fields",
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

        for _ in 0..NUM_LINES {
            let mut x = rng.range(0.0, w);
            let mut y = rng.range(0.0, h);

            let mut path = BezPath::new();
            path.move_to((x, y));
            let mut segment_weight = 0.5;

            for step in 0..MAX_STEPS {
                let angle = flow_angle(x, y);
                x += angle.cos() * STEP_SIZE;
                y += angle.sin() * STEP_SIZE;

                if x < 0.0 || x > w || y < 0.0 || y > h {
                    break;
                }

                // Line weight tracks local flow strength.
                segment_weight = 0.3 + noise(x, y).abs() * 0.8;
                path.line_to((x, y));

                // Occasional break for a hand-inked feel.
                if step > 0 && step % 30 == 0 && rng.chance(0.3) {
                    sketch.set_stroke_width(segment_weight);
                    sketch.stroke_path(&path, Color::BLACK);
                    path = BezPath::new();
                    path.move_to((x, y));
                }
            }

            sketch.set_stroke_width(segment_weight);
            sketch.stroke_path(&path, Color::BLACK);
        }

        // Anchor rings scattered over the field.
        sketch.set_stroke_width(1.0);
        for _ in 0..20 {
            let cx = rng.range(0.0, w);
            let cy = rng.range(0.0, h);
            let size = 2.0 + rng.range(0.0, 4.0);
            sketch.stroke_circle(cx, cy, size, Color::BLACK);
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
    fn flow_angle_is_bounded() {
        for x in 0..10 {
            for y in 0..10 {
                let a = flow_angle(f64::from(x) * 30.0, f64::from(y) * 20.0);
                assert!(a.abs() <= std::f64::consts::PI * 6.0);
            }
        }
    }

    #[test]
    fn renders_single_shot_and_paints() {
        let mut stage = Stage::new(Surface::new(120, 80).unwrap()).unwrap();
        let mut sketch = stage.sketch().unwrap();
        let outcome = FlowField
            .render(&mut sketch, &RenderEnv::seeded(11))
            .unwrap();
        assert!(outcome.is_none());
        stage.present(sketch).unwrap();
        assert!(stage.pixels().iter().any(|&b| b != 0));
    }
}
