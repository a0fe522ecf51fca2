use crate::{
    canvas::{Color, Sketch},
    core::BezPath,
    error::EaselResult,
    module::{ArtModule, FrameLoop, Metadata, RenderEnv},
    rng::Rng,
};

/// Two-point perspective box field.
///
/// The tunables are plain typed parameters, so a full-size host can rebuild
/// the module with new values and regenerate.
pub struct PerspectiveBoxes {
    pub eye_level: f64,
    pub eye_distance: f64,
    pub eye_x: f64,
    pub iterations: usize,
}

impl Default for PerspectiveBoxes {
    fn default() -> Self {
        // Tuned against the 800x600 reference surface; render() rescales.
        Self {
            eye_level: 300.0,
            eye_distance: 400.0,
            eye_x: 400.0,
            iterations: 100,
        }
    }
}

const REF_WIDTH: f64 = 800.0;
const REF_HEIGHT: f64 = 600.0;

/// White-black-white brightness ramp: boxes near the ramp center fill dark,
/// boxes near either end fill light.
fn ramp_shade(x: f64, ramp_width: f64) -> Color {
    let t = if ramp_width > 0.0 {
        (x / ramp_width).clamp(0.0, 1.0)
    } else {
        0.5
    };
    let v = ((t - 0.5).abs() * 2.0 * 255.0).round() as u8;
    Color::gray(v)
}

impl ArtModule for PerspectiveBoxes {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Perspective Boxes",
            "2-point perspective drawing with original gradient style",
        )
    }

    fn render(
        &self,
        sketch: &mut Sketch,
        env: &RenderEnv,
    ) -> EaselResult<Option<Box<dyn FrameLoop>>> {
        let (w, h) = (sketch.width(), sketch.height());
        let mut rng = Rng::seeded(env.seed);

        let eye_level = self.eye_level * h / REF_HEIGHT;
        let eye_distance = self.eye_distance * w / REF_WIDTH;
        let eye_x = self.eye_x * w / REF_WIDTH;

        sketch.fill_rect(0.0, 0.0, w, h, Color::WHITE);

        let alpha = 45.0_f64.to_radians();
        let beta = std::f64::consts::FRAC_PI_2 - alpha;
        let vp1_x = eye_x - eye_distance * alpha.tan();
        let vp2_x = eye_x + eye_distance * beta.tan();

        for _ in 0..self.iterations {
            let pm = if rng.chance(0.5) { -1.0 } else { 1.0 };
            let middle_x = vp2_x * rng.next_f64();
            let middle_y = eye_level * rng.next_f64() * pm + eye_level;
            let middle_len = 20.0 * rng.next_f64();
            let vp1_len = 20.0 * rng.next_f64();
            let vp2_len = 30.0 * rng.next_f64();

            let shade = ramp_shade(middle_x, vp2_x);

            // Right face, edges converging on the right vanishing point.
            let vp2_slope1 = (eye_level - middle_y - middle_len) / (vp2_x - middle_x);
            let vp2_slope2 = (eye_level - middle_y) / (vp2_x - middle_x);
            let vp2_b1 = -vp2_slope1 * middle_x + middle_y + middle_len;
            let vp2_b2 = -vp2_slope2 * middle_x + middle_y;

            let mut right = BezPath::new();
            right.move_to((middle_x, middle_y));
            right.line_to((middle_x, middle_y + middle_len));
            right.line_to((
                middle_x + vp2_len,
                vp2_slope1 * (middle_x + vp2_len) + vp2_b1,
            ));
            right.line_to((
                middle_x + vp2_len,
                vp2_slope2 * (middle_x + vp2_len) + vp2_b2,
            ));
            right.close_path();
            sketch.fill_path(&right, shade);

            // Left face, edges converging on the left vanishing point.
            let vp1_slope1 = (eye_level - middle_y - middle_len) / (vp1_x - middle_x);
            let vp1_slope2 = (eye_level - middle_y) / (vp1_x - middle_x);
            let vp1_b1 = -vp1_slope1 * middle_x + middle_y + middle_len;
            let vp1_b2 = -vp1_slope2 * middle_x + middle_y;

            let mut left = BezPath::new();
            left.move_to((middle_x, middle_y));
            left.line_to((middle_x, middle_y + middle_len));
            left.line_to((
                middle_x - vp1_len,
                vp1_slope1 * (middle_x - vp1_len) + vp1_b1,
            ));
            left.line_to((
                middle_x - vp1_len,
                vp1_slope2 * (middle_x - vp1_len) + vp1_b2,
            ));
            left.close_path();
            sketch.fill_path(&left, shade);
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
    fn ramp_shade_is_light_at_ends_dark_in_the_middle() {
        assert_eq!(ramp_shade(0.0, 100.0), Color::WHITE);
        assert_eq!(ramp_shade(100.0, 100.0), Color::WHITE);
        assert_eq!(ramp_shade(50.0, 100.0), Color::BLACK);
    }

    #[test]
    fn params_change_the_picture() {
        let render = |module: &PerspectiveBoxes| {
            let mut stage = Stage::new(Surface::new(100, 75).unwrap()).unwrap();
            let mut sketch = stage.sketch().unwrap();
            module.render(&mut sketch, &RenderEnv::seeded(1)).unwrap();
            stage.present(sketch).unwrap();
            stage.pixels().to_vec()
        };

        let default = render(&PerspectiveBoxes::default());
        let raised_eye = render(&PerspectiveBoxes {
            eye_level: 100.0,
            ..PerspectiveBoxes::default()
        });
        assert_eq!(default, render(&PerspectiveBoxes::default()));
        assert_ne!(default, raised_eye);
    }
}
