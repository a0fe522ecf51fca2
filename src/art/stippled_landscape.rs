use crate::{
    canvas::{Color, Sketch},
    error::EaselResult,
    module::{ArtModule, FrameLoop, Metadata, RenderEnv},
    rng::Rng,
};

/// Pointillist hills, sky and trees built from density-gated dots.
pub struct StippledLandscape;

fn hill_height(x: f64, horizon: f64) -> f64 {
    let base = horizon + (x * 0.01).sin() * 30.0 + (x * 0.005).sin() * 50.0;
    base + (x * 0.02).sin() * 10.0 + (x * 0.03).sin() * 5.0
}

fn stipple(sketch: &mut Sketch, rng: &mut Rng, x: f64, y: f64, density: f64) {
    if rng.chance(density) {
        let dot = 0.5 + rng.range(0.0, 1.0);
        sketch.fill_circle(x, y, dot, Color::BLACK);
    }
}

impl ArtModule for StippledLandscape {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Stippled Landscape",
            "Pointillism technique creating rolling hills and sky",
        )
    }

    fn render(
        &self,
        sketch: &mut Sketch,
        env: &RenderEnv,
    ) -> EaselResult<Option<Box<dyn FrameLoop>>> {
        let (w, h) = (sketch.width(), sketch.height());
        let mut rng = Rng::seeded(env.seed);
        let horizon = h * 0.6;

        sketch.fill_rect(0.0, 0.0, w, h, Color::WHITE);

        // Sky: sparse dots thinning toward the horizon, denser in cloud bands.
        let mut y = 0.0;
        while y < horizon {
            let mut x = 0.0;
            while x < w {
                let sky = (horizon - y) / horizon * 0.02;
                let cloud_noise = (x * 0.008 + y * 0.005).sin() * (x * 0.003).cos();
                let density = if cloud_noise > 0.3 { sky * 3.0 } else { sky };
                let jx = x + rng.range(0.0, 3.0);
                let jy = y + rng.range(0.0, 3.0);
                stipple(sketch, &mut rng, jx, jy, density);
                x += 3.0;
            }
            y += 3.0;
        }

        // Ground: densest at the surface, thinning with depth, textured.
        let mut y = 0.0;
        while y < h {
            let mut x = 0.0;
            while x < w {
                let ground = hill_height(x, horizon);
                if y > ground {
                    let depth = y - ground;
                    let surface = (0.4 - depth * 0.01).max(0.0);
                    let texture = (x * 0.02).sin() * (y * 0.015).cos();
                    let density = surface + texture * 0.1;
                    let jx = x + rng.range(0.0, 2.0);
                    let jy = y + rng.range(0.0, 2.0);
                    stipple(sketch, &mut rng, jx, jy, density);
                }
                x += 2.0;
            }
            y += 2.0;
        }

        // Trees: dense trunk columns plus elliptical canopies.
        for _ in 0..8 {
            let tree_x = rng.range(0.0, w);
            let ground_y = hill_height(tree_x, horizon);
            let tree_height = 20.0 + rng.range(0.0, 40.0);

            let mut y = ground_y - tree_height;
            while y < ground_y {
                let mut x = tree_x - 2.0;
                while x < tree_x + 2.0 {
                    let jx = x + rng.range(0.0, 2.0);
                    let jy = y + rng.range(0.0, 2.0);
                    stipple(sketch, &mut rng, jx, jy, 0.7);
                    x += 1.0;
                }
                y += 1.0;
            }

            let canopy_radius = 10.0 + rng.range(0.0, 15.0);
            let canopy_y = ground_y - tree_height;
            let mut angle = 0.0;
            while angle < std::f64::consts::TAU {
                let mut r = 0.0;
                while r < canopy_radius {
                    let x = tree_x + angle.cos() * r;
                    let y = canopy_y + angle.sin() * r * 0.6;
                    let density = (canopy_radius - r) / canopy_radius * 0.6;
                    let jx = x + rng.range(0.0, 2.0);
                    let jy = y + rng.range(0.0, 2.0);
                    stipple(sketch, &mut rng, jx, jy, density);
                    r += 2.0;
                }
                angle += 0.1;
            }
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
    fn hill_height_stays_near_horizon_band() {
        let horizon = 120.0;
        for x in 0..300 {
            let y = hill_height(f64::from(x), horizon);
            assert!(y > horizon - 100.0 && y < horizon + 100.0);
        }
    }

    #[test]
    fn same_seed_reproduces_pixels() {
        let render = |seed: u64| {
            let mut stage = Stage::new(Surface::new(100, 80).unwrap()).unwrap();
            let mut sketch = stage.sketch().unwrap();
            StippledLandscape
                .render(&mut sketch, &RenderEnv::seeded(seed))
                .unwrap();
            stage.present(sketch).unwrap();
            stage.pixels().to_vec()
        };
        assert_eq!(render(4), render(4));
        assert_ne!(render(4), render(5));
    }
}
