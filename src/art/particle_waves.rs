use crate::{
    canvas::{Color, Sketch},
    error::EaselResult,
    module::{ArtModule, FrameLoop, Metadata, RenderEnv, TickCtx},
    rng::Rng,
};

/// Wave-forced particle field with proximity links and trailing fade.
pub struct ParticleWaves;

const NUM_PARTICLES: usize = 50;
const LINK_DISTANCE: f64 = 60.0;
const NIGHT: Color = Color::rgb(10, 10, 30);

struct Particle {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    size: f64,
    hue: f64,
}

struct WavesLoop {
    particles: Vec<Particle>,
    time: f64,
}

impl WavesLoop {
    fn new(rng: &mut Rng, width: f64, height: f64) -> Self {
        let particles = (0..NUM_PARTICLES)
            .map(|_| Particle {
                x: rng.range(0.0, width),
                y: rng.range(0.0, height),
                vx: rng.range(-1.0, 1.0),
                vy: rng.range(-1.0, 1.0),
                size: rng.range(0.0, 3.0) + 1.0,
                hue: rng.range(0.0, 360.0),
            })
            .collect();
        Self {
            particles,
            time: 0.0,
        }
    }
}

impl FrameLoop for WavesLoop {
    fn advance(&mut self, sketch: &mut Sketch, _tick: &TickCtx) -> EaselResult<()> {
        let (w, h) = (sketch.width(), sketch.height());

        // Translucent wash over the previous frame leaves trails.
        sketch.fill_rect(0.0, 0.0, w, h, NIGHT.with_alpha(0.1));

        for particle in &mut self.particles {
            let wave = (self.time * 0.02 + particle.x * 0.01).sin() * 2.0;
            particle.y += wave * 0.5;
            particle.x += particle.vx;
            particle.y += particle.vy;

            // Wrap at the edges.
            if particle.x < 0.0 {
                particle.x = w;
            }
            if particle.x > w {
                particle.x = 0.0;
            }
            if particle.y < 0.0 {
                particle.y = h;
            }
            if particle.y > h {
                particle.y = 0.0;
            }
        }

        for (index, particle) in self.particles.iter().enumerate() {
            let hue = (particle.hue + self.time * 0.5) % 360.0;
            let body = Color::from_hsl(hue, 0.7, 0.6).with_alpha(0.8);
            // Soft halo pass under the particle body.
            sketch.fill_circle(
                particle.x,
                particle.y,
                particle.size * 2.0,
                body.with_alpha(0.15),
            );
            sketch.fill_circle(particle.x, particle.y, particle.size, body);

            for other in &self.particles[index + 1..] {
                let dx = particle.x - other.x;
                let dy = particle.y - other.y;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance < LINK_DISTANCE {
                    let alpha = (LINK_DISTANCE - distance) / LINK_DISTANCE * 0.3;
                    sketch.set_stroke_width(1.0);
                    sketch.line(
                        particle.x,
                        particle.y,
                        other.x,
                        other.y,
                        Color::rgb(100, 150, 255).with_alpha(alpha),
                    );
                }
            }
        }

        self.time += 1.0;
        Ok(())
    }
}

impl ArtModule for ParticleWaves {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Particle Waves",
            "Flowing wave patterns with interactive particles",
        )
    }

    fn render(
        &self,
        sketch: &mut Sketch,
        env: &RenderEnv,
    ) -> EaselResult<Option<Box<dyn FrameLoop>>> {
        let mut rng = Rng::seeded(env.seed);
        let mut frame_loop = WavesLoop::new(&mut rng, sketch.width(), sketch.height());

        // Paint the first frame immediately so the tile is never blank.
        frame_loop.advance(
            sketch,
            &TickCtx {
                frame: crate::core::FrameIndex(0),
                clock: env.clock,
            },
        )?;
        Ok(Some(Box::new(frame_loop)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FrameIndex, Surface, WallClock};

    #[test]
    fn particles_stay_in_bounds_under_wraparound() {
        let surface = Surface::new(100, 80).unwrap();
        let mut rng = Rng::seeded(6);
        let mut frame_loop = WavesLoop::new(&mut rng, 100.0, 80.0);

        let stage = crate::stage::Stage::new(surface).unwrap();
        let tick = TickCtx {
            frame: FrameIndex(1),
            clock: WallClock::fixed(0, 0, 0, 0),
        };
        for _ in 0..120 {
            let mut sketch = stage.sketch().unwrap();
            frame_loop.advance(&mut sketch, &tick).unwrap();
        }
        for p in &frame_loop.particles {
            assert!((0.0..=100.0).contains(&p.x));
            assert!((0.0..=80.0).contains(&p.y));
        }
    }

    #[test]
    fn render_paints_first_frame_and_returns_loop() {
        let mut stage = crate::stage::Stage::new(Surface::new(100, 80).unwrap()).unwrap();
        let mut sketch = stage.sketch().unwrap();
        let outcome = ParticleWaves
            .render(&mut sketch, &RenderEnv::seeded(2))
            .unwrap();
        assert!(outcome.is_some());
        stage.present(sketch).unwrap();
        assert!(stage.pixels().iter().any(|&b| b != 0));
    }
}
