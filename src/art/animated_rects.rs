use crate::{
    canvas::{Color, Sketch},
    error::EaselResult,
    module::{ArtModule, FrameLoop, Metadata, RenderEnv, TickCtx},
    rng::Rng,
};

/// Grayscale rectangles accumulating over a bounded run, then holding.
pub struct AnimatedRects;

/// Two seconds at a 30Hz draw cadence.
pub(crate) const FRAMES: u64 = 60;
const RECTS_PER_FRAME: usize = 5;

struct RectsLoop {
    rng: Rng,
    frames_drawn: u64,
}

impl FrameLoop for RectsLoop {
    fn advance(&mut self, sketch: &mut Sketch, _tick: &TickCtx) -> EaselResult<()> {
        if self.frames_drawn >= FRAMES {
            return Ok(());
        }
        self.frames_drawn += 1;

        let center = sketch.surface().center();
        sketch.save();
        sketch.translate(center.x, center.y);

        for _ in 0..RECTS_PER_FRAME {
            let width = 100.0 * self.rng.range(0.0, 0.5);
            let length = 100.0 * self.rng.range(0.0, 0.5);
            let location = 70.0;
            let gray = Color::gray((self.rng.next_u64() % 256) as u8);

            sketch.save();
            sketch.rotate(std::f64::consts::PI * self.rng.next_f64());
            sketch.translate(
                location * self.rng.next_f64(),
                location * self.rng.next_f64(),
            );
            sketch.set_stroke_width(2.0 * self.rng.next_f64());
            sketch.stroke_rect(-width / 2.0, -length / 2.0, width, length, gray);
            sketch.restore();
        }

        sketch.restore();
        Ok(())
    }
}

impl ArtModule for AnimatedRects {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Animated Rectangles",
            "Random grayscale rectangles with rotation and animation",
        )
    }

    fn render(
        &self,
        sketch: &mut Sketch,
        env: &RenderEnv,
    ) -> EaselResult<Option<Box<dyn FrameLoop>>> {
        sketch.fill_rect(0.0, 0.0, sketch.width(), sketch.height(), Color::WHITE);
        Ok(Some(Box::new(RectsLoop {
            rng: Rng::seeded(env.seed),
            frames_drawn: 0,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Surface, WallClock};
    use crate::loader::Loader;
    use crate::stage::Stage;

    #[test]
    fn stops_accumulating_after_the_frame_budget() {
        let loader = Loader::new();
        let mut stage = Stage::new(Surface::new(100, 80).unwrap()).unwrap();
        loader.invoke("animated-rects", &mut stage, &RenderEnv::seeded(4));

        let clock = WallClock::fixed(0, 0, 0, 0);
        for _ in 0..FRAMES {
            stage.tick(clock).unwrap();
        }
        let at_budget = stage.pixels().to_vec();
        for _ in 0..10 {
            stage.tick(clock).unwrap();
        }
        assert_eq!(stage.pixels(), &at_budget[..]);
    }

    #[test]
    fn frames_accumulate_rather_than_replace() {
        let loader = Loader::new();
        let mut stage = Stage::new(Surface::new(100, 80).unwrap()).unwrap();
        loader.invoke("animated-rects", &mut stage, &RenderEnv::seeded(4));

        let clock = WallClock::fixed(0, 0, 0, 0);
        stage.tick(clock).unwrap();
        let early = stage
            .pixels()
            .iter()
            .filter(|&&b| b != 0 && b != 255)
            .count();
        for _ in 0..20 {
            stage.tick(clock).unwrap();
        }
        let later = stage
            .pixels()
            .iter()
            .filter(|&&b| b != 0 && b != 255)
            .count();
        assert!(later >= early);
    }
}
