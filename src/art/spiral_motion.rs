use crate::{
    canvas::{Color, Sketch},
    core::BezPath,
    error::EaselResult,
    module::{ArtModule, FrameLoop, Metadata, RenderEnv, TickCtx},
};

/// Rotating spiral with orbiting particles.
pub struct SpiralMotion;

const SPIRAL_BLUE: Color = Color::rgb(0x4A, 0x9E, 0xFF);
const PARTICLE_RED: Color = Color::rgb(0xFF, 0x6B, 0x6B);
const MIDNIGHT: Color = Color::rgb(0x00, 0x00, 0x11);

struct SpiralLoop {
    time: f64,
}

impl FrameLoop for SpiralLoop {
    fn advance(&mut self, sketch: &mut Sketch, _tick: &TickCtx) -> EaselResult<()> {
        use std::f64::consts::{PI, TAU};

        let (w, h) = (sketch.width(), sketch.height());
        let center = sketch.surface().center();
        let max_radius = sketch.surface().min_side() * 0.4;

        sketch.fill_rect(0.0, 0.0, w, h, MIDNIGHT);

        // Spiral polyline, phase-shifted by time.
        let turns = PI * 8.0;
        let mut path = BezPath::new();
        let mut angle = 0.0;
        while angle < turns {
            let radius = angle / turns * max_radius;
            let x = center.x + (angle + self.time * 0.02).cos() * radius;
            let y = center.y + (angle + self.time * 0.02).sin() * radius;
            if angle == 0.0 {
                path.move_to((x, y));
            } else {
                path.line_to((x, y));
            }
            angle += 0.1;
        }
        // Halo pass first, crisp line over it.
        sketch.set_stroke_width(5.0);
        sketch.stroke_path(&path, SPIRAL_BLUE.with_alpha(0.25));
        sketch.set_stroke_width(2.0);
        sketch.stroke_path(&path, SPIRAL_BLUE);

        // Orbiting particles.
        for i in 0..6 {
            let particle_angle = f64::from(i) / 6.0 * TAU + self.time * 0.03;
            let orbit = max_radius * 0.7;
            let x = center.x + particle_angle.cos() * orbit;
            let y = center.y + particle_angle.sin() * orbit;
            sketch.fill_circle(x, y, 7.0, PARTICLE_RED.with_alpha(0.25));
            sketch.fill_circle(x, y, 4.0, PARTICLE_RED);
        }

        self.time += 1.0;
        Ok(())
    }
}

impl ArtModule for SpiralMotion {
    fn metadata(&self) -> Metadata {
        Metadata::new("Spiral Motion", "Animated spiral with rotating particles")
    }

    fn render(
        &self,
        sketch: &mut Sketch,
        env: &RenderEnv,
    ) -> EaselResult<Option<Box<dyn FrameLoop>>> {
        let mut frame_loop = SpiralLoop { time: 0.0 };
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
