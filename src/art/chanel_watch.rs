use std::f64::consts::PI;

use crate::{
    canvas::{Color, Sketch},
    core::WallClock,
    error::EaselResult,
    module::{ArtModule, FrameLoop, Metadata, RenderEnv, TickCtx},
};

use super::common::dial::{
    BRUSHED_SILVER, FaceStyle, HandShape, draw_batons, draw_face, draw_hand, draw_logo,
    draw_subdial, hand_angles, place_numerals,
};

/// Regulator-style dial: minutes from an off-center axis, digital hour
/// window, running seconds in a lower register, gold furniture.
pub struct ChanelWatch;

const GOLD: Color = Color::rgb(0xFF, 0xD7, 0x00);

const FACE: FaceStyle = FaceStyle {
    bezel_ratio: 1.1,
    bezel_fill: BRUSHED_SILVER,
    bezel_stroke: Color::BLACK,
    bezel_stroke_width: 2.0,
    dial_fill: Color::WHITE,
    dial_stroke: Color::BLACK,
    hub_ratio: 0.06,
    hub_fill: GOLD,
    hub_offset_y: -0.2,
};

/// Minute track: 0, 5, ... 60 around the upper axis.
fn minute_track_labels() -> Vec<(String, f64)> {
    (0..=12)
        .map(|i| {
            let num = i * 5;
            let angle = (f64::from(num) - 30.0) * PI / 30.0;
            (num.to_string(), angle)
        })
        .collect()
}

fn draw(sketch: &mut Sketch, clock: WallClock) {
    let (w, h) = (sketch.width(), sketch.height());
    let center = sketch.surface().center();
    let radius = sketch.surface().min_side() / 2.0 * 0.8;
    // The minute axis sits above center, the seconds register below.
    let minute_y = -radius * 0.2;
    let seconds_y = radius * 0.2;

    sketch.fill_rect(0.0, 0.0, w, h, Color::WHITE);
    sketch.save();
    sketch.translate(center.x, center.y);

    draw_face(sketch, radius, &FACE);
    draw_logo(sketch, "Chanel", radius, 0.4, 0.15, Color::BLACK);

    draw_batons(sketch, radius * 0.6, 0.0, minute_y, 12, radius * 0.02, radius * 0.02, Color::BLACK);
    draw_batons(sketch, radius * 0.6, 0.0, minute_y, 60, radius * 0.01, radius * 0.02, Color::BLACK);

    draw_subdial(sketch, 0.0, seconds_y, radius * 0.25, Color::BLACK, GOLD, 0.08);
    draw_batons(sketch, radius * 0.23, 0.0, seconds_y, 12, radius * 0.02, radius * 0.02, Color::BLACK);
    draw_batons(sketch, radius * 0.23, 0.0, seconds_y, 60, radius * 0.01, radius * 0.02, Color::BLACK);

    place_numerals(
        sketch,
        0.0,
        minute_y,
        radius * 0.7,
        &minute_track_labels(),
        radius * 0.08,
        Color::BLACK,
    );

    let angles = hand_angles(clock);
    draw_hand(
        sketch,
        angles.minute,
        radius * 0.6,
        radius * 0.03,
        0.0,
        minute_y,
        HandShape::FlatSword,
        GOLD,
    );

    // Hour as a printed window instead of a hand.
    sketch.fill_text(
        &format!("{:02}", clock.hour),
        0.0,
        radius * 0.7,
        radius * 0.1,
        Color::BLACK,
    );

    draw_hand(
        sketch,
        angles.second,
        radius * 0.2,
        radius * 0.01,
        0.0,
        seconds_y,
        HandShape::FlatSword,
        GOLD,
    );

    sketch.restore();
}

struct ChanelLoop;

impl FrameLoop for ChanelLoop {
    fn advance(&mut self, sketch: &mut Sketch, tick: &TickCtx) -> EaselResult<()> {
        draw(sketch, tick.clock);
        Ok(())
    }
}

impl ArtModule for ChanelWatch {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Chanel Watch",
            "Detailed analog watch face with subdials and gold accents",
        )
    }

    fn render(
        &self,
        sketch: &mut Sketch,
        env: &RenderEnv,
    ) -> EaselResult<Option<Box<dyn FrameLoop>>> {
        draw(sketch, env.clock);
        Ok(Some(Box::new(ChanelLoop)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Surface;
    use crate::loader::Loader;
    use crate::stage::Stage;

    #[test]
    fn minute_track_runs_zero_to_sixty_in_fives() {
        let labels = minute_track_labels();
        assert_eq!(labels.len(), 13);
        assert_eq!(labels[0].0, "0");
        assert_eq!(labels[12].0, "60");
        // Zero sits at the bottom of the track (rotated half a turn).
        assert!((labels[0].1 + PI).abs() < 1e-9);
    }

    #[test]
    fn invocation_is_animated_and_paints() {
        let loader = Loader::new();
        let mut stage = Stage::new(Surface::new(120, 120).unwrap()).unwrap();
        let outcome = loader.invoke("chanel-watch", &mut stage, &RenderEnv::seeded(1));
        assert!(outcome.cancel_handle().is_some());
        assert!(stage.pixels().iter().any(|&b| b != 0));
    }
}
