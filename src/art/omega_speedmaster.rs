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

/// Dark chronograph dial with a chronograph sweep hand and three registers.
pub struct Speedmaster;

const FACE: FaceStyle = FaceStyle {
    bezel_ratio: 1.2,
    bezel_fill: Color::BLACK,
    bezel_stroke: BRUSHED_SILVER,
    bezel_stroke_width: 6.0,
    dial_fill: Color::BLACK,
    dial_stroke: Color::WHITE,
    hub_ratio: 0.04,
    hub_fill: Color::WHITE,
    hub_offset_y: 0.0,
};

const ORANGE: Color = Color::rgb(0xFF, 0xA5, 0x00);

const TACHY_NUMBERS: [u32; 22] = [
    450, 400, 350, 300, 250, 200, 150, 140, 130, 120, 110, 100, 90, 80, 70, 60, 175, 65, 75, 85,
    500, 600,
];

fn tachymeter_labels() -> Vec<(String, f64)> {
    TACHY_NUMBERS
        .iter()
        .map(|&num| ((3600.0 / f64::from(num)) * PI / 30.0, num))
        .map(|(angle, num)| (num.to_string(), angle))
        .collect()
}

fn register_labels(numbers: &[u32], last: u32) -> Vec<(String, f64)> {
    numbers
        .iter()
        .map(|&num| {
            let angle = f64::from(num) * PI / (f64::from(last) / 2.0);
            (num.to_string(), angle)
        })
        .collect()
}

fn draw(sketch: &mut Sketch, clock: WallClock) {
    let (w, h) = (sketch.width(), sketch.height());
    let center = sketch.surface().center();
    let radius = sketch.surface().min_side() / 2.0 * 0.6;

    sketch.fill_rect(0.0, 0.0, w, h, Color::WHITE);
    sketch.save();
    sketch.translate(center.x, center.y);

    draw_face(sketch, radius, &FACE);
    draw_logo(sketch, "\u{03A9}", radius, 0.7, 0.20, Color::WHITE);
    draw_logo(sketch, "Omega", radius, 0.55, 0.15, Color::WHITE);
    draw_logo(sketch, "Speedmaster", radius, 0.45, 0.10, Color::WHITE);
    draw_logo(sketch, "Professional", radius, 0.35, 0.10, Color::WHITE);

    draw_batons(sketch, radius, 0.0, 0.0, 12, radius * 0.04, radius * 0.20, Color::WHITE);
    draw_batons(sketch, radius, 0.0, 0.0, 60, radius * 0.01, radius * 0.15, Color::WHITE);
    draw_batons(sketch, radius, 0.0, 0.0, 300, radius * 0.005, radius * 0.04, Color::WHITE);

    // Registers at nine, six and three o'clock.
    for (sx, sy, count) in [
        (-radius * 0.5, 0.0, 12),
        (0.0, radius * 0.5, 12),
        (radius * 0.5, 0.0, 30),
    ] {
        draw_subdial(sketch, sx, sy, radius * 0.3, Color::WHITE, Color::WHITE, 0.1);
        draw_batons(sketch, radius * 0.3, sx, sy, count, radius * 0.01, radius * 0.06, Color::WHITE);
    }

    place_numerals(sketch, 0.0, 0.0, radius * 1.1, &tachymeter_labels(), radius * 0.10, Color::WHITE);
    place_numerals(
        sketch,
        -radius * 0.5,
        0.0,
        radius * 0.2,
        &register_labels(&[60, 20, 40], 60),
        radius * 0.10,
        Color::WHITE,
    );
    place_numerals(
        sketch,
        0.0,
        radius * 0.5,
        radius * 0.2,
        &register_labels(&[3, 6, 9, 12], 12),
        radius * 0.10,
        Color::WHITE,
    );
    place_numerals(
        sketch,
        radius * 0.5,
        0.0,
        radius * 0.2,
        &register_labels(&[10, 20, 30], 30),
        radius * 0.10,
        Color::WHITE,
    );

    let angles = hand_angles(clock);
    // Chronograph sweep simulated from the running seconds.
    let chrono_angle = f64::from(clock.second % 30) * PI / 15.0;

    draw_hand(sketch, angles.hour, radius * 0.65, radius * 0.04, 0.0, 0.0, HandShape::FlatSword, Color::WHITE);
    draw_hand(sketch, angles.minute, radius, radius * 0.04, 0.0, 0.0, HandShape::FlatSword, Color::WHITE);
    draw_hand(sketch, chrono_angle, radius, radius * 0.04, 0.0, 0.0, HandShape::Diamond, ORANGE);

    // Register hands; running seconds sit in the nine o'clock register.
    draw_hand(sketch, 0.0, radius * 0.3, radius * 0.02, 0.0, radius * 0.5, HandShape::FlatSword, Color::WHITE);
    draw_hand(sketch, 0.0, radius * 0.3, radius * 0.02, radius * 0.5, 0.0, HandShape::FlatSword, Color::WHITE);
    draw_hand(
        sketch,
        angles.second,
        radius * 0.3,
        radius * 0.02,
        -radius * 0.5,
        0.0,
        HandShape::FlatSword,
        Color::WHITE,
    );

    sketch.restore();
}

struct SpeedmasterLoop;

impl FrameLoop for SpeedmasterLoop {
    fn advance(&mut self, sketch: &mut Sketch, tick: &TickCtx) -> EaselResult<()> {
        draw(sketch, tick.clock);
        Ok(())
    }
}

impl ArtModule for Speedmaster {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Omega Speedmaster",
            "Professional chronograph with tachymeter and subdials",
        )
    }

    fn render(
        &self,
        sketch: &mut Sketch,
        env: &RenderEnv,
    ) -> EaselResult<Option<Box<dyn FrameLoop>>> {
        draw(sketch, env.clock);
        Ok(Some(Box::new(SpeedmasterLoop)))
    }
}
