use crate::{
    canvas::{Color, Sketch},
    core::WallClock,
    error::EaselResult,
    module::{ArtModule, FrameLoop, Metadata, RenderEnv, TickCtx},
};

use super::common::dial::{
    BRUSHED_SILVER, FaceStyle, HandShape, draw_batons, draw_face, draw_hand, draw_logo,
    draw_subdial, hand_angles, numeral_ring, place_numerals,
};

/// Traditional chronograph: three subdials, tachymeter scale, leaf hands.
pub struct ClassicWatch;

const FACE: FaceStyle = FaceStyle {
    bezel_ratio: 1.2,
    bezel_fill: Color::BLACK,
    bezel_stroke: BRUSHED_SILVER,
    bezel_stroke_width: 6.0,
    dial_fill: Color::WHITE,
    dial_stroke: Color::BLACK,
    hub_ratio: 0.04,
    hub_fill: Color::BLACK,
    hub_offset_y: 0.0,
};

const TACHY_NUMBERS: [u32; 22] = [
    450, 400, 350, 300, 250, 200, 150, 140, 130, 120, 110, 100, 90, 80, 70, 60, 175, 65, 75, 85,
    500, 600,
];

fn tachymeter_labels() -> Vec<(String, f64)> {
    TACHY_NUMBERS
        .iter()
        .map(|&num| {
            let angle = (3600.0 / f64::from(num)) * std::f64::consts::PI / 30.0;
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
    place_numerals(sketch, 0.0, 0.0, radius * 0.75, &numeral_ring(12), radius * 0.15, Color::BLACK);
    place_numerals(sketch, 0.0, 0.0, radius * 0.65, &numeral_ring(60), radius * 0.05, Color::BLACK);
    draw_logo(sketch, "Omega", radius, 0.3, 0.15, Color::BLACK);

    draw_batons(sketch, radius, 0.0, 0.0, 12, radius * 0.05, radius * 0.15, Color::BLACK);
    draw_batons(sketch, radius, 0.0, 0.0, 60, radius * 0.01, radius * 0.08, Color::BLACK);

    // Registers at nine, six and three o'clock.
    for (sx, sy, count) in [
        (-radius * 0.4, 0.0, 12),
        (0.0, radius * 0.4, 12),
        (radius * 0.4, 0.0, 30),
    ] {
        draw_subdial(sketch, sx, sy, radius * 0.2, Color::BLACK, Color::BLACK, 0.1);
        draw_batons(sketch, radius * 0.2, sx, sy, count, radius * 0.01, radius * 0.04, Color::BLACK);
    }

    place_numerals(
        sketch,
        0.0,
        0.0,
        radius * 1.1,
        &tachymeter_labels(),
        radius * 0.10,
        Color::WHITE,
    );

    let angles = hand_angles(clock);
    draw_hand(sketch, angles.hour, radius * 0.6, radius * 0.07, 0.0, 0.0, HandShape::Leaf, Color::BLACK);
    draw_hand(sketch, angles.minute, radius, radius * 0.07, 0.0, 0.0, HandShape::Leaf, Color::BLACK);
    // Running seconds live in the six o'clock register.
    draw_hand(
        sketch,
        angles.second,
        radius * 0.2,
        radius * 0.01,
        0.0,
        radius * 0.4,
        HandShape::Counterweight,
        Color::BLACK,
    );

    sketch.restore();
}

struct ClassicLoop;

impl FrameLoop for ClassicLoop {
    fn advance(&mut self, sketch: &mut Sketch, tick: &TickCtx) -> EaselResult<()> {
        draw(sketch, tick.clock);
        Ok(())
    }
}

impl ArtModule for ClassicWatch {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Classic Watch",
            "Traditional timepiece with multiple subdials and tachymeter",
        )
    }

    fn render(
        &self,
        sketch: &mut Sketch,
        env: &RenderEnv,
    ) -> EaselResult<Option<Box<dyn FrameLoop>>> {
        draw(sketch, env.clock);
        Ok(Some(Box::new(ClassicLoop)))
    }
}
