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

/// Minimalist Bauhaus dial: sparse numerals, blued hands, small seconds.
pub struct Tangente;

const BLUE: Color = Color::rgb(0x00, 0x00, 0xCD);

const FACE: FaceStyle = FaceStyle {
    bezel_ratio: 1.1,
    bezel_fill: BRUSHED_SILVER,
    bezel_stroke: Color::BLACK,
    bezel_stroke_width: 2.0,
    dial_fill: Color::WHITE,
    dial_stroke: Color::BLACK,
    hub_ratio: 0.06,
    hub_fill: BLUE,
    hub_offset_y: 0.0,
};

/// Only even hours away from the subdial get a numeral.
fn sparse_hour_labels() -> Vec<(String, f64)> {
    [2u32, 4, 8, 10, 12]
        .iter()
        .map(|&num| (num.to_string(), f64::from(num) * PI / 6.0))
        .collect()
}

fn draw(sketch: &mut Sketch, clock: WallClock) {
    let (w, h) = (sketch.width(), sketch.height());
    let center = sketch.surface().center();
    let radius = sketch.surface().min_side() / 2.0 * 0.7;
    let seconds_y = radius * 0.5;

    sketch.fill_rect(0.0, 0.0, w, h, Color::WHITE);
    sketch.save();
    sketch.translate(center.x, center.y);

    draw_face(sketch, radius, &FACE);
    draw_logo(sketch, "NOMOS", radius, 0.4, 0.15, Color::BLACK);

    draw_batons(sketch, radius * 0.95, 0.0, 0.0, 12, radius * 0.02, radius * 0.08, Color::BLACK);
    draw_batons(sketch, radius * 0.95, 0.0, 0.0, 60, radius * 0.01, radius * 0.08, Color::BLACK);

    draw_subdial(sketch, 0.0, seconds_y, radius * 0.3, Color::BLACK, Color::gray(0x80), 0.04);
    draw_batons(sketch, radius * 0.25, 0.0, seconds_y, 12, radius * 0.01, radius * 0.04, Color::BLACK);

    place_numerals(
        sketch,
        0.0,
        0.0,
        radius * 0.7,
        &sparse_hour_labels(),
        radius * 0.2,
        Color::BLACK,
    );

    let angles = hand_angles(clock);
    draw_hand(sketch, angles.hour, radius * 0.6, radius * 0.03, 0.0, 0.0, HandShape::FlatSword, BLUE);
    draw_hand(sketch, angles.minute, radius * 0.95, radius * 0.03, 0.0, 0.0, HandShape::FlatSword, BLUE);
    draw_hand(
        sketch,
        angles.second,
        radius * 0.25,
        radius * 0.02,
        0.0,
        seconds_y,
        HandShape::Counterweight,
        BLUE,
    );

    sketch.restore();
}

struct TangenteLoop;

impl FrameLoop for TangenteLoop {
    fn advance(&mut self, sketch: &mut Sketch, tick: &TickCtx) -> EaselResult<()> {
        draw(sketch, tick.clock);
        Ok(())
    }
}

impl ArtModule for Tangente {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Nomos Tangente",
            "Minimalist German design with blue accents and subdial",
        )
    }

    fn render(
        &self,
        sketch: &mut Sketch,
        env: &RenderEnv,
    ) -> EaselResult<Option<Box<dyn FrameLoop>>> {
        draw(sketch, env.clock);
        Ok(Some(Box::new(TangenteLoop)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Surface;
    use crate::stage::Stage;

    #[test]
    fn sparse_labels_skip_the_subdial_hours() {
        let labels = sparse_hour_labels();
        let names: Vec<&str> = labels.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(names, vec!["2", "4", "8", "10", "12"]);
        assert!(!names.contains(&"6"), "six o'clock belongs to the subdial");
    }

    #[test]
    fn face_redraws_identically_for_a_fixed_clock() {
        let face_at = |clock: WallClock| {
            let mut stage = Stage::new(Surface::new(120, 120).unwrap()).unwrap();
            let mut sketch = stage.sketch().unwrap();
            draw(&mut sketch, clock);
            stage.present(sketch).unwrap();
            stage.pixels().to_vec()
        };
        let clock = WallClock::fixed(10, 8, 42, 0);
        assert_eq!(face_at(clock), face_at(clock));
    }
}
