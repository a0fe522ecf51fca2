//! The rectangle-walk figure shared by the three rectangle pieces.

use crate::canvas::{Color, Sketch};

pub(crate) const PALETTE: [Color; 5] = [
    Color::rgb(0xFF, 0x00, 0x00),
    Color::rgb(0x00, 0x00, 0x00),
    Color::rgb(0x44, 0x44, 0x44),
    Color::rgb(0xFF, 0xFF, 0x00),
    Color::rgb(0x00, 0x00, 0xFF),
];

pub(crate) const BEIGE: Color = Color::rgb(0xF5, 0xF5, 0xDC);

/// Rotated outline rectangles drifting out from the center.
///
/// `next` abstracts over the random source so the fresh-random and
/// fixed-sequence variants stay the same drawing.
pub(crate) fn rect_tangle(
    sketch: &mut Sketch,
    color: Color,
    mut next: impl FnMut() -> f64,
    count: usize,
) {
    let center = sketch.surface().center();
    sketch.save();
    sketch.translate(center.x, center.y);

    for _ in 0..count {
        let width = 80.0 * next();
        let length = 80.0 * next();
        let location = 10.0;

        sketch.rotate(std::f64::consts::PI * next());
        sketch.translate(location * next(), location * next());
        sketch.set_stroke_width(next() * 4.0);
        sketch.stroke_rect(-width / 2.0, -length / 2.0, width, length, color);
        // The walk compounds: each rectangle inherits the previous frame
        // of reference, which is what gives the figure its drift.
        sketch.translate(width, length);
    }

    sketch.restore();
}
