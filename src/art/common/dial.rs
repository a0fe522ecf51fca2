//! Polar layout shared by every watch face: bezel/dial painting, radial
//! baton placement, upright numeral placement, hand shapes, and the
//! time-to-angle mapping. The faces differ only in styling and composition.
//!
//! All helpers assume the sketch origin is already translated to the dial
//! center; offsets are expressed in dial coordinates like the pieces
//! themselves use.

use std::f64::consts::PI;

use crate::{
    canvas::{Color, Sketch},
    core::{BezPath, WallClock},
};

#[derive(Clone, Copy, Debug)]
pub struct FaceStyle {
    /// Bezel radius as a multiple of the dial radius.
    pub bezel_ratio: f64,
    pub bezel_fill: Color,
    pub bezel_stroke: Color,
    pub bezel_stroke_width: f64,
    pub dial_fill: Color,
    pub dial_stroke: Color,
    /// Center hub radius as a multiple of the dial radius.
    pub hub_ratio: f64,
    pub hub_fill: Color,
    /// Hub offset below center, as a multiple of the dial radius.
    pub hub_offset_y: f64,
}

/// Flat silver for brushed-metal bezels.
pub const BRUSHED_SILVER: Color = Color::rgb(0xC9, 0xC9, 0xC9);

pub fn draw_face(sketch: &mut Sketch, radius: f64, style: &FaceStyle) {
    // Bezel ring.
    sketch.set_stroke_width(style.bezel_stroke_width);
    sketch.fill_circle(0.0, 0.0, radius * style.bezel_ratio, style.bezel_fill);
    sketch.stroke_circle(0.0, 0.0, radius * style.bezel_ratio, style.bezel_stroke);

    // Dial.
    sketch.set_stroke_width(1.0);
    sketch.fill_circle(0.0, 0.0, radius, style.dial_fill);
    sketch.stroke_circle(0.0, 0.0, radius, style.dial_stroke);

    // Center hub.
    sketch.fill_circle(
        0.0,
        radius * style.hub_offset_y,
        radius * style.hub_ratio,
        style.hub_fill,
    );
}

/// Angles for `count` evenly spaced marks, one full turn, 1-based like the
/// dials count them (so the last mark lands at 12 o'clock).
pub fn ring_angles(count: u32) -> impl Iterator<Item = (u32, f64)> {
    (1..=count).map(move |num| (num, f64::from(num) * PI / (f64::from(count) / 2.0)))
}

/// Radial batons in a band ending at `radius`, centered on `(cx, cy)`.
pub fn draw_batons(
    sketch: &mut Sketch,
    radius: f64,
    cx: f64,
    cy: f64,
    count: u32,
    width: f64,
    length: f64,
    color: Color,
) {
    let location = radius - length / 2.0;
    sketch.save();
    sketch.translate(cx, cy);

    for (_, angle) in ring_angles(count) {
        sketch.save();
        sketch.rotate(angle);
        sketch.translate(0.0, -location);
        sketch.fill_rect(-width / 2.0, -length / 2.0, width, length, color);
        sketch.restore();
    }

    sketch.restore();
}

/// Place labels at polar positions around `(cx, cy)`, rotated into place and
/// counter-rotated so the text stays upright.
pub fn place_numerals(
    sketch: &mut Sketch,
    cx: f64,
    cy: f64,
    distance: f64,
    labels: &[(String, f64)],
    size: f64,
    color: Color,
) {
    for (label, angle) in labels {
        sketch.save();
        sketch.translate(cx, cy);
        sketch.rotate(*angle);
        sketch.translate(0.0, -distance);
        sketch.rotate(-angle);
        sketch.fill_text(label, 0.0, 0.0, size, color);
        sketch.restore();
    }
}

/// The standard 1..=count numeral ring.
pub fn numeral_ring(count: u32) -> Vec<(String, f64)> {
    ring_angles(count)
        .map(|(num, angle)| (num.to_string(), angle))
        .collect()
}

/// Brand or model text at a height above center.
pub fn draw_logo(sketch: &mut Sketch, text: &str, radius: f64, location: f64, size: f64, color: Color) {
    sketch.fill_text(text, 0.0, -radius * location, radius * size, color);
}

/// Minute-register subdial: outlined ring with a small hub.
pub fn draw_subdial(
    sketch: &mut Sketch,
    cx: f64,
    cy: f64,
    radius: f64,
    ring: Color,
    hub: Color,
    hub_ratio: f64,
) {
    sketch.set_stroke_width(1.0);
    sketch.stroke_circle(cx, cy, radius, ring);
    sketch.fill_circle(cx, cy, radius * hub_ratio, hub);
}

#[derive(Clone, Copy, Debug)]
pub enum HandShape {
    /// Tapered leaf drawn with two bezier lobes.
    Leaf,
    /// Straight blade with a pointed tip.
    FlatSword,
    /// Needle with a counterweight tail.
    Counterweight,
    /// Counterweight needle with a diamond inset near the tip.
    Diamond,
}

/// Draw one hand rotated to `angle` around `(cx, cy)`, pointing outward.
pub fn draw_hand(
    sketch: &mut Sketch,
    angle: f64,
    length: f64,
    width: f64,
    cx: f64,
    cy: f64,
    shape: HandShape,
    color: Color,
) {
    sketch.save();
    sketch.translate(cx, cy);
    sketch.rotate(angle);

    match shape {
        HandShape::Leaf => {
            let mut path = BezPath::new();
            path.move_to((0.0, 0.0));
            path.curve_to(
                (width / 2.0, -length / 5.0),
                (width / 2.0, -length / 3.0),
                (0.0, -length),
            );
            path.curve_to(
                (-width / 2.0, -length / 3.0),
                (-width / 2.0, -length / 5.0),
                (0.0, 0.0),
            );
            sketch.fill_path(&path, color);
        }
        HandShape::FlatSword => {
            let blade = length * 0.95;
            sketch.fill_rect(-width / 2.0, -blade, width, blade, color);
            let mut tip = BezPath::new();
            tip.move_to((-width / 2.0, -blade));
            tip.line_to((0.0, -length));
            tip.line_to((width / 2.0, -blade));
            tip.close_path();
            sketch.fill_path(&tip, color);
        }
        HandShape::Counterweight => {
            sketch.fill_path(&counterweight_path(length, width), color);
        }
        HandShape::Diamond => {
            sketch.fill_path(&counterweight_path(length, width), color);

            let dx = 0.13;
            let mut diamond = BezPath::new();
            diamond.move_to((0.0, -length * 0.65));
            diamond.line_to((width * 10.0 * dx, -length * 0.7));
            diamond.line_to((0.0, -length * 0.83));
            diamond.line_to((-width * 10.0 * dx, -length * 0.7));
            diamond.close_path();
            sketch.fill_path(&diamond, color);
        }
    }

    sketch.restore();
}

fn counterweight_path(length: f64, width: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((0.0, -length));
    path.line_to((width * 0.2, -length));
    path.line_to((width / 2.0, length / 4.0));
    path.line_to((-width / 2.0, length / 4.0));
    path.line_to((-width * 0.2, -length));
    path.close_path();
    path
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

/// Hand angles with fractional carry-over: minutes advance the hour hand,
/// seconds advance the minute hand, milliseconds sweep the second hand.
pub fn hand_angles(clock: WallClock) -> HandAngles {
    let hour = f64::from(clock.hour % 12);
    let minute = f64::from(clock.minute);
    let second = f64::from(clock.second);

    HandAngles {
        hour: hour * PI / 6.0 + minute * PI / (6.0 * 60.0) + second * PI / (360.0 * 60.0),
        minute: minute * PI / 30.0 + second * PI / (30.0 * 60.0),
        second: clock.second_f64() * PI / 30.0,
    }
}
