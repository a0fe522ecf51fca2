use crate::{
    canvas::{Color, Sketch},
    core::BezPath,
    error::EaselResult,
    module::{ArtModule, FrameLoop, Metadata, RenderEnv},
};

/// Cross-hatched portrait driven by a scalar ink-density field.
pub struct HatchingPortrait;

const CELL: f64 = 4.0;
const CROSS_THRESHOLD: f64 = 0.5;
const DIAGONAL_THRESHOLD: f64 = 0.7;

/// Ink density at `(x, y)` for a face centered on `(cx, cy)`.
///
/// Regions are expressed in the portrait's own coordinate offsets, matching
/// the piece's fixed facial layout.
fn density(x: f64, y: f64, cx: f64, cy: f64, face_radius: f64) -> f64 {
    let dx = x - cx;
    let dy = y - cy;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance < face_radius {
        // Nose
        if dx.abs() < 15.0 && dy > -20.0 && dy < 20.0 {
            return 0.7;
        }
        // Eyes
        if ((dx > -40.0 && dx < -20.0) || (dx > 20.0 && dx < 40.0)) && dy > -40.0 && dy < -20.0 {
            return 0.8;
        }
        // Mouth
        if dx.abs() < 25.0 && dy > 30.0 && dy < 50.0 {
            return 0.6;
        }
        // Cheek shadows
        if dx.abs() > 30.0 && dy.abs() < 30.0 {
            return 0.4;
        }
        return 0.2;
    }

    // Hair
    if distance < face_radius * 1.3 && dy < 0.0 {
        return 0.9;
    }

    0.0
}

fn hatch_cell(path: &mut BezPath, x: f64, y: f64, size: f64, density: f64) {
    let lines = (density * 8.0).floor() as usize;
    let spacing = size / (lines as f64 + 1.0);

    // Horizontal pass.
    for i in 1..=lines {
        let ly = y + i as f64 * spacing;
        path.move_to((x, ly));
        path.line_to((x + size, ly));
    }

    // Crossed pass for darker cells.
    if density > CROSS_THRESHOLD {
        for i in 1..=lines {
            let lx = x + i as f64 * spacing;
            path.move_to((lx, y));
            path.line_to((lx, y + size));
        }
    }

    // Diagonal pass for the darkest cells.
    if density > DIAGONAL_THRESHOLD {
        path.move_to((x, y));
        path.line_to((x + size, y + size));
        path.move_to((x + size, y));
        path.line_to((x, y + size));
    }
}

impl ArtModule for HatchingPortrait {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Hatching Portrait",
            "Cross-hatching technique creating depth and form",
        )
    }

    fn render(
        &self,
        sketch: &mut Sketch,
        _env: &RenderEnv,
    ) -> EaselResult<Option<Box<dyn FrameLoop>>> {
        let (w, h) = (sketch.width(), sketch.height());
        let center = sketch.surface().center();
        let face_radius = sketch.surface().min_side() * 0.25;

        sketch.fill_rect(0.0, 0.0, w, h, Color::WHITE);
        sketch.set_stroke_width(0.8);

        let mut path = BezPath::new();
        let mut y = 0.0;
        while y < h {
            let mut x = 0.0;
            while x < w {
                let d = density(x, y, center.x, center.y, face_radius);
                if d > 0.1 {
                    hatch_cell(&mut path, x, y, CELL, d);
                }
                x += CELL;
            }
            y += CELL;
        }
        sketch.stroke_path(&path, Color::BLACK);

        Ok(None)
    }
}
