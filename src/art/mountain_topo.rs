use crate::{
    canvas::{Color, Sketch},
    core::BezPath,
    error::EaselResult,
    module::{ArtModule, FrameLoop, Metadata, RenderEnv},
    rng::Rng,
};

/// Procedural mountain ridges contoured like a topographic map.
pub struct MountainTopo;

const RESOLUTION: f64 = 4.0;
const CONTOUR_LEVELS: [f64; 9] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];

const PAPER: Color = Color::rgb(0xF8, 0xF5, 0xF0);
const CONTOUR_BROWN: Color = Color::rgb(0x8B, 0x45, 0x13);
const RIDGE_BROWN: Color = Color::rgb(0x65, 0x43, 0x21);
const LABEL_GRAY: Color = Color::rgb(0x4A, 0x4A, 0x4A);

/// Layered-sine pseudo-noise; seed shifts the phase of every octave.
struct RidgeNoise {
    seed: f64,
}

impl RidgeNoise {
    fn new(seed: f64) -> Self {
        Self { seed }
    }

    fn ridge(&self, x: f64) -> f64 {
        (x * 0.01 + self.seed).sin() * 0.5
            + (x * 0.02 + self.seed * 2.0).sin() * 0.3
            + (x * 0.05 + self.seed * 3.0).sin() * 0.2
    }

    fn terrain(&self, x: f64, y: f64) -> f64 {
        (x * 0.008 + y * 0.005 + self.seed).sin() * 0.4
            + (x * 0.015 + y * 0.01 + self.seed * 1.7).sin() * 0.3
            + (x * 0.03 + y * 0.02 + self.seed * 2.3).sin() * 0.2
            + (x * 0.05 + y * 0.04 + self.seed * 3.1).sin() * 0.1
    }
}

/// Discretized elevation grid sampled every [`RESOLUTION`] pixels,
/// max-accumulated so overlapping ridges keep the higher ground.
pub(crate) struct HeightField {
    cols: usize,
    rows: usize,
    data: Vec<f64>,
}

impl HeightField {
    pub(crate) fn new(width: f64, height: f64) -> Self {
        let cols = (width / RESOLUTION).ceil() as usize + 1;
        let rows = (height / RESOLUTION).ceil() as usize + 1;
        Self {
            cols,
            rows,
            data: vec![0.0; cols * rows],
        }
    }

    fn index(&self, px: f64, py: f64) -> Option<usize> {
        if px < 0.0 || py < 0.0 {
            return None;
        }
        let col = (px / RESOLUTION) as usize;
        let row = (py / RESOLUTION) as usize;
        (col < self.cols && row < self.rows).then(|| row * self.cols + col)
    }

    pub(crate) fn get(&self, px: f64, py: f64) -> f64 {
        self.index(px, py).map_or(0.0, |i| self.data[i])
    }

    pub(crate) fn raise(&mut self, px: f64, py: f64, value: f64) {
        if let Some(i) = self.index(px, py) {
            self.data[i] = self.data[i].max(value);
        }
    }

    /// Raise a circular falloff patch of `influence` radius around a ridge
    /// point.
    fn raise_patch(&mut self, cx: f64, cy: f64, peak: f64, influence: f64) {
        let mut dy = -influence;
        while dy <= influence {
            let mut dx = -influence;
            while dx <= influence {
                let distance = (dx * dx + dy * dy).sqrt();
                if distance < influence {
                    let falloff = (1.0 - distance / influence).max(0.0);
                    self.raise(cx + dx, cy + dy, peak * falloff);
                }
                dx += RESOLUTION;
            }
            dy += RESOLUTION;
        }
    }

    /// Cell centers where `level` crosses the field: a four-corner
    /// above/below disagreement marks a contour cell.
    pub(crate) fn contour_cells(&self, level: f64, width: f64, height: f64) -> Vec<(f64, f64)> {
        let mut cells = Vec::new();
        let mut y = 0.0;
        while y < height - RESOLUTION {
            let mut x = 0.0;
            while x < width - RESOLUTION {
                let corners = [
                    self.get(x, y) >= level,
                    self.get(x + RESOLUTION, y) >= level,
                    self.get(x, y + RESOLUTION) >= level,
                    self.get(x + RESOLUTION, y + RESOLUTION) >= level,
                ];
                if corners.iter().any(|&c| c != corners[0]) {
                    cells.push((x + RESOLUTION / 2.0, y + RESOLUTION / 2.0));
                }
                x += RESOLUTION;
            }
            y += RESOLUTION;
        }
        cells
    }
}

struct RidgePoint {
    x: f64,
    y: f64,
    height: f64,
}

impl ArtModule for MountainTopo {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Mountain Topography",
            "Procedural mountain ridge generator with topographic contour lines",
        )
    }

    fn render(
        &self,
        sketch: &mut Sketch,
        env: &RenderEnv,
    ) -> EaselResult<Option<Box<dyn FrameLoop>>> {
        let (w, h) = (sketch.width(), sketch.height());
        let mut rng = Rng::seeded(env.seed);
        let noise = RidgeNoise::new(rng.range(0.0, 1000.0));

        sketch.fill_rect(0.0, 0.0, w, h, PAPER);

        let mut field = HeightField::new(w, h);

        // Main ridge wandering across the middle band.
        let ridge_y = h * (0.3 + rng.range(0.0, 0.4));
        let mut main_ridge = Vec::new();
        let mut x = 0.0;
        while x < w {
            let y = ridge_y + noise.ridge(x) * 40.0;
            let point = RidgePoint {
                x,
                y,
                height: 0.8 + rng.range(0.0, 0.4),
            };
            field.raise_patch(point.x, point.y, point.height, 60.0);
            main_ridge.push(point);
            x += 2.0;
        }

        // Branch ridges splitting off the main line, fading along their run.
        let num_branches = 8 + rng.range_usize(0, 6);
        for _ in 0..num_branches {
            let start = &main_ridge[rng.range_usize(0, main_ridge.len())];
            let angle = rng.range(-0.5, 0.5) * std::f64::consts::PI * 0.8;
            let length = 80.0 + rng.range(0.0, 120.0);
            let branch_height = start.height * (0.6 + rng.range(0.0, 0.3));

            let mut cx = start.x;
            let mut cy = start.y;
            let mut step = 0.0;
            while step < length {
                let wander = noise.terrain(cx, cy) * 0.3;
                cx += (angle + wander).cos() * 3.0;
                cy += (angle + wander).sin() * 3.0;
                if cx < 0.0 || cx >= w || cy < 0.0 || cy >= h {
                    break;
                }
                let fade = (1.0 - step / length).max(0.0);
                field.raise_patch(cx, cy, branch_height * fade, 30.0 + fade * 20.0);
                step += 3.0;
            }
        }

        // Contour markers, heavier toward the summits.
        for (level_index, &level) in CONTOUR_LEVELS.iter().enumerate() {
            sketch.set_stroke_width(match level_index {
                0..3 => 0.5,
                3..6 => 0.8,
                _ => 1.2,
            });
            let mut marks = BezPath::new();
            for (cx, cy) in field.contour_cells(level, w, h) {
                marks.move_to((cx - 2.0, cy));
                marks.line_to((cx + 2.0, cy));
                marks.move_to((cx, cy - 2.0));
                marks.line_to((cx, cy + 2.0));
            }
            sketch.stroke_path(&marks, CONTOUR_BROWN);
        }

        // Overdraw the main ridge line for emphasis.
        sketch.set_stroke_width(2.0);
        let mut ridge_path = BezPath::new();
        if let Some(first) = main_ridge.first() {
            ridge_path.move_to((first.x, first.y));
            for point in &main_ridge[1..] {
                ridge_path.line_to((point.x, point.y));
            }
        }
        sketch.stroke_path(&ridge_path, RIDGE_BROWN);

        // Spot elevations along the ridge.
        for i in 0..5 {
            if let Some(point) = main_ridge.get(i * main_ridge.len() / 5) {
                let elevation = (point.height * 1000.0 + 2000.0).floor();
                sketch.fill_text(
                    &format!("{elevation}m"),
                    point.x + 5.0,
                    point.y - 5.0,
                    10.0,
                    LABEL_GRAY,
                );
            }
        }

        Ok(None)
    }
}
