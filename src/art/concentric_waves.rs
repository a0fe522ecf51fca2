use crate::{
    canvas::{Color, Sketch},
    core::BezPath,
    error::EaselResult,
    module::{ArtModule, FrameLoop, Metadata, RenderEnv},
};

/// Interfering ring systems from three fixed wave sources.
pub struct ConcentricWaves;

struct WaveSource {
    x: f64,
    y: f64,
    frequency: f64,
    phase: f64,
}

fn sources(cx: f64, cy: f64) -> [WaveSource; 3] {
    use std::f64::consts::PI;
    [
        WaveSource {
            x: cx - 80.0,
            y: cy - 40.0,
            frequency: 15.0,
            phase: 0.0,
        },
        WaveSource {
            x: cx + 60.0,
            y: cy + 30.0,
            frequency: 18.0,
            phase: PI / 3.0,
        },
        WaveSource {
            x: cx,
            y: cy - 60.0,
            frequency: 12.0,
            phase: PI / 2.0,
        },
    ]
}

fn wave_at(sources: &[WaveSource], x: f64, y: f64, max_radius: f64, decay: bool) -> f64 {
    let mut total = 0.0;
    for source in sources {
        let dx = x - source.x;
        let dy = y - source.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance <= 0.0 {
            continue;
        }
        let wave = ((distance / source.frequency) * std::f64::consts::TAU + source.phase).sin();
        if decay {
            total += wave * (1.0 - distance / (max_radius * 0.8)).max(0.0);
        } else {
            total += wave;
        }
    }
    total
}

impl ArtModule for ConcentricWaves {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Concentric Waves",
            "Rhythmic line patterns creating interference and resonance",
        )
    }

    fn render(
        &self,
        sketch: &mut Sketch,
        _env: &RenderEnv,
    ) -> EaselResult<Option<Box<dyn FrameLoop>>> {
        let (w, h) = (sketch.width(), sketch.height());
        let center = sketch.surface().center();
        let max_radius = (center.x * center.x + center.y * center.y).sqrt();
        let sources = sources(center.x, center.y);

        sketch.fill_rect(0.0, 0.0, w, h, Color::WHITE);
        sketch.set_stroke_width(0.8);

        // Concentric rings, fading with radius.
        for source in &sources {
            let mut radius = 10.0;
            while radius < max_radius {
                let amplitude = (1.0 - radius / max_radius).max(0.0);
                if amplitude > 0.1 {
                    let adjusted = radius + source.phase.sin() * 3.0;
                    sketch.stroke_circle(
                        source.x,
                        source.y,
                        adjusted,
                        Color::BLACK.with_alpha(amplitude),
                    );
                }
                radius += source.frequency;
            }
        }

        // Dots where the waves constructively interfere.
        let resolution = 3.0;
        let mut y = 0.0;
        while y < h {
            let mut x = 0.0;
            while x < w {
                let total = wave_at(&sources, x, y, max_radius, true);
                if total.abs() > 1.5 {
                    let intensity = (total.abs() / 3.0).min(1.0);
                    sketch.fill_circle(x, y, 1.0, Color::BLACK.with_alpha(intensity));
                }
                x += resolution;
            }
            y += resolution;
        }

        // Radial lines, broken where interference falls quiet.
        sketch.set_stroke_width(0.5);
        let num_radial = 24;
        for i in 0..num_radial {
            let angle = f64::from(i) / f64::from(num_radial) * std::f64::consts::TAU;
            let mut path = BezPath::new();
            let mut pen_down = false;

            let mut r = 20.0;
            while r < max_radius * 0.9 {
                let x = center.x + angle.cos() * r;
                let y = center.y + angle.sin() * r;
                if wave_at(&sources, x, y, max_radius, false).abs() > 0.5 {
                    if pen_down {
                        path.line_to((x, y));
                    } else {
                        path.move_to((x, y));
                        pen_down = true;
                    }
                } else if pen_down {
                    sketch.stroke_path(&path, Color::BLACK);
                    path = BezPath::new();
                    pen_down = false;
                }
                r += 5.0;
            }
            if pen_down {
                sketch.stroke_path(&path, Color::BLACK);
            }
        }

        // Source markers: ring plus cross.
        sketch.set_stroke_width(2.0);
        for source in &sources {
            sketch.stroke_circle(source.x, source.y, 4.0, Color::BLACK);
            let mut cross = BezPath::new();
            cross.move_to((source.x - 6.0, source.y));
            cross.line_to((source.x + 6.0, source.y));
            cross.move_to((source.x, source.y - 6.0));
            cross.line_to((source.x, source.y + 6.0));
            sketch.stroke_path(&cross, Color::BLACK);
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Surface;
    use crate::stage::Stage;

    #[test]
    fn wave_sum_is_bounded_by_source_count() {
        let sources = sources(150.0, 100.0);
        for x in (0..300).step_by(17) {
            for y in (0..200).step_by(13) {
                let v = wave_at(&sources, f64::from(x), f64::from(y), 180.0, false);
                assert!(v.abs() <= 3.0 + 1e-9);
            }
        }
    }

    #[test]
    fn decay_reduces_far_field_contribution() {
        let sources = sources(150.0, 100.0);
        let raw = wave_at(&sources, 0.0, 0.0, 180.0, false).abs();
        let decayed = wave_at(&sources, 0.0, 0.0, 180.0, true).abs();
        assert!(decayed <= raw + 1e-9);
    }

    #[test]
    fn renders_single_shot_deterministically() {
        let render = || {
            let mut stage = Stage::new(Surface::new(150, 100).unwrap()).unwrap();
            let mut sketch = stage.sketch().unwrap();
            let outcome = ConcentricWaves
                .render(&mut sketch, &RenderEnv::seeded(0))
                .unwrap();
            assert!(outcome.is_none());
            stage.present(sketch).unwrap();
            stage.pixels().to_vec()
        };
        assert_eq!(render(), render());
    }
}
