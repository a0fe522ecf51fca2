use crate::error::{EaselError, EaselResult};

pub use kurbo::{Affine, BezPath, Circle, Point, Rect, Shape, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Fixed-size raster target dimensions in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    /// Default grid tile size.
    pub const GRID: Surface = Surface {
        width: 300,
        height: 200,
    };

    /// Full-size viewer surface.
    pub const VIEWER: Surface = Surface {
        width: 800,
        height: 600,
    };

    pub fn new(width: u32, height: u32) -> EaselResult<Self> {
        if width == 0 || height == 0 {
            return Err(EaselError::render("surface width/height must be > 0"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(EaselError::render("surface width/height exceed u16"));
        }
        Ok(Self { width, height })
    }

    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    pub fn min_side(self) -> f64 {
        self.width_f64().min(self.height_f64())
    }

    pub fn center(self) -> Point {
        Point::new(self.width_f64() / 2.0, self.height_f64() / 2.0)
    }

    pub fn byte_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// A wall-clock reading decomposed into the fields watch dials consume.
///
/// System-backed by default, fixed-value in tests so hand angles are
/// reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallClock {
    pub hour: u32,   // 0..24
    pub minute: u32, // 0..60
    pub second: u32, // 0..60
    pub millisecond: u32,
}

impl WallClock {
    pub fn system() -> Self {
        use chrono::Timelike;

        let now = chrono::Local::now();
        Self {
            hour: now.hour(),
            minute: now.minute(),
            second: now.second(),
            millisecond: now.timestamp_subsec_millis() % 1000,
        }
    }

    pub fn fixed(hour: u32, minute: u32, second: u32, millisecond: u32) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
            second: second % 60,
            millisecond: millisecond % 1000,
        }
    }

    /// Seconds including the fractional millisecond carry.
    pub fn second_f64(self) -> f64 {
        f64::from(self.second) + f64::from(self.millisecond) / 1000.0
    }
}
