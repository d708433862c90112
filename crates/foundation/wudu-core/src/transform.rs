//! Grid → plotting space transform.
//!
//! The five-level grid is drawn as a diamond: the grid is rotated by 45°
//! so that equal start/end levels fall on the vertical axis.

use serde::{Deserialize, Serialize};

pub const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// A point in plotting space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    /// Horizontal axis: contour direction (falling < 0 < rising)
    pub u: f64,
    /// Vertical axis: overall pitch height
    pub v: f64,
}

impl Coord {
    pub const fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`.
    pub fn lerp(self, other: Coord, t: f64) -> Coord {
        Coord {
            u: self.u + t * (other.u - self.u),
            v: self.v + t * (other.v - self.v),
        }
    }

    /// Shift by a plotting-space offset
    pub fn offset(self, du: f64, dv: f64) -> Coord {
        Coord {
            u: self.u + du,
            v: self.v + dv,
        }
    }
}

impl From<(f64, f64)> for Coord {
    fn from((u, v): (f64, f64)) -> Self {
        Self { u, v }
    }
}

/// Map a grid coordinate (levels 1..=5) to plotting space.
///
/// `u = (y - x) / √2`, `v = (y + x) / √2`. Total over all reals.
pub fn transform(x: f64, y: f64) -> Coord {
    Coord {
        u: (y - x) / SQRT_2,
        v: (y + x) / SQRT_2,
    }
}
