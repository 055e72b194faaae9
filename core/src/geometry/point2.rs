//! 2-D Points

use crate::raytrace::*;
use num_traits::Num;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,
}

/// 2-D point containing `Float` values.
pub type Point2f = Point2<Float>;

impl<T: Num> Point2<T> {
    /// Creates a new 2-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Num> From<(T, T)> for Point2<T> {
    /// Convert a tuple `(x, y)` to a 2-D point.
    ///
    /// * `p` - The tuple.
    fn from(p: (T, T)) -> Self {
        Self::new(p.0, p.1)
    }
}

/// Returns `true` if the point lies inside the polygon using the even-odd
/// rule. Points exactly on an edge may fall either way.
///
/// * `p`       - The point.
/// * `polygon` - Polygon vertices in order (closed implicitly).
pub fn point_in_polygon(p: &Point2f, polygon: &[Point2f]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

impl<T: fmt::Display> fmt::Display for Point2<T> {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
