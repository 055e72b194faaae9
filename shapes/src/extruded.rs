//! Extruded Planar Faces

use crate::shape::LocalHit;
use optics_core::geometry::*;
use optics_core::raytrace::*;
use serde::{Deserialize, Serialize};

/// A rectangle swept along z from the profile edge `(x1, y1) -> (x2, y2)`
/// between the heights `z1` and `z2`. The outward normal lies to the right
/// of the edge direction, so the edges of a counter-clockwise profile all
/// face outwards.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtrudedPlanar {
    /// Start of the profile edge, x.
    pub x1: Float,

    /// Start of the profile edge, y.
    pub y1: Float,

    /// End of the profile edge, x.
    pub x2: Float,

    /// End of the profile edge, y.
    pub y2: Float,

    /// Lower extrusion height.
    pub z1: Float,

    /// Upper extrusion height.
    pub z2: Float,
}

impl ExtrudedPlanar {
    /// Create a new face from a profile edge.
    ///
    /// * `p1` - Start of the profile edge.
    /// * `p2` - End of the profile edge.
    /// * `z1` - First extrusion height.
    /// * `z2` - Second extrusion height.
    pub fn new(p1: Point2f, p2: Point2f, z1: Float, z2: Float) -> Self {
        Self {
            x1: p1.x,
            y1: p1.y,
            x2: p2.x,
            y2: p2.y,
            z1,
            z2,
        }
    }

    /// Returns the unit outward normal, not finite for a zero-length edge.
    pub fn normal(&self) -> Normal3f {
        Normal3f::new(self.y2 - self.y1, self.x1 - self.x2, 0.0).normalize()
    }

    /// Returns the nearest hit beyond `epsilon`.
    ///
    /// * `o`       - Ray origin in local coordinates.
    /// * `d`       - Ray direction in local coordinates.
    /// * `epsilon` - Minimum valid distance.
    pub fn intersect(&self, o: &Point3f, d: &Vector3f, epsilon: Float) -> Option<LocalHit> {
        let n = self.normal();
        let denom = n.dot(d);
        if denom == 0.0 || !denom.is_finite() {
            return None;
        }

        let p1 = Point3f::new(self.x1, self.y1, 0.0);
        let t = n.dot(&(p1 - *o)) / denom;
        if !(t > epsilon && t.is_finite()) {
            return None;
        }

        // Position along the edge and within the extrusion.
        let p = *o + *d * t;
        let edge = Vector3f::new(self.x2 - self.x1, self.y2 - self.y1, 0.0);
        let u = (p - p1).dot(&edge) / edge.length_squared();
        let (z_lo, z_hi) = (min(self.z1, self.z2), max(self.z1, self.z2));
        if !(0.0..=1.0).contains(&u) || p.z < z_lo || p.z > z_hi {
            return None;
        }

        Some(LocalHit::new(t, n))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    const EPS: Float = 1e-6;

    fn wall() -> ExtrudedPlanar {
        // Edge along +y at x = 1; outward normal to its right is +x.
        ExtrudedPlanar::new(Point2f::new(1.0, -1.0), Point2f::new(1.0, 1.0), 0.0, 2.0)
    }

    #[test]
    fn normal_is_right_of_edge() {
        assert_eq!(wall().normal(), Normal3f::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn hit_within_bounds() {
        let hit = wall()
            .intersect(&Point3f::new(0.0, 0.5, 1.0), &Vector3f::X, EPS)
            .unwrap();
        assert!(approx_eq!(Float, hit.t, 1.0, ulps = 2));
    }

    #[test]
    fn miss_outside_edge_or_height() {
        let w = wall();
        assert!(w.intersect(&Point3f::new(0.0, 1.5, 1.0), &Vector3f::X, EPS).is_none());
        assert!(w.intersect(&Point3f::new(0.0, 0.0, 2.5), &Vector3f::X, EPS).is_none());
        assert!(w.intersect(&Point3f::new(0.0, 0.0, 1.0), &Vector3f::Y, EPS).is_none());
    }

    #[test]
    fn zero_length_edge_never_hits() {
        let w = ExtrudedPlanar::new(Point2f::new(1.0, 1.0), Point2f::new(1.0, 1.0), 0.0, 2.0);
        assert!(w.intersect(&Point3f::ORIGIN, &Vector3f::X, EPS).is_none());
    }
}
