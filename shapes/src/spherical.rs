//! Spherical Caps

use crate::shape::LocalHit;
use optics_core::geometry::*;
use optics_core::raytrace::*;
use serde::{Deserialize, Serialize};

/// A spherical cap whose vertex sits on the z-axis at `z_height`. The
/// signed `curvature` is the radius of the sphere; a positive radius puts the
/// centre below the vertex so the cap bulges towards `+z`. The outward normal
/// at the vertex is `+z` for either sign. The cap is clipped to a cylinder of
/// the given diameter about the z-axis.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spherical {
    /// Clear aperture of the cap.
    pub diameter: Float,

    /// Height of the vertex.
    pub z_height: Float,

    /// Signed radius of curvature.
    pub curvature: Float,
}

impl Spherical {
    /// Create a new `Spherical` face.
    ///
    /// * `diameter`  - Clear aperture of the cap.
    /// * `z_height`  - Height of the vertex.
    /// * `curvature` - Signed radius of curvature.
    pub fn new(diameter: Float, z_height: Float, curvature: Float) -> Self {
        Self {
            diameter,
            z_height,
            curvature,
        }
    }

    /// Returns the centre of the sphere.
    pub fn centre(&self) -> Point3f {
        Point3f::new(0.0, 0.0, self.z_height - self.curvature)
    }

    /// Returns true if `p` lies on the vertex half of the sphere and within
    /// the aperture.
    ///
    /// * `p` - Point on the sphere.
    fn on_cap(&self, p: &Point3f) -> bool {
        let radius = self.diameter / 2.0;
        let dz = p.z - self.centre().z;
        p.x * p.x + p.y * p.y <= radius * radius && dz * self.curvature > 0.0
    }

    /// Returns the nearest hit beyond `epsilon`.
    ///
    /// * `o`       - Ray origin in local coordinates.
    /// * `d`       - Ray direction in local coordinates.
    /// * `epsilon` - Minimum valid distance.
    pub fn intersect(&self, o: &Point3f, d: &Vector3f, epsilon: Float) -> Option<LocalHit> {
        let r = self.curvature;
        if r == 0.0 || !r.is_finite() {
            return None;
        }

        let c = self.centre();
        let oc = *o - c;
        let a = d.length_squared();
        let b = 2.0 * d.dot(&oc);
        let cc = oc.length_squared() - r * r;
        let (t0, t1) = quadratic(a, b, cc)?;

        [t0, t1]
            .into_iter()
            .filter(|&t| t > epsilon && t.is_finite())
            .map(|t| (t, *o + *d * t))
            .find(|(_, p)| self.on_cap(p))
            .map(|(t, p)| LocalHit::new(t, Normal3f::from((p - c) / r)))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    const EPS: Float = 1e-6;

    #[test]
    fn convex_cap_from_outside() {
        let s = Spherical::new(20.0, 5.0, 25.0);
        let hit = s
            .intersect(&Point3f::new(0.0, 0.0, 10.0), &-Vector3f::Z, EPS)
            .unwrap();
        assert!(approx_eq!(Float, hit.t, 5.0, epsilon = 1e-9));
        assert!(approx_eq!(Float, hit.normal.z, 1.0, epsilon = 1e-12));
    }

    #[test]
    fn convex_cap_from_inside() {
        let s = Spherical::new(20.0, 5.0, 25.0);
        let hit = s.intersect(&Point3f::ORIGIN, &Vector3f::Z, EPS).unwrap();
        assert!(approx_eq!(Float, hit.t, 5.0, epsilon = 1e-9));
        assert!(approx_eq!(Float, hit.normal.z, 1.0, epsilon = 1e-12));
    }

    #[test]
    fn concave_cap_normal_still_faces_up() {
        let s = Spherical::new(20.0, 5.0, -25.0);
        let hit = s.intersect(&Point3f::ORIGIN, &Vector3f::Z, EPS).unwrap();
        assert!(approx_eq!(Float, hit.t, 5.0, epsilon = 1e-9));
        assert!(approx_eq!(Float, hit.normal.z, 1.0, epsilon = 1e-12));
    }

    #[test]
    fn outside_aperture_misses() {
        let s = Spherical::new(10.0, 5.0, 25.0);
        let o = Point3f::new(6.0, 0.0, 0.0);
        assert!(s.intersect(&o, &Vector3f::Z, EPS).is_none());
    }

    #[test]
    fn far_side_of_sphere_is_not_the_cap() {
        // From below the centre looking down hits only the far half.
        let s = Spherical::new(100.0, 5.0, 25.0);
        let o = Point3f::new(0.0, 0.0, -21.0);
        assert!(s.intersect(&o, &-Vector3f::Z, EPS).is_none());
    }

    #[test]
    fn flat_cap_is_degenerate() {
        let s = Spherical::new(10.0, 5.0, 0.0);
        assert!(s.intersect(&Point3f::ORIGIN, &Vector3f::Z, EPS).is_none());
    }

    proptest! {
        #[test]
        fn hit_lies_on_sphere(x in -3.5..3.5f64, y in -3.5..3.5f64) {
            let s = Spherical::new(10.0, 5.0, 25.0);
            let o = Point3f::new(x, y, -10.0);
            let hit = s.intersect(&o, &Vector3f::Z, EPS).unwrap();
            let p = o + Vector3f::Z * hit.t;
            prop_assert!(approx_eq!(Float, p.distance(&s.centre()), 25.0, epsilon = 1e-9));
            prop_assert!(approx_eq!(Float, hit.normal.length(), 1.0, epsilon = 1e-9));
        }
    }
}
