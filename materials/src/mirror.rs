//! Mirror

use crate::fresnel::plane_of_incidence;
use optics_core::geometry::*;
use optics_core::rays::Ray;
use optics_core::raytrace::*;
use serde::{Deserialize, Serialize};

/// A perfect electrical conductor, optionally lossy. Rays are reflected
/// about the normal; nothing is transmitted.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mirror {
    /// Complex amplitude reflection coefficient; `1` for an ideal mirror.
    pub reflectivity: Complex,
}

impl Default for Mirror {
    fn default() -> Self {
        Self {
            reflectivity: real(1.0),
        }
    }
}

impl Mirror {
    /// Create a new `Mirror`.
    ///
    /// * `reflectivity` - Complex amplitude reflection coefficient.
    pub fn new(reflectivity: Complex) -> Self {
        Self { reflectivity }
    }

    /// Append the reflected child of `ray` to `out`.
    ///
    /// * `ray`       - Incident ray.
    /// * `point`     - Intersection point.
    /// * `normal`    - Unit surface normal (either orientation).
    /// * `parent_id` - Index of `ray` in its generation.
    /// * `out`       - Receives the child.
    pub fn eval_children(
        &self,
        ray: &Ray,
        point: &Point3f,
        normal: &Vector3f,
        parent_id: usize,
        out: &mut Vec<Ray>,
    ) {
        let d = ray.direction;
        let n = Vector3f::from(Normal3f::from(*normal).face_against(&d));
        let cos_i = -d.dot(&n);
        let poi = plane_of_incidence(ray, &n);

        // The p-axis flips with the direction, so an ideal conductor keeps
        // the sign of the p amplitude and inverts the s amplitude.
        out.push(Ray {
            origin: *point,
            direction: (d + n * (2.0 * cos_i)).normalize(),
            refractive_index: ray.refractive_index,
            e_vector: poi.s,
            e1_amp: -self.reflectivity * poi.a_s,
            e2_amp: self.reflectivity * poi.a_p,
            parent_id,
        });
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

    #[test]
    fn lossy_mirror_scales_amplitude() {
        let ray = Ray::new(Point3f::ORIGIN, Vector3f::Z);
        let mut out = vec![];
        Mirror::new(real(0.5)).eval_children(&ray, &Point3f::ORIGIN, &Vector3f::Z, 0, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].direction, -Vector3f::Z);
        assert!(approx_eq!(Float, out[0].intensity(), 0.25, epsilon = 1e-12));
    }

    prop_compose! {
        fn upper_hemisphere()(theta in 0.0..1.5f64, phi in 0.0..6.28f64) -> Vector3f {
            Vector3f::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos())
        }
    }

    proptest! {
        #[test]
        fn ideal_mirror_preserves_intensity(d in upper_hemisphere()) {
            let mut ray = Ray::new(Point3f::ORIGIN, d);
            ray.e2_amp = Complex::new(0.3, -0.4);
            let mut out = vec![];
            Mirror::default().eval_children(&ray, &Point3f::ORIGIN, &-Vector3f::Z, 0, &mut out);
            let r = out[0];
            prop_assert!(approx_eq!(Float, r.intensity(), ray.intensity(), epsilon = 1e-9));
            prop_assert!(approx_eq!(Float, r.direction.z, -d.z, epsilon = 1e-9));
            prop_assert!(approx_eq!(Float, r.e_vector.dot(&r.direction), 0.0, epsilon = 1e-9));
        }
    }
}
