//! Dielectric

use crate::fresnel::*;
use optics_core::geometry::*;
use optics_core::rays::Ray;
use optics_core::raytrace::*;
use serde::{Deserialize, Serialize};

/// An interface between two dielectric media. Rays are partially reflected
/// and partially refracted with Fresnel-weighted amplitudes, or totally
/// internally reflected.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dielectric {
    /// Index on the side the outward normal points away from.
    pub n_inside: Complex,

    /// Index on the side the outward normal points into.
    pub n_outside: Complex,
}

impl Dielectric {
    /// Create a new `Dielectric`.
    ///
    /// * `n_inside`  - Index on the inner side of the face.
    /// * `n_outside` - Index on the outer side of the face.
    pub fn new(n_inside: Complex, n_outside: Complex) -> Self {
        Self {
            n_inside,
            n_outside,
        }
    }

    /// Returns the incident and transmitted indices for a ray travelling
    /// along `d`, and the normal flipped to face the incident side.
    ///
    /// * `d`      - Unit ray direction.
    /// * `normal` - Unit outward normal.
    pub fn orient(&self, d: &Vector3f, normal: &Vector3f) -> (Complex, Complex, Vector3f) {
        let n = Vector3f::from(Normal3f::from(*normal).face_against(d));
        if n == *normal {
            (self.n_outside, self.n_inside, n)
        } else {
            (self.n_inside, self.n_outside, n)
        }
    }

    /// Append the reflected and, unless totally internally reflected, the
    /// refracted child of `ray` to `out`.
    ///
    /// * `ray`       - Incident ray.
    /// * `point`     - Intersection point.
    /// * `normal`    - Unit outward surface normal.
    /// * `parent_id` - Index of `ray` in its generation.
    /// * `out`       - Receives the children.
    pub fn eval_children(
        &self,
        ray: &Ray,
        point: &Point3f,
        normal: &Vector3f,
        parent_id: usize,
        out: &mut Vec<Ray>,
    ) {
        let d = ray.direction;
        let (n1, n2, n) = self.orient(&d, normal);
        let f = fresnel_dielectric(-d.dot(&n), n1, n2);
        let poi = plane_of_incidence(ray, &n);
        if !f.r_s.is_finite() || !f.r_p.is_finite() || !f.t_s.is_finite() || !f.t_p.is_finite() {
            debug!("Degenerate Fresnel coefficients at {} dropped", point);
            return;
        }

        let reflected = (d + n * (2.0 * f.cos_i)).normalize();
        out.push(Ray {
            origin: *point,
            direction: reflected,
            refractive_index: n1,
            e_vector: poi.s,
            e1_amp: f.r_s * poi.a_s,
            e2_amp: f.r_p * poi.a_p,
            parent_id,
        });

        if f.tir {
            return;
        }

        let eta = (n1 / n2).re;
        let transmitted = (d * eta + n * (eta * f.cos_i - f.cos_t.re)).normalize();
        if !transmitted.is_finite() {
            debug!("Degenerate refraction at {} dropped", point);
            return;
        }

        out.push(Ray {
            origin: *point,
            direction: transmitted,
            refractive_index: n2,
            e_vector: poi.s,
            e1_amp: f.t_s * poi.a_s,
            e2_amp: f.t_p * poi.a_p,
            parent_id,
        });
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
