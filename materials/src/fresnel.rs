//! Fresnel Coefficients

use optics_core::geometry::*;
use optics_core::rays::Ray;
use optics_core::raytrace::*;

/// Complex amplitude coefficients at a planar interface. The p-coefficients
/// are expressed in the `(s, direction x s)` basis of each outgoing ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FresnelCoefficients {
    /// Reflection coefficient for the s-component.
    pub r_s: Complex,

    /// Reflection coefficient for the p-component.
    pub r_p: Complex,

    /// Transmission coefficient for the s-component.
    pub t_s: Complex,

    /// Transmission coefficient for the p-component.
    pub t_p: Complex,

    /// Cosine of the angle of incidence.
    pub cos_i: Float,

    /// Complex cosine of the angle of refraction.
    pub cos_t: Complex,

    /// True when the interface totally internally reflects.
    pub tir: bool,
}

impl FresnelCoefficients {
    /// Returns the fraction of incident s-power that is transmitted.
    pub fn transmittance_s(&self, n1: Complex, n2: Complex) -> Float {
        self.t_s.norm_sqr() * self.power_ratio(n1, n2)
    }

    /// Returns the fraction of incident p-power that is transmitted.
    pub fn transmittance_p(&self, n1: Complex, n2: Complex) -> Float {
        self.t_p.norm_sqr() * self.power_ratio(n1, n2)
    }

    /// Ratio of transmitted to incident power flux per unit squared amplitude.
    fn power_ratio(&self, n1: Complex, n2: Complex) -> Float {
        safe_ratio((n2 * self.cos_t).re, (n1 * self.cos_i).re)
    }
}

/// Compute the Fresnel amplitude coefficients for light going from a medium
/// with index `n1` into one with index `n2`. Indices may be complex for
/// absorbing media.
///
/// * `cos_i` - Cosine of the angle of incidence in `[0, 1]`.
/// * `n1`    - Index of the incident medium.
/// * `n2`    - Index of the transmitted medium.
pub fn fresnel_dielectric(cos_i: Float, n1: Complex, n2: Complex) -> FresnelCoefficients {
    let cos_i = clamp(cos_i, 0.0, 1.0);

    // No interface: everything passes straight through. Grazing rays would
    // otherwise divide zero by zero.
    if n1 == n2 {
        return FresnelCoefficients {
            r_s: real(0.0),
            r_p: real(0.0),
            t_s: real(1.0),
            t_p: real(1.0),
            cos_i,
            cos_t: real(cos_i),
            tir: false,
        };
    }

    let sin_i = max(0.0, 1.0 - cos_i * cos_i).sqrt();

    // Snell's law with complex indices.
    let sin_t = n1 / n2 * sin_i;
    let cos_t = (real(1.0) - sin_t * sin_t).sqrt();
    let tir = sin_t.re > 1.0;

    let n1_cos_i = n1 * cos_i;
    let n2_cos_t = n2 * cos_t;
    let n2_cos_i = n2 * cos_i;
    let n1_cos_t = n1 * cos_t;

    let r_s = (n1_cos_i - n2_cos_t) / (n1_cos_i + n2_cos_t);
    let r_p = (n2_cos_i - n1_cos_t) / (n2_cos_i + n1_cos_t);
    let t_s = (n1_cos_i * 2.0) / (n1_cos_i + n2_cos_t);
    let t_p = (n1_cos_i * 2.0) / (n2_cos_i + n1_cos_t);

    FresnelCoefficients {
        r_s,
        r_p,
        t_s,
        t_p,
        cos_i,
        cos_t,
        tir,
    }
}

/// Incident field resolved against the plane of incidence.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneOfIncidence {
    /// Unit vector perpendicular to the plane of incidence. This becomes the
    /// `e_vector` of every outgoing ray.
    pub s: Vector3f,

    /// Complex amplitude along `s`.
    pub a_s: Complex,

    /// Complex amplitude along `direction x s`.
    pub a_p: Complex,
}

/// Resolve the ray's field into s and p components relative to the surface
/// normal. At normal incidence the plane of incidence is undefined and the
/// ray's own `e_vector` is used as `s`.
///
/// * `ray`    - Incident ray.
/// * `normal` - Unit surface normal (either orientation).
pub fn plane_of_incidence(ray: &Ray, normal: &Vector3f) -> PlaneOfIncidence {
    let d = ray.direction;
    let cross = d.cross(normal);
    let s = if cross.length_squared() > 1e-18 {
        cross.normalize()
    } else {
        ray.e_vector
    };
    let p = d.cross(&s);

    let e = ray.e_vector;
    let h = ray.h_vector();
    let a_s = ray.e1_amp * e.dot(&s) + ray.e2_amp * h.dot(&s);
    let a_p = ray.e1_amp * e.dot(&p) + ray.e2_amp * h.dot(&p);

    PlaneOfIncidence { s, a_s, a_p }
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
    fn normal_incidence_glass() {
        let f = fresnel_dielectric(1.0, real(1.0), real(1.5));
        assert!(approx_eq!(Float, f.r_s.re, -0.2, epsilon = 1e-12));
        assert!(approx_eq!(Float, f.t_s.re, 0.8, epsilon = 1e-12));
        assert!(approx_eq!(Float, f.r_p.re, 0.2, epsilon = 1e-12));
        assert!(approx_eq!(Float, f.t_p.re, 0.8, epsilon = 1e-12));
        assert!(!f.tir);
    }

    #[test]
    fn grazing_incidence_reflects_everything() {
        let f = fresnel_dielectric(0.0, real(1.0), real(1.5));
        assert!(approx_eq!(Float, f.r_s.norm(), 1.0, epsilon = 1e-9));
        assert!(approx_eq!(Float, f.r_p.norm(), 1.0, epsilon = 1e-9));
    }

    #[test]
    fn matched_indices_transmit_at_grazing() {
        let f = fresnel_dielectric(0.0, real(1.33), real(1.33));
        assert_eq!(f.r_s, real(0.0));
        assert_eq!(f.r_p, real(0.0));
        assert_eq!(f.t_s, real(1.0));
        assert_eq!(f.t_p, real(1.0));
        assert!(!f.tir);
    }

    #[test]
    fn brewster_angle_has_no_p_reflection() {
        let theta_b = (1.5 as Float).atan();
        let f = fresnel_dielectric(theta_b.cos(), real(1.0), real(1.5));
        assert!(approx_eq!(Float, f.r_p.norm(), 0.0, epsilon = 1e-9));
    }

    #[test]
    fn decompose_at_normal_incidence_uses_e_vector() {
        let ray = Ray::new(Point3f::ORIGIN, Vector3f::Z);
        let poi = plane_of_incidence(&ray, &Vector3f::new(0.0, 0.0, -1.0));
        assert_eq!(poi.s, ray.e_vector);
        assert!(approx_eq!(Float, poi.a_s.re, 1.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, poi.a_p.norm(), 0.0, epsilon = 1e-12));
    }

    prop_compose! {
        fn oblique_ray()(
            theta in 0.01..1.5f64,
            phi in 0.0..6.28f64,
            e1 in -1.0..1.0f64,
            e2 in -1.0..1.0f64
        ) -> Ray {
            let d = Vector3f::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos());
            let mut ray = Ray::new(Point3f::ORIGIN, d);
            ray.e1_amp = real(e1);
            ray.e2_amp = Complex::new(0.0, e2);
            ray
        }
    }

    proptest! {
        #[test]
        fn decomposition_preserves_intensity(ray in oblique_ray()) {
            let poi = plane_of_incidence(&ray, &Vector3f::new(0.0, 0.0, -1.0));
            let after = poi.a_s.norm_sqr() + poi.a_p.norm_sqr();
            prop_assert!(approx_eq!(Float, after, ray.intensity(), epsilon = 1e-9));
        }

        #[test]
        fn lossless_interface_conserves_energy(
            cos_i in 0.01..1.0f64,
            n1 in 1.0..2.0f64,
            n2 in 1.0..2.0f64
        ) {
            let (n1, n2) = (real(n1), real(n2));
            let f = fresnel_dielectric(cos_i, n1, n2);
            prop_assume!(!f.tir);
            let total_s = f.r_s.norm_sqr() + f.transmittance_s(n1, n2);
            let total_p = f.r_p.norm_sqr() + f.transmittance_p(n1, n2);
            prop_assert!(approx_eq!(Float, total_s, 1.0, epsilon = 1e-9));
            prop_assert!(approx_eq!(Float, total_p, 1.0, epsilon = 1e-9));
        }

        #[test]
        fn supercritical_incidence_is_total(
            n1 in 1.3..2.0f64,
            frac in 0.01..0.99f64
        ) {
            let n2 = 1.0;
            let sin_c = n2 / n1;
            // Angle of incidence between critical and grazing.
            let sin_i = sin_c + frac * (1.0 - sin_c);
            let cos_i = (1.0 - sin_i * sin_i).sqrt();
            let f = fresnel_dielectric(cos_i, real(n1), real(n2));
            prop_assert!(f.tir);
            prop_assert!(approx_eq!(Float, f.r_s.norm(), 1.0, epsilon = 1e-9));
            prop_assert!(approx_eq!(Float, f.r_p.norm(), 1.0, epsilon = 1e-9));
        }
    }
}
