//! Polarised Ray

use crate::geometry::*;
use crate::raytrace::*;

/// A single polarised ray. This is the row view of a `RayCollection`; the
/// collection itself stores rays column by column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Origin.
    pub origin: Point3f,

    /// Unit direction.
    pub direction: Vector3f,

    /// Complex refractive index of the medium the ray travels through.
    pub refractive_index: Complex,

    /// Unit reference vector for the polarisation, orthogonal to `direction`.
    pub e_vector: Vector3f,

    /// Complex amplitude along `e_vector`.
    pub e1_amp: Complex,

    /// Complex amplitude along `direction x e_vector`.
    pub e2_amp: Complex,

    /// Index of the ray in the previous generation that spawned this one.
    pub parent_id: usize,
}

impl Ray {
    /// Returns a ray in vacuum polarised along an arbitrary axis
    /// perpendicular to the direction, with unit `E1` amplitude.
    ///
    /// * `origin`    - Origin.
    /// * `direction` - Direction. Need not be normalized.
    pub fn new(origin: Point3f, direction: Vector3f) -> Self {
        let direction = direction.normalize();
        let e_vector = perpendicular_to(&direction, &Vector3f::ZERO);
        Self {
            origin,
            direction,
            refractive_index: real(1.0),
            e_vector,
            e1_amp: real(1.0),
            e2_amp: real(0.0),
            parent_id: 0,
        }
    }

    /// Returns the point at distance `t` along the ray.
    ///
    /// * `t` - Distance from the origin.
    pub fn at(&self, t: Float) -> Point3f {
        self.origin + self.direction * t
    }

    /// Returns the second polarisation axis, `direction x e_vector`.
    pub fn h_vector(&self) -> Vector3f {
        self.direction.cross(&self.e_vector)
    }

    /// Returns the total intensity `|E1|^2 + |E2|^2`.
    pub fn intensity(&self) -> Float {
        self.e1_amp.norm_sqr() + self.e2_amp.norm_sqr()
    }
}

/// Returns the component of `e` orthogonal to the unit vector `d`,
/// normalized. If `e` is (nearly) parallel to `d` an arbitrary perpendicular
/// is returned instead.
///
/// * `d` - Unit direction.
/// * `e` - Desired polarisation direction.
pub fn perpendicular_to(d: &Vector3f, e: &Vector3f) -> Vector3f {
    let perp = *e - *d * e.dot(d);
    if perp.length_squared() > 1e-12 {
        perp.normalize()
    } else {
        coordinate_system(d).0
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
