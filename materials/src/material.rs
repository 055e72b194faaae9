//! Material

use crate::dielectric::Dielectric;
use crate::mirror::Mirror;
use optics_core::geometry::*;
use optics_core::rays::Ray;
use optics_core::raytrace::*;
use serde::{Deserialize, Serialize};

/// The response of a face to an incident ray.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Material {
    /// Partial reflection and refraction.
    Dielectric(Dielectric),

    /// Reflection only.
    Mirror(Mirror),

    /// Absorbs every ray.
    Opaque,
}

impl Material {
    /// Returns a dielectric surrounded by vacuum.
    ///
    /// * `n_inside` - Index of the inner medium.
    pub fn glass(n_inside: Complex) -> Self {
        Self::Dielectric(Dielectric::new(n_inside, real(1.0)))
    }

    /// Returns an ideal mirror.
    pub fn mirror() -> Self {
        Self::Mirror(Mirror::default())
    }

    /// Returns the maximum number of children a single ray can produce.
    pub fn max_children(&self) -> usize {
        match self {
            Self::Dielectric(_) => 2,
            Self::Mirror(_) => 1,
            Self::Opaque => 0,
        }
    }

    /// Append the children of `ray` hitting a face with this material to
    /// `out`. A ray whose inputs are not finite produces nothing.
    ///
    /// * `ray`       - Incident ray.
    /// * `point`     - Intersection point.
    /// * `normal`    - Outward surface normal.
    /// * `parent_id` - Index of `ray` in its generation.
    /// * `out`       - Receives the children.
    pub fn eval_children(
        &self,
        ray: &Ray,
        point: &Point3f,
        normal: &Normal3f,
        parent_id: usize,
        out: &mut Vec<Ray>,
    ) {
        let normal = Vector3f::from(normal.normalize());
        if !normal.is_finite() || !point.is_finite() || !ray.direction.is_finite() {
            debug!("Degenerate hit on ray {} absorbed", parent_id);
            return;
        }

        out.reserve(self.max_children());
        match self {
            Self::Dielectric(d) => d.eval_children(ray, point, &normal, parent_id, out),
            Self::Mirror(m) => m.eval_children(ray, point, &normal, parent_id, out),
            Self::Opaque => {}
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn children(m: &Material, normal: Normal3f) -> Vec<Ray> {
        let ray = Ray::new(Point3f::new(0.0, 0.0, -1.0), Vector3f::new(0.0, 0.3, 1.0));
        let mut out = vec![];
        m.eval_children(&ray, &Point3f::ORIGIN, &normal, 3, &mut out);
        out
    }

    #[test]
    fn child_counts_per_material() {
        let n = Normal3f::new(0.0, 0.0, -1.0);
        for m in [Material::glass(real(1.5)), Material::mirror(), Material::Opaque] {
            let out = children(&m, n);
            assert_eq!(out.len(), m.max_children());
            assert!(out.iter().all(|c| c.parent_id == 3));
        }
    }

    #[test]
    fn degenerate_normal_absorbs() {
        assert!(children(&Material::mirror(), Normal3f::ZERO).is_empty());
    }
}
