//! Lenses

use crate::placement::Placement;
use materials::Material;
use optics_core::geometry::*;
use optics_core::raytrace::*;
use shapes::*;

/// A lens with a flat circular base at local `z = 0` and a spherical face
/// whose vertex is at the centre thickness.
#[derive(Clone, Debug)]
pub struct PlanoConvexLens {
    /// Element name.
    pub name: String,

    /// Position and orientation.
    pub placement: Placement,

    /// The `base` and `curved` faces.
    pub faces: FaceList,

    curvature: Float,
    n_inside: Complex,
}

impl PlanoConvexLens {
    /// Create a new `PlanoConvexLens` at the origin with its axis along +z.
    ///
    /// * `name`      - Element name.
    /// * `ct`        - Centre thickness.
    /// * `diameter`  - Clear aperture.
    /// * `curvature` - Signed radius of the spherical face.
    /// * `n_inside`  - Refractive index of the glass.
    pub fn new(name: &str, ct: Float, diameter: Float, curvature: Float, n_inside: Complex) -> Self {
        if abs(curvature) < diameter / 2.0 {
            warn!(
                "Lens '{}': radius {} is smaller than the aperture, the curved face will be clipped",
                name, curvature
            );
        }

        let material = Some(Material::glass(n_inside));
        let faces = FaceList::new(vec![
            Face::new("base", Circular::new(diameter, 0.0, false), material),
            Face::new("curved", Spherical::new(diameter, ct, curvature), material),
        ]);

        Self {
            name: name.to_string(),
            placement: Placement::default(),
            faces,
            curvature,
            n_inside,
        }
    }

    /// Returns the paraxial focal length of the lens in air from the
    /// lensmaker's equation for a thin plano-convex lens.
    pub fn focal_length(&self) -> Float {
        safe_ratio(self.curvature, self.n_inside.re - 1.0)
    }
}

traceable_element!(PlanoConvexLens);

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn lens() -> PlanoConvexLens {
        PlanoConvexLens::new("lens", 5.0, 15.0, 12.0, real(1.5))
    }

    #[test]
    fn axial_ray_crosses_both_faces() {
        let faces = lens().world_faces();
        let o = Point3f::new(0.0, 0.0, -10.0);
        let d = Vector3f::Z;

        let base = faces[0].intersect(&o, &d, 1e-6).unwrap();
        assert!(approx_eq!(Float, base.t, 10.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, base.normal.z, -1.0, epsilon = 1e-12));

        let curved = faces[1].intersect(&o, &d, 1e-6).unwrap();
        assert!(approx_eq!(Float, curved.t, 15.0, epsilon = 1e-9));
        assert!(approx_eq!(Float, curved.normal.z, 1.0, epsilon = 1e-9));
    }

    #[test]
    fn focal_length_of_thin_lens() {
        assert!(approx_eq!(Float, lens().focal_length(), 24.0, epsilon = 1e-12));
        let air = PlanoConvexLens::new("air", 5.0, 15.0, 12.0, real(1.0));
        assert_eq!(air.focal_length(), INFINITY);
    }
}
