//! Mirrors

use crate::placement::Placement;
use materials::Material;
use optics_core::geometry::*;
use optics_core::raytrace::*;
use shapes::*;

/// A rectangular perfectly conducting mirror in its local `z = 0` plane.
#[derive(Clone, Debug)]
pub struct RectMirror {
    /// Element name.
    pub name: String,

    /// Position and orientation.
    pub placement: Placement,

    /// The single `mirror` face.
    pub faces: FaceList,
}

impl RectMirror {
    /// Create a new `RectMirror` at the origin facing +z.
    ///
    /// * `name`   - Element name.
    /// * `width`  - Extent along local x.
    /// * `height` - Extent along local y.
    pub fn new(name: &str, width: Float, height: Float) -> Self {
        Self::with_material(name, width, height, Material::mirror())
    }

    /// Create a new `RectMirror` with a lossy or otherwise non-ideal
    /// material.
    ///
    /// * `name`     - Element name.
    /// * `width`    - Extent along local x.
    /// * `height`   - Extent along local y.
    /// * `material` - Face material.
    pub fn with_material(name: &str, width: Float, height: Float, material: Material) -> Self {
        let face = Face::new("mirror", Rectangular::new(width, height), Some(material));
        Self {
            name: name.to_string(),
            placement: Placement::default(),
            faces: FaceList::new(vec![face]),
        }
    }
}

traceable_element!(RectMirror);

/// A circular perfectly conducting mirror in its local `z = 0` plane.
#[derive(Clone, Debug)]
pub struct CircularMirror {
    /// Element name.
    pub name: String,

    /// Position and orientation.
    pub placement: Placement,

    /// The single `mirror` face.
    pub faces: FaceList,
}

impl CircularMirror {
    /// Create a new `CircularMirror` at the origin facing +z.
    ///
    /// * `name`     - Element name.
    /// * `diameter` - Mirror diameter.
    pub fn new(name: &str, diameter: Float) -> Self {
        let face = Face::new(
            "mirror",
            Circular::new(diameter, 0.0, false),
            Some(Material::mirror()),
        );
        Self {
            name: name.to_string(),
            placement: Placement::default(),
            faces: FaceList::new(vec![face]),
        }
    }
}

traceable_element!(CircularMirror);

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn placed_mirror_faces_its_direction() {
        let m = RectMirror::new("m", 2.0, 2.0).with_placement(Placement::new(
            Point3f::new(0.0, 0.0, 5.0),
            -Vector3f::Z,
            Vector3f::X,
        ));
        let faces = m.world_faces();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].owner, "m");

        // The planar face's outward normal is local -z, world +z here.
        let hit = faces[0]
            .intersect(&Point3f::new(0.5, 0.5, 10.0), &-Vector3f::Z, 1e-6)
            .unwrap();
        assert!(approx_eq!(Float, hit.t, 5.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, hit.normal.z, 1.0, epsilon = 1e-12));
    }

    #[test]
    fn circular_mirror_clips_to_diameter() {
        let m = CircularMirror::new("m", 2.0);
        let faces = m.world_faces();
        let d = Vector3f::Z;
        assert!(faces[0].intersect(&Point3f::new(0.9, 0.0, -1.0), &d, 1e-6).is_some());
        assert!(faces[0].intersect(&Point3f::new(0.8, 0.8, -1.0), &d, 1e-6).is_none());
    }
}
