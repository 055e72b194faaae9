//! Faces

use crate::shape::{LocalHit, Shape};
use materials::Material;
use optics_core::geometry::*;
use optics_core::rays::Ray;
use optics_core::raytrace::*;
use serde::{Deserialize, Serialize};

/// A single optical boundary: a shape positioned by a transform, with the
/// material that decides how rays leave it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Name unique within the owning element.
    pub name: String,

    /// Geometry in local coordinates.
    pub shape: Shape,

    /// Response to incident rays. A face without one cannot be traced.
    pub material: Option<Material>,

    /// Local to world (or local to owner, before placement) transformation.
    pub transform: Transform,

    /// Name of the owning optical element.
    pub owner: String,

    /// Registry index assigned for the current trace.
    pub idx: usize,
}

impl Face {
    /// Create a new face at the owner's origin.
    ///
    /// * `name`     - Name unique within the owning element.
    /// * `shape`    - Geometry in local coordinates.
    /// * `material` - Response to incident rays.
    pub fn new<S: Into<Shape>>(name: &str, shape: S, material: Option<Material>) -> Self {
        Self {
            name: name.to_string(),
            shape: shape.into(),
            material,
            transform: Transform::identity(),
            owner: String::new(),
            idx: 0,
        }
    }

    /// Returns the face moved by `transform` relative to its owner.
    ///
    /// * `transform` - Local to owner transformation.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Returns a copy positioned in world coordinates by the owner's
    /// transformation and tagged with the owner's name.
    ///
    /// * `owner_to_world` - The owner's placement.
    /// * `owner`          - The owner's name.
    pub fn placed(&self, owner_to_world: &Transform, owner: &str) -> Face {
        Face {
            transform: *owner_to_world * self.transform,
            owner: owner.to_string(),
            ..self.clone()
        }
    }

    /// Returns a label of the form `owner: name`.
    pub fn label(&self) -> String {
        format!("{}: {}", self.owner, self.name)
    }

    /// Returns the nearest intersection further than `epsilon` with its
    /// world-space unit outward normal. Degenerate input or geometry gives
    /// `None`.
    ///
    /// * `origin`    - Ray origin in world coordinates.
    /// * `direction` - Unit ray direction in world coordinates.
    /// * `epsilon`   - Minimum valid distance.
    pub fn intersect(&self, origin: &Point3f, direction: &Vector3f, epsilon: Float) -> Option<LocalHit> {
        if !origin.is_finite() || !direction.is_finite() {
            return None;
        }

        // Rigid transforms keep the direction's length so `t` stays a world
        // distance.
        let world_to_local = self.transform.inverse();
        let o = world_to_local.transform_point(origin);
        let d = world_to_local.transform_vector(direction);

        let hit = self.shape.intersect(&o, &d, epsilon)?;
        let normal = self.transform.transform_normal(&hit.normal).normalize();
        if normal.has_nans() || !hit.t.is_finite() {
            debug!("Degenerate {} hit on face {} ignored", self.shape.get_type(), self.label());
            return None;
        }
        Some(LocalHit::new(hit.t, normal))
    }

    /// Append the children of a ray terminating on this face to `out`.
    ///
    /// * `ray`       - Incident ray.
    /// * `point`     - Intersection point.
    /// * `normal`    - Outward normal at the intersection.
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
        if let Some(material) = &self.material {
            material.eval_children(ray, point, normal, parent_id, out);
        }
    }
}

/// The faces belonging to one optical element.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceList {
    faces: Vec<Face>,
}

impl FaceList {
    /// Create a new `FaceList`.
    ///
    /// * `faces` - The faces.
    pub fn new(faces: Vec<Face>) -> Self {
        Self { faces }
    }

    /// Append a face.
    ///
    /// * `face` - The face.
    pub fn push(&mut self, face: Face) {
        self.faces.push(face);
    }

    /// Returns the number of faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if there are no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Returns an iterator over the faces.
    pub fn iter(&self) -> impl Iterator<Item = &Face> {
        self.faces.iter()
    }

    /// Returns the face with the given name.
    ///
    /// * `name` - Face name.
    pub fn get(&self, name: &str) -> Option<&Face> {
        self.faces.iter().find(|f| f.name == name)
    }

    /// Replace the material of every face.
    ///
    /// * `material` - The new material.
    pub fn set_material(&mut self, material: Material) {
        self.faces
            .iter_mut()
            .for_each(|f| f.material = Some(material));
    }
}

impl FromIterator<Face> for FaceList {
    fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planar::Rectangular;
    use float_cmp::*;

    #[test]
    fn placed_face_hits_in_world_space() {
        // Rectangle facing -x at x = 5.
        let face = Face::new("window", Rectangular::new(2.0, 2.0), Some(Material::Opaque));
        let owner = Transform::from_frame(&Point3f::new(5.0, 0.0, 0.0), &Vector3f::X, &Vector3f::Y);
        let world = face.placed(&owner, "box");
        assert_eq!(world.owner, "box");
        assert_eq!(world.label(), "box: window");

        let hit = world
            .intersect(&Point3f::ORIGIN, &Vector3f::X, INTERSECTION_EPSILON)
            .unwrap();
        assert!(approx_eq!(Float, hit.t, 5.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, hit.normal.x, -1.0, epsilon = 1e-12));

        let o = Point3f::new(0.0, 1.5, 0.0);
        assert!(world.intersect(&o, &Vector3f::X, INTERSECTION_EPSILON).is_none());
    }

    #[test]
    fn non_finite_ray_does_not_hit() {
        let face = Face::new("r", Rectangular::new(2.0, 2.0), Some(Material::Opaque));
        let d = Vector3f::new(Float::NAN, 0.0, 1.0);
        assert!(face
            .intersect(&Point3f::new(0.0, 0.0, -1.0), &d, INTERSECTION_EPSILON)
            .is_none());
    }

    #[test]
    fn face_without_material_has_no_children() {
        let face = Face::new("r", Rectangular::new(2.0, 2.0), None);
        let ray = Ray::new(Point3f::new(0.0, 0.0, -1.0), Vector3f::Z);
        let mut out = vec![];
        face.eval_children(&ray, &Point3f::ORIGIN, &Normal3f::new(0.0, 0.0, -1.0), 0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn face_list_lookup() {
        let mut list: FaceList = ["a", "b"]
            .iter()
            .map(|n| Face::new(n, Rectangular::new(1.0, 1.0), None))
            .collect();
        list.set_material(Material::mirror());
        assert_eq!(list.len(), 2);
        assert_eq!(list.get("b").unwrap().material, Some(Material::mirror()));
        assert!(list.get("c").is_none());
    }
}
