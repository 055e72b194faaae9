//! Extruded Prisms

use crate::placement::Placement;
use itertools::Itertools;
use materials::Material;
use optics_core::geometry::*;
use optics_core::raytrace::*;
use shapes::*;

/// A flat sided solid formed by sweeping a 2-D profile along local z. A
/// counter-clockwise profile gives outward facing sides.
#[derive(Clone, Debug)]
pub struct Extrusion {
    /// Element name.
    pub name: String,

    /// Position and orientation.
    pub placement: Placement,

    /// Faces `side 0..n` followed by `base` and `top` when the ends are
    /// traced.
    pub faces: FaceList,

    profile: Vec<Point2f>,
    z_height_1: Float,
    z_height_2: Float,
    trace_ends: bool,
    n_inside: Complex,
}

impl Extrusion {
    /// Create a new `Extrusion` with traced end faces.
    ///
    /// * `name`       - Element name.
    /// * `profile`    - Profile vertices in order.
    /// * `z_height_1` - Height of the base.
    /// * `z_height_2` - Height of the top.
    /// * `n_inside`   - Refractive index of the solid.
    pub fn new(
        name: &str,
        profile: Vec<Point2f>,
        z_height_1: Float,
        z_height_2: Float,
        n_inside: Complex,
    ) -> Self {
        let mut extrusion = Self {
            name: name.to_string(),
            placement: Placement::default(),
            faces: FaceList::default(),
            profile,
            z_height_1,
            z_height_2,
            trace_ends: true,
            n_inside,
        };
        extrusion.faces = extrusion.make_faces();
        extrusion
    }

    /// Returns the extrusion with the end faces included or left out of
    /// tracing.
    ///
    /// * `trace_ends` - Include the base and top.
    pub fn with_trace_ends(mut self, trace_ends: bool) -> Self {
        self.trace_ends = trace_ends;
        self.faces = self.make_faces();
        self
    }

    /// Triangular prism with its front face on the x-axis and apex on +y.
    ///
    /// * `name`     - Element name.
    /// * `height`   - Distance from the front face to the apex.
    /// * `width`    - Width of the front face.
    /// * `length`   - Extrusion length.
    /// * `n_inside` - Refractive index.
    pub fn prism(name: &str, height: Float, width: Float, length: Float, n_inside: Complex) -> Self {
        let w = width / 2.0;
        let profile = vec![
            Point2f::new(-w, 0.0),
            Point2f::new(w, 0.0),
            Point2f::new(0.0, height),
        ];
        Self::new(name, profile, 0.0, length, n_inside)
    }

    /// Parallelogram with two faces parallel to the x-axis and two oblique
    /// faces.
    ///
    /// * `name`     - Element name.
    /// * `height`   - Distance between the parallel faces.
    /// * `width`    - Width of the parallel faces.
    /// * `slant`    - Angle of the oblique faces in degrees.
    /// * `length`   - Extrusion length.
    /// * `n_inside` - Refractive index.
    pub fn rhomboid(
        name: &str,
        height: Float,
        width: Float,
        slant: Float,
        length: Float,
        n_inside: Complex,
    ) -> Self {
        let h = height / 2.0;
        let s = h / slant.to_radians().tan();
        let w = width / 2.0;
        let profile = vec![
            Point2f::new(w - s, -h),
            Point2f::new(w + s, h),
            Point2f::new(-w + s, h),
            Point2f::new(-w - s, -h),
        ];
        Self::new(name, profile, 0.0, length, n_inside)
    }

    /// Linear dielectric light funnel: an exit aperture on the x-axis with
    /// slats flaring out at `slant` degrees.
    ///
    /// * `name`       - Element name.
    /// * `slat_width` - Width of the slanted sides.
    /// * `ap_width`   - Width of the exit aperture.
    /// * `slant`      - Angle of the slanted sides in degrees.
    /// * `length`     - Extrusion length.
    /// * `n_inside`   - Refractive index.
    pub fn ldlf(
        name: &str,
        slat_width: Float,
        ap_width: Float,
        slant: Float,
        length: Float,
        n_inside: Complex,
    ) -> Self {
        let theta = slant.to_radians();
        let h = slat_width * theta.sin();
        let dis = slat_width * theta.cos();
        let w = ap_width / 2.0;
        let profile = vec![
            Point2f::new(-w, 0.0),
            Point2f::new(w, 0.0),
            Point2f::new(w + dis, h),
            Point2f::new(-w - dis, h),
        ];
        Self::new(name, profile, 0.0, length, n_inside)
    }

    /// A single extruded planar face between two profile points, with no
    /// end faces.
    ///
    /// * `name`     - Element name.
    /// * `p1`       - Start of the edge.
    /// * `p2`       - End of the edge; the outward normal is on its right.
    /// * `z1`       - First extrusion height.
    /// * `z2`       - Second extrusion height.
    /// * `n_inside` - Refractive index behind the sheet.
    pub fn sheet(name: &str, p1: Point2f, p2: Point2f, z1: Float, z2: Float, n_inside: Complex) -> Self {
        Self::new(name, vec![p1, p2], z1, z2, n_inside).with_trace_ends(false)
    }

    fn make_faces(&self) -> FaceList {
        let (z1, z2) = (self.z_height_1, self.z_height_2);
        let material = Some(Material::glass(self.n_inside));

        // Two points make a sheet, not a closed profile.
        let edges: Vec<(Point2f, Point2f)> = if self.profile.len() == 2 {
            vec![(self.profile[0], self.profile[1])]
        } else {
            self.profile.iter().copied().circular_tuple_windows().collect()
        };

        let mut faces: FaceList = edges
            .into_iter()
            .enumerate()
            .map(|(i, (p1, p2))| {
                Face::new(&format!("side {}", i), ExtrudedPlanar::new(p1, p2, z1, z2), material)
            })
            .collect();

        if self.trace_ends && self.profile.len() > 2 {
            faces.push(Face::new("base", Polygon::new(z1, self.profile.clone(), false), material));
            faces.push(Face::new("top", Polygon::new(z2, self.profile.clone(), true), material));
        }
        faces
    }
}

traceable_element!(Extrusion);

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
