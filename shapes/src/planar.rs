//! Planar Faces

use crate::shape::LocalHit;
use optics_core::geometry::*;
use optics_core::raytrace::*;
use serde::{Deserialize, Serialize};

/// Returns the distance along the ray to the plane `z = z_plane` and the
/// hit point, if it lies beyond `epsilon`.
///
/// * `o`       - Ray origin in local coordinates.
/// * `d`       - Ray direction in local coordinates.
/// * `z_plane` - Height of the plane.
/// * `epsilon` - Minimum valid distance.
fn hit_z_plane(o: &Point3f, d: &Vector3f, z_plane: Float, epsilon: Float) -> Option<(Float, Point3f)> {
    // Reject rays parallel to the plane.
    if d.z == 0.0 {
        return None;
    }

    let t = (z_plane - o.z) / d.z;
    if !(t > epsilon && t.is_finite()) {
        return None;
    }

    let mut p = *o + *d * t;
    p.z = z_plane;
    Some((t, p))
}

/// Returns the outward normal of a planar face: `-z` unless inverted.
///
/// * `invert_normal` - Flip to `+z`.
fn plane_normal(invert_normal: bool) -> Normal3f {
    if invert_normal {
        Normal3f::new(0.0, 0.0, 1.0)
    } else {
        Normal3f::new(0.0, 0.0, -1.0)
    }
}

/// A rectangle in the plane `z = 0` centred on the origin.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rectangular {
    /// Extent along x.
    pub width: Float,

    /// Extent along y.
    pub height: Float,
}

impl Rectangular {
    /// Create a new `Rectangular` face.
    ///
    /// * `width`  - Extent along x.
    /// * `height` - Extent along y.
    pub fn new(width: Float, height: Float) -> Self {
        Self { width, height }
    }

    /// Returns the nearest hit beyond `epsilon`.
    ///
    /// * `o`       - Ray origin in local coordinates.
    /// * `d`       - Ray direction in local coordinates.
    /// * `epsilon` - Minimum valid distance.
    pub fn intersect(&self, o: &Point3f, d: &Vector3f, epsilon: Float) -> Option<LocalHit> {
        let (t, p) = hit_z_plane(o, d, 0.0, epsilon)?;
        if abs(p.x) > self.width / 2.0 || abs(p.y) > self.height / 2.0 {
            return None;
        }
        Some(LocalHit::new(t, plane_normal(false)))
    }
}

/// A disc in the plane `z = z_plane` centred on the z-axis.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circular {
    /// Diameter of the disc.
    pub diameter: Float,

    /// Height of the plane.
    pub z_plane: Float,

    /// Use `+z` as the outward normal.
    pub invert_normal: bool,
}

impl Circular {
    /// Create a new `Circular` face.
    ///
    /// * `diameter`      - Diameter of the disc.
    /// * `z_plane`       - Height of the plane.
    /// * `invert_normal` - Use `+z` as the outward normal.
    pub fn new(diameter: Float, z_plane: Float, invert_normal: bool) -> Self {
        Self {
            diameter,
            z_plane,
            invert_normal,
        }
    }

    /// Returns the nearest hit beyond `epsilon`.
    ///
    /// * `o`       - Ray origin in local coordinates.
    /// * `d`       - Ray direction in local coordinates.
    /// * `epsilon` - Minimum valid distance.
    pub fn intersect(&self, o: &Point3f, d: &Vector3f, epsilon: Float) -> Option<LocalHit> {
        let (t, p) = hit_z_plane(o, d, self.z_plane, epsilon)?;
        let radius = self.diameter / 2.0;
        if p.x * p.x + p.y * p.y > radius * radius {
            return None;
        }
        Some(LocalHit::new(t, plane_normal(self.invert_normal)))
    }
}

/// A planar polygon in the plane `z = z_plane`. Inside is decided with the
/// even-odd rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Height of the plane.
    pub z_plane: Float,

    /// Vertices in order.
    pub points: Vec<Point2f>,

    /// Use `+z` as the outward normal.
    pub invert_normal: bool,
}

impl Polygon {
    /// Create a new `Polygon` face.
    ///
    /// * `z_plane`       - Height of the plane.
    /// * `points`        - Vertices in order.
    /// * `invert_normal` - Use `+z` as the outward normal.
    pub fn new(z_plane: Float, points: Vec<Point2f>, invert_normal: bool) -> Self {
        Self {
            z_plane,
            points,
            invert_normal,
        }
    }

    /// Returns the nearest hit beyond `epsilon`.
    ///
    /// * `o`       - Ray origin in local coordinates.
    /// * `d`       - Ray direction in local coordinates.
    /// * `epsilon` - Minimum valid distance.
    pub fn intersect(&self, o: &Point3f, d: &Vector3f, epsilon: Float) -> Option<LocalHit> {
        let (t, p) = hit_z_plane(o, d, self.z_plane, epsilon)?;
        if !point_in_polygon(&Point2f::new(p.x, p.y), &self.points) {
            return None;
        }
        Some(LocalHit::new(t, plane_normal(self.invert_normal)))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
