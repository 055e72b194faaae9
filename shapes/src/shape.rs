//! Shapes

use crate::extruded::ExtrudedPlanar;
use crate::planar::{Circular, Polygon, Rectangular};
use crate::spherical::Spherical;
use optics_core::geometry::*;
use optics_core::raytrace::*;
use serde::{Deserialize, Serialize};

/// An intersection found in the shape's local coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LocalHit {
    /// Distance along the ray in units of the direction's length.
    pub t: Float,

    /// Outward surface normal.
    pub normal: Normal3f,
}

impl LocalHit {
    /// Create a new `LocalHit`.
    ///
    /// * `t`      - Distance along the ray.
    /// * `normal` - Outward surface normal.
    pub fn new(t: Float, normal: Normal3f) -> Self {
        Self { t, normal }
    }
}

/// The surface geometry of a face, in local coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangular(Rectangular),
    Circular(Circular),
    Polygon(Polygon),
    Spherical(Spherical),
    ExtrudedPlanar(ExtrudedPlanar),
}

impl Shape {
    /// Returns the shape type.
    pub fn get_type(&self) -> &'static str {
        match self {
            Self::Rectangular(_) => "rectangular",
            Self::Circular(_) => "circular",
            Self::Polygon(_) => "polygon",
            Self::Spherical(_) => "spherical",
            Self::ExtrudedPlanar(_) => "extruded_planar",
        }
    }

    /// Returns the nearest intersection further than `epsilon` along the
    /// ray, or `None`.
    ///
    /// * `o`       - Ray origin in local coordinates.
    /// * `d`       - Ray direction in local coordinates.
    /// * `epsilon` - Minimum valid distance.
    pub fn intersect(&self, o: &Point3f, d: &Vector3f, epsilon: Float) -> Option<LocalHit> {
        match self {
            Self::Rectangular(s) => s.intersect(o, d, epsilon),
            Self::Circular(s) => s.intersect(o, d, epsilon),
            Self::Polygon(s) => s.intersect(o, d, epsilon),
            Self::Spherical(s) => s.intersect(o, d, epsilon),
            Self::ExtrudedPlanar(s) => s.intersect(o, d, epsilon),
        }
    }
}

impl From<Rectangular> for Shape {
    fn from(s: Rectangular) -> Self {
        Self::Rectangular(s)
    }
}

impl From<Circular> for Shape {
    fn from(s: Circular) -> Self {
        Self::Circular(s)
    }
}

impl From<Polygon> for Shape {
    fn from(s: Polygon) -> Self {
        Self::Polygon(s)
    }
}

impl From<Spherical> for Shape {
    fn from(s: Spherical) -> Self {
        Self::Spherical(s)
    }
}

impl From<ExtrudedPlanar> for Shape {
    fn from(s: ExtrudedPlanar) -> Self {
        Self::ExtrudedPlanar(s)
    }
}
