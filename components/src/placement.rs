//! Placement

use optics_core::geometry::*;
use serde::{Deserialize, Serialize};

/// Position and orientation of an element: its local origin, the world
/// direction of local +z and a hint for local +x.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// World position of the local origin.
    pub centre: Point3f,

    /// World direction of the local +z axis.
    pub direction: Vector3f,

    /// Hint for the world direction of the local +x axis.
    pub x_axis: Vector3f,
}

impl Placement {
    /// Create a new `Placement`.
    ///
    /// * `centre`    - World position of the local origin.
    /// * `direction` - World direction of the local +z axis.
    /// * `x_axis`    - Hint for the world direction of the local +x axis.
    pub fn new(centre: Point3f, direction: Vector3f, x_axis: Vector3f) -> Self {
        Self {
            centre,
            direction,
            x_axis,
        }
    }

    /// Returns the local to world transformation.
    pub fn transform(&self) -> Transform {
        Transform::from_frame(&self.centre, &self.direction, &self.x_axis)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::new(Point3f::ORIGIN, Vector3f::Z, Vector3f::X)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
