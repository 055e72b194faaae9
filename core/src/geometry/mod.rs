//! Geometry

use crate::raytrace::*;
use num_traits::{Num, Zero};
use std::ops::Neg;

// Define macros for property based testing.
#[cfg(test)]
macro_rules! prop_vector3 {
    ($name: ident, $t: ty, $xr: expr, $yr: expr, $zr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr, z in $zr) -> Vector3<$t> {
                Vector3 { x, y, z }
            }
        }
    };
}

#[cfg(test)]
macro_rules! prop_unit_vector3 {
    ($name: ident) => {
        prop_compose! {
            fn $name()(
                x in -1.0..1.0f64,
                y in -1.0..1.0f64,
                z in -1.0..1.0f64
            ) -> Vector3f {
                let v = Vector3 { x, y, z };
                if v.length_squared() < 1e-6 {
                    Vector3f::new(0.0, 0.0, 1.0)
                } else {
                    v.normalize()
                }
            }
        }
    };
}

mod coordinate_system;
mod matrix4x4;
mod normal;
mod point2;
mod point3;
mod transform;
mod vector3;

// Re-export
pub use coordinate_system::*;
pub use matrix4x4::*;
pub use normal::*;
pub use point2::*;
pub use point3::*;
pub use transform::*;
pub use vector3::*;

/// Dot product trait.
pub trait Dot<V> {
    type Output: Num + Zero + Neg<Output = Self::Output> + PartialOrd + Copy;

    /// Returns the dot product.
    ///
    /// * `other` - The other vector/normal.
    fn dot(&self, other: &V) -> Self::Output;

    /// Returns the absolute value of dot product.
    ///
    /// * `other` - The other vector/normal.
    fn abs_dot(&self, other: &V) -> Self::Output {
        abs(self.dot(other))
    }
}
