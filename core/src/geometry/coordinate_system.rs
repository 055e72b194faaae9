//! 3-D Coordinate System

use super::vector3::Vector3;
use crate::raytrace::abs;
use num_traits::Float;

/// A coordinate system containing 3 orthogonal vectors.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CoordinateSystem<T> {
    /// The first unit vector.
    pub v1: Vector3<T>,

    /// The second unit vector.
    pub v2: Vector3<T>,

    /// The third unit vector.
    pub v3: Vector3<T>,
}

impl<T: Float> From<Vector3<T>> for CoordinateSystem<T> {
    /// Create a new coordinate system from a single unit vector.
    ///
    /// * `v1` - The first unit vector to form part of the coordinate system.
    fn from(v1: Vector3<T>) -> Self {
        let (v2, v3) = coordinate_system(&v1);
        CoordinateSystem { v1, v2, v3 }
    }
}

/// Returns two unit vectors that complete an orthonormal basis with the
/// given unit vector.
///
/// The second vector is built from the first by zeroing its smallest
/// of the x/y coordinates, swapping the remaining two and negating one.
/// The third is the cross product of the first two.
///
/// * `v1` - The first unit vector.
pub fn coordinate_system<T: Float>(v1: &Vector3<T>) -> (Vector3<T>, Vector3<T>) {
    let v2 = if abs(v1.x) > abs(v1.y) {
        Vector3::new(-v1.z, T::zero(), v1.x) / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        Vector3::new(T::zero(), v1.z, -v1.y) / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };

    let v3 = v1.cross(&v2);

    (v2, v3)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Dot, Vector3f};
    use crate::raytrace::Float;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn from_unit_x_axis() {
        let v1 = Vector3f::new(1.0, 0.0, 0.0);
        let cs = CoordinateSystem::from(v1);
        assert!(cs.v1 == v1);
        assert!(cs.v2 == Vector3f::new(0.0, 0.0, 1.0));
        assert!(cs.v3 == Vector3f::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn from_unit_z_axis() {
        let v1 = Vector3f::new(0.0, 0.0, 1.0);
        let (v2, v3) = coordinate_system(&v1);
        assert!(v1.dot(&v2) == 0.0);
        assert!(v1.dot(&v3) == 0.0);
        assert!(v2.dot(&v3) == 0.0);
    }

    prop_unit_vector3!(unit_vector3);

    proptest! {
        #[test]
        fn basis_is_orthonormal(v1 in unit_vector3()) {
            let (v2, v3) = coordinate_system(&v1);
            prop_assert!(approx_eq!(Float, v1.dot(&v2), 0.0, epsilon = 1e-9));
            prop_assert!(approx_eq!(Float, v1.dot(&v3), 0.0, epsilon = 1e-9));
            prop_assert!(approx_eq!(Float, v2.dot(&v3), 0.0, epsilon = 1e-9));
            prop_assert!(approx_eq!(Float, v2.length(), 1.0, epsilon = 1e-9));
            prop_assert!(approx_eq!(Float, v3.length(), 1.0, epsilon = 1e-9));
        }
    }
}
