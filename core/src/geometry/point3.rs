//! 3-D Points

use super::Vector3;
use crate::raytrace::*;
use num_traits::{Num, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, Mul, Sub, SubAssign};

/// A 3-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D point containing `Float` values.
pub type Point3f = Point3<Float>;

impl Point3f {
    /// The origin.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
}

impl<T: Num> Point3<T> {
    /// Creates a new 3-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a new 3-D point at the origin.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// Returns true if any coordinate is NaN.
    pub fn has_nans(&self) -> bool
    where
        T: num_traits::Float,
    {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns true if all coordinates are finite.
    pub fn is_finite(&self) -> bool
    where
        T: num_traits::Float,
    {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Returns the distance between two points.
    ///
    /// * `other` - The other point.
    pub fn distance(&self, other: &Self) -> T
    where
        T: num_traits::Float,
    {
        (*self - *other).length()
    }
}

impl<T: Num> Add<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    /// Offsets a point by the given vector.
    ///
    /// * `other` - The vector to add.
    fn add(self, other: Vector3<T>) -> Self::Output {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl<T: Num + Copy> AddAssign<Vector3<T>> for Point3<T> {
    /// Offsets a point by the given vector.
    ///
    /// * `other` - The vector to add.
    fn add_assign(&mut self, other: Vector3<T>) {
        *self = *self + other;
    }
}

impl<T: Num> Sub for Point3<T> {
    type Output = Vector3<T>;

    /// Returns the vector between two points.
    ///
    /// * `other` - The starting point.
    fn sub(self, other: Self) -> Self::Output {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T: Num> Sub<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    /// Offsets a point by the negated vector.
    ///
    /// * `other` - The vector to subtract.
    fn sub(self, other: Vector3<T>) -> Self::Output {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T: Num + Copy> SubAssign<Vector3<T>> for Point3<T> {
    /// Offsets a point by the negated vector.
    ///
    /// * `other` - The vector to subtract.
    fn sub_assign(&mut self, other: Vector3<T>) {
        *self = *self - other;
    }
}

impl<T: Num + Copy> Mul<T> for Point3<T> {
    type Output = Point3<T>;

    /// Scale the point.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: T) -> Self::Output {
        Point3::new(self.x * f, self.y * f, self.z * f)
    }
}

impl<T: Num + Copy> Div<T> for Point3<T> {
    type Output = Point3<T>;

    /// Scale the point by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div(self, f: T) -> Self::Output {
        let inv = T::one() / f;
        Point3::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

impl<T> Index<usize> for Point3<T> {
    type Output = T;

    /// Index the point by an axis to get the coordinate.
    ///
    /// * `axis` - A 3-D coordinate axis.
    fn index(&self, axis: usize) -> &Self::Output {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis for Point3"),
        }
    }
}

impl<T: Num> From<Vector3<T>> for Point3<T> {
    /// Convert a vector to a point.
    ///
    /// * `v` - The vector.
    fn from(v: Vector3<T>) -> Self {
        Point3::new(v.x, v.y, v.z)
    }
}

impl<T: Num> From<Point3<T>> for Vector3<T> {
    /// Convert a point to a vector from the origin.
    ///
    /// * `p` - The point.
    fn from(p: Point3<T>) -> Self {
        Vector3::new(p.x, p.y, p.z)
    }
}

impl<T: fmt::Display> fmt::Display for Point3<T> {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector3f;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn point_minus_point_is_vector() {
        let p1 = Point3f::new(1.0, 2.0, 3.0);
        let p2 = Point3f::new(0.0, 0.0, 1.0);
        assert_eq!(p1 - p2, Vector3f::new(1.0, 2.0, 2.0));
    }

    #[test]
    fn distance_between_points() {
        let p1 = Point3f::new(1.0, 2.0, 2.0);
        assert!(approx_eq!(Float, p1.distance(&Point3f::ORIGIN), 3.0, ulps = 2));
    }

    prop_compose! {
        fn point3_f64()(
            x in -100.0..100.0f64,
            y in -100.0..100.0f64,
            z in -100.0..100.0f64
        ) -> Point3f {
            Point3f::new(x, y, z)
        }
    }

    proptest! {
        #[test]
        fn offset_then_difference(p in point3_f64(), q in point3_f64()) {
            let r = p + (q - p);
            prop_assert!(approx_eq!(Float, r.x, q.x, epsilon = 1e-9));
            prop_assert!(approx_eq!(Float, r.y, q.y, epsilon = 1e-9));
            prop_assert!(approx_eq!(Float, r.z, q.z, epsilon = 1e-9));
        }
    }
}
