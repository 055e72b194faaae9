//! Transformations

use super::{
    coordinate_system, matrix4x4, Dot, Matrix4x4, Normal3f, Point3f, Vector3f, IDENTITY_MATRIX,
};
use crate::raytrace::*;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A rigid transformation for mapping points to points, vectors to vectors
/// and normals to normals. Faces store one of these mapping local to world
/// coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// The transformation matrix.
    pub m: Matrix4x4,

    /// The inverse transformation matrix.
    pub m_inv: Matrix4x4,
}

impl Transform {
    /// Returns the identity transformation.
    pub fn identity() -> Self {
        Self {
            m: IDENTITY_MATRIX,
            m_inv: IDENTITY_MATRIX,
        }
    }

    /// Create a local to world transformation whose local origin sits at
    /// `origin`, whose local +z axis points along `z_axis` and whose local
    /// +x axis is `x_axis` made orthogonal to `z_axis`. When `x_axis` is
    /// parallel to `z_axis` an arbitrary perpendicular is chosen.
    ///
    /// * `origin` - World position of the local origin.
    /// * `z_axis` - World direction of local +z.
    /// * `x_axis` - Hint for the world direction of local +x.
    #[rustfmt::skip]
    pub fn from_frame(origin: &Point3f, z_axis: &Vector3f, x_axis: &Vector3f) -> Self {
        let z = z_axis.normalize();
        let x_perp = *x_axis - z * x_axis.dot(&z);
        let x = if x_perp.length_squared() > 1e-12 {
            x_perp.normalize()
        } else {
            coordinate_system(&z).0
        };
        let y = z.cross(&x);
        let o = Vector3f::from(*origin);

        Self {
            m: matrix4x4(
                x.x, y.x, z.x, o.x,
                x.y, y.y, z.y, o.y,
                x.z, y.z, z.z, o.z,
                0.0, 0.0, 0.0, 1.0,
            ),
            m_inv: matrix4x4(
                x.x, x.y, x.z, -x.dot(&o),
                y.x, y.y, y.z, -y.dot(&o),
                z.x, z.y, z.z, -z.dot(&o),
                0.0, 0.0, 0.0, 1.0,
            ),
        }
    }

    /// Returns the inverse transformation.
    pub fn inverse(&self) -> Self {
        Self {
            m: self.m_inv,
            m_inv: self.m,
        }
    }

    /// Applies transformation to a given point.
    ///
    /// * `p` - The point.
    pub fn transform_point(&self, p: &Point3f) -> Point3f {
        let m = &self.m;
        let xp = m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3];
        let yp = m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3];
        let zp = m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3];
        let wp = m[3][0] * p.x + m[3][1] * p.y + m[3][2] * p.z + m[3][3];

        if wp == 1.0 {
            Point3f::new(xp, yp, zp)
        } else {
            Point3f::new(xp, yp, zp) / wp
        }
    }

    /// Applies transformation to a given vector. The length of the result
    /// is not adjusted.
    ///
    /// * `v` - The vector.
    pub fn transform_vector(&self, v: &Vector3f) -> Vector3f {
        let m = &self.m;
        Vector3f::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    /// Applies transformation to a given normal using the inverse transpose.
    ///
    /// * `n` - The normal.
    pub fn transform_normal(&self, n: &Normal3f) -> Normal3f {
        let m_inv = &self.m_inv.m;
        Normal3f::new(
            m_inv[0][0] * n.x + m_inv[1][0] * n.y + m_inv[2][0] * n.z,
            m_inv[0][1] * n.x + m_inv[1][1] * n.y + m_inv[2][1] * n.z,
            m_inv[0][2] * n.x + m_inv[1][2] * n.y + m_inv[2][2] * n.z,
        )
    }
}

impl Mul<Transform> for Transform {
    type Output = Transform;

    /// Compose two transformations; `other` is applied first.
    ///
    /// * `other` - The transformation applied first.
    fn mul(self, other: Transform) -> Self::Output {
        Transform {
            m: self.m * other.m,
            m_inv: other.m_inv * self.m_inv,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector3;
    use float_cmp::*;
    use proptest::prelude::*;

    fn assert_point_eq(a: &Point3f, b: &Point3f) {
        assert!(approx_eq!(Float, a.x, b.x, epsilon = 1e-9), "{} != {}", a, b);
        assert!(approx_eq!(Float, a.y, b.y, epsilon = 1e-9), "{} != {}", a, b);
        assert!(approx_eq!(Float, a.z, b.z, epsilon = 1e-9), "{} != {}", a, b);
    }

    #[test]
    fn translate_point_but_not_vector() {
        let t = Transform::from_frame(&Point3f::new(1.0, 2.0, 3.0), &Vector3f::Z, &Vector3f::X);
        assert_eq!(
            t.transform_point(&Point3f::ORIGIN),
            Point3f::new(1.0, 2.0, 3.0)
        );
        assert_eq!(t.transform_vector(&Vector3f::X), Vector3f::X);
    }

    #[test]
    fn rotate_x_into_y() {
        let t = Transform::from_frame(&Point3f::ORIGIN, &Vector3f::Z, &Vector3f::Y);
        let v = t.transform_vector(&Vector3f::X);
        assert!(approx_eq!(Float, v.x, 0.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, v.y, 1.0, epsilon = 1e-12));
    }

    #[test]
    fn frame_maps_local_axes() {
        let origin = Point3f::new(1.0, -2.0, 5.0);
        let t = Transform::from_frame(&origin, &Vector3f::X, &Vector3f::Y);
        assert_point_eq(&t.transform_point(&Point3f::ORIGIN), &origin);
        assert_point_eq(
            &t.transform_point(&Point3f::new(0.0, 0.0, 1.0)),
            &Point3f::new(2.0, -2.0, 5.0),
        );
        assert_point_eq(
            &t.transform_point(&Point3f::new(1.0, 0.0, 0.0)),
            &Point3f::new(1.0, -1.0, 5.0),
        );
    }

    #[test]
    fn frame_with_parallel_hint_is_still_orthonormal() {
        let t = Transform::from_frame(&Point3f::ORIGIN, &Vector3f::Z, &Vector3f::Z);
        let x = t.transform_vector(&Vector3f::X);
        assert!(approx_eq!(Float, x.dot(&Vector3f::Z), 0.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, x.length(), 1.0, epsilon = 1e-12));
    }

    #[test]
    fn normal_stays_perpendicular_under_rotation() {
        let t = Transform::from_frame(
            &Point3f::new(0.0, 3.0, 0.0),
            &Vector3f::new(1.0, 1.0, 0.0),
            &Vector3f::Z,
        );
        let n = t.transform_normal(&Normal3f::new(0.0, 0.0, 1.0));
        let v = t.transform_vector(&Vector3f::X);
        assert!(approx_eq!(Float, n.dot(&v), 0.0, epsilon = 1e-12));
    }

    prop_vector3!(
        vector3_f64,
        f64,
        -10.0..10.0f64,
        -10.0..10.0f64,
        -10.0..10.0f64
    );
    prop_unit_vector3!(unit_vector3);

    proptest! {
        #[test]
        fn frame_inverse_round_trips(
            o in vector3_f64(),
            z in unit_vector3(),
            x in unit_vector3(),
            p in vector3_f64()
        ) {
            let t = Transform::from_frame(&Point3f::from(o), &z, &x);
            let p = Point3f::from(p);
            let q = t.inverse().transform_point(&t.transform_point(&p));
            prop_assert!(approx_eq!(Float, p.x, q.x, epsilon = 1e-9));
            prop_assert!(approx_eq!(Float, p.y, q.y, epsilon = 1e-9));
            prop_assert!(approx_eq!(Float, p.z, q.z, epsilon = 1e-9));
        }

        #[test]
        fn rigid_transforms_preserve_length(
            z in unit_vector3(),
            x in unit_vector3(),
            v in vector3_f64()
        ) {
            let t = Transform::from_frame(&Point3f::ORIGIN, &z, &x);
            let w = t.transform_vector(&v);
            prop_assert!(approx_eq!(Float, w.length(), v.length(), epsilon = 1e-9));
        }
    }
}
