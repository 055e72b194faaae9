//! Common

use num_traits::{Num, Zero};
use std::ops::Neg;

/// Use 64-bit precision for floating point numbers. Optical path differences
/// of interest are many orders of magnitude below the scene dimensions.
pub type Float = f64;

/// Complex numbers used for refractive indices and field amplitudes.
pub type Complex = num_complex::Complex<Float>;

/// Infinty (∞)
pub const INFINITY: Float = Float::INFINITY;

/// PI (π)
pub const PI: Float = std::f64::consts::PI;

/// 2*PI (2π)
pub const TWO_PI: Float = PI * 2.0;

/// Machine Epsilon
pub const MACHINE_EPSILON: Float = std::f64::EPSILON * 0.5;

/// Minimum distance along a ray for an intersection to count. Rays spawned on
/// a surface must not immediately re-intersect it.
pub const INTERSECTION_EPSILON: Float = 1e-6;

/// Default maximum number of generations traced per ray source.
pub const DEFAULT_RECURSION_LIMIT: usize = 200;

/// Default length used to draw rays that never terminate.
pub const DEFAULT_MAX_LENGTH: Float = 100.0;

/// Returns a complex number with zero imaginary part.
///
/// * `re` - The real part.
#[inline(always)]
pub fn real(re: Float) -> Complex {
    Complex::new(re, 0.0)
}

/// Returns the absolute value of a number.
///
/// * `n` - The number.
#[inline(always)]
pub fn abs<T>(n: T) -> T
where
    T: Num + Neg<Output = T> + PartialOrd + Copy,
{
    if n < T::zero() {
        -n
    } else {
        n
    }
}

/// Returns the minimum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn min<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn max<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a > b {
        a
    } else {
        b
    }
}

/// Clamp the given value to the range [low, high].
///
/// * `val`  - The value.
/// * `low`  - Lower bound.
/// * `high` - Upper bound.
#[inline(always)]
pub fn clamp<T>(val: T, low: T, high: T) -> T
where
    T: PartialOrd + Copy,
{
    if val < low {
        low
    } else if val > high {
        high
    } else {
        val
    }
}

/// Divide two values and return `+∞` when the denominator is zero rather than
/// `NaN` or a panic. Used for derived statistics such as intersection ratios.
///
/// * `num`   - Numerator.
/// * `denom` - Denominator.
#[inline(always)]
pub fn safe_ratio(num: Float, denom: Float) -> Float {
    if denom.is_zero() {
        INFINITY
    } else {
        num / denom
    }
}

/// Returns the smaller root first for the quadratic `a*t^2 + b*t + c = 0`. If
/// there are no real roots `None` is returned.
///
/// * `a` - Coefficient of t^2.
/// * `b` - Coefficient of t.
/// * `c` - Constant term.
pub fn quadratic(a: Float, b: Float, c: Float) -> Option<(Float, Float)> {
    if a == 0.0 {
        if b == 0.0 {
            return None;
        }
        let t = -c / b;
        return Some((t, t));
    }

    let discrim = b * b - 4.0 * a * c;
    if discrim < 0.0 {
        return None;
    }
    let root_discrim = discrim.sqrt();

    // Numerically stable form avoids cancellation for |b| ~ sqrt(discrim).
    let q = if b < 0.0 {
        -0.5 * (b - root_discrim)
    } else {
        -0.5 * (b + root_discrim)
    };
    let mut t0 = q / a;
    let mut t1 = if q != 0.0 { c / q } else { t0 };
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }
    Some((t0, t1))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn safe_ratio_zero_denominator_is_infinite() {
        assert_eq!(safe_ratio(3.0, 0.0), INFINITY);
        assert_eq!(safe_ratio(0.0, 0.0), INFINITY);
        assert_eq!(safe_ratio(3.0, 2.0), 1.5);
    }

    #[test]
    fn quadratic_without_real_roots() {
        assert!(quadratic(1.0, 0.0, 1.0).is_none());
        assert!(quadratic(0.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn clamp_limits() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(INFINITY, 0.0, 10.0), 10.0);
    }

    proptest! {
        #[test]
        fn quadratic_roots_are_ordered(r0 in -100.0..100.0f64, gap in 0.1..100.0f64) {
            // (t - r0)(t - r1) = t^2 - (r0 + r1)t + r0*r1
            let r1 = r0 + gap;
            let (t0, t1) = quadratic(1.0, -(r0 + r1), r0 * r1).unwrap();
            prop_assert!(t0 <= t1);
            prop_assert!(approx_eq!(Float, t0, r0, epsilon = 1e-6));
            prop_assert!(approx_eq!(Float, t1, r1, epsilon = 1e-6));
        }
    }
}
