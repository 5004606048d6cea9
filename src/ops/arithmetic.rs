//! Element-wise arithmetic
//!
//! Masked forms merge: lanes outside the mask keep the value of `a`.

use crate::traits::Arithmetic;

/// Add two vectors element-wise
///
/// # Example
///
/// ```rust
/// use rigel_lanes::{DefaultSimdVector, HorizontalReduce, SimdVector};
/// use rigel_lanes::ops::add;
///
/// let a = DefaultSimdVector::splat(2.0);
/// let b = DefaultSimdVector::splat(3.0);
/// let result = add(a, b);
/// assert_eq!(result.hadd(), 5.0 * DefaultSimdVector::LANES as f32);
/// ```
#[inline(always)]
pub fn add<V: Arithmetic>(a: V, b: V) -> V {
    a.add(b)
}

/// Subtract two vectors element-wise
#[inline(always)]
pub fn sub<V: Arithmetic>(a: V, b: V) -> V {
    a.sub(b)
}

/// Multiply two vectors element-wise
///
/// # Example
///
/// ```rust
/// use rigel_lanes::{DefaultSimdVector, HorizontalReduce, SimdVector};
/// use rigel_lanes::ops::mul;
///
/// let a = DefaultSimdVector::splat(2.0);
/// let b = DefaultSimdVector::splat(3.0);
/// assert_eq!(mul(a, b).hadd(), 6.0 * DefaultSimdVector::LANES as f32);
/// ```
#[inline(always)]
pub fn mul<V: Arithmetic>(a: V, b: V) -> V {
    a.mul(b)
}

/// Divide two vectors element-wise
#[inline(always)]
pub fn div<V: Arithmetic>(a: V, b: V) -> V {
    a.div(b)
}

/// Reversed subtraction: `b - a`
#[inline(always)]
pub fn sub_from<V: Arithmetic>(a: V, b: V) -> V {
    a.sub_from(b)
}

/// Masked addition
#[inline(always)]
pub fn add_masked<V: Arithmetic>(a: V, mask: V::Mask, b: V) -> V {
    a.add_masked(mask, b)
}

/// Masked subtraction
#[inline(always)]
pub fn sub_masked<V: Arithmetic>(a: V, mask: V::Mask, b: V) -> V {
    a.sub_masked(mask, b)
}

/// Masked multiplication
#[inline(always)]
pub fn mul_masked<V: Arithmetic>(a: V, mask: V::Mask, b: V) -> V {
    a.mul_masked(mask, b)
}

/// Masked division; inactive lanes are never divided
#[inline(always)]
pub fn div_masked<V: Arithmetic>(a: V, mask: V::Mask, b: V) -> V {
    a.div_masked(mask, b)
}

/// Masked reversed subtraction: `mask[i] ? b[i] - a[i] : a[i]`
#[inline(always)]
pub fn sub_from_masked<V: Arithmetic>(a: V, mask: V::Mask, b: V) -> V {
    a.sub_from_masked(mask, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::scalar::{ScalarMask, ScalarVector};

    #[test]
    fn test_add() {
        let result = add(ScalarVector([2.0f32]), ScalarVector([3.0]));
        assert_eq!(result.0, [5.0]);
    }

    #[test]
    fn test_sub() {
        let result = sub(ScalarVector([5.0f32]), ScalarVector([3.0]));
        assert_eq!(result.0, [2.0]);
    }

    #[test]
    fn test_mul() {
        let result = mul(ScalarVector([2.0f64, 4.0]), ScalarVector([3.0, 0.5]));
        assert_eq!(result.0, [6.0, 2.0]);
    }

    #[test]
    fn test_div() {
        let result = div(ScalarVector([6i32, -7]), ScalarVector([3, 2]));
        assert_eq!(result.0, [2, -3]);
    }

    #[test]
    fn test_sub_from() {
        let result = sub_from(ScalarVector([1u8, 2]), ScalarVector([10, 1]));
        assert_eq!(result.0, [9, 255]);
    }

    #[test]
    fn test_masked_forms_merge() {
        let a = ScalarVector([1i64, 2]);
        let b = ScalarVector([10i64, 0]);
        let m = ScalarMask([true, false]);

        assert_eq!(add_masked(a, m, b).0, [11, 2]);
        assert_eq!(sub_masked(a, m, b).0, [-9, 2]);
        assert_eq!(mul_masked(a, m, b).0, [10, 2]);
        assert_eq!(div_masked(b, m, a).0, [10, 0]);
        assert_eq!(sub_from_masked(a, m, b).0, [9, 2]);
    }
}
