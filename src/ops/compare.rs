//! Comparisons, min/max and blending

use crate::traits::{Comparable, SimdVector};

/// Lanes where `a == b`
#[inline(always)]
pub fn eq<V: Comparable>(a: V, b: V) -> V::Mask {
    a.cmpeq(b)
}

/// Lanes where `a != b`
#[inline(always)]
pub fn ne<V: Comparable>(a: V, b: V) -> V::Mask {
    a.cmpne(b)
}

/// Lanes where `a < b`
///
/// # Example
///
/// ```rust
/// use rigel_lanes::{DefaultSimdVector, SimdMask, SimdVector};
/// use rigel_lanes::ops::lt;
///
/// let a = DefaultSimdVector::splat(1.0);
/// let b = DefaultSimdVector::splat(2.0);
/// assert!(lt(a, b).all());
/// assert!(lt(b, a).none());
/// ```
#[inline(always)]
pub fn lt<V: Comparable>(a: V, b: V) -> V::Mask {
    a.cmplt(b)
}

/// Lanes where `a <= b`
#[inline(always)]
pub fn le<V: Comparable>(a: V, b: V) -> V::Mask {
    a.cmple(b)
}

/// Lanes where `a > b`
#[inline(always)]
pub fn gt<V: Comparable>(a: V, b: V) -> V::Mask {
    a.cmpgt(b)
}

/// Lanes where `a >= b`
#[inline(always)]
pub fn ge<V: Comparable>(a: V, b: V) -> V::Mask {
    a.cmpge(b)
}

/// Element-wise minimum
#[inline(always)]
pub fn min<V: Comparable>(a: V, b: V) -> V {
    a.min(b)
}

/// Element-wise maximum
#[inline(always)]
pub fn max<V: Comparable>(a: V, b: V) -> V {
    a.max(b)
}

/// Per-lane blend: `mask[i] ? a[i] : b[i]`
#[inline(always)]
pub fn select<V: SimdVector>(mask: V::Mask, a: V, b: V) -> V {
    V::select(mask, a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::scalar::{ScalarMask, ScalarVector};

    #[test]
    fn test_relational() {
        let a = ScalarVector([1i16, 5, 3]);
        let b = ScalarVector([2i16, 5, 1]);

        assert_eq!(eq(a, b), ScalarMask([false, true, false]));
        assert_eq!(ne(a, b), ScalarMask([true, false, true]));
        assert_eq!(lt(a, b), ScalarMask([true, false, false]));
        assert_eq!(le(a, b), ScalarMask([true, true, false]));
        assert_eq!(gt(a, b), ScalarMask([false, false, true]));
        assert_eq!(ge(a, b), ScalarMask([false, true, true]));
    }

    #[test]
    fn test_min_max() {
        let a = ScalarVector([1.0f32, f32::NAN]);
        let b = ScalarVector([-1.0f32, 4.0]);

        assert_eq!(min(a, b).0, [-1.0, 4.0]);
        assert_eq!(max(a, b).0, [1.0, 4.0]);
    }

    #[test]
    fn test_select() {
        let mask = ScalarMask([true, false]);
        let result = select(mask, ScalarVector([1u64, 2]), ScalarVector([3, 4]));
        assert_eq!(result.0, [1, 4]);
    }
}
