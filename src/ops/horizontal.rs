//! Horizontal reduction operations
//!
//! Reduce a vector to a single scalar by combining all lanes, lower half before upper half.

use crate::traits::HorizontalReduce;

/// Sum of all lanes
///
/// # Example
///
/// ```rust
/// use rigel_lanes::{DefaultSimdVector, SimdVector};
/// use rigel_lanes::ops::hadd;
///
/// let a = DefaultSimdVector::splat(2.0);
/// assert_eq!(hadd(a), 2.0 * DefaultSimdVector::LANES as f32);
/// ```
#[inline(always)]
pub fn hadd<V: HorizontalReduce>(a: V) -> V::Scalar {
    a.hadd()
}

/// Product of all lanes
#[inline(always)]
pub fn hmul<V: HorizontalReduce>(a: V) -> V::Scalar {
    a.hmul()
}

/// Smallest lane
#[inline(always)]
pub fn hmin<V: HorizontalReduce>(a: V) -> V::Scalar {
    a.hmin()
}

/// Largest lane
#[inline(always)]
pub fn hmax<V: HorizontalReduce>(a: V) -> V::Scalar {
    a.hmax()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::scalar::ScalarVector;

    #[test]
    fn test_hadd() {
        assert_eq!(hadd(ScalarVector([2.0f32, 3.0])), 5.0);
    }

    #[test]
    fn test_hmul() {
        assert_eq!(hmul(ScalarVector([2u32, 3, 4, 5])), 120);
    }

    #[test]
    fn test_hmax() {
        assert_eq!(hmax(ScalarVector([-2i8, 7, 3, -100])), 7);
    }

    #[test]
    fn test_hmin() {
        assert_eq!(hmin(ScalarVector([-2i8, 7, 3, -100])), -100);
    }
}
