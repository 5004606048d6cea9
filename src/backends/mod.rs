//! SIMD backend implementations
//!
//! The scalar backend is always compiled and serves every lane count the lane table maps to a
//! single register. Hardware backends are selected at compile time via cargo features and only
//! take over the widths they hold in one register.

// Scalar backend (always available as fallback)
pub mod scalar;

// Platform-specific backends (feature-gated)
#[cfg(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")))]
pub mod avx2;

#[cfg(all(feature = "neon", target_arch = "aarch64"))]
pub mod neon;

/// Reduce lanes as a balanced binary tree, lower half first
///
/// This is the single reduction order of the crate. Backends that reduce in registers must
/// produce exactly this association.
#[inline]
pub(crate) fn tree_reduce<T: Copy>(lanes: &[T], combine: fn(T, T) -> T) -> T {
    if lanes.len() == 1 {
        return lanes[0];
    }
    let (lo, hi) = lanes.split_at(lanes.len() / 2);
    combine(tree_reduce(lo, combine), tree_reduce(hi, combine))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_reduce_order() {
        // Sequential summation gives 1.0 here; the tree gives (1e8 + 1) + (-1e8 + 1) = 0.0.
        let lanes = [1.0e8f32, 1.0, -1.0e8, 1.0];
        assert_eq!(tree_reduce(&lanes, |a: f32, b: f32| a + b), 0.0);
        assert_eq!(lanes.iter().fold(0.0f32, |acc, &x| acc + x), 1.0);
    }

    #[test]
    fn test_tree_reduce_single_lane() {
        assert_eq!(tree_reduce(&[42u8], |a: u8, b: u8| a.wrapping_add(b)), 42);
    }
}
