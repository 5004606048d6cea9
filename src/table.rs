//! Lane table: compile-time mapping from (element, lane count) to a vector representation
//!
//! Every supported pair implements [`Lanes<N>`] exactly once. Widths the active backend holds in
//! one register map to that register; wider ones map to a [`Composite`] of the half width, which
//! is itself a table entry, so the recursion bottoms out at a native register or the scalar
//! fallback.
//!
//! The library maximum is 512 bits and the fallback register is 128 bits:
//!
//! | Element width | Lane counts | Native (fallback) |
//! |---------------|-------------|-------------------|
//! | 8 bits        | 1 ..= 64    | 1 ..= 16          |
//! | 16 bits       | 1 ..= 32    | 1 ..= 8           |
//! | 32 bits       | 1 ..= 16    | 1 ..= 4           |
//! | 64 bits       | 1 ..= 8     | 1 ..= 2           |
//!
//! With the `avx2` feature on x86 the 8-lane `f32` and `i32` entries become one AVX2 register;
//! with `neon` on aarch64 the 4-lane entries become one NEON register.
//!
//! Any other pair is rejected when the program is built:
//!
//! ```compile_fail
//! use rigel_lanes::Simd;
//!
//! // 16 x 64 bits exceeds the 512-bit maximum
//! let v = Simd::<f64, 16>::splat(1.0);
//! ```
//!
//! ```compile_fail
//! use rigel_lanes::Simd;
//!
//! // Lane counts are powers of two
//! let v = Simd::<f32, 3>::zero();
//! ```
//!
//! ```compile_fail
//! use rigel_lanes::Simd;
//!
//! // Only the closed set of element types may occupy a lane
//! let v = Simd::<bool, 4>::zero();
//! ```
//!
//! ```compile_fail
//! use rigel_lanes::Simd;
//!
//! // A single lane has no half-width companion
//! let (lo, hi) = Simd::<f32, 1>::splat(1.0).unpack();
//! ```
//!
//! ```compile_fail
//! use rigel_lanes::Simd;
//!
//! // 8-bit integers have no float of the same width
//! let v = Simd::<u8, 4>::zero().to_float();
//! ```

use crate::backends::scalar::ScalarVector;
use crate::composite::Composite;
use crate::element::{Degrade, Element, HasFloat, Promote};
use crate::simd::Simd;
use crate::traits::{Decompose, LaneVector, SimdVector};
use half::f16;

#[cfg(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")))]
use crate::backends::avx2::{Avx2Int, Avx2Vector};

#[cfg(all(feature = "neon", target_arch = "aarch64"))]
use crate::backends::neon::{NeonInt, NeonVector};

/// Element type that supports `N` lanes
///
/// # Example
///
/// ```rust
/// use rigel_lanes::{Lanes, SimdVector};
///
/// fn lane_count<T: Lanes<N>, const N: usize>() -> usize {
///     <T::Vector as SimdVector>::LANES
/// }
///
/// assert_eq!(lane_count::<u8, 64>(), 64);
/// assert_eq!(lane_count::<f64, 8>(), 8);
/// ```
pub trait Lanes<const N: usize>: Element {
    /// Backend vector holding `N` lanes of `Self`
    type Vector: LaneVector<Scalar = Self>;
}

/// Backend vector for `N` lanes of `T`
pub type Vector<T, const N: usize> = <T as Lanes<N>>::Vector;

/// Backend mask paired with [`Vector<T, N>`]
pub type MaskOf<T, const N: usize> = <Vector<T, N> as SimdVector>::Mask;

/// Backend vector of half the lanes
pub type Half<T, const N: usize> = <Vector<T, N> as Decompose>::Half;

/// Same-width unsigned companion
pub type Unsigned<T, const N: usize> = Simd<<T as Element>::Unsigned, N>;

/// Same-width signed companion
pub type Signed<T, const N: usize> = Simd<<T as Element>::Signed, N>;

/// Same-width float companion of an integer vector
pub type Float<T, const N: usize> = Simd<<T as HasFloat>::Float, N>;

/// Higher-precision float companion
pub type Promoted<T, const N: usize> = Simd<<T as Promote>::Wider, N>;

/// Lower-precision float companion
pub type Degraded<T, const N: usize> = Simd<<T as Degrade>::Narrower, N>;

macro_rules! native {
    ($($ty:ty: $($n:literal),+;)*) => {
        $($(
            impl Lanes<$n> for $ty {
                type Vector = ScalarVector<$ty, $n>;
            }
        )+)*
    };
}

macro_rules! composite {
    ($($ty:ty: $($n:literal => $h:literal),+;)*) => {
        $($(
            impl Lanes<$n> for $ty {
                type Vector = Composite<<$ty as Lanes<$h>>::Vector>;
            }
        )+)*
    };
}

native! {
    u8: 1, 2, 4, 8, 16;
    i8: 1, 2, 4, 8, 16;
    u16: 1, 2, 4, 8;
    i16: 1, 2, 4, 8;
    f16: 1, 2, 4, 8;
    u32: 1, 2, 4;
    i32: 1, 2;
    f32: 1, 2;
    u64: 1, 2;
    i64: 1, 2;
    f64: 1, 2;
}

composite! {
    u8: 32 => 16, 64 => 32;
    i8: 32 => 16, 64 => 32;
    u16: 16 => 8, 32 => 16;
    i16: 16 => 8, 32 => 16;
    f16: 16 => 8, 32 => 16;
    u32: 8 => 4, 16 => 8;
    i32: 16 => 8;
    f32: 16 => 8;
    u64: 4 => 2, 8 => 4;
    i64: 4 => 2, 8 => 4;
    f64: 4 => 2, 8 => 4;
}

// 4 lanes of f32/i32: one NEON register, otherwise the fallback array.
#[cfg(not(all(feature = "neon", target_arch = "aarch64")))]
native! {
    i32: 4;
    f32: 4;
}

#[cfg(all(feature = "neon", target_arch = "aarch64"))]
impl Lanes<4> for f32 {
    type Vector = NeonVector;
}

#[cfg(all(feature = "neon", target_arch = "aarch64"))]
impl Lanes<4> for i32 {
    type Vector = NeonInt;
}

// 8 lanes of f32/i32: one AVX2 register, otherwise two 4-lane halves.
#[cfg(not(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64"))))]
composite! {
    i32: 8 => 4;
    f32: 8 => 4;
}

#[cfg(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")))]
impl Lanes<8> for f32 {
    type Vector = Avx2Vector;
}

#[cfg(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")))]
impl Lanes<8> for i32 {
    type Vector = Avx2Int;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{HorizontalReduce, SimdMask};

    fn lanes_of<V: SimdVector>() -> usize {
        V::LANES
    }

    #[test]
    fn test_every_entry_has_its_lane_count() {
        assert_eq!(lanes_of::<Vector<u8, 64>>(), 64);
        assert_eq!(lanes_of::<Vector<i8, 1>>(), 1);
        assert_eq!(lanes_of::<Vector<f16, 32>>(), 32);
        assert_eq!(lanes_of::<Vector<u32, 16>>(), 16);
        assert_eq!(lanes_of::<Vector<f32, 8>>(), 8);
        assert_eq!(lanes_of::<Vector<i64, 8>>(), 8);
        assert_eq!(<MaskOf<u16, 32> as SimdMask>::LANES, 32);
    }

    #[test]
    fn test_composite_depth_follows_native_width() {
        // 64 x u8 is two levels above the 16-lane fallback register.
        let v = <Vector<u8, 64>>::splat(3);
        assert_eq!(v.lo.lo.0, [3u8; 16]);
        assert_eq!(v.hi.hi.0, [3u8; 16]);

        let w = <Vector<f64, 8>>::splat(1.5);
        assert_eq!(w.hi.lo.0, [1.5, 1.5]);
    }

    #[test]
    fn test_half_width_companion() {
        let v = <Vector<u64, 8>>::splat(9);
        let lo: Half<u64, 8> = v.unpack_lo();
        assert_eq!(lanes_of::<Half<u64, 8>>(), 4);
        assert_eq!(lo.hadd(), 36);
    }
}
