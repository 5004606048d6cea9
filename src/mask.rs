//! Public mask type
//!
//! [`Mask<T, N>`] is one boolean per lane of a [`Simd<T, N>`](crate::Simd). It carries the
//! element type so it always pairs with the matching vector family, even where two families
//! share a backend mask representation.

use core::array;
use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::table::{Lanes, MaskOf};
use crate::traits::{Decompose, SimdMask};

/// Per-lane predicate for `N` lanes of `T`
///
/// # Example
///
/// ```rust
/// use rigel_lanes::{Mask, Simd};
///
/// let v = Simd::<f32, 8>::from_array([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
/// let m = v.cmpge(Simd::splat(4.0)) & !v.cmpeq(Simd::splat(6.0));
///
/// assert_eq!(m.to_bitmask(), 0b1011_0000);
/// assert!(m.any());
/// assert!(!m.all());
/// ```
#[repr(transparent)]
pub struct Mask<T, const N: usize>(pub(crate) MaskOf<T, N>)
where
    T: Lanes<N>;

impl<T: Lanes<N>, const N: usize> Clone for Mask<T, N> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Lanes<N>, const N: usize> Copy for Mask<T, N> {}

impl<T: Lanes<N>, const N: usize> fmt::Debug for Mask<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Mask").field(&self.to_array()).finish()
    }
}

impl<T: Lanes<N>, const N: usize> PartialEq for Mask<T, N> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.to_bitmask() == other.to_bitmask()
    }
}

impl<T: Lanes<N>, const N: usize> Eq for Mask<T, N> {}

impl<T: Lanes<N>, const N: usize> Default for Mask<T, N> {
    #[inline(always)]
    fn default() -> Self {
        Self::splat(false)
    }
}

impl<T: Lanes<N>, const N: usize> From<[bool; N]> for Mask<T, N> {
    #[inline(always)]
    fn from(lanes: [bool; N]) -> Self {
        Self::from_array(lanes)
    }
}

impl<T: Lanes<N>, const N: usize> Mask<T, N> {
    /// Number of lanes
    pub const LANES: usize = N;

    /// Broadcast one boolean to every lane
    #[inline(always)]
    pub fn splat(value: bool) -> Self {
        Self(SimdMask::from_bool(value))
    }

    /// Build from one boolean per lane
    #[inline(always)]
    pub fn from_array(lanes: [bool; N]) -> Self {
        Self(SimdMask::from_bools(&lanes))
    }

    /// Copy every lane out
    #[inline(always)]
    pub fn to_array(self) -> [bool; N] {
        let mut lanes = [false; N];
        self.0.to_bools(&mut lanes);
        lanes
    }

    /// Lane `i` is set when bit `i` of `bits` is set
    #[inline]
    pub fn from_bitmask(bits: u64) -> Self {
        Self::from_array(array::from_fn(|i| (bits >> i) & 1 == 1))
    }

    /// Lane `i` becomes bit `i` of the result
    #[inline(always)]
    pub fn to_bitmask(self) -> u64 {
        self.0.to_bitmask()
    }

    /// Read lane `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`
    #[inline(always)]
    pub fn test(self, index: usize) -> bool {
        assert!(index < N, "Lane index {} out of range for {} lanes", index, N);
        self.0.test(index)
    }

    /// Overwrite lane `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`
    #[inline(always)]
    pub fn set(&mut self, index: usize, value: bool) {
        assert!(index < N, "Lane index {} out of range for {} lanes", index, N);
        self.0.set(index, value);
    }

    /// Every lane set
    #[inline(always)]
    pub fn all(self) -> bool {
        self.0.all()
    }

    /// At least one lane set
    #[inline(always)]
    pub fn any(self) -> bool {
        self.0.any()
    }

    /// No lane set
    #[inline(always)]
    pub fn none(self) -> bool {
        self.0.none()
    }

    /// Lane-wise AND
    #[inline(always)]
    pub fn and(self, rhs: Self) -> Self {
        Self(self.0.and(rhs.0))
    }

    /// Lane-wise OR
    #[inline(always)]
    pub fn or(self, rhs: Self) -> Self {
        Self(self.0.or(rhs.0))
    }

    /// Lane-wise XOR
    #[inline(always)]
    pub fn xor(self, rhs: Self) -> Self {
        Self(self.0.xor(rhs.0))
    }

    /// Lane-wise NOT
    #[inline(always)]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self(self.0.not())
    }

    /// Same lanes as a mask of another element family
    #[inline]
    pub fn cast<U: Lanes<N>>(self) -> Mask<U, N> {
        Mask::from_array(self.to_array())
    }

    /// Wrap a backend mask
    #[inline(always)]
    pub fn from_backend(mask: MaskOf<T, N>) -> Self {
        Self(mask)
    }

    /// Unwrap the backend mask
    #[inline(always)]
    pub fn into_backend(self) -> MaskOf<T, N> {
        self.0
    }
}

macro_rules! impl_mask_decompose {
    ($($n:literal => $h:literal),* $(,)?) => {
        $(
            /// Split into and assemble from halves
            impl<T> Mask<T, $n>
            where
                T: Lanes<$n> + Lanes<$h>,
                MaskOf<T, $n>: Decompose<Half = MaskOf<T, $h>>,
            {
                /// `lo` in the low lanes, `hi` in the high lanes
                #[inline(always)]
                pub fn pack(lo: Mask<T, $h>, hi: Mask<T, $h>) -> Self {
                    Self(Decompose::pack(lo.0, hi.0))
                }

                /// Both halves, low first
                #[inline(always)]
                pub fn unpack(self) -> (Mask<T, $h>, Mask<T, $h>) {
                    (self.unpack_lo(), self.unpack_hi())
                }

                /// Low half
                #[inline(always)]
                pub fn unpack_lo(self) -> Mask<T, $h> {
                    Mask(self.0.unpack_lo())
                }

                /// High half
                #[inline(always)]
                pub fn unpack_hi(self) -> Mask<T, $h> {
                    Mask(self.0.unpack_hi())
                }

                /// Copy with the low half replaced
                #[inline(always)]
                pub fn pack_lo(self, lo: Mask<T, $h>) -> Self {
                    Self(self.0.pack_lo(lo.0))
                }

                /// Copy with the high half replaced
                #[inline(always)]
                pub fn pack_hi(self, hi: Mask<T, $h>) -> Self {
                    Self(self.0.pack_hi(hi.0))
                }
            }
        )*
    };
}

impl_mask_decompose! {
    2 => 1,
    4 => 2,
    8 => 4,
    16 => 8,
    32 => 16,
    64 => 32,
}

macro_rules! impl_mask_operator {
    ($($trait:ident, $fn:ident, $assign_trait:ident, $assign_fn:ident => $op:ident;)*) => {
        $(
            impl<T: Lanes<N>, const N: usize> $trait for Mask<T, N> {
                type Output = Self;

                #[inline(always)]
                fn $fn(self, rhs: Self) -> Self {
                    Mask::$op(self, rhs)
                }
            }

            impl<T: Lanes<N>, const N: usize> $assign_trait for Mask<T, N> {
                #[inline(always)]
                fn $assign_fn(&mut self, rhs: Self) {
                    *self = Mask::$op(*self, rhs);
                }
            }
        )*
    };
}

impl_mask_operator! {
    BitAnd, bitand, BitAndAssign, bitand_assign => and;
    BitOr, bitor, BitOrAssign, bitor_assign => or;
    BitXor, bitxor, BitXorAssign, bitxor_assign => xor;
}

impl<T: Lanes<N>, const N: usize> Not for Mask<T, N> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Mask::not(self)
    }
}
