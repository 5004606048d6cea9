//! Public vector type
//!
//! [`Simd<T, N>`] is a value type of `N` lanes of `T` backed by whatever the lane table picked
//! for the pair. Every method is a thin forward to the backend vector, so the same code runs
//! on native registers and on composites.

use core::fmt;
use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Not, Sub, SubAssign,
};

use crate::element::Element;
use crate::mask::Mask;
use crate::table::{Lanes, Vector};
use crate::traits::{
    Arithmetic, BitwiseLogic, Comparable, Decompose, HorizontalReduce, MemoryAccess, SimdVector,
};

/// `N` lanes of `T`
///
/// # Example
///
/// ```rust
/// use rigel_lanes::{Mask, Simd};
///
/// let a = Simd::<i32, 4>::from_array([1, 2, 3, 4]);
/// let b = Simd::<i32, 4>::from_array([10, 20, 30, 40]);
/// let m = Mask::<i32, 4>::from_array([true, false, true, false]);
///
/// assert_eq!(a.add(b).to_array(), [11, 22, 33, 44]);
/// assert_eq!(a.add_masked(m, b).to_array(), [11, 2, 33, 4]);
/// ```
#[repr(transparent)]
pub struct Simd<T, const N: usize>(pub(crate) Vector<T, N>)
where
    T: Lanes<N>;

impl<T: Lanes<N>, const N: usize> Clone for Simd<T, N> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Lanes<N>, const N: usize> Copy for Simd<T, N> {}

impl<T: Lanes<N>, const N: usize> fmt::Debug for Simd<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Simd").field(&self.to_array()).finish()
    }
}

impl<T: Lanes<N>, const N: usize> PartialEq for Simd<T, N> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl<T: Lanes<N>, const N: usize> Default for Simd<T, N> {
    #[inline(always)]
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Lanes<N>, const N: usize> From<[T; N]> for Simd<T, N> {
    #[inline(always)]
    fn from(lanes: [T; N]) -> Self {
        Self::from_array(lanes)
    }
}

impl<T: Lanes<N>, const N: usize> From<Simd<T, N>> for [T; N] {
    #[inline(always)]
    fn from(v: Simd<T, N>) -> Self {
        v.to_array()
    }
}

impl<T: Lanes<N>, const N: usize> Simd<T, N> {
    /// Number of lanes
    pub const LANES: usize = N;

    /// Every lane zero
    #[inline(always)]
    pub fn zero() -> Self {
        Self(SimdVector::zero())
    }

    /// Broadcast `value` to every lane
    #[inline(always)]
    pub fn splat(value: T) -> Self {
        Self(SimdVector::splat(value))
    }

    /// Build from one value per lane
    #[inline(always)]
    pub fn from_array(lanes: [T; N]) -> Self {
        Self(SimdVector::from_slice(&lanes))
    }

    /// Copy every lane out
    #[inline(always)]
    pub fn to_array(self) -> [T; N] {
        let mut lanes = [T::ZERO; N];
        self.0.to_slice(&mut lanes);
        lanes
    }

    /// Read the first `N` elements of `slice`
    ///
    /// # Panics
    ///
    /// Panics if `slice` has fewer than `N` elements
    #[inline(always)]
    pub fn from_slice(slice: &[T]) -> Self {
        Self(SimdVector::from_slice(slice))
    }

    /// Write every lane to the first `N` elements of `slice`
    ///
    /// # Panics
    ///
    /// Panics if `slice` has fewer than `N` elements
    #[inline(always)]
    pub fn write_to_slice(self, slice: &mut [T]) {
        self.0.to_slice(slice);
    }

    /// Wrap a backend vector
    #[inline(always)]
    pub fn from_vector(vector: Vector<T, N>) -> Self {
        Self(vector)
    }

    /// Unwrap the backend vector
    #[inline(always)]
    pub fn into_vector(self) -> Vector<T, N> {
        self.0
    }

    /// Read lane `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`
    #[inline(always)]
    pub fn extract(self, index: usize) -> T {
        assert!(index < N, "Lane index {} out of range for {} lanes", index, N);
        self.0.extract(index)
    }

    /// Read lane `index` without a range check
    ///
    /// # Safety
    ///
    /// `index` must be less than `N`.
    #[inline(always)]
    pub unsafe fn extract_unchecked(self, index: usize) -> T {
        core::hint::assert_unchecked(index < N);
        self.0.extract(index)
    }

    /// Overwrite lane `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`
    #[inline(always)]
    pub fn insert(&mut self, index: usize, value: T) {
        assert!(index < N, "Lane index {} out of range for {} lanes", index, N);
        self.0.insert(index, value);
    }

    /// Overwrite lane `index` without a range check
    ///
    /// # Safety
    ///
    /// `index` must be less than `N`.
    #[inline(always)]
    pub unsafe fn insert_unchecked(&mut self, index: usize, value: T) {
        core::hint::assert_unchecked(index < N);
        self.0.insert(index, value);
    }

    /// Copy with lane `index` replaced
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`
    #[inline(always)]
    pub fn with_lane(mut self, index: usize, value: T) -> Self {
        self.insert(index, value);
        self
    }

    /// Per-lane blend: `mask[i] ? true_val[i] : false_val[i]`
    #[inline(always)]
    pub fn select(mask: Mask<T, N>, true_val: Self, false_val: Self) -> Self {
        Self(SimdVector::select(mask.0, true_val.0, false_val.0))
    }

    /// Take `value[i]` where `mask[i]` is set, keep the current lane elsewhere
    #[inline(always)]
    pub fn set_masked(&mut self, mask: Mask<T, N>, value: Self) {
        *self = Self::select(mask, value, *self);
    }
}

/// Memory access
impl<T: Lanes<N>, const N: usize> Simd<T, N> {
    /// Unaligned load of `N` consecutive elements
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `N` elements.
    #[inline(always)]
    pub unsafe fn load(ptr: *const T) -> Self {
        Self(MemoryAccess::load(ptr))
    }

    /// Aligned load of `N` consecutive elements
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `N` elements and aligned to `N * size_of::<T>()`.
    #[inline(always)]
    pub unsafe fn load_aligned(ptr: *const T) -> Self {
        Self(MemoryAccess::load_aligned(ptr))
    }

    /// Unaligned store of `N` consecutive elements
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `N` elements.
    #[inline(always)]
    pub unsafe fn store(self, ptr: *mut T) {
        self.0.store(ptr);
    }

    /// Aligned store of `N` consecutive elements
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `N` elements and aligned to `N * size_of::<T>()`.
    #[inline(always)]
    pub unsafe fn store_aligned(self, ptr: *mut T) {
        self.0.store_aligned(ptr);
    }

    /// Load active lanes from `ptr`, keep the current value in the others
    ///
    /// # Safety
    ///
    /// `ptr.add(i)` must be valid for reads for every active lane `i`.
    #[inline(always)]
    pub unsafe fn load_masked(self, mask: Mask<T, N>, ptr: *const T) -> Self {
        Self(self.0.load_masked(mask.0, ptr))
    }

    /// Store active lanes to `ptr`, leave the other elements untouched
    ///
    /// # Safety
    ///
    /// `ptr.add(i)` must be valid for writes for every active lane `i`.
    #[inline(always)]
    pub unsafe fn store_masked(self, mask: Mask<T, N>, ptr: *mut T) {
        self.0.store_masked(mask.0, ptr);
    }

    /// Lane `i` reads `base[indices[i]]`
    ///
    /// # Safety
    ///
    /// `base.add(indices[i])` must be valid for reads for every lane.
    #[inline(always)]
    pub unsafe fn gather(base: *const T, indices: &[usize; N]) -> Self {
        Self(MemoryAccess::gather(base, indices))
    }

    /// Gather into active lanes, keep the current value in the others
    ///
    /// # Safety
    ///
    /// `base.add(indices[i])` must be valid for reads for every active lane.
    #[inline(always)]
    pub unsafe fn gather_masked(self, mask: Mask<T, N>, base: *const T, indices: &[usize; N]) -> Self {
        Self(self.0.gather_masked(mask.0, base, indices))
    }

    /// Lane `i` writes `base[indices[i]]`; with duplicate indices the highest lane wins
    ///
    /// # Safety
    ///
    /// `base.add(indices[i])` must be valid for writes for every lane.
    #[inline(always)]
    pub unsafe fn scatter(self, base: *mut T, indices: &[usize; N]) {
        self.0.scatter(base, indices);
    }

    /// Scatter active lanes only
    ///
    /// # Safety
    ///
    /// `base.add(indices[i])` must be valid for writes for every active lane.
    #[inline(always)]
    pub unsafe fn scatter_masked(self, mask: Mask<T, N>, base: *mut T, indices: &[usize; N]) {
        self.0.scatter_masked(mask.0, base, indices);
    }

    /// Bounds-checked gather from a slice
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds for `slice`
    #[inline]
    pub fn gather_from(slice: &[T], indices: &[usize; N]) -> Self {
        assert!(
            indices.iter().all(|&i| i < slice.len()),
            "Gather index out of bounds"
        );
        // SAFETY: every index was checked against the slice length.
        unsafe { Self::gather(slice.as_ptr(), indices) }
    }

    /// Bounds-checked scatter into a slice
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds for `slice`
    #[inline]
    pub fn scatter_into(self, slice: &mut [T], indices: &[usize; N]) {
        assert!(
            indices.iter().all(|&i| i < slice.len()),
            "Scatter index out of bounds"
        );
        // SAFETY: every index was checked against the slice length.
        unsafe { self.scatter(slice.as_mut_ptr(), indices) }
    }
}

/// Gather and scatter with an index vector
impl<T: Lanes<N>, const N: usize> Simd<T, N>
where
    u32: Lanes<N>,
{
    #[inline(always)]
    fn offsets(indices: Simd<u32, N>) -> [usize; N] {
        indices.to_array().map(|i| i as usize)
    }

    /// Lane `i` reads `base[indices[i]]`
    ///
    /// # Safety
    ///
    /// `base.add(indices[i])` must be valid for reads for every lane.
    #[inline(always)]
    pub unsafe fn gather_indexed(base: *const T, indices: Simd<u32, N>) -> Self {
        Self::gather(base, &Self::offsets(indices))
    }

    /// Gather into active lanes through an index vector
    ///
    /// # Safety
    ///
    /// `base.add(indices[i])` must be valid for reads for every active lane.
    #[inline(always)]
    pub unsafe fn gather_indexed_masked(
        self,
        mask: Mask<T, N>,
        base: *const T,
        indices: Simd<u32, N>,
    ) -> Self {
        self.gather_masked(mask, base, &Self::offsets(indices))
    }

    /// Lane `i` writes `base[indices[i]]`
    ///
    /// # Safety
    ///
    /// `base.add(indices[i])` must be valid for writes for every lane.
    #[inline(always)]
    pub unsafe fn scatter_indexed(self, base: *mut T, indices: Simd<u32, N>) {
        self.scatter(base, &Self::offsets(indices));
    }

    /// Scatter active lanes through an index vector
    ///
    /// # Safety
    ///
    /// `base.add(indices[i])` must be valid for writes for every active lane.
    #[inline(always)]
    pub unsafe fn scatter_indexed_masked(
        self,
        mask: Mask<T, N>,
        base: *mut T,
        indices: Simd<u32, N>,
    ) {
        self.scatter_masked(mask, base, &Self::offsets(indices));
    }
}

macro_rules! binary_ops {
    ($($(#[$doc:meta])* $op:ident, $masked:ident;)*) => {
        $(
            $(#[$doc])*
            #[inline(always)]
            pub fn $op(self, rhs: Self) -> Self {
                Self(self.0.$op(rhs.0))
            }

            /// Merge-masked form: lanes outside `mask` keep `self`
            #[inline(always)]
            pub fn $masked(self, mask: Mask<T, N>, rhs: Self) -> Self {
                Self(self.0.$masked(mask.0, rhs.0))
            }
        )*
    };
}

macro_rules! compare_ops {
    ($($(#[$doc:meta])* $op:ident;)*) => {
        $(
            $(#[$doc])*
            #[inline(always)]
            pub fn $op(self, rhs: Self) -> Mask<T, N> {
                Mask(self.0.$op(rhs.0))
            }
        )*
    };
}

macro_rules! reduce_ops {
    ($($(#[$doc:meta])* $op:ident, $masked:ident;)*) => {
        $(
            $(#[$doc])*
            #[inline(always)]
            pub fn $op(self) -> T {
                self.0.$op()
            }

            /// Reduce the lanes in `mask` only
            #[inline(always)]
            pub fn $masked(self, mask: Mask<T, N>) -> T {
                self.0.$masked(mask.0)
            }
        )*
    };
}

/// Arithmetic, comparison, bitwise logic and reductions
impl<T: Lanes<N>, const N: usize> Simd<T, N> {
    binary_ops! {
        /// Element-wise addition (wrapping for integers)
        add, add_masked;
        /// Element-wise subtraction (wrapping for integers)
        sub, sub_masked;
        /// Element-wise multiplication (wrapping for integers)
        mul, mul_masked;
        /// Element-wise division
        ///
        /// # Panics
        ///
        /// Integer lanes panic on division by zero. The masked form never divides inactive lanes.
        div, div_masked;
        /// Reversed subtraction: `rhs - self`
        sub_from, sub_from_masked;
        /// Element-wise minimum (a single NaN operand is ignored)
        min, min_masked;
        /// Element-wise maximum (a single NaN operand is ignored)
        max, max_masked;
        /// Bitwise AND of the lane bit patterns
        band, band_masked;
        /// Bitwise OR of the lane bit patterns
        bor, bor_masked;
        /// Bitwise XOR of the lane bit patterns
        bxor, bxor_masked;
    }

    /// Bitwise NOT of the lane bit patterns
    #[inline(always)]
    pub fn bnot(self) -> Self {
        Self(self.0.bnot())
    }

    /// Merge-masked bitwise NOT
    #[inline(always)]
    pub fn bnot_masked(self, mask: Mask<T, N>) -> Self {
        Self(self.0.bnot_masked(mask.0))
    }

    compare_ops! {
        /// Lanes where `self == rhs`
        cmpeq;
        /// Lanes where `self != rhs` (NaN lanes included)
        cmpne;
        /// Lanes where `self < rhs`
        cmplt;
        /// Lanes where `self <= rhs`
        cmple;
        /// Lanes where `self > rhs`
        cmpgt;
        /// Lanes where `self >= rhs`
        cmpge;
    }

    reduce_ops! {
        /// Sum of all lanes, reduced as a balanced tree lower half first
        hadd, hadd_masked;
        /// Product of all lanes
        hmul, hmul_masked;
        /// Smallest lane
        hmin, hmin_masked;
        /// Largest lane
        hmax, hmax_masked;
        /// Bitwise AND of all lanes
        hband, hband_masked;
        /// Bitwise OR of all lanes
        hbor, hbor_masked;
        /// Bitwise XOR of all lanes
        hbxor, hbxor_masked;
    }
}

macro_rules! impl_simd_decompose {
    ($($n:literal => $h:literal),* $(,)?) => {
        $(
            /// Split into and assemble from halves
            impl<T> Simd<T, $n>
            where
                T: Lanes<$n> + Lanes<$h>,
                Vector<T, $n>: Decompose<Half = Vector<T, $h>>,
            {
                /// `lo` in the low lanes, `hi` in the high lanes
                #[inline(always)]
                pub fn pack(lo: Simd<T, $h>, hi: Simd<T, $h>) -> Self {
                    Self(Decompose::pack(lo.0, hi.0))
                }

                /// Both halves, low first
                #[inline(always)]
                pub fn unpack(self) -> (Simd<T, $h>, Simd<T, $h>) {
                    (self.unpack_lo(), self.unpack_hi())
                }

                /// Low half
                #[inline(always)]
                pub fn unpack_lo(self) -> Simd<T, $h> {
                    Simd(self.0.unpack_lo())
                }

                /// High half
                #[inline(always)]
                pub fn unpack_hi(self) -> Simd<T, $h> {
                    Simd(self.0.unpack_hi())
                }

                /// Copy with the low half replaced
                #[inline(always)]
                pub fn pack_lo(self, lo: Simd<T, $h>) -> Self {
                    Self(self.0.pack_lo(lo.0))
                }

                /// Copy with the high half replaced
                #[inline(always)]
                pub fn pack_hi(self, hi: Simd<T, $h>) -> Self {
                    Self(self.0.pack_hi(hi.0))
                }
            }
        )*
    };
}

impl_simd_decompose! {
    2 => 1,
    4 => 2,
    8 => 4,
    16 => 8,
    32 => 16,
    64 => 32,
}

macro_rules! impl_binary_operator {
    ($($trait:ident, $fn:ident, $assign_trait:ident, $assign_fn:ident => $op:ident;)*) => {
        $(
            impl<T: Lanes<N>, const N: usize> $trait for Simd<T, N> {
                type Output = Self;

                #[inline(always)]
                fn $fn(self, rhs: Self) -> Self {
                    Simd::$op(self, rhs)
                }
            }

            impl<T: Lanes<N>, const N: usize> $assign_trait for Simd<T, N> {
                #[inline(always)]
                fn $assign_fn(&mut self, rhs: Self) {
                    *self = Simd::$op(*self, rhs);
                }
            }
        )*
    };
}

impl_binary_operator! {
    Add, add, AddAssign, add_assign => add;
    Sub, sub, SubAssign, sub_assign => sub;
    Mul, mul, MulAssign, mul_assign => mul;
    Div, div, DivAssign, div_assign => div;
    BitAnd, bitand, BitAndAssign, bitand_assign => band;
    BitOr, bitor, BitOrAssign, bitor_assign => bor;
    BitXor, bitxor, BitXorAssign, bitxor_assign => bxor;
}

impl<T: Lanes<N>, const N: usize> Not for Simd<T, N> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        self.bnot()
    }
}
