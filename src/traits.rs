//! Core SIMD capability traits
//!
//! This module defines the contract every vector representation satisfies: the backend
//! registers (scalar arrays, AVX2, NEON) and the recursive [`Composite`](crate::Composite)
//! wrapper. The contract is split into small orthogonal capabilities that are composed per
//! concrete vector type; [`LaneVector`] is the union the lane table requires.
//!
//! # Merge masking
//!
//! Every `*_masked` operation computes `mask[i] ? f(self[i], rhs[i]) : self[i]`. Masked-off
//! lanes keep the value of `self`, never zero. The default implementations express this through
//! [`SimdVector::select`], so a backend only overrides them when it has a cheaper route or when
//! evaluating `f` on masked-off lanes would be observable (integer division by zero, memory
//! access).

use crate::element::Element;

/// Core SIMD vector abstraction trait
///
/// # Example
///
/// ```rust
/// use rigel_lanes::{ScalarVector, SimdVector};
///
/// let mut v = ScalarVector::<i32, 4>::splat(7);
/// v.insert(2, 99);
/// assert_eq!(v.extract(2), 99);
/// assert_eq!(v.extract(0), 7);
/// ```
pub trait SimdVector: Copy + Clone + Sized {
    /// Lane element type
    type Scalar: Element;

    /// Mask type with one lane per vector lane
    type Mask: SimdMask;

    /// Number of lanes
    const LANES: usize;

    /// Vector with every lane set to zero
    fn zero() -> Self;

    /// Broadcast a scalar value to all lanes
    fn splat(value: Self::Scalar) -> Self;

    /// Load from a slice (must have at least LANES elements)
    ///
    /// # Panics
    ///
    /// Panics if slice has fewer than LANES elements
    fn from_slice(slice: &[Self::Scalar]) -> Self;

    /// Store to a slice (must have at least LANES elements)
    ///
    /// # Panics
    ///
    /// Panics if slice has fewer than LANES elements
    fn to_slice(self, slice: &mut [Self::Scalar]);

    /// Read one lane
    ///
    /// # Panics
    ///
    /// Panics if `index >= LANES`
    fn extract(self, index: usize) -> Self::Scalar;

    /// Overwrite one lane
    ///
    /// # Panics
    ///
    /// Panics if `index >= LANES`
    fn insert(&mut self, index: usize, value: Self::Scalar);

    /// Per-lane blend: `mask[i] ? true_val[i] : false_val[i]`
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self;
}

/// Element-wise arithmetic with merge-masked variants
pub trait Arithmetic: SimdVector {
    /// Element-wise addition
    fn add(self, rhs: Self) -> Self;

    /// Element-wise subtraction
    fn sub(self, rhs: Self) -> Self;

    /// Element-wise multiplication
    fn mul(self, rhs: Self) -> Self;

    /// Element-wise division
    fn div(self, rhs: Self) -> Self;

    /// Reversed subtraction: `lhs - self`
    #[inline(always)]
    fn sub_from(self, lhs: Self) -> Self {
        lhs.sub(self)
    }

    /// Masked addition
    #[inline(always)]
    fn add_masked(self, mask: Self::Mask, rhs: Self) -> Self {
        Self::select(mask, self.add(rhs), self)
    }

    /// Masked subtraction
    #[inline(always)]
    fn sub_masked(self, mask: Self::Mask, rhs: Self) -> Self {
        Self::select(mask, self.sub(rhs), self)
    }

    /// Masked multiplication
    #[inline(always)]
    fn mul_masked(self, mask: Self::Mask, rhs: Self) -> Self {
        Self::select(mask, self.mul(rhs), self)
    }

    /// Masked division
    ///
    /// Backends with integer lanes override this so masked-off lanes are never divided.
    #[inline(always)]
    fn div_masked(self, mask: Self::Mask, rhs: Self) -> Self {
        Self::select(mask, self.div(rhs), self)
    }

    /// Masked reversed subtraction: `mask[i] ? lhs[i] - self[i] : self[i]`
    #[inline(always)]
    fn sub_from_masked(self, mask: Self::Mask, lhs: Self) -> Self {
        Self::select(mask, lhs.sub(self), self)
    }
}

/// Relational comparisons and min/max
pub trait Comparable: SimdVector {
    /// Lanes where `self == rhs`
    fn cmpeq(self, rhs: Self) -> Self::Mask;

    /// Lanes where `self != rhs` (true for NaN lanes)
    fn cmpne(self, rhs: Self) -> Self::Mask;

    /// Lanes where `self < rhs`
    fn cmplt(self, rhs: Self) -> Self::Mask;

    /// Lanes where `self <= rhs`
    fn cmple(self, rhs: Self) -> Self::Mask;

    /// Lanes where `self > rhs`
    fn cmpgt(self, rhs: Self) -> Self::Mask;

    /// Lanes where `self >= rhs`
    fn cmpge(self, rhs: Self) -> Self::Mask;

    /// Element-wise minimum
    fn min(self, rhs: Self) -> Self;

    /// Element-wise maximum
    fn max(self, rhs: Self) -> Self;

    /// Masked minimum
    #[inline(always)]
    fn min_masked(self, mask: Self::Mask, rhs: Self) -> Self {
        Self::select(mask, self.min(rhs), self)
    }

    /// Masked maximum
    #[inline(always)]
    fn max_masked(self, mask: Self::Mask, rhs: Self) -> Self {
        Self::select(mask, self.max(rhs), self)
    }
}

/// Bitwise logic on the lane bit patterns (floats included)
pub trait BitwiseLogic: SimdVector {
    /// Bitwise AND
    fn band(self, rhs: Self) -> Self;

    /// Bitwise OR
    fn bor(self, rhs: Self) -> Self;

    /// Bitwise XOR
    fn bxor(self, rhs: Self) -> Self;

    /// Bitwise NOT
    fn bnot(self) -> Self;

    /// Masked bitwise AND
    #[inline(always)]
    fn band_masked(self, mask: Self::Mask, rhs: Self) -> Self {
        Self::select(mask, self.band(rhs), self)
    }

    /// Masked bitwise OR
    #[inline(always)]
    fn bor_masked(self, mask: Self::Mask, rhs: Self) -> Self {
        Self::select(mask, self.bor(rhs), self)
    }

    /// Masked bitwise XOR
    #[inline(always)]
    fn bxor_masked(self, mask: Self::Mask, rhs: Self) -> Self {
        Self::select(mask, self.bxor(rhs), self)
    }

    /// Masked bitwise NOT
    #[inline(always)]
    fn bnot_masked(self, mask: Self::Mask) -> Self {
        Self::select(mask, self.bnot(), self)
    }
}

/// Horizontal reductions
///
/// Reductions combine lanes as a balanced binary tree, lower half before upper half:
/// `reduce(v) = combine(reduce(v.lo), reduce(v.hi))` down to single lanes. Every backend and
/// every decomposition depth uses this order, so float results are bit-identical whether a
/// width is native or composed.
///
/// Masked reductions replace masked-off lanes with the identity of the operation (0 for add,
/// 1 for mul, `HIGHEST` for min, `LOWEST` for max, all-ones for AND, 0 for OR/XOR).
pub trait HorizontalReduce: SimdVector {
    /// Sum of all lanes
    fn hadd(self) -> Self::Scalar;

    /// Product of all lanes
    fn hmul(self) -> Self::Scalar;

    /// Minimum lane
    fn hmin(self) -> Self::Scalar;

    /// Maximum lane
    fn hmax(self) -> Self::Scalar;

    /// Bitwise AND of all lanes
    fn hband(self) -> Self::Scalar;

    /// Bitwise OR of all lanes
    fn hbor(self) -> Self::Scalar;

    /// Bitwise XOR of all lanes
    fn hbxor(self) -> Self::Scalar;

    /// Sum of the selected lanes
    #[inline(always)]
    fn hadd_masked(self, mask: Self::Mask) -> Self::Scalar {
        Self::select(mask, self, Self::zero()).hadd()
    }

    /// Product of the selected lanes
    #[inline(always)]
    fn hmul_masked(self, mask: Self::Mask) -> Self::Scalar {
        Self::select(mask, self, Self::splat(<Self::Scalar as Element>::ONE)).hmul()
    }

    /// Minimum of the selected lanes
    #[inline(always)]
    fn hmin_masked(self, mask: Self::Mask) -> Self::Scalar {
        Self::select(mask, self, Self::splat(<Self::Scalar as Element>::HIGHEST)).hmin()
    }

    /// Maximum of the selected lanes
    #[inline(always)]
    fn hmax_masked(self, mask: Self::Mask) -> Self::Scalar {
        Self::select(mask, self, Self::splat(<Self::Scalar as Element>::LOWEST)).hmax()
    }

    /// Bitwise AND of the selected lanes
    #[inline(always)]
    fn hband_masked(self, mask: Self::Mask) -> Self::Scalar {
        Self::select(mask, self, Self::splat(<Self::Scalar as Element>::all_ones())).hband()
    }

    /// Bitwise OR of the selected lanes
    #[inline(always)]
    fn hbor_masked(self, mask: Self::Mask) -> Self::Scalar {
        Self::select(mask, self, Self::zero()).hbor()
    }

    /// Bitwise XOR of the selected lanes
    #[inline(always)]
    fn hbxor_masked(self, mask: Self::Mask) -> Self::Scalar {
        Self::select(mask, self, Self::zero()).hbxor()
    }
}

/// Raw-pointer memory access
///
/// None of these check pointer validity, alignment or index bounds. Masked variants touch
/// only the memory of active lanes; masked-off lanes are neither read nor written. Scatter
/// writes lanes in ascending order, so with duplicate indices the highest lane wins.
pub trait MemoryAccess: SimdVector {
    /// Unaligned load of LANES consecutive elements
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of LANES elements.
    unsafe fn load(ptr: *const Self::Scalar) -> Self;

    /// Aligned load of LANES consecutive elements
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of LANES elements and aligned to the vector byte width.
    unsafe fn load_aligned(ptr: *const Self::Scalar) -> Self;

    /// Unaligned store of LANES consecutive elements
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of LANES elements.
    unsafe fn store(self, ptr: *mut Self::Scalar);

    /// Aligned store of LANES consecutive elements
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of LANES elements and aligned to the vector byte width.
    unsafe fn store_aligned(self, ptr: *mut Self::Scalar);

    /// Merge-masked load: active lanes read `ptr[i]`, the rest keep `self[i]`
    ///
    /// # Safety
    ///
    /// `ptr.add(i)` must be valid for reads for every active lane `i`.
    unsafe fn load_masked(self, mask: Self::Mask, ptr: *const Self::Scalar) -> Self;

    /// Masked store: only active lanes are written
    ///
    /// # Safety
    ///
    /// `ptr.add(i)` must be valid for writes for every active lane `i`.
    unsafe fn store_masked(self, mask: Self::Mask, ptr: *mut Self::Scalar);

    /// Gather `base[indices[i]]` into lane `i`
    ///
    /// # Safety
    ///
    /// `base.add(indices[i])` must be valid for reads for every lane.
    ///
    /// # Panics
    ///
    /// Panics if `indices` has fewer than LANES entries
    unsafe fn gather(base: *const Self::Scalar, indices: &[usize]) -> Self;

    /// Merge-masked gather
    ///
    /// # Safety
    ///
    /// `base.add(indices[i])` must be valid for reads for every active lane.
    ///
    /// # Panics
    ///
    /// Panics if `indices` has fewer than LANES entries
    unsafe fn gather_masked(
        self,
        mask: Self::Mask,
        base: *const Self::Scalar,
        indices: &[usize],
    ) -> Self;

    /// Scatter lane `i` to `base[indices[i]]`
    ///
    /// # Safety
    ///
    /// `base.add(indices[i])` must be valid for writes for every lane.
    ///
    /// # Panics
    ///
    /// Panics if `indices` has fewer than LANES entries
    unsafe fn scatter(self, base: *mut Self::Scalar, indices: &[usize]);

    /// Masked scatter: only active lanes are written
    ///
    /// # Safety
    ///
    /// `base.add(indices[i])` must be valid for writes for every active lane.
    ///
    /// # Panics
    ///
    /// Panics if `indices` has fewer than LANES entries
    unsafe fn scatter_masked(self, mask: Self::Mask, base: *mut Self::Scalar, indices: &[usize]);
}

/// Mask type for conditional SIMD operations
///
/// Masks represent per-lane boolean values, enabling branchless conditional logic.
pub trait SimdMask: Copy + Clone + Sized {
    /// Number of lanes
    const LANES: usize;

    /// Broadcast one boolean to every lane
    fn from_bool(value: bool) -> Self;

    /// Build from a slice of booleans (must have at least LANES elements)
    ///
    /// # Panics
    ///
    /// Panics if slice has fewer than LANES elements
    fn from_bools(slice: &[bool]) -> Self;

    /// Write lanes to a slice of booleans (must have at least LANES elements)
    ///
    /// # Panics
    ///
    /// Panics if slice has fewer than LANES elements
    fn to_bools(self, slice: &mut [bool]);

    /// Read one lane
    ///
    /// # Panics
    ///
    /// Panics if `index >= LANES`
    fn test(self, index: usize) -> bool;

    /// Overwrite one lane
    ///
    /// # Panics
    ///
    /// Panics if `index >= LANES`
    fn set(&mut self, index: usize, value: bool);

    /// Returns true if all lanes are set
    fn all(self) -> bool;

    /// Returns true if any lane is set
    fn any(self) -> bool;

    /// Returns true if no lanes are set
    fn none(self) -> bool;

    /// Bitwise AND of two masks
    fn and(self, rhs: Self) -> Self;

    /// Bitwise OR of two masks
    fn or(self, rhs: Self) -> Self;

    /// Bitwise XOR of two masks
    fn xor(self, rhs: Self) -> Self;

    /// Bitwise NOT of mask
    fn not(self) -> Self;

    /// Lane `i` becomes bit `i` of the result
    fn to_bitmask(self) -> u64;
}

/// Split into and assemble from two half-width values
///
/// Implemented for every vector and mask of width 2 or more. Width 1 is the terminal leaf and
/// has no implementation, so packing or unpacking it does not compile.
pub trait Decompose: Copy {
    /// The half-width companion
    type Half;

    /// Place `lo` in the low lanes and `hi` in the high lanes
    fn pack(lo: Self::Half, hi: Self::Half) -> Self;

    /// Low half (lanes `0..LANES/2`)
    fn unpack_lo(self) -> Self::Half;

    /// High half (lanes `LANES/2..LANES`)
    fn unpack_hi(self) -> Self::Half;

    /// Both halves, low first
    #[inline(always)]
    fn unpack(self) -> (Self::Half, Self::Half) {
        (self.unpack_lo(), self.unpack_hi())
    }

    /// Replace the low half
    #[inline(always)]
    fn pack_lo(self, lo: Self::Half) -> Self {
        Self::pack(lo, self.unpack_hi())
    }

    /// Replace the high half
    #[inline(always)]
    fn pack_hi(self, hi: Self::Half) -> Self {
        Self::pack(self.unpack_lo(), hi)
    }
}

/// Every capability a lane-table vector provides
pub trait LaneVector:
    SimdVector + Arithmetic + Comparable + BitwiseLogic + HorizontalReduce + MemoryAccess
{
}

impl<V> LaneVector for V where
    V: SimdVector + Arithmetic + Comparable + BitwiseLogic + HorizontalReduce + MemoryAccess
{
}
