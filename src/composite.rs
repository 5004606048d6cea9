//! Recursive composition of wide vectors from two half-width vectors
//!
//! `Composite<H>` holds a low half and a high half. Every operation is applied to both halves
//! and the results reassembled; a mask of the same width splits the same way, so `mask.lo`
//! governs lanes `0..N/2` and `mask.hi` governs `N/2..N`. Nesting `Composite` gives any
//! power-of-two multiple of a native width.
//!
//! Reductions combine `lo` before `hi`, which reproduces the balanced tree order of the backends
//! at every nesting depth.

use crate::element::Element;
use crate::traits::{
    Arithmetic, BitwiseLogic, Comparable, Decompose, HorizontalReduce, MemoryAccess, SimdMask,
    SimdVector,
};

/// Two half-width vectors (or masks) forming one of twice the width
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Composite<H> {
    /// Lanes `0..N/2`
    pub lo: H,
    /// Lanes `N/2..N`
    pub hi: H,
}

impl<H> Composite<H> {
    /// Assemble from two halves
    #[inline(always)]
    pub const fn new(lo: H, hi: H) -> Self {
        Self { lo, hi }
    }
}

impl<H: SimdVector> SimdVector for Composite<H> {
    type Scalar = H::Scalar;
    type Mask = Composite<H::Mask>;

    const LANES: usize = 2 * H::LANES;

    #[inline(always)]
    fn zero() -> Self {
        Self::new(H::zero(), H::zero())
    }

    #[inline(always)]
    fn splat(value: Self::Scalar) -> Self {
        Self::new(H::splat(value), H::splat(value))
    }

    #[inline(always)]
    fn from_slice(slice: &[Self::Scalar]) -> Self {
        assert!(slice.len() >= 2 * H::LANES, "Slice too short for composite load");
        Self::new(H::from_slice(slice), H::from_slice(&slice[H::LANES..]))
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [Self::Scalar]) {
        assert!(slice.len() >= 2 * H::LANES, "Slice too short for composite store");
        let (lo, hi) = slice.split_at_mut(H::LANES);
        self.lo.to_slice(lo);
        self.hi.to_slice(hi);
    }

    #[inline(always)]
    fn extract(self, index: usize) -> Self::Scalar {
        if index < H::LANES {
            self.lo.extract(index)
        } else {
            self.hi.extract(index - H::LANES)
        }
    }

    #[inline(always)]
    fn insert(&mut self, index: usize, value: Self::Scalar) {
        if index < H::LANES {
            self.lo.insert(index, value);
        } else {
            self.hi.insert(index - H::LANES, value);
        }
    }

    #[inline(always)]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self {
        Self::new(
            H::select(mask.lo, true_val.lo, false_val.lo),
            H::select(mask.hi, true_val.hi, false_val.hi),
        )
    }
}

// Masked operations forward to the halves instead of using the select defaults, so a backend
// override (integer division) is honoured at every depth.
macro_rules! forward_binary {
    ($($op:ident, $masked:ident;)*) => {
        $(
            #[inline(always)]
            fn $op(self, rhs: Self) -> Self {
                Self::new(self.lo.$op(rhs.lo), self.hi.$op(rhs.hi))
            }

            #[inline(always)]
            fn $masked(self, mask: Self::Mask, rhs: Self) -> Self {
                Self::new(self.lo.$masked(mask.lo, rhs.lo), self.hi.$masked(mask.hi, rhs.hi))
            }
        )*
    };
}

impl<H: Arithmetic> Arithmetic for Composite<H> {
    forward_binary! {
        add, add_masked;
        sub, sub_masked;
        mul, mul_masked;
        div, div_masked;
        sub_from, sub_from_masked;
    }
}

impl<H: Comparable> Comparable for Composite<H> {
    #[inline(always)]
    fn cmpeq(self, rhs: Self) -> Self::Mask {
        Composite::new(self.lo.cmpeq(rhs.lo), self.hi.cmpeq(rhs.hi))
    }

    #[inline(always)]
    fn cmpne(self, rhs: Self) -> Self::Mask {
        Composite::new(self.lo.cmpne(rhs.lo), self.hi.cmpne(rhs.hi))
    }

    #[inline(always)]
    fn cmplt(self, rhs: Self) -> Self::Mask {
        Composite::new(self.lo.cmplt(rhs.lo), self.hi.cmplt(rhs.hi))
    }

    #[inline(always)]
    fn cmple(self, rhs: Self) -> Self::Mask {
        Composite::new(self.lo.cmple(rhs.lo), self.hi.cmple(rhs.hi))
    }

    #[inline(always)]
    fn cmpgt(self, rhs: Self) -> Self::Mask {
        Composite::new(self.lo.cmpgt(rhs.lo), self.hi.cmpgt(rhs.hi))
    }

    #[inline(always)]
    fn cmpge(self, rhs: Self) -> Self::Mask {
        Composite::new(self.lo.cmpge(rhs.lo), self.hi.cmpge(rhs.hi))
    }

    forward_binary! {
        min, min_masked;
        max, max_masked;
    }
}

impl<H: BitwiseLogic> BitwiseLogic for Composite<H> {
    forward_binary! {
        band, band_masked;
        bor, bor_masked;
        bxor, bxor_masked;
    }

    #[inline(always)]
    fn bnot(self) -> Self {
        Self::new(self.lo.bnot(), self.hi.bnot())
    }

    #[inline(always)]
    fn bnot_masked(self, mask: Self::Mask) -> Self {
        Self::new(self.lo.bnot_masked(mask.lo), self.hi.bnot_masked(mask.hi))
    }
}

macro_rules! forward_reduce {
    ($($op:ident, $masked:ident => $combine:ident;)*) => {
        $(
            #[inline(always)]
            fn $op(self) -> Self::Scalar {
                self.lo.$op().$combine(self.hi.$op())
            }

            #[inline(always)]
            fn $masked(self, mask: Self::Mask) -> Self::Scalar {
                self.lo.$masked(mask.lo).$combine(self.hi.$masked(mask.hi))
            }
        )*
    };
}

impl<H: HorizontalReduce> HorizontalReduce for Composite<H> {
    forward_reduce! {
        hadd, hadd_masked => lane_add;
        hmul, hmul_masked => lane_mul;
        hmin, hmin_masked => lane_min;
        hmax, hmax_masked => lane_max;
        hband, hband_masked => lane_and;
        hbor, hbor_masked => lane_or;
        hbxor, hbxor_masked => lane_xor;
    }
}

impl<H: MemoryAccess> MemoryAccess for Composite<H> {
    #[inline(always)]
    unsafe fn load(ptr: *const Self::Scalar) -> Self {
        Self::new(H::load(ptr), H::load(ptr.add(H::LANES)))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const Self::Scalar) -> Self {
        Self::new(H::load_aligned(ptr), H::load_aligned(ptr.add(H::LANES)))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut Self::Scalar) {
        self.lo.store(ptr);
        self.hi.store(ptr.add(H::LANES));
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut Self::Scalar) {
        self.lo.store_aligned(ptr);
        self.hi.store_aligned(ptr.add(H::LANES));
    }

    // The high half may lie past the caller's buffer when only low lanes are active.
    #[inline(always)]
    unsafe fn load_masked(self, mask: Self::Mask, ptr: *const Self::Scalar) -> Self {
        Self::new(
            self.lo.load_masked(mask.lo, ptr),
            self.hi.load_masked(mask.hi, ptr.wrapping_add(H::LANES)),
        )
    }

    #[inline(always)]
    unsafe fn store_masked(self, mask: Self::Mask, ptr: *mut Self::Scalar) {
        self.lo.store_masked(mask.lo, ptr);
        self.hi.store_masked(mask.hi, ptr.wrapping_add(H::LANES));
    }

    #[inline(always)]
    unsafe fn gather(base: *const Self::Scalar, indices: &[usize]) -> Self {
        assert!(indices.len() >= 2 * H::LANES, "Index slice too short for composite gather");
        Self::new(H::gather(base, indices), H::gather(base, &indices[H::LANES..]))
    }

    #[inline(always)]
    unsafe fn gather_masked(
        self,
        mask: Self::Mask,
        base: *const Self::Scalar,
        indices: &[usize],
    ) -> Self {
        assert!(indices.len() >= 2 * H::LANES, "Index slice too short for composite gather");
        Self::new(
            self.lo.gather_masked(mask.lo, base, indices),
            self.hi.gather_masked(mask.hi, base, &indices[H::LANES..]),
        )
    }

    // Low half first keeps the ascending lane order for duplicate indices.
    #[inline(always)]
    unsafe fn scatter(self, base: *mut Self::Scalar, indices: &[usize]) {
        assert!(indices.len() >= 2 * H::LANES, "Index slice too short for composite scatter");
        self.lo.scatter(base, indices);
        self.hi.scatter(base, &indices[H::LANES..]);
    }

    #[inline(always)]
    unsafe fn scatter_masked(self, mask: Self::Mask, base: *mut Self::Scalar, indices: &[usize]) {
        assert!(indices.len() >= 2 * H::LANES, "Index slice too short for composite scatter");
        self.lo.scatter_masked(mask.lo, base, indices);
        self.hi.scatter_masked(mask.hi, base, &indices[H::LANES..]);
    }
}

impl<M: SimdMask> SimdMask for Composite<M> {
    const LANES: usize = 2 * M::LANES;

    #[inline(always)]
    fn from_bool(value: bool) -> Self {
        Self::new(M::from_bool(value), M::from_bool(value))
    }

    #[inline(always)]
    fn from_bools(slice: &[bool]) -> Self {
        assert!(slice.len() >= 2 * M::LANES, "Slice too short for composite mask load");
        Self::new(M::from_bools(slice), M::from_bools(&slice[M::LANES..]))
    }

    #[inline(always)]
    fn to_bools(self, slice: &mut [bool]) {
        assert!(slice.len() >= 2 * M::LANES, "Slice too short for composite mask store");
        let (lo, hi) = slice.split_at_mut(M::LANES);
        self.lo.to_bools(lo);
        self.hi.to_bools(hi);
    }

    #[inline(always)]
    fn test(self, index: usize) -> bool {
        if index < M::LANES {
            self.lo.test(index)
        } else {
            self.hi.test(index - M::LANES)
        }
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: bool) {
        if index < M::LANES {
            self.lo.set(index, value);
        } else {
            self.hi.set(index - M::LANES, value);
        }
    }

    #[inline(always)]
    fn all(self) -> bool {
        self.lo.all() && self.hi.all()
    }

    #[inline(always)]
    fn any(self) -> bool {
        self.lo.any() || self.hi.any()
    }

    #[inline(always)]
    fn none(self) -> bool {
        self.lo.none() && self.hi.none()
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        Self::new(self.lo.and(rhs.lo), self.hi.and(rhs.hi))
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        Self::new(self.lo.or(rhs.lo), self.hi.or(rhs.hi))
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        Self::new(self.lo.xor(rhs.lo), self.hi.xor(rhs.hi))
    }

    #[inline(always)]
    fn not(self) -> Self {
        Self::new(self.lo.not(), self.hi.not())
    }

    #[inline(always)]
    fn to_bitmask(self) -> u64 {
        self.lo.to_bitmask() | (self.hi.to_bitmask() << M::LANES)
    }
}

impl<H: Copy> Decompose for Composite<H> {
    type Half = H;

    #[inline(always)]
    fn pack(lo: H, hi: H) -> Self {
        Self::new(lo, hi)
    }

    #[inline(always)]
    fn unpack_lo(self) -> H {
        self.lo
    }

    #[inline(always)]
    fn unpack_hi(self) -> H {
        self.hi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::scalar::{ScalarMask, ScalarVector};

    type I32x4 = Composite<ScalarVector<i32, 2>>;
    type F32x8 = Composite<Composite<ScalarVector<f32, 2>>>;

    fn i32x4(lanes: [i32; 4]) -> I32x4 {
        I32x4::from_slice(&lanes)
    }

    fn to_array<V: SimdVector, const N: usize>(v: V) -> [V::Scalar; N] {
        let mut out = [<V::Scalar as Element>::ZERO; N];
        v.to_slice(&mut out);
        out
    }

    #[test]
    fn test_composite_matches_native() {
        let a = [1i32, -2, 3, i32::MAX];
        let b = [10i32, 20, -30, 1];
        let native_a = ScalarVector(a);
        let native_b = ScalarVector(b);

        assert_eq!(to_array::<_, 4>(i32x4(a).add(i32x4(b))), native_a.add(native_b).0);
        assert_eq!(to_array::<_, 4>(i32x4(a).mul(i32x4(b))), native_a.mul(native_b).0);
        assert_eq!(to_array::<_, 4>(i32x4(a).max(i32x4(b))), native_a.max(native_b).0);
        assert_eq!(
            i32x4(a).cmplt(i32x4(b)).to_bitmask(),
            native_a.cmplt(native_b).to_bitmask()
        );
    }

    #[test]
    fn test_composite_mask_splits_lanes() {
        let a = i32x4([1, 2, 3, 4]);
        let b = i32x4([10, 20, 30, 40]);
        let mask = Composite::new(ScalarMask([true, false]), ScalarMask([true, false]));

        assert_eq!(to_array::<_, 4>(a.add_masked(mask, b)), [11, 2, 33, 4]);
        assert_eq!(to_array::<_, 4>(a.sub_from_masked(mask, b)), [9, 2, 27, 4]);
        assert_eq!(mask.to_bitmask(), 0b0101);
    }

    #[test]
    fn test_composite_masked_div_skips_zero_divisor() {
        let a = i32x4([8, 9, 10, 11]);
        let b = i32x4([2, 0, 5, 0]);
        let mask = Composite::new(ScalarMask([true, false]), ScalarMask([true, false]));
        assert_eq!(to_array::<_, 4>(a.div_masked(mask, b)), [4, 9, 2, 11]);
    }

    #[test]
    fn test_composite_reduction_is_lo_before_hi() {
        let v = F32x8::from_slice(&[1.0e8, 1.0, -1.0e8, 1.0, 1.0, 2.0, 3.0, 4.0]);
        let native = ScalarVector([1.0e8f32, 1.0, -1.0e8, 1.0, 1.0, 2.0, 3.0, 4.0]);

        assert_eq!(v.hadd().to_bits(), native.hadd().to_bits());
        assert_eq!(v.hadd(), 10.0);
    }

    #[test]
    fn test_composite_extract_insert() {
        let mut v = F32x8::splat(0.5);
        v.insert(6, 99.0);
        assert_eq!(v.extract(6), 99.0);
        assert_eq!(v.extract(5), 0.5);
        assert_eq!(v.hi.hi.0, [99.0, 0.5]);
    }

    #[test]
    fn test_composite_memory_order() {
        let src = [0u16, 1, 2, 3, 4, 5, 6, 7];
        let mut dst = [0u16; 8];

        unsafe {
            let v = Composite::<ScalarVector<u16, 4>>::load(src.as_ptr());
            assert_eq!(v.lo.0, [0, 1, 2, 3]);
            assert_eq!(v.hi.0, [4, 5, 6, 7]);

            // Lane 7 is the last writer of index 0.
            v.scatter(dst.as_mut_ptr(), &[0, 1, 2, 3, 4, 5, 6, 0]);
        }
        assert_eq!(dst, [7, 1, 2, 3, 4, 5, 6, 0]);
    }

    #[test]
    fn test_composite_decompose() {
        let v = i32x4([1, 2, 3, 4]);
        let (lo, hi) = v.unpack();
        assert_eq!(lo.0, [1, 2]);
        assert_eq!(hi.0, [3, 4]);
        assert_eq!(I32x4::pack(lo, hi), v);
    }

    #[test]
    fn test_composite_mask_algebra() {
        let m = Composite::new(ScalarMask([true, false]), ScalarMask([false, false]));
        assert!(m.any());
        assert!(!m.all());
        assert!(!m.none());
        assert_eq!(m.not().not(), m);
        assert!(m.test(0));
        assert!(!m.test(3));

        let mut bools = [false; 4];
        m.or(Composite::from_bool(true)).to_bools(&mut bools);
        assert_eq!(bools, [true; 4]);
    }
}
