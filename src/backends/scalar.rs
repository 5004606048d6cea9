//! Scalar backend implementation
//!
//! This backend stores lanes in a plain array and loops over them. It always works on any
//! platform, serves every element type, and is the reference the hardware backends are checked
//! against. The lane table uses it as the native register for widths up to 128 bits.

use core::array;
use core::ptr;

use super::tree_reduce;
use crate::element::Element;
use crate::traits::{
    Arithmetic, BitwiseLogic, Comparable, Decompose, HorizontalReduce, MemoryAccess, SimdMask,
    SimdVector,
};

/// Array-backed vector of `N` lanes
#[derive(Debug, Copy, Clone, PartialEq)]
#[repr(transparent)]
pub struct ScalarVector<T, const N: usize>(pub [T; N]);

/// Array-backed mask of `N` lanes
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct ScalarMask<const N: usize>(pub [bool; N]);

impl<T: Element, const N: usize> ScalarVector<T, N> {
    #[inline(always)]
    fn map(self, f: impl Fn(T) -> T) -> Self {
        ScalarVector(self.0.map(f))
    }

    #[inline(always)]
    fn zip(self, rhs: Self, f: impl Fn(T, T) -> T) -> Self {
        ScalarVector(array::from_fn(|i| f(self.0[i], rhs.0[i])))
    }

    #[inline(always)]
    fn compare(self, rhs: Self, f: impl Fn(&T, &T) -> bool) -> ScalarMask<N> {
        ScalarMask(array::from_fn(|i| f(&self.0[i], &rhs.0[i])))
    }
}

impl<T: Element, const N: usize> SimdVector for ScalarVector<T, N> {
    type Scalar = T;
    type Mask = ScalarMask<N>;

    const LANES: usize = N;

    #[inline(always)]
    fn zero() -> Self {
        ScalarVector([T::ZERO; N])
    }

    #[inline(always)]
    fn splat(value: T) -> Self {
        ScalarVector([value; N])
    }

    #[inline(always)]
    fn from_slice(slice: &[T]) -> Self {
        assert!(slice.len() >= N, "Slice too short for scalar load");
        ScalarVector(array::from_fn(|i| slice[i]))
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [T]) {
        assert!(slice.len() >= N, "Slice too short for scalar store");
        slice[..N].copy_from_slice(&self.0);
    }

    #[inline(always)]
    fn extract(self, index: usize) -> T {
        self.0[index]
    }

    #[inline(always)]
    fn insert(&mut self, index: usize, value: T) {
        self.0[index] = value;
    }

    #[inline(always)]
    fn select(mask: ScalarMask<N>, true_val: Self, false_val: Self) -> Self {
        ScalarVector(array::from_fn(|i| {
            if mask.0[i] {
                true_val.0[i]
            } else {
                false_val.0[i]
            }
        }))
    }
}

impl<T: Element, const N: usize> Arithmetic for ScalarVector<T, N> {
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, T::lane_add)
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, T::lane_sub)
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.zip(rhs, T::lane_mul)
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self.zip(rhs, T::lane_div)
    }

    #[inline(always)]
    fn div_masked(self, mask: ScalarMask<N>, rhs: Self) -> Self {
        ScalarVector(array::from_fn(|i| {
            if mask.0[i] {
                self.0[i].lane_div(rhs.0[i])
            } else {
                self.0[i]
            }
        }))
    }
}

impl<T: Element, const N: usize> Comparable for ScalarVector<T, N> {
    #[inline(always)]
    fn cmpeq(self, rhs: Self) -> ScalarMask<N> {
        self.compare(rhs, T::eq)
    }

    #[inline(always)]
    fn cmpne(self, rhs: Self) -> ScalarMask<N> {
        self.compare(rhs, T::ne)
    }

    #[inline(always)]
    fn cmplt(self, rhs: Self) -> ScalarMask<N> {
        self.compare(rhs, T::lt)
    }

    #[inline(always)]
    fn cmple(self, rhs: Self) -> ScalarMask<N> {
        self.compare(rhs, T::le)
    }

    #[inline(always)]
    fn cmpgt(self, rhs: Self) -> ScalarMask<N> {
        self.compare(rhs, T::gt)
    }

    #[inline(always)]
    fn cmpge(self, rhs: Self) -> ScalarMask<N> {
        self.compare(rhs, T::ge)
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        self.zip(rhs, T::lane_min)
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        self.zip(rhs, T::lane_max)
    }
}

impl<T: Element, const N: usize> BitwiseLogic for ScalarVector<T, N> {
    #[inline(always)]
    fn band(self, rhs: Self) -> Self {
        self.zip(rhs, T::lane_and)
    }

    #[inline(always)]
    fn bor(self, rhs: Self) -> Self {
        self.zip(rhs, T::lane_or)
    }

    #[inline(always)]
    fn bxor(self, rhs: Self) -> Self {
        self.zip(rhs, T::lane_xor)
    }

    #[inline(always)]
    fn bnot(self) -> Self {
        self.map(T::lane_not)
    }
}

impl<T: Element, const N: usize> HorizontalReduce for ScalarVector<T, N> {
    #[inline(always)]
    fn hadd(self) -> T {
        tree_reduce(&self.0, T::lane_add)
    }

    #[inline(always)]
    fn hmul(self) -> T {
        tree_reduce(&self.0, T::lane_mul)
    }

    #[inline(always)]
    fn hmin(self) -> T {
        tree_reduce(&self.0, T::lane_min)
    }

    #[inline(always)]
    fn hmax(self) -> T {
        tree_reduce(&self.0, T::lane_max)
    }

    #[inline(always)]
    fn hband(self) -> T {
        tree_reduce(&self.0, T::lane_and)
    }

    #[inline(always)]
    fn hbor(self) -> T {
        tree_reduce(&self.0, T::lane_or)
    }

    #[inline(always)]
    fn hbxor(self) -> T {
        tree_reduce(&self.0, T::lane_xor)
    }
}

impl<T: Element, const N: usize> MemoryAccess for ScalarVector<T, N> {
    #[inline(always)]
    unsafe fn load(ptr: *const T) -> Self {
        ScalarVector(ptr::read_unaligned(ptr.cast::<[T; N]>()))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const T) -> Self {
        ScalarVector(ptr::read(ptr.cast::<[T; N]>()))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut T) {
        ptr::write_unaligned(ptr.cast::<[T; N]>(), self.0);
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut T) {
        ptr::write(ptr.cast::<[T; N]>(), self.0);
    }

    #[inline(always)]
    unsafe fn load_masked(self, mask: ScalarMask<N>, ptr: *const T) -> Self {
        let mut lanes = self.0;
        for (i, lane) in lanes.iter_mut().enumerate() {
            if mask.0[i] {
                *lane = ptr.add(i).read();
            }
        }
        ScalarVector(lanes)
    }

    #[inline(always)]
    unsafe fn store_masked(self, mask: ScalarMask<N>, ptr: *mut T) {
        for (i, &lane) in self.0.iter().enumerate() {
            if mask.0[i] {
                ptr.add(i).write(lane);
            }
        }
    }

    #[inline(always)]
    unsafe fn gather(base: *const T, indices: &[usize]) -> Self {
        assert!(indices.len() >= N, "Index slice too short for scalar gather");
        ScalarVector(array::from_fn(|i| base.add(indices[i]).read()))
    }

    #[inline(always)]
    unsafe fn gather_masked(self, mask: ScalarMask<N>, base: *const T, indices: &[usize]) -> Self {
        assert!(indices.len() >= N, "Index slice too short for scalar gather");
        let mut lanes = self.0;
        for (i, lane) in lanes.iter_mut().enumerate() {
            if mask.0[i] {
                *lane = base.add(indices[i]).read();
            }
        }
        ScalarVector(lanes)
    }

    #[inline(always)]
    unsafe fn scatter(self, base: *mut T, indices: &[usize]) {
        assert!(indices.len() >= N, "Index slice too short for scalar scatter");
        for (i, &lane) in self.0.iter().enumerate() {
            base.add(indices[i]).write(lane);
        }
    }

    #[inline(always)]
    unsafe fn scatter_masked(self, mask: ScalarMask<N>, base: *mut T, indices: &[usize]) {
        assert!(indices.len() >= N, "Index slice too short for scalar scatter");
        for (i, &lane) in self.0.iter().enumerate() {
            if mask.0[i] {
                base.add(indices[i]).write(lane);
            }
        }
    }
}

impl<const N: usize> SimdMask for ScalarMask<N> {
    const LANES: usize = N;

    #[inline(always)]
    fn from_bool(value: bool) -> Self {
        ScalarMask([value; N])
    }

    #[inline(always)]
    fn from_bools(slice: &[bool]) -> Self {
        assert!(slice.len() >= N, "Slice too short for scalar mask load");
        ScalarMask(array::from_fn(|i| slice[i]))
    }

    #[inline(always)]
    fn to_bools(self, slice: &mut [bool]) {
        assert!(slice.len() >= N, "Slice too short for scalar mask store");
        slice[..N].copy_from_slice(&self.0);
    }

    #[inline(always)]
    fn test(self, index: usize) -> bool {
        self.0[index]
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: bool) {
        self.0[index] = value;
    }

    #[inline(always)]
    fn all(self) -> bool {
        self.0.iter().all(|&lane| lane)
    }

    #[inline(always)]
    fn any(self) -> bool {
        self.0.iter().any(|&lane| lane)
    }

    #[inline(always)]
    fn none(self) -> bool {
        !self.any()
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        ScalarMask(array::from_fn(|i| self.0[i] && rhs.0[i]))
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        ScalarMask(array::from_fn(|i| self.0[i] || rhs.0[i]))
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        ScalarMask(array::from_fn(|i| self.0[i] ^ rhs.0[i]))
    }

    #[inline(always)]
    fn not(self) -> Self {
        ScalarMask(self.0.map(|lane| !lane))
    }

    #[inline(always)]
    fn to_bitmask(self) -> u64 {
        self.0
            .iter()
            .enumerate()
            .fold(0, |bits, (i, &lane)| bits | ((lane as u64) << i))
    }
}

// Width 1 is the leaf of every decomposition and gets no impl.
macro_rules! impl_scalar_decompose {
    ($($n:literal => $h:literal),* $(,)?) => {
        $(
            impl<T: Element> Decompose for ScalarVector<T, $n> {
                type Half = ScalarVector<T, $h>;

                #[inline(always)]
                fn pack(lo: Self::Half, hi: Self::Half) -> Self {
                    ScalarVector(array::from_fn(|i| if i < $h { lo.0[i] } else { hi.0[i - $h] }))
                }

                #[inline(always)]
                fn unpack_lo(self) -> Self::Half {
                    ScalarVector(array::from_fn(|i| self.0[i]))
                }

                #[inline(always)]
                fn unpack_hi(self) -> Self::Half {
                    ScalarVector(array::from_fn(|i| self.0[i + $h]))
                }
            }

            impl Decompose for ScalarMask<$n> {
                type Half = ScalarMask<$h>;

                #[inline(always)]
                fn pack(lo: Self::Half, hi: Self::Half) -> Self {
                    ScalarMask(array::from_fn(|i| if i < $h { lo.0[i] } else { hi.0[i - $h] }))
                }

                #[inline(always)]
                fn unpack_lo(self) -> Self::Half {
                    ScalarMask(array::from_fn(|i| self.0[i]))
                }

                #[inline(always)]
                fn unpack_hi(self) -> Self::Half {
                    ScalarMask(array::from_fn(|i| self.0[i + $h]))
                }
            }
        )*
    };
}

impl_scalar_decompose! {
    2 => 1,
    4 => 2,
    8 => 4,
    16 => 8,
    32 => 16,
    64 => 32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_arithmetic() {
        let a = ScalarVector([1i32, 2, 3, 4]);
        let b = ScalarVector([10i32, 20, 30, 40]);

        assert_eq!(a.add(b), ScalarVector([11, 22, 33, 44]));
        assert_eq!(b.sub(a), ScalarVector([9, 18, 27, 36]));
        assert_eq!(a.mul(b), ScalarVector([10, 40, 90, 160]));
        assert_eq!(b.div(a), ScalarVector([10, 10, 10, 10]));
        assert_eq!(a.sub_from(b), b.sub(a));
    }

    #[test]
    fn test_scalar_wraparound() {
        let a = ScalarVector([u8::MAX, 0]);
        let one = ScalarVector::splat(1u8);
        assert_eq!(a.add(one), ScalarVector([0, 1]));
        assert_eq!(ScalarVector([0u8, 5]).sub(one), ScalarVector([255, 4]));
    }

    #[test]
    fn test_scalar_masked_merge() {
        let a = ScalarVector([1i32, 2, 3, 4]);
        let b = ScalarVector([10i32, 20, 30, 40]);
        let mask = ScalarMask([true, false, true, false]);

        assert_eq!(a.add_masked(mask, b), ScalarVector([11, 2, 33, 4]));
        assert_eq!(a.sub_from_masked(mask, b), ScalarVector([9, 2, 27, 4]));
        assert_eq!(a.max_masked(mask, b), ScalarVector([10, 2, 30, 4]));
        assert_eq!(a.bnot_masked(mask), ScalarVector([!1, 2, !3, 4]));
    }

    #[test]
    fn test_scalar_masked_div_skips_inactive_lanes() {
        let a = ScalarVector([8i32, 9]);
        let b = ScalarVector([2i32, 0]);
        let mask = ScalarMask([true, false]);
        assert_eq!(a.div_masked(mask, b), ScalarVector([4, 9]));
    }

    #[test]
    fn test_scalar_comparison() {
        let a = ScalarVector([1.0f32, 2.0, f32::NAN, 4.0]);
        let b = ScalarVector([1.0f32, 3.0, f32::NAN, 3.0]);

        assert_eq!(a.cmpeq(b), ScalarMask([true, false, false, false]));
        assert_eq!(a.cmpne(b), ScalarMask([false, true, true, true]));
        assert_eq!(a.cmplt(b), ScalarMask([false, true, false, false]));
        assert_eq!(a.cmple(b), ScalarMask([true, true, false, false]));
        assert_eq!(a.cmpgt(b), ScalarMask([false, false, false, true]));
        assert_eq!(a.cmpge(b), ScalarMask([true, false, false, true]));
    }

    #[test]
    fn test_scalar_select() {
        let a = ScalarVector([1.0f32, 2.0]);
        let b = ScalarVector([3.0f32, 4.0]);
        let mask = ScalarMask([false, true]);

        assert_eq!(ScalarVector::select(mask, a, b), ScalarVector([3.0, 2.0]));
    }

    #[test]
    fn test_scalar_horizontal() {
        let v = ScalarVector([3u32, 5, 6, 12]);

        assert_eq!(v.hadd(), 26);
        assert_eq!(v.hmul(), 1080);
        assert_eq!(v.hmin(), 3);
        assert_eq!(v.hmax(), 12);
        assert_eq!(v.hband(), 0);
        assert_eq!(v.hbor(), 15);
        assert_eq!(v.hbxor(), 3 ^ 5 ^ 6 ^ 12);
    }

    #[test]
    fn test_scalar_masked_horizontal_uses_identities() {
        let v = ScalarVector([3i16, -5, 6, 12]);
        let none = ScalarMask::from_bool(false);
        let odd = ScalarMask([false, true, false, true]);

        assert_eq!(v.hadd_masked(odd), 7);
        assert_eq!(v.hmul_masked(odd), -60);
        assert_eq!(v.hmin_masked(none), i16::MAX);
        assert_eq!(v.hmax_masked(none), i16::MIN);
        assert_eq!(v.hband_masked(none), -1);
        assert_eq!(v.hbor_masked(none), 0);
    }

    #[test]
    fn test_scalar_decompose() {
        let v = ScalarVector([1u16, 2, 3, 4, 5, 6, 7, 8]);
        let (lo, hi) = v.unpack();

        assert_eq!(lo, ScalarVector([1, 2, 3, 4]));
        assert_eq!(hi, ScalarVector([5, 6, 7, 8]));
        assert_eq!(ScalarVector::pack(lo, hi), v);
        assert_eq!(v.pack_lo(hi), ScalarVector([5, 6, 7, 8, 5, 6, 7, 8]));
        assert_eq!(v.pack_hi(lo), ScalarVector([1, 2, 3, 4, 1, 2, 3, 4]));

        let mask = ScalarMask([true, false, false, true]);
        assert_eq!(mask.unpack_lo(), ScalarMask([true, false]));
        assert_eq!(mask.unpack_hi(), ScalarMask([false, true]));
    }

    #[test]
    fn test_scalar_memory() {
        let src = [1.0f64, 2.0, 3.0, 4.0];
        let mut dst = [0.0f64; 4];

        unsafe {
            let v = ScalarVector::<f64, 2>::load(src.as_ptr().add(1));
            assert_eq!(v, ScalarVector([2.0, 3.0]));

            v.store_masked(ScalarMask([false, true]), dst.as_mut_ptr());
            assert_eq!(dst, [0.0, 3.0, 0.0, 0.0]);

            let g = ScalarVector::<f64, 2>::gather(src.as_ptr(), &[3, 0]);
            assert_eq!(g, ScalarVector([4.0, 1.0]));

            g.scatter(dst.as_mut_ptr(), &[2, 2]);
            assert_eq!(dst, [0.0, 3.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_scalar_mask() {
        let mask_true = ScalarMask::<4>::from_bool(true);
        let mask_false = ScalarMask::<4>::from_bool(false);
        let mixed = ScalarMask([true, false, true, true]);

        assert!(mask_true.all());
        assert!(mask_true.any());
        assert!(!mask_true.none());

        assert!(!mask_false.all());
        assert!(!mask_false.any());
        assert!(mask_false.none());

        assert_eq!(mixed.and(mask_false), mask_false);
        assert_eq!(mixed.or(mask_true), mask_true);
        assert_eq!(mixed.xor(mask_true), mixed.not());
        assert_eq!(mixed.to_bitmask(), 0b1101);
    }
}
