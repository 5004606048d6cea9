//! NEON backend implementation (ARM64)
//!
//! This backend provides 4-lane (128-bit) `f32` and `i32` registers using ARM NEON instructions.
//! Available on all ARM64 CPUs (Apple Silicon, AWS Graviton, Raspberry Pi 4+, etc.).
//!
//! **Note**: This implementation assumes NEON is available on aarch64 targets.
//! NEON is mandatory for ARM64, so no runtime detection is needed.
//!
//! NEON has no masked loads, gathers or integer division; those run per lane.

// This backend only compiles on aarch64 targets
#![cfg(target_arch = "aarch64")]

use super::scalar::{ScalarMask, ScalarVector};
use super::tree_reduce;
use crate::element::Element;
use crate::traits::{
    Arithmetic, BitwiseLogic, Comparable, Decompose, HorizontalReduce, MemoryAccess, SimdMask,
    SimdVector,
};
use core::arch::aarch64::*;

/// NEON vector wrapper (4 lanes of f32)
///
/// Wraps float32x4_t intrinsic type to provide SimdVector trait implementation.
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct NeonVector(float32x4_t);

/// NEON integer vector wrapper (4 lanes of i32)
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct NeonInt(int32x4_t);

/// NEON mask wrapper (4-lane mask)
///
/// Uses uint32x4_t to represent per-lane boolean values.
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct NeonMask(uint32x4_t);

impl NeonVector {
    #[inline(always)]
    fn lanes(self) -> [f32; 4] {
        let mut lanes = [0.0f32; 4];
        unsafe { vst1q_f32(lanes.as_mut_ptr(), self.0) };
        lanes
    }

    #[inline(always)]
    fn from_lanes(lanes: [f32; 4]) -> Self {
        unsafe { NeonVector(vld1q_f32(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn bits(self) -> uint32x4_t {
        unsafe { vreinterpretq_u32_f32(self.0) }
    }

    #[inline(always)]
    fn from_bits(bits: uint32x4_t) -> Self {
        unsafe { NeonVector(vreinterpretq_f32_u32(bits)) }
    }
}

impl NeonInt {
    #[inline(always)]
    fn lanes(self) -> [i32; 4] {
        let mut lanes = [0i32; 4];
        unsafe { vst1q_s32(lanes.as_mut_ptr(), self.0) };
        lanes
    }

    #[inline(always)]
    fn from_lanes(lanes: [i32; 4]) -> Self {
        unsafe { NeonInt(vld1q_s32(lanes.as_ptr())) }
    }
}

impl NeonMask {
    #[inline(always)]
    fn lanes(self) -> [u32; 4] {
        let mut lanes = [0u32; 4];
        unsafe { vst1q_u32(lanes.as_mut_ptr(), self.0) };
        lanes
    }

    #[inline(always)]
    fn from_lanes(lanes: [u32; 4]) -> Self {
        unsafe { NeonMask(vld1q_u32(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn to_scalar(self) -> ScalarMask<4> {
        ScalarMask(self.lanes().map(|lane| lane != 0))
    }

    #[inline(always)]
    fn from_scalar(mask: ScalarMask<4>) -> Self {
        Self::from_lanes(mask.0.map(lane_bits))
    }
}

#[inline(always)]
fn lane_bits(value: bool) -> u32 {
    if value {
        u32::MAX
    } else {
        0
    }
}

impl SimdVector for NeonVector {
    type Scalar = f32;
    type Mask = NeonMask;

    const LANES: usize = 4;

    #[inline(always)]
    fn zero() -> Self {
        unsafe { NeonVector(vdupq_n_f32(0.0)) }
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { NeonVector(vdupq_n_f32(value)) }
    }

    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for NEON load");
        unsafe { NeonVector(vld1q_f32(slice.as_ptr())) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [f32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for NEON store");
        unsafe { vst1q_f32(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn extract(self, index: usize) -> f32 {
        self.lanes()[index]
    }

    #[inline(always)]
    fn insert(&mut self, index: usize, value: f32) {
        let mut lanes = self.lanes();
        lanes[index] = value;
        *self = Self::from_lanes(lanes);
    }

    #[inline(always)]
    fn select(mask: NeonMask, true_val: Self, false_val: Self) -> Self {
        // NEON: vbslq_f32(mask, true_val, false_val)
        unsafe { NeonVector(vbslq_f32(mask.0, true_val.0, false_val.0)) }
    }
}

impl Arithmetic for NeonVector {
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { NeonVector(vaddq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { NeonVector(vsubq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { NeonVector(vmulq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { NeonVector(vdivq_f32(self.0, rhs.0)) }
    }
}

impl Comparable for NeonVector {
    #[inline(always)]
    fn cmpeq(self, rhs: Self) -> NeonMask {
        unsafe { NeonMask(vceqq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmpne(self, rhs: Self) -> NeonMask {
        unsafe { NeonMask(vmvnq_u32(vceqq_f32(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn cmplt(self, rhs: Self) -> NeonMask {
        unsafe { NeonMask(vcltq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmple(self, rhs: Self) -> NeonMask {
        unsafe { NeonMask(vcleq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmpgt(self, rhs: Self) -> NeonMask {
        unsafe { NeonMask(vcgtq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmpge(self, rhs: Self) -> NeonMask {
        unsafe { NeonMask(vcgeq_f32(self.0, rhs.0)) }
    }

    // Keep `self` where it wins or ties, and where `rhs` is NaN; vminnmq orders signed zeros.
    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe {
            let rhs_nan = vmvnq_u32(vceqq_f32(rhs.0, rhs.0));
            let keep = vorrq_u32(vcleq_f32(self.0, rhs.0), rhs_nan);
            NeonVector(vbslq_f32(keep, self.0, rhs.0))
        }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe {
            let rhs_nan = vmvnq_u32(vceqq_f32(rhs.0, rhs.0));
            let keep = vorrq_u32(vcgeq_f32(self.0, rhs.0), rhs_nan);
            NeonVector(vbslq_f32(keep, self.0, rhs.0))
        }
    }
}

impl BitwiseLogic for NeonVector {
    #[inline(always)]
    fn band(self, rhs: Self) -> Self {
        unsafe { Self::from_bits(vandq_u32(self.bits(), rhs.bits())) }
    }

    #[inline(always)]
    fn bor(self, rhs: Self) -> Self {
        unsafe { Self::from_bits(vorrq_u32(self.bits(), rhs.bits())) }
    }

    #[inline(always)]
    fn bxor(self, rhs: Self) -> Self {
        unsafe { Self::from_bits(veorq_u32(self.bits(), rhs.bits())) }
    }

    #[inline(always)]
    fn bnot(self) -> Self {
        unsafe { Self::from_bits(vmvnq_u32(self.bits())) }
    }
}

impl HorizontalReduce for NeonVector {
    #[inline(always)]
    fn hadd(self) -> f32 {
        unsafe {
            let sum_pair = vpaddq_f32(self.0, self.0); // [a+b, c+d, a+b, c+d]
            let sum = vpaddq_f32(sum_pair, sum_pair); // [(a+b)+(c+d), ...]
            vgetq_lane_f32::<0>(sum)
        }
    }

    #[inline(always)]
    fn hmul(self) -> f32 {
        tree_reduce(&self.lanes(), f32::lane_mul)
    }

    #[inline(always)]
    fn hmin(self) -> f32 {
        tree_reduce(&self.lanes(), f32::lane_min)
    }

    #[inline(always)]
    fn hmax(self) -> f32 {
        tree_reduce(&self.lanes(), f32::lane_max)
    }

    #[inline(always)]
    fn hband(self) -> f32 {
        tree_reduce(&self.lanes(), f32::lane_and)
    }

    #[inline(always)]
    fn hbor(self) -> f32 {
        tree_reduce(&self.lanes(), f32::lane_or)
    }

    #[inline(always)]
    fn hbxor(self) -> f32 {
        tree_reduce(&self.lanes(), f32::lane_xor)
    }
}

impl MemoryAccess for NeonVector {
    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        NeonVector(vld1q_f32(ptr))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        NeonVector(vld1q_f32(ptr))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        vst1q_f32(ptr, self.0);
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut f32) {
        vst1q_f32(ptr, self.0);
    }

    #[inline(always)]
    unsafe fn load_masked(self, mask: NeonMask, ptr: *const f32) -> Self {
        let lanes = ScalarVector(self.lanes()).load_masked(mask.to_scalar(), ptr);
        Self::from_lanes(lanes.0)
    }

    #[inline(always)]
    unsafe fn store_masked(self, mask: NeonMask, ptr: *mut f32) {
        ScalarVector(self.lanes()).store_masked(mask.to_scalar(), ptr);
    }

    #[inline(always)]
    unsafe fn gather(base: *const f32, indices: &[usize]) -> Self {
        Self::from_lanes(ScalarVector::<f32, 4>::gather(base, indices).0)
    }

    #[inline(always)]
    unsafe fn gather_masked(self, mask: NeonMask, base: *const f32, indices: &[usize]) -> Self {
        let lanes = ScalarVector(self.lanes()).gather_masked(mask.to_scalar(), base, indices);
        Self::from_lanes(lanes.0)
    }

    #[inline(always)]
    unsafe fn scatter(self, base: *mut f32, indices: &[usize]) {
        ScalarVector(self.lanes()).scatter(base, indices);
    }

    #[inline(always)]
    unsafe fn scatter_masked(self, mask: NeonMask, base: *mut f32, indices: &[usize]) {
        ScalarVector(self.lanes()).scatter_masked(mask.to_scalar(), base, indices);
    }
}

impl SimdVector for NeonInt {
    type Scalar = i32;
    type Mask = NeonMask;

    const LANES: usize = 4;

    #[inline(always)]
    fn zero() -> Self {
        unsafe { NeonInt(vdupq_n_s32(0)) }
    }

    #[inline(always)]
    fn splat(value: i32) -> Self {
        unsafe { NeonInt(vdupq_n_s32(value)) }
    }

    #[inline(always)]
    fn from_slice(slice: &[i32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for NEON load");
        unsafe { NeonInt(vld1q_s32(slice.as_ptr())) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [i32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for NEON store");
        unsafe { vst1q_s32(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn extract(self, index: usize) -> i32 {
        self.lanes()[index]
    }

    #[inline(always)]
    fn insert(&mut self, index: usize, value: i32) {
        let mut lanes = self.lanes();
        lanes[index] = value;
        *self = Self::from_lanes(lanes);
    }

    #[inline(always)]
    fn select(mask: NeonMask, true_val: Self, false_val: Self) -> Self {
        unsafe { NeonInt(vbslq_s32(mask.0, true_val.0, false_val.0)) }
    }
}

impl Arithmetic for NeonInt {
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { NeonInt(vaddq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { NeonInt(vsubq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { NeonInt(vmulq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self::from_lanes(ScalarVector(self.lanes()).div(ScalarVector(rhs.lanes())).0)
    }

    #[inline(always)]
    fn div_masked(self, mask: NeonMask, rhs: Self) -> Self {
        let quotient =
            ScalarVector(self.lanes()).div_masked(mask.to_scalar(), ScalarVector(rhs.lanes()));
        Self::from_lanes(quotient.0)
    }
}

impl Comparable for NeonInt {
    #[inline(always)]
    fn cmpeq(self, rhs: Self) -> NeonMask {
        unsafe { NeonMask(vceqq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmpne(self, rhs: Self) -> NeonMask {
        unsafe { NeonMask(vmvnq_u32(vceqq_s32(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn cmplt(self, rhs: Self) -> NeonMask {
        unsafe { NeonMask(vcltq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmple(self, rhs: Self) -> NeonMask {
        unsafe { NeonMask(vcleq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmpgt(self, rhs: Self) -> NeonMask {
        unsafe { NeonMask(vcgtq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmpge(self, rhs: Self) -> NeonMask {
        unsafe { NeonMask(vcgeq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { NeonInt(vminq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { NeonInt(vmaxq_s32(self.0, rhs.0)) }
    }
}

impl BitwiseLogic for NeonInt {
    #[inline(always)]
    fn band(self, rhs: Self) -> Self {
        unsafe { NeonInt(vandq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bor(self, rhs: Self) -> Self {
        unsafe { NeonInt(vorrq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bxor(self, rhs: Self) -> Self {
        unsafe { NeonInt(veorq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bnot(self) -> Self {
        unsafe { NeonInt(vmvnq_s32(self.0)) }
    }
}

impl HorizontalReduce for NeonInt {
    #[inline(always)]
    fn hadd(self) -> i32 {
        unsafe {
            let sum_pair = vpaddq_s32(self.0, self.0);
            let sum = vpaddq_s32(sum_pair, sum_pair);
            vgetq_lane_s32::<0>(sum)
        }
    }

    #[inline(always)]
    fn hmul(self) -> i32 {
        tree_reduce(&self.lanes(), i32::lane_mul)
    }

    #[inline(always)]
    fn hmin(self) -> i32 {
        unsafe { vminvq_s32(self.0) }
    }

    #[inline(always)]
    fn hmax(self) -> i32 {
        unsafe { vmaxvq_s32(self.0) }
    }

    #[inline(always)]
    fn hband(self) -> i32 {
        tree_reduce(&self.lanes(), i32::lane_and)
    }

    #[inline(always)]
    fn hbor(self) -> i32 {
        tree_reduce(&self.lanes(), i32::lane_or)
    }

    #[inline(always)]
    fn hbxor(self) -> i32 {
        tree_reduce(&self.lanes(), i32::lane_xor)
    }
}

impl MemoryAccess for NeonInt {
    #[inline(always)]
    unsafe fn load(ptr: *const i32) -> Self {
        NeonInt(vld1q_s32(ptr))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const i32) -> Self {
        NeonInt(vld1q_s32(ptr))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut i32) {
        vst1q_s32(ptr, self.0);
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut i32) {
        vst1q_s32(ptr, self.0);
    }

    #[inline(always)]
    unsafe fn load_masked(self, mask: NeonMask, ptr: *const i32) -> Self {
        let lanes = ScalarVector(self.lanes()).load_masked(mask.to_scalar(), ptr);
        Self::from_lanes(lanes.0)
    }

    #[inline(always)]
    unsafe fn store_masked(self, mask: NeonMask, ptr: *mut i32) {
        ScalarVector(self.lanes()).store_masked(mask.to_scalar(), ptr);
    }

    #[inline(always)]
    unsafe fn gather(base: *const i32, indices: &[usize]) -> Self {
        Self::from_lanes(ScalarVector::<i32, 4>::gather(base, indices).0)
    }

    #[inline(always)]
    unsafe fn gather_masked(self, mask: NeonMask, base: *const i32, indices: &[usize]) -> Self {
        let lanes = ScalarVector(self.lanes()).gather_masked(mask.to_scalar(), base, indices);
        Self::from_lanes(lanes.0)
    }

    #[inline(always)]
    unsafe fn scatter(self, base: *mut i32, indices: &[usize]) {
        ScalarVector(self.lanes()).scatter(base, indices);
    }

    #[inline(always)]
    unsafe fn scatter_masked(self, mask: NeonMask, base: *mut i32, indices: &[usize]) {
        ScalarVector(self.lanes()).scatter_masked(mask.to_scalar(), base, indices);
    }
}

impl SimdMask for NeonMask {
    const LANES: usize = 4;

    #[inline(always)]
    fn from_bool(value: bool) -> Self {
        unsafe { NeonMask(vdupq_n_u32(lane_bits(value))) }
    }

    #[inline(always)]
    fn from_bools(slice: &[bool]) -> Self {
        Self::from_scalar(ScalarMask::from_bools(slice))
    }

    #[inline(always)]
    fn to_bools(self, slice: &mut [bool]) {
        self.to_scalar().to_bools(slice);
    }

    #[inline(always)]
    fn test(self, index: usize) -> bool {
        self.lanes()[index] != 0
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: bool) {
        let mut lanes = self.lanes();
        lanes[index] = lane_bits(value);
        *self = Self::from_lanes(lanes);
    }

    #[inline(always)]
    fn all(self) -> bool {
        // All lanes are set if minimum is 0xFFFFFFFF
        unsafe { vminvq_u32(self.0) == u32::MAX }
    }

    #[inline(always)]
    fn any(self) -> bool {
        unsafe { vmaxvq_u32(self.0) != 0 }
    }

    #[inline(always)]
    fn none(self) -> bool {
        unsafe { vmaxvq_u32(self.0) == 0 }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { NeonMask(vandq_u32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { NeonMask(vorrq_u32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { NeonMask(veorq_u32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn not(self) -> Self {
        unsafe { NeonMask(vmvnq_u32(self.0)) }
    }

    #[inline(always)]
    fn to_bitmask(self) -> u64 {
        const WEIGHTS: [u32; 4] = [1, 2, 4, 8];
        unsafe {
            let weights = vld1q_u32(WEIGHTS.as_ptr());
            vaddvq_u32(vandq_u32(self.0, weights)) as u64
        }
    }
}

impl Decompose for NeonVector {
    type Half = ScalarVector<f32, 2>;

    #[inline(always)]
    fn pack(lo: Self::Half, hi: Self::Half) -> Self {
        unsafe { NeonVector(vcombine_f32(vld1_f32(lo.0.as_ptr()), vld1_f32(hi.0.as_ptr()))) }
    }

    #[inline(always)]
    fn unpack_lo(self) -> Self::Half {
        ScalarVector::from_slice(&self.lanes()[..2])
    }

    #[inline(always)]
    fn unpack_hi(self) -> Self::Half {
        ScalarVector::from_slice(&self.lanes()[2..])
    }
}

impl Decompose for NeonInt {
    type Half = ScalarVector<i32, 2>;

    #[inline(always)]
    fn pack(lo: Self::Half, hi: Self::Half) -> Self {
        unsafe { NeonInt(vcombine_s32(vld1_s32(lo.0.as_ptr()), vld1_s32(hi.0.as_ptr()))) }
    }

    #[inline(always)]
    fn unpack_lo(self) -> Self::Half {
        ScalarVector::from_slice(&self.lanes()[..2])
    }

    #[inline(always)]
    fn unpack_hi(self) -> Self::Half {
        ScalarVector::from_slice(&self.lanes()[2..])
    }
}

impl Decompose for NeonMask {
    type Half = ScalarMask<2>;

    #[inline(always)]
    fn pack(lo: Self::Half, hi: Self::Half) -> Self {
        Self::from_scalar(ScalarMask::pack(lo, hi))
    }

    #[inline(always)]
    fn unpack_lo(self) -> Self::Half {
        self.to_scalar().unpack_lo()
    }

    #[inline(always)]
    fn unpack_hi(self) -> Self::Half {
        self.to_scalar().unpack_hi()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neon_arithmetic() {
        let a = NeonVector::splat(2.0);
        let b = NeonVector::splat(3.0);

        assert_eq!(a.add(b).hadd(), 20.0); // 5.0 * 4 lanes
        assert_eq!(a.sub(b).hadd(), -4.0); // -1.0 * 4 lanes
        assert_eq!(a.mul(b).hadd(), 24.0); // 6.0 * 4 lanes
        assert_eq!(a.div(b).extract(0), 2.0 / 3.0);
    }

    #[test]
    fn test_neon_hadd_matches_tree_order() {
        let lanes = [1.0e8f32, 1.0, -1.0e8, 1.0];
        let native = NeonVector::from_slice(&lanes).hadd();
        let reference = ScalarVector(lanes).hadd();
        assert_eq!(native.to_bits(), reference.to_bits());
    }

    #[test]
    fn test_neon_minmax() {
        let a = NeonVector::from_slice(&[1.0, f32::NAN, 3.0, -2.0]);
        let b = NeonVector::from_slice(&[f32::NAN, 2.0, 1.0, 4.0]);

        assert_eq!(a.min(b).lanes(), [1.0, 2.0, 1.0, -2.0]);
        assert_eq!(a.max(b).lanes(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_neon_minmax_signed_zero_ties_keep_self() {
        let a = NeonVector::from_slice(&[0.0, -0.0, 1.0, -0.0]);
        let b = NeonVector::from_slice(&[-0.0, 0.0, 1.0, 0.0]);
        let expected = a.lanes().map(f32::to_bits);

        assert_eq!(a.min(b).lanes().map(f32::to_bits), expected);
        assert_eq!(a.max(b).lanes().map(f32::to_bits), expected);
        assert_eq!(
            a.max(b).lanes().map(f32::to_bits),
            ScalarVector(a.lanes()).max(ScalarVector(b.lanes())).0.map(f32::to_bits)
        );
    }

    #[test]
    fn test_neon_comparison() {
        let a = NeonVector::from_slice(&[1.0, 2.0, f32::NAN, 4.0]);
        let b = NeonVector::splat(2.0);

        assert_eq!(a.cmplt(b).to_bitmask(), 0b0001);
        assert_eq!(a.cmple(b).to_bitmask(), 0b0011);
        assert_eq!(a.cmpgt(b).to_bitmask(), 0b1000);
        assert_eq!(a.cmpne(b).to_bitmask(), 0b1101);
    }

    #[test]
    fn test_neon_select() {
        let mask = NeonMask::from_bools(&[true, false, false, true]);
        let result = NeonVector::select(mask, NeonVector::splat(1.0), NeonVector::splat(0.0));
        assert_eq!(result.lanes(), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_neon_integer() {
        let a = NeonInt::from_slice(&[i32::MAX, 20, 30, i32::MIN]);
        let b = NeonInt::from_slice(&[1, 0, 7, -1]);
        let mask = NeonMask::from_bools(&[true, false, true, true]);

        assert_eq!(a.add(b).extract(0), i32::MIN);
        assert_eq!(a.div_masked(mask, b).lanes(), [i32::MAX, 20, 4, i32::MIN]);
        assert_eq!(a.hmin(), i32::MIN);
        assert_eq!(a.hmax(), i32::MAX);
        assert_eq!(a.bnot().extract(1), !20);
    }

    #[test]
    fn test_neon_mask() {
        let mut mask = NeonMask::from_bool(false);
        assert!(mask.none());
        mask.set(2, true);
        assert!(mask.any());
        assert!(!mask.all());
        assert!(mask.test(2));
        assert_eq!(mask.to_bitmask(), 0b0100);
        assert!(mask.or(mask.not()).all());
    }

    #[test]
    fn test_neon_masked_memory() {
        let src = [1i32, 2, 3, 4];
        let mut dst = [0i32; 4];
        let mask = NeonMask::from_bools(&[false, true, true, false]);

        unsafe {
            let v = NeonInt::splat(-1).load_masked(mask, src.as_ptr());
            assert_eq!(v.lanes(), [-1, 2, 3, -1]);
            v.store_masked(mask, dst.as_mut_ptr());
        }
        assert_eq!(dst, [0, 2, 3, 0]);
    }

    #[test]
    fn test_neon_decompose() {
        let v = NeonVector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let (lo, hi) = v.unpack();
        assert_eq!(lo.0, [1.0, 2.0]);
        assert_eq!(hi.0, [3.0, 4.0]);
        assert_eq!(NeonVector::pack(lo, hi).lanes(), v.lanes());

        let m = NeonMask::from_bools(&[true, false, false, true]);
        assert_eq!(m.unpack_lo(), ScalarMask([true, false]));
        assert_eq!(NeonMask::pack(m.unpack_lo(), m.unpack_hi()).to_bitmask(), 0b1001);
    }
}
