//! AVX2 backend implementation (x86-64)
//!
//! This backend provides 8-lane (256-bit) `f32` and `i32` registers using AVX2 instructions.
//! Requires x86-64 CPU with AVX2 support (Intel Haswell 2013+, AMD Excavator 2015+).
//!
//! **Note**: This implementation assumes AVX2 is available when the `avx2` feature is enabled.
//! Runtime CPU detection is not performed - use feature flags at compile time only.
//!
//! Integer division, gather and scatter have no AVX2 instruction and are synthesized per lane.
//! Masked loads and stores use `vmaskmov`, which never touches memory of inactive lanes.

// This backend only compiles on x86/x86_64 targets
#![cfg(any(target_arch = "x86", target_arch = "x86_64"))]

use super::scalar::{ScalarMask, ScalarVector};
use super::tree_reduce;
use crate::element::Element;
use crate::traits::{
    Arithmetic, BitwiseLogic, Comparable, Decompose, HorizontalReduce, MemoryAccess, SimdMask,
    SimdVector,
};

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;

/// AVX2 vector wrapper (8 lanes of f32)
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct Avx2Vector(__m256);

/// AVX2 integer vector wrapper (8 lanes of i32)
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct Avx2Int(__m256i);

/// AVX2 mask wrapper (8-lane mask)
///
/// Each lane is all ones (set) or all zeros (clear), shared by the float and integer vectors.
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct Avx2Mask(__m256i);

impl Avx2Vector {
    #[inline(always)]
    fn lanes(self) -> [f32; 8] {
        let mut lanes = [0.0f32; 8];
        unsafe { _mm256_storeu_ps(lanes.as_mut_ptr(), self.0) };
        lanes
    }

    #[inline(always)]
    fn from_lanes(lanes: [f32; 8]) -> Self {
        unsafe { Avx2Vector(_mm256_loadu_ps(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn blend(mask: Avx2Mask, true_val: __m256, false_val: __m256) -> Self {
        unsafe {
            Avx2Vector(_mm256_blendv_ps(
                false_val,
                true_val,
                _mm256_castsi256_ps(mask.0),
            ))
        }
    }
}

impl Avx2Int {
    #[inline(always)]
    fn lanes(self) -> [i32; 8] {
        let mut lanes = [0i32; 8];
        unsafe { _mm256_storeu_si256(lanes.as_mut_ptr().cast(), self.0) };
        lanes
    }

    #[inline(always)]
    fn from_lanes(lanes: [i32; 8]) -> Self {
        unsafe { Avx2Int(_mm256_loadu_si256(lanes.as_ptr().cast())) }
    }
}

impl Avx2Mask {
    #[inline(always)]
    fn lanes(self) -> [i32; 8] {
        Avx2Int(self.0).lanes()
    }

    #[inline(always)]
    fn from_lanes(lanes: [i32; 8]) -> Self {
        Avx2Mask(Avx2Int::from_lanes(lanes).0)
    }

    #[inline(always)]
    fn from_ps(bits: __m256) -> Self {
        unsafe { Avx2Mask(_mm256_castps_si256(bits)) }
    }
}

#[inline(always)]
fn all_ones() -> __m256i {
    unsafe { _mm256_set1_epi32(-1) }
}

impl SimdVector for Avx2Vector {
    type Scalar = f32;
    type Mask = Avx2Mask;

    const LANES: usize = 8;

    #[inline(always)]
    fn zero() -> Self {
        unsafe { Avx2Vector(_mm256_setzero_ps()) }
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { Avx2Vector(_mm256_set1_ps(value)) }
    }

    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX2 load");
        unsafe { Avx2Vector(_mm256_loadu_ps(slice.as_ptr())) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [f32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX2 store");
        unsafe { _mm256_storeu_ps(slice.as_mut_ptr(), self.0) }
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
    fn select(mask: Avx2Mask, true_val: Self, false_val: Self) -> Self {
        Self::blend(mask, true_val.0, false_val.0)
    }
}

impl Arithmetic for Avx2Vector {
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_add_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_sub_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_mul_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_div_ps(self.0, rhs.0)) }
    }
}

impl Comparable for Avx2Vector {
    #[inline(always)]
    fn cmpeq(self, rhs: Self) -> Avx2Mask {
        unsafe { Avx2Mask::from_ps(_mm256_cmp_ps::<_CMP_EQ_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmpne(self, rhs: Self) -> Avx2Mask {
        unsafe { Avx2Mask::from_ps(_mm256_cmp_ps::<_CMP_NEQ_UQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmplt(self, rhs: Self) -> Avx2Mask {
        unsafe { Avx2Mask::from_ps(_mm256_cmp_ps::<_CMP_LT_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmple(self, rhs: Self) -> Avx2Mask {
        unsafe { Avx2Mask::from_ps(_mm256_cmp_ps::<_CMP_LE_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmpgt(self, rhs: Self) -> Avx2Mask {
        unsafe { Avx2Mask::from_ps(_mm256_cmp_ps::<_CMP_GT_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmpge(self, rhs: Self) -> Avx2Mask {
        unsafe { Avx2Mask::from_ps(_mm256_cmp_ps::<_CMP_GE_OQ>(self.0, rhs.0)) }
    }

    // vminps/vmaxps return the second operand on ties and NaN. Keep `self` where it wins or
    // ties, and where `rhs` is NaN.
    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe {
            let keep = _mm256_or_ps(
                _mm256_cmp_ps::<_CMP_LE_OQ>(self.0, rhs.0),
                _mm256_cmp_ps::<_CMP_UNORD_Q>(rhs.0, rhs.0),
            );
            Avx2Vector(_mm256_blendv_ps(rhs.0, self.0, keep))
        }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe {
            let keep = _mm256_or_ps(
                _mm256_cmp_ps::<_CMP_GE_OQ>(self.0, rhs.0),
                _mm256_cmp_ps::<_CMP_UNORD_Q>(rhs.0, rhs.0),
            );
            Avx2Vector(_mm256_blendv_ps(rhs.0, self.0, keep))
        }
    }
}

impl BitwiseLogic for Avx2Vector {
    #[inline(always)]
    fn band(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_and_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bor(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_or_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bxor(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_xor_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bnot(self) -> Self {
        unsafe { Avx2Vector(_mm256_xor_ps(self.0, _mm256_castsi256_ps(all_ones()))) }
    }
}

impl HorizontalReduce for Avx2Vector {
    // Pairwise adds within each 128-bit half, then low half plus high half: the tree order.
    #[inline(always)]
    fn hadd(self) -> f32 {
        unsafe {
            let low = _mm256_castps256_ps128(self.0);
            let high = _mm256_extractf128_ps::<1>(self.0);
            let pairs = _mm_hadd_ps(low, high);
            let halves = _mm_hadd_ps(pairs, pairs);
            _mm_cvtss_f32(_mm_add_ss(halves, _mm_movehdup_ps(halves)))
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

impl MemoryAccess for Avx2Vector {
    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Avx2Vector(_mm256_loadu_ps(ptr))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        Avx2Vector(_mm256_load_ps(ptr))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        _mm256_storeu_ps(ptr, self.0);
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut f32) {
        _mm256_store_ps(ptr, self.0);
    }

    #[inline(always)]
    unsafe fn load_masked(self, mask: Avx2Mask, ptr: *const f32) -> Self {
        let loaded = _mm256_maskload_ps(ptr, mask.0);
        Self::blend(mask, loaded, self.0)
    }

    #[inline(always)]
    unsafe fn store_masked(self, mask: Avx2Mask, ptr: *mut f32) {
        _mm256_maskstore_ps(ptr, mask.0, self.0);
    }

    #[inline(always)]
    unsafe fn gather(base: *const f32, indices: &[usize]) -> Self {
        Self::from_lanes(ScalarVector::<f32, 8>::gather(base, indices).0)
    }

    #[inline(always)]
    unsafe fn gather_masked(self, mask: Avx2Mask, base: *const f32, indices: &[usize]) -> Self {
        let lanes = ScalarVector(self.lanes()).gather_masked(mask.to_scalar(), base, indices);
        Self::from_lanes(lanes.0)
    }

    #[inline(always)]
    unsafe fn scatter(self, base: *mut f32, indices: &[usize]) {
        ScalarVector(self.lanes()).scatter(base, indices);
    }

    #[inline(always)]
    unsafe fn scatter_masked(self, mask: Avx2Mask, base: *mut f32, indices: &[usize]) {
        ScalarVector(self.lanes()).scatter_masked(mask.to_scalar(), base, indices);
    }
}

impl SimdVector for Avx2Int {
    type Scalar = i32;
    type Mask = Avx2Mask;

    const LANES: usize = 8;

    #[inline(always)]
    fn zero() -> Self {
        unsafe { Avx2Int(_mm256_setzero_si256()) }
    }

    #[inline(always)]
    fn splat(value: i32) -> Self {
        unsafe { Avx2Int(_mm256_set1_epi32(value)) }
    }

    #[inline(always)]
    fn from_slice(slice: &[i32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX2 load");
        unsafe { Avx2Int(_mm256_loadu_si256(slice.as_ptr().cast())) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [i32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX2 store");
        unsafe { _mm256_storeu_si256(slice.as_mut_ptr().cast(), self.0) }
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
    fn select(mask: Avx2Mask, true_val: Self, false_val: Self) -> Self {
        unsafe { Avx2Int(_mm256_blendv_epi8(false_val.0, true_val.0, mask.0)) }
    }
}

impl Arithmetic for Avx2Int {
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_add_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_sub_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_mullo_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self::from_lanes(ScalarVector(self.lanes()).div(ScalarVector(rhs.lanes())).0)
    }

    #[inline(always)]
    fn div_masked(self, mask: Avx2Mask, rhs: Self) -> Self {
        let quotient =
            ScalarVector(self.lanes()).div_masked(mask.to_scalar(), ScalarVector(rhs.lanes()));
        Self::from_lanes(quotient.0)
    }
}

impl Comparable for Avx2Int {
    #[inline(always)]
    fn cmpeq(self, rhs: Self) -> Avx2Mask {
        unsafe { Avx2Mask(_mm256_cmpeq_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmpne(self, rhs: Self) -> Avx2Mask {
        self.cmpeq(rhs).not()
    }

    #[inline(always)]
    fn cmplt(self, rhs: Self) -> Avx2Mask {
        unsafe { Avx2Mask(_mm256_cmpgt_epi32(rhs.0, self.0)) }
    }

    #[inline(always)]
    fn cmple(self, rhs: Self) -> Avx2Mask {
        self.cmpgt(rhs).not()
    }

    #[inline(always)]
    fn cmpgt(self, rhs: Self) -> Avx2Mask {
        unsafe { Avx2Mask(_mm256_cmpgt_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmpge(self, rhs: Self) -> Avx2Mask {
        self.cmplt(rhs).not()
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_min_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_max_epi32(self.0, rhs.0)) }
    }
}

impl BitwiseLogic for Avx2Int {
    #[inline(always)]
    fn band(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_and_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bor(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_or_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bxor(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_xor_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn bnot(self) -> Self {
        unsafe { Avx2Int(_mm256_xor_si256(self.0, all_ones())) }
    }
}

impl HorizontalReduce for Avx2Int {
    #[inline(always)]
    fn hadd(self) -> i32 {
        tree_reduce(&self.lanes(), i32::lane_add)
    }

    #[inline(always)]
    fn hmul(self) -> i32 {
        tree_reduce(&self.lanes(), i32::lane_mul)
    }

    #[inline(always)]
    fn hmin(self) -> i32 {
        tree_reduce(&self.lanes(), i32::lane_min)
    }

    #[inline(always)]
    fn hmax(self) -> i32 {
        tree_reduce(&self.lanes(), i32::lane_max)
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

impl MemoryAccess for Avx2Int {
    #[inline(always)]
    unsafe fn load(ptr: *const i32) -> Self {
        Avx2Int(_mm256_loadu_si256(ptr.cast()))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const i32) -> Self {
        Avx2Int(_mm256_load_si256(ptr.cast()))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut i32) {
        _mm256_storeu_si256(ptr.cast(), self.0);
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut i32) {
        _mm256_store_si256(ptr.cast(), self.0);
    }

    #[inline(always)]
    unsafe fn load_masked(self, mask: Avx2Mask, ptr: *const i32) -> Self {
        let loaded = Avx2Int(_mm256_maskload_epi32(ptr, mask.0));
        Self::select(mask, loaded, self)
    }

    #[inline(always)]
    unsafe fn store_masked(self, mask: Avx2Mask, ptr: *mut i32) {
        _mm256_maskstore_epi32(ptr, mask.0, self.0);
    }

    #[inline(always)]
    unsafe fn gather(base: *const i32, indices: &[usize]) -> Self {
        Self::from_lanes(ScalarVector::<i32, 8>::gather(base, indices).0)
    }

    #[inline(always)]
    unsafe fn gather_masked(self, mask: Avx2Mask, base: *const i32, indices: &[usize]) -> Self {
        let lanes = ScalarVector(self.lanes()).gather_masked(mask.to_scalar(), base, indices);
        Self::from_lanes(lanes.0)
    }

    #[inline(always)]
    unsafe fn scatter(self, base: *mut i32, indices: &[usize]) {
        ScalarVector(self.lanes()).scatter(base, indices);
    }

    #[inline(always)]
    unsafe fn scatter_masked(self, mask: Avx2Mask, base: *mut i32, indices: &[usize]) {
        ScalarVector(self.lanes()).scatter_masked(mask.to_scalar(), base, indices);
    }
}

impl Avx2Mask {
    #[inline(always)]
    fn to_scalar(self) -> ScalarMask<8> {
        ScalarMask(self.lanes().map(|lane| lane != 0))
    }
}

impl SimdMask for Avx2Mask {
    const LANES: usize = 8;

    #[inline(always)]
    fn from_bool(value: bool) -> Self {
        unsafe { Avx2Mask(_mm256_set1_epi32(-(value as i32))) }
    }

    #[inline(always)]
    fn from_bools(slice: &[bool]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX2 mask load");
        Self::from_lanes(core::array::from_fn(|i| -(slice[i] as i32)))
    }

    #[inline(always)]
    fn to_bools(self, slice: &mut [bool]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX2 mask store");
        slice[..8].copy_from_slice(&self.to_scalar().0);
    }

    #[inline(always)]
    fn test(self, index: usize) -> bool {
        self.lanes()[index] != 0
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: bool) {
        let mut lanes = self.lanes();
        lanes[index] = -(value as i32);
        *self = Self::from_lanes(lanes);
    }

    #[inline(always)]
    fn all(self) -> bool {
        self.to_bitmask() == 0xff
    }

    #[inline(always)]
    fn any(self) -> bool {
        self.to_bitmask() != 0
    }

    #[inline(always)]
    fn none(self) -> bool {
        self.to_bitmask() == 0
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { Avx2Mask(_mm256_and_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Avx2Mask(_mm256_or_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Avx2Mask(_mm256_xor_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn not(self) -> Self {
        unsafe { Avx2Mask(_mm256_xor_si256(self.0, all_ones())) }
    }

    #[inline(always)]
    fn to_bitmask(self) -> u64 {
        unsafe { _mm256_movemask_ps(_mm256_castsi256_ps(self.0)) as u32 as u64 }
    }
}

impl Decompose for Avx2Vector {
    type Half = ScalarVector<f32, 4>;

    #[inline(always)]
    fn pack(lo: Self::Half, hi: Self::Half) -> Self {
        unsafe {
            Avx2Vector(_mm256_set_m128(
                _mm_loadu_ps(hi.0.as_ptr()),
                _mm_loadu_ps(lo.0.as_ptr()),
            ))
        }
    }

    #[inline(always)]
    fn unpack_lo(self) -> Self::Half {
        ScalarVector::from_slice(&self.lanes()[..4])
    }

    #[inline(always)]
    fn unpack_hi(self) -> Self::Half {
        ScalarVector::from_slice(&self.lanes()[4..])
    }
}

impl Decompose for Avx2Int {
    type Half = ScalarVector<i32, 4>;

    #[inline(always)]
    fn pack(lo: Self::Half, hi: Self::Half) -> Self {
        Self::from_lanes(core::array::from_fn(|i| if i < 4 { lo.0[i] } else { hi.0[i - 4] }))
    }

    #[inline(always)]
    fn unpack_lo(self) -> Self::Half {
        ScalarVector::from_slice(&self.lanes()[..4])
    }

    #[inline(always)]
    fn unpack_hi(self) -> Self::Half {
        ScalarVector::from_slice(&self.lanes()[4..])
    }
}

impl Decompose for Avx2Mask {
    type Half = ScalarMask<4>;

    #[inline(always)]
    fn pack(lo: Self::Half, hi: Self::Half) -> Self {
        Self::from_lanes(core::array::from_fn(|i| {
            let set = if i < 4 { lo.0[i] } else { hi.0[i - 4] };
            -(set as i32)
        }))
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
