//! Lane and masked write handles
//!
//! [`LaneRef`] stands for `v[i]`: it reads through `extract` and writes through `insert`.
//! [`MaskedRef`] stands for `v[mask]`: it can only be assigned to, and every assignment is a
//! merge-masked update. Both hold a mutable borrow of the vector, so neither can outlive the
//! statement that uses it while the vector is touched elsewhere.

use crate::mask::Mask;
use crate::simd::Simd;
use crate::table::Lanes;

/// Handle to one lane of a vector
///
/// # Example
///
/// ```rust
/// use rigel_lanes::Simd;
///
/// let mut v = Simd::<u32, 4>::splat(1);
/// v.lane_mut(2).set(99);
/// v.lane_mut(0).update(|x| x + 10);
/// assert_eq!(v.to_array(), [11, 1, 99, 1]);
/// ```
pub struct LaneRef<'a, T: Lanes<N>, const N: usize> {
    vector: &'a mut Simd<T, N>,
    index: usize,
}

impl<T: Lanes<N>, const N: usize> LaneRef<'_, T, N> {
    /// Current lane value
    #[inline(always)]
    pub fn get(&self) -> T {
        // SAFETY: the index was range-checked when the handle was created.
        unsafe { self.vector.extract_unchecked(self.index) }
    }

    /// Overwrite the lane
    #[inline(always)]
    pub fn set(self, value: T) {
        // SAFETY: the index was range-checked when the handle was created.
        unsafe { self.vector.insert_unchecked(self.index, value) }
    }

    /// Overwrite the lane with `f(current)`
    #[inline(always)]
    pub fn update(self, f: impl FnOnce(T) -> T) {
        let value = f(self.get());
        self.set(value);
    }

    /// Lane index this handle refers to
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Write-only handle to the lanes of a vector selected by a mask
///
/// # Example
///
/// ```rust
/// use rigel_lanes::{Mask, Simd};
///
/// let mut v = Simd::<f32, 4>::from_array([1.0, 2.0, 3.0, 4.0]);
/// let m = Mask::from_array([false, true, false, true]);
/// v.masked(m).add_assign(Simd::splat(10.0));
/// assert_eq!(v.to_array(), [1.0, 12.0, 3.0, 14.0]);
/// ```
pub struct MaskedRef<'a, T: Lanes<N>, const N: usize> {
    vector: &'a mut Simd<T, N>,
    mask: Mask<T, N>,
}

impl<T: Lanes<N>, const N: usize> MaskedRef<'_, T, N> {
    /// Active lanes take `value`, the others keep their current value
    #[inline(always)]
    pub fn assign(self, value: Simd<T, N>) {
        self.vector.set_masked(self.mask, value);
    }

    /// Active lanes take `value`
    #[inline(always)]
    pub fn assign_scalar(self, value: T) {
        self.assign(Simd::splat(value));
    }

    /// Active lanes become `lane + rhs`
    #[inline(always)]
    pub fn add_assign(self, rhs: Simd<T, N>) {
        *self.vector = self.vector.add_masked(self.mask, rhs);
    }

    /// Active lanes become `lane - rhs`
    #[inline(always)]
    pub fn sub_assign(self, rhs: Simd<T, N>) {
        *self.vector = self.vector.sub_masked(self.mask, rhs);
    }

    /// Active lanes become `lane * rhs`
    #[inline(always)]
    pub fn mul_assign(self, rhs: Simd<T, N>) {
        *self.vector = self.vector.mul_masked(self.mask, rhs);
    }

    /// Active lanes become `lane / rhs`; inactive lanes are never divided
    #[inline(always)]
    pub fn div_assign(self, rhs: Simd<T, N>) {
        *self.vector = self.vector.div_masked(self.mask, rhs);
    }
}

impl<T: Lanes<N>, const N: usize> Simd<T, N> {
    /// Handle to lane `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`
    #[inline(always)]
    pub fn lane_mut(&mut self, index: usize) -> LaneRef<'_, T, N> {
        assert!(index < N, "Lane index {} out of range for {} lanes", index, N);
        LaneRef {
            vector: self,
            index,
        }
    }

    /// Write-only handle to the lanes selected by `mask`
    #[inline(always)]
    pub fn masked(&mut self, mask: Mask<T, N>) -> MaskedRef<'_, T, N> {
        MaskedRef { vector: self, mask }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_ref_reads_and_writes() {
        let mut v = Simd::<i8, 16>::splat(3);
        let lane = v.lane_mut(9);
        assert_eq!(lane.get(), 3);
        assert_eq!(lane.index(), 9);
        lane.set(-7);
        assert_eq!(v.extract(9), -7);
        assert_eq!(v.extract(8), 3);
    }

    #[test]
    fn test_lane_ref_update() {
        let mut v = Simd::<f64, 8>::splat(2.0);
        v.lane_mut(7).update(|x| x * x);
        assert_eq!(v.extract(7), 4.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_lane_ref_range_check() {
        let mut v = Simd::<u8, 2>::zero();
        let _ = v.lane_mut(2);
    }

    #[test]
    fn test_masked_ref_merges() {
        let m = Mask::<u16, 8>::from_bitmask(0b0000_1111);
        let mut v = Simd::<u16, 8>::splat(100);

        v.masked(m).assign_scalar(1);
        assert_eq!(v.to_array(), [1, 1, 1, 1, 100, 100, 100, 100]);

        v.masked(!m).sub_assign(Simd::splat(50));
        assert_eq!(v.to_array(), [1, 1, 1, 1, 50, 50, 50, 50]);

        v.masked(m).mul_assign(Simd::splat(3));
        assert_eq!(v.to_array(), [3, 3, 3, 3, 50, 50, 50, 50]);
    }

    #[test]
    fn test_masked_ref_div_leaves_inactive_lanes() {
        let m = Mask::<i32, 4>::from_array([true, false, true, false]);
        let mut v = Simd::<i32, 4>::from_array([10, 20, 30, 40]);
        v.masked(m).div_assign(Simd::from_array([2, 0, 3, 0]));
        assert_eq!(v.to_array(), [5, 20, 10, 40]);
    }

    #[test]
    fn test_masked_ref_with_empty_mask_is_identity() {
        let mut v = Simd::<f32, 16>::splat(1.5);
        v.masked(Mask::splat(false)).assign(Simd::splat(9.0));
        assert_eq!(v, Simd::splat(1.5));
    }
}
