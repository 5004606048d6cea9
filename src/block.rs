//! Fixed-size aligned buffers processed in vector chunks
//!
//! A [`LaneBlock<T, LEN>`] stores `LEN` elements contiguously with 64-byte alignment, which is
//! the widest vector the library builds (512 bits). Chunks of `N` lanes therefore always start
//! on a boundary aligned to the vector byte width, so chunk access uses the aligned load and
//! store paths without any `unsafe` at the call site.
//!
//! ```text
//! LaneBlock<f32, 64> in chunks of 8 lanes:
//! [0  1  2  3  4  5  6  7] [8  9  10 11 12 13 14 15] ... [56 57 58 59 60 61 62 63]
//!  └──────── chunk 0 ─────┘ └──────── chunk 1 ──────┘     └──────── chunk 7 ──────┘
//! ```

use core::ops::{Index, IndexMut};

use crate::element::Element;
use crate::simd::Simd;
use crate::table::Lanes;

/// Fixed-size buffer aligned for vector access
///
/// # Example
///
/// ```rust
/// use rigel_lanes::{Block64, Simd};
///
/// let mut block = Block64::new();
/// for i in 0..64 {
///     block[i] = i as f32;
/// }
///
/// let gain = Simd::<f32, 8>::splat(0.5);
/// block.map_chunks::<8>(|chunk| chunk * gain);
/// assert_eq!(block[10], 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, align(64))]
pub struct LaneBlock<T, const LEN: usize> {
    data: [T; LEN],
}

impl<T: Element, const LEN: usize> LaneBlock<T, LEN> {
    /// Block with every element zero
    #[inline]
    pub fn new() -> Self {
        Self {
            data: [T::ZERO; LEN],
        }
    }

    /// Copy a block out of a slice
    ///
    /// # Panics
    ///
    /// Panics if the slice length is not `LEN`
    #[inline]
    pub fn from_slice(slice: &[T]) -> Self {
        assert_eq!(
            slice.len(),
            LEN,
            "Slice length {} doesn't match block size {}",
            slice.len(),
            LEN
        );
        let mut data = [T::ZERO; LEN];
        data.copy_from_slice(slice);
        Self { data }
    }

    /// Number of elements
    #[inline]
    pub const fn len(&self) -> usize {
        LEN
    }

    /// Returns true if the block holds no elements
    #[inline]
    pub const fn is_empty(&self) -> bool {
        LEN == 0
    }

    /// Every element as a slice
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Every element as a mutable slice
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Number of `N`-lane chunks
    ///
    /// `N` must be a supported lane count for `T`:
    ///
    /// ```compile_fail
    /// let block = rigel_lanes::Block64::new();
    /// let _ = block.chunk_count::<0>();
    /// ```
    #[inline]
    pub const fn chunk_count<const N: usize>(&self) -> usize
    where
        T: Lanes<N>,
    {
        const { assert!(LEN % N == 0, "Block size must be a multiple of the lane count") };
        LEN / N
    }

    /// Load chunk `chunk` (elements `chunk * N .. chunk * N + N`)
    ///
    /// # Panics
    ///
    /// Panics if the chunk is out of range
    #[inline]
    pub fn load_chunk<const N: usize>(&self, chunk: usize) -> Simd<T, N>
    where
        T: Lanes<N>,
    {
        const { assert!(LEN % N == 0, "Block size must be a multiple of the lane count") };
        assert!(chunk < LEN / N, "Chunk {} out of range", chunk);
        // SAFETY: the chunk lies inside the block and starts at a multiple of the vector byte
        // width from a 64-byte aligned base.
        unsafe { Simd::load_aligned(self.data.as_ptr().add(chunk * N)) }
    }

    /// Store `value` to chunk `chunk`
    ///
    /// # Panics
    ///
    /// Panics if the chunk is out of range
    #[inline]
    pub fn store_chunk<const N: usize>(&mut self, chunk: usize, value: Simd<T, N>)
    where
        T: Lanes<N>,
    {
        const { assert!(LEN % N == 0, "Block size must be a multiple of the lane count") };
        assert!(chunk < LEN / N, "Chunk {} out of range", chunk);
        // SAFETY: as for `load_chunk`.
        unsafe { value.store_aligned(self.data.as_mut_ptr().add(chunk * N)) }
    }

    /// Iterate over the block as `N`-lane vectors
    #[inline]
    pub fn chunks<const N: usize>(&self) -> Chunks<'_, T, LEN, N>
    where
        T: Lanes<N>,
    {
        const { assert!(LEN % N == 0, "Block size must be a multiple of the lane count") };
        Chunks {
            block: self,
            chunk: 0,
        }
    }

    /// Replace every chunk with `f(chunk)`
    #[inline]
    pub fn map_chunks<const N: usize>(&mut self, mut f: impl FnMut(Simd<T, N>) -> Simd<T, N>)
    where
        T: Lanes<N>,
    {
        for chunk in 0..LEN / N {
            let value = self.load_chunk::<N>(chunk);
            self.store_chunk(chunk, f(value));
        }
    }
}

impl<T: Element, const LEN: usize> Default for LaneBlock<T, LEN> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const LEN: usize> Index<usize> for LaneBlock<T, LEN> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T, const LEN: usize> IndexMut<usize> for LaneBlock<T, LEN> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

/// Iterator over the `N`-lane chunks of a block
pub struct Chunks<'a, T, const LEN: usize, const N: usize> {
    block: &'a LaneBlock<T, LEN>,
    chunk: usize,
}

impl<T: Lanes<N>, const LEN: usize, const N: usize> Iterator for Chunks<'_, T, LEN, N> {
    type Item = Simd<T, N>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.chunk < LEN / N {
            let value = self.block.load_chunk::<N>(self.chunk);
            self.chunk += 1;
            Some(value)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = LEN / N - self.chunk;
        (remaining, Some(remaining))
    }
}

impl<T: Lanes<N>, const LEN: usize, const N: usize> ExactSizeIterator for Chunks<'_, T, LEN, N> {}

/// 64 `f32` elements
pub type Block64 = LaneBlock<f32, 64>;

/// 128 `f32` elements
pub type Block128 = LaneBlock<f32, 128>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_alignment() {
        let block64 = Block64::new();
        let block128 = Block128::new();
        let bytes = LaneBlock::<u8, 64>::new();

        assert_eq!(&block64 as *const _ as usize % 64, 0, "Block64 not 64-byte aligned");
        assert_eq!(&block128 as *const _ as usize % 64, 0, "Block128 not 64-byte aligned");
        assert_eq!(&bytes as *const _ as usize % 64, 0, "byte block not 64-byte aligned");
    }

    #[test]
    fn test_chunk_count_matches_iteration() {
        let block = Block128::new();
        assert_eq!(block.chunk_count::<1>(), block.chunks::<1>().count());
        assert_eq!(block.chunk_count::<4>(), block.chunks::<4>().count());
        assert_eq!(block.chunk_count::<16>(), 8);

        let bytes = LaneBlock::<u8, 64>::new();
        assert_eq!(bytes.chunk_count::<64>(), 1);
    }

    #[test]
    fn test_block_creation() {
        let block = Block64::new();
        assert_eq!(block.len(), 64);
        assert!(!block.is_empty());
        assert_eq!(block.chunk_count::<16>(), 4);

        let block = Block64::from_slice(&[1.0f32; 64]);
        assert_eq!(block[0], 1.0);
        assert_eq!(block[63], 1.0);
    }

    #[test]
    #[should_panic(expected = "doesn't match block size")]
    fn test_block_from_short_slice() {
        let _ = Block64::from_slice(&[0.0; 63]);
    }

    #[test]
    fn test_chunk_load_store() {
        let mut block = LaneBlock::<u16, 32>::new();
        for i in 0..32 {
            block[i] = i as u16;
        }

        let third = block.load_chunk::<8>(2);
        assert_eq!(third.to_array(), [16, 17, 18, 19, 20, 21, 22, 23]);

        block.store_chunk(1, Simd::<u16, 8>::splat(0));
        assert_eq!(block.as_slice()[7..17], [7, 0, 0, 0, 0, 0, 0, 0, 0, 16]);
    }

    #[test]
    fn test_chunk_iteration() {
        let block = LaneBlock::<i64, 16>::from_slice(&[2; 16]);
        let chunks = block.chunks::<4>();
        assert_eq!(chunks.len(), 4);

        let total: i64 = block.chunks::<4>().map(|c| c.hadd()).sum();
        assert_eq!(total, 32);
    }

    #[test]
    fn test_map_chunks_wide() {
        let mut block = LaneBlock::<u8, 128>::new();
        block.map_chunks::<64>(|c| c + Simd::splat(3));
        assert!(block.as_slice().iter().all(|&x| x == 3));
    }
}
