#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! rigel-lanes: fixed-width SIMD lane vectors composed from native registers
//!
//! # Layers
//!
//! - **Elements** ([`element`]): the closed set of lane types and their per-lane rules
//! - **Capabilities** ([`traits`]): what every backend vector and mask provides
//! - **Backends** ([`backends`]): the scalar fallback plus AVX2 and NEON registers
//! - **Composition** ([`composite`]): any wider width as two half-width vectors
//! - **Lane table** ([`table`]): the compile-time choice of representation per (element, N)
//! - **Public API** ([`Simd`], [`Mask`], [`LaneRef`], [`MaskedRef`], conversions, [`LaneBlock`])
//!
//! # Backend selection
//!
//! Backends are chosen at compile time via cargo features: `scalar` (default), `avx2` on
//! x86/x86_64 and `neon` on aarch64. Code written against [`Simd`] is unchanged across them and
//! produces bit-identical results, reductions included.

#[cfg(test)]
extern crate std;

// Lane element types
pub mod element;

// Core trait definitions
pub mod traits;

// Backend implementations
pub mod backends;

// Recursive decomposition
pub mod composite;

// Compile-time lane table
pub mod table;

// Public vector and mask types
mod convert;
mod mask;
mod proxy;
mod simd;

// Block processing
pub mod block;

// Functional-style vector operations
pub mod ops;

// Public re-exports for convenience
pub use traits::{
    Arithmetic, BitwiseLogic, Comparable, Decompose, HorizontalReduce, LaneVector, MemoryAccess,
    SimdMask, SimdVector,
};

pub use element::{Degrade, Element, ElementKind, FloatElement, HasFloat, Promote};

// 16-bit float lane type
pub use half::f16;

pub use table::{Degraded, Float, Half, Lanes, MaskOf, Promoted, Signed, Unsigned, Vector};

pub use composite::Composite;
pub use mask::Mask;
pub use proxy::{LaneRef, MaskedRef};
pub use simd::Simd;

// Re-export block types
pub use block::{Block128, Block64, Chunks, LaneBlock};

// Re-export backend types
pub use backends::scalar::{ScalarMask, ScalarVector};

// Only re-export AVX2 types when both feature is enabled AND we're targeting x86/x86_64
#[cfg(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")))]
pub use backends::avx2::{Avx2Int, Avx2Mask, Avx2Vector};

// Only re-export NEON types when both feature is enabled AND we're targeting aarch64
#[cfg(all(feature = "neon", target_arch = "aarch64"))]
pub use backends::neon::{NeonInt, NeonMask, NeonVector};

/// Lanes of `f32` held in one register by the active backend
#[cfg(not(any(
    all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")),
    all(feature = "neon", target_arch = "aarch64")
)))]
pub const NATIVE_F32_LANES: usize = 4;

/// Lanes of `f32` held in one register by the active backend (AVX2)
#[cfg(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")))]
pub const NATIVE_F32_LANES: usize = 8;

/// Lanes of `f32` held in one register by the active backend (NEON)
#[cfg(all(feature = "neon", target_arch = "aarch64"))]
pub const NATIVE_F32_LANES: usize = 4;

/// Default backend vector type based on enabled feature
///
/// This type alias resolves to the `f32` register of the backend selected at compile time:
/// - `scalar` feature (default): `ScalarVector<f32, 4>`
/// - `avx2` feature: `Avx2Vector` (8 lanes, x86-64)
/// - `neon` feature: `NeonVector` (4 lanes, ARM64)
pub type DefaultSimdVector = Vector<f32, NATIVE_F32_LANES>;

/// [`Simd`] of `f32` at the native width of the active backend
pub type DefaultSimd = Simd<f32, NATIVE_F32_LANES>;
