//! Functional-style vector operations
//!
//! Free functions generic over the capability traits, for code that is written against a
//! backend vector type rather than [`Simd`](crate::Simd).

mod arithmetic;
mod compare;
mod horizontal;

pub use arithmetic::{
    add, add_masked, div, div_masked, mul, mul_masked, sub, sub_from, sub_from_masked, sub_masked,
};
pub use compare::{eq, ge, gt, le, lt, max, min, ne, select};
pub use horizontal::{hadd, hmax, hmin, hmul};
