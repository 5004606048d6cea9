//! Lane element types
//!
//! Every lane of a vector holds one [`Element`]. The trait is sealed: the set of element kinds
//! and widths is closed, which is what lets the lane table in [`crate::table`] reject any other
//! type at compile time.
//!
//! Integer lanes follow two's-complement wraparound for add/sub/mul. Division follows Rust's
//! native rules (division by zero panics). Float lanes follow IEEE 754; min/max ignore a single
//! NaN operand like `libm::fminf`, and return `self` when the operands compare equal (`+0`/`-0`).

use core::fmt::Debug;
use half::f16;

mod sealed {
    pub trait Sealed {}
}

/// Kind of a lane element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Unsigned integer
    Unsigned,
    /// Signed two's-complement integer
    Signed,
    /// IEEE 754 binary float
    Float,
}

/// Scalar type that may occupy a vector lane
///
/// Provides the per-lane primitives the portable backend is built from, plus the same-width
/// unsigned and signed companions used by the conversion layer.
pub trait Element:
    sealed::Sealed + Copy + PartialEq + PartialOrd + Default + Debug + Send + Sync + 'static
{
    /// Unsigned integer of the same width
    type Unsigned: Element;

    /// Signed integer of the same width
    type Signed: Element;

    /// Element kind
    const KIND: ElementKind;

    /// Width in bits
    const BITS: u32;

    /// Additive identity
    const ZERO: Self;

    /// Multiplicative identity
    const ONE: Self;

    /// Identity of `max` (the smallest value, `-inf` for floats)
    const LOWEST: Self;

    /// Identity of `min` (the largest value, `+inf` for floats)
    const HIGHEST: Self;

    /// Value with every bit set (identity of bitwise AND)
    fn all_ones() -> Self;

    /// Lane addition (wrapping for integers)
    fn lane_add(self, rhs: Self) -> Self;

    /// Lane subtraction (wrapping for integers)
    fn lane_sub(self, rhs: Self) -> Self;

    /// Lane multiplication (wrapping for integers)
    fn lane_mul(self, rhs: Self) -> Self;

    /// Lane division
    ///
    /// # Panics
    ///
    /// Integer division by zero panics, as for the primitive type.
    fn lane_div(self, rhs: Self) -> Self;

    /// Lane minimum
    fn lane_min(self, rhs: Self) -> Self;

    /// Lane maximum
    fn lane_max(self, rhs: Self) -> Self;

    /// Bitwise AND of the lane bit patterns
    fn lane_and(self, rhs: Self) -> Self;

    /// Bitwise OR of the lane bit patterns
    fn lane_or(self, rhs: Self) -> Self;

    /// Bitwise XOR of the lane bit patterns
    fn lane_xor(self, rhs: Self) -> Self;

    /// Bitwise NOT of the lane bit pattern
    fn lane_not(self) -> Self;

    /// Numeric conversion to the unsigned companion
    fn to_unsigned_lane(self) -> Self::Unsigned;

    /// Numeric conversion to the signed companion
    fn to_signed_lane(self) -> Self::Signed;
}

/// Integer element with a same-width float companion
pub trait HasFloat: Element {
    /// Float of the same width
    type Float: Element;

    /// Numeric conversion, rounding to nearest
    fn to_float_lane(self) -> Self::Float;
}

/// Float element
pub trait FloatElement: Element {
    /// Numeric conversion to the signed companion, truncating toward zero and saturating
    fn to_int_lane(self) -> Self::Signed;
}

/// Float element with a higher-precision companion
pub trait Promote: FloatElement {
    /// Float of twice the width
    type Wider: FloatElement;

    /// Exact widening conversion
    fn promote_lane(self) -> Self::Wider;
}

/// Float element with a lower-precision companion
pub trait Degrade: FloatElement {
    /// Float of half the width
    type Narrower: FloatElement;

    /// Narrowing conversion, rounding to nearest-even
    fn degrade_lane(self) -> Self::Narrower;
}

macro_rules! impl_int_element {
    ($($ty:ty => $kind:ident, unsigned $uns:ty, signed $sig:ty;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                type Unsigned = $uns;
                type Signed = $sig;

                const KIND: ElementKind = ElementKind::$kind;
                const BITS: u32 = <$ty>::BITS;
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const LOWEST: Self = <$ty>::MIN;
                const HIGHEST: Self = <$ty>::MAX;

                #[inline(always)]
                fn all_ones() -> Self {
                    !0
                }

                #[inline(always)]
                fn lane_add(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                #[inline(always)]
                fn lane_sub(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }

                #[inline(always)]
                fn lane_mul(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }

                #[inline(always)]
                fn lane_div(self, rhs: Self) -> Self {
                    self.wrapping_div(rhs)
                }

                #[inline(always)]
                fn lane_min(self, rhs: Self) -> Self {
                    if rhs < self { rhs } else { self }
                }

                #[inline(always)]
                fn lane_max(self, rhs: Self) -> Self {
                    if rhs > self { rhs } else { self }
                }

                #[inline(always)]
                fn lane_and(self, rhs: Self) -> Self {
                    self & rhs
                }

                #[inline(always)]
                fn lane_or(self, rhs: Self) -> Self {
                    self | rhs
                }

                #[inline(always)]
                fn lane_xor(self, rhs: Self) -> Self {
                    self ^ rhs
                }

                #[inline(always)]
                fn lane_not(self) -> Self {
                    !self
                }

                #[inline(always)]
                fn to_unsigned_lane(self) -> $uns {
                    self as $uns
                }

                #[inline(always)]
                fn to_signed_lane(self) -> $sig {
                    self as $sig
                }
            }
        )*
    };
}

impl_int_element! {
    u8 => Unsigned, unsigned u8, signed i8;
    u16 => Unsigned, unsigned u16, signed i16;
    u32 => Unsigned, unsigned u32, signed i32;
    u64 => Unsigned, unsigned u64, signed i64;
    i8 => Signed, unsigned u8, signed i8;
    i16 => Signed, unsigned u16, signed i16;
    i32 => Signed, unsigned u32, signed i32;
    i64 => Signed, unsigned u64, signed i64;
}

macro_rules! impl_native_float_element {
    ($($ty:ty => bits $bits:ty, unsigned $uns:ty, signed $sig:ty, min $min:path, max $max:path;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                type Unsigned = $uns;
                type Signed = $sig;

                const KIND: ElementKind = ElementKind::Float;
                const BITS: u32 = <$bits>::BITS;
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;
                const LOWEST: Self = <$ty>::NEG_INFINITY;
                const HIGHEST: Self = <$ty>::INFINITY;

                #[inline(always)]
                fn all_ones() -> Self {
                    <$ty>::from_bits(!0)
                }

                #[inline(always)]
                fn lane_add(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline(always)]
                fn lane_sub(self, rhs: Self) -> Self {
                    self - rhs
                }

                #[inline(always)]
                fn lane_mul(self, rhs: Self) -> Self {
                    self * rhs
                }

                #[inline(always)]
                fn lane_div(self, rhs: Self) -> Self {
                    self / rhs
                }

                #[inline(always)]
                fn lane_min(self, rhs: Self) -> Self {
                    if self == rhs { self } else { $min(self, rhs) }
                }

                #[inline(always)]
                fn lane_max(self, rhs: Self) -> Self {
                    if self == rhs { self } else { $max(self, rhs) }
                }

                #[inline(always)]
                fn lane_and(self, rhs: Self) -> Self {
                    <$ty>::from_bits(self.to_bits() & rhs.to_bits())
                }

                #[inline(always)]
                fn lane_or(self, rhs: Self) -> Self {
                    <$ty>::from_bits(self.to_bits() | rhs.to_bits())
                }

                #[inline(always)]
                fn lane_xor(self, rhs: Self) -> Self {
                    <$ty>::from_bits(self.to_bits() ^ rhs.to_bits())
                }

                #[inline(always)]
                fn lane_not(self) -> Self {
                    <$ty>::from_bits(!self.to_bits())
                }

                #[inline(always)]
                fn to_unsigned_lane(self) -> $uns {
                    self as $uns
                }

                #[inline(always)]
                fn to_signed_lane(self) -> $sig {
                    self as $sig
                }
            }

            impl FloatElement for $ty {
                #[inline(always)]
                fn to_int_lane(self) -> $sig {
                    self as $sig
                }
            }
        )*
    };
}

impl_native_float_element! {
    f32 => bits u32, unsigned u32, signed i32, min libm::fminf, max libm::fmaxf;
    f64 => bits u64, unsigned u64, signed i64, min libm::fmin, max libm::fmax;
}

// f16 arithmetic is carried out in f32 and rounded back, which is exact for a single operation.
impl sealed::Sealed for f16 {}

impl Element for f16 {
    type Unsigned = u16;
    type Signed = i16;

    const KIND: ElementKind = ElementKind::Float;
    const BITS: u32 = 16;
    const ZERO: Self = f16::ZERO;
    const ONE: Self = f16::ONE;
    const LOWEST: Self = f16::NEG_INFINITY;
    const HIGHEST: Self = f16::INFINITY;

    #[inline(always)]
    fn all_ones() -> Self {
        f16::from_bits(!0)
    }

    #[inline(always)]
    fn lane_add(self, rhs: Self) -> Self {
        f16::from_f32(self.to_f32() + rhs.to_f32())
    }

    #[inline(always)]
    fn lane_sub(self, rhs: Self) -> Self {
        f16::from_f32(self.to_f32() - rhs.to_f32())
    }

    #[inline(always)]
    fn lane_mul(self, rhs: Self) -> Self {
        f16::from_f32(self.to_f32() * rhs.to_f32())
    }

    #[inline(always)]
    fn lane_div(self, rhs: Self) -> Self {
        f16::from_f32(self.to_f32() / rhs.to_f32())
    }

    #[inline(always)]
    fn lane_min(self, rhs: Self) -> Self {
        if self == rhs {
            self
        } else {
            f16::from_f32(libm::fminf(self.to_f32(), rhs.to_f32()))
        }
    }

    #[inline(always)]
    fn lane_max(self, rhs: Self) -> Self {
        if self == rhs {
            self
        } else {
            f16::from_f32(libm::fmaxf(self.to_f32(), rhs.to_f32()))
        }
    }

    #[inline(always)]
    fn lane_and(self, rhs: Self) -> Self {
        f16::from_bits(self.to_bits() & rhs.to_bits())
    }

    #[inline(always)]
    fn lane_or(self, rhs: Self) -> Self {
        f16::from_bits(self.to_bits() | rhs.to_bits())
    }

    #[inline(always)]
    fn lane_xor(self, rhs: Self) -> Self {
        f16::from_bits(self.to_bits() ^ rhs.to_bits())
    }

    #[inline(always)]
    fn lane_not(self) -> Self {
        f16::from_bits(!self.to_bits())
    }

    #[inline(always)]
    fn to_unsigned_lane(self) -> u16 {
        self.to_f32() as u16
    }

    #[inline(always)]
    fn to_signed_lane(self) -> i16 {
        self.to_f32() as i16
    }
}

impl FloatElement for f16 {
    #[inline(always)]
    fn to_int_lane(self) -> i16 {
        self.to_f32() as i16
    }
}

macro_rules! impl_has_float {
    ($($ty:ty => $float:ty, $conv:expr;)*) => {
        $(
            impl HasFloat for $ty {
                type Float = $float;

                #[inline(always)]
                fn to_float_lane(self) -> $float {
                    $conv(self)
                }
            }
        )*
    };
}

// 16-bit integers go through f32, which holds them exactly, so only one rounding happens.
impl_has_float! {
    u16 => f16, |x: u16| f16::from_f32(x as f32);
    i16 => f16, |x: i16| f16::from_f32(x as f32);
    u32 => f32, |x: u32| x as f32;
    i32 => f32, |x: i32| x as f32;
    u64 => f64, |x: u64| x as f64;
    i64 => f64, |x: i64| x as f64;
}

impl Promote for f16 {
    type Wider = f32;

    #[inline(always)]
    fn promote_lane(self) -> f32 {
        self.to_f32()
    }
}

impl Promote for f32 {
    type Wider = f64;

    #[inline(always)]
    fn promote_lane(self) -> f64 {
        self as f64
    }
}

impl Degrade for f32 {
    type Narrower = f16;

    #[inline(always)]
    fn degrade_lane(self) -> f16 {
        f16::from_f32(self)
    }
}

impl Degrade for f64 {
    type Narrower = f32;

    #[inline(always)]
    fn degrade_lane(self) -> f32 {
        self as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_lanes_wrap() {
        assert_eq!(i32::MAX.lane_add(1), i32::MIN);
        assert_eq!(0u8.lane_sub(1), 255);
        assert_eq!(200u8.lane_mul(2), 144);
        assert_eq!(i8::MIN.lane_div(-1), i8::MIN);
    }

    #[test]
    fn test_float_bitwise_uses_bit_pattern() {
        let x = -2.5f32;
        assert_eq!(x.lane_and(f32::all_ones()).to_bits(), x.to_bits());
        assert_eq!(x.lane_xor(x).to_bits(), 0);
        assert_eq!(x.lane_not().lane_not().to_bits(), x.to_bits());
    }

    #[test]
    fn test_float_min_max_ignore_single_nan() {
        assert_eq!(f32::NAN.lane_min(1.0), 1.0);
        assert_eq!(2.0f64.lane_max(f64::NAN), 2.0);
    }

    #[test]
    fn test_float_min_max_ties_keep_self() {
        assert_eq!(0.0f32.lane_max(-0.0).to_bits(), 0.0f32.to_bits());
        assert_eq!((-0.0f32).lane_max(0.0).to_bits(), (-0.0f32).to_bits());
        assert_eq!(0.0f32.lane_min(-0.0).to_bits(), 0.0f32.to_bits());
        assert_eq!((-0.0f64).lane_min(0.0).to_bits(), (-0.0f64).to_bits());
        assert_eq!(f16::NEG_ZERO.lane_max(f16::ZERO).to_bits(), f16::NEG_ZERO.to_bits());
    }

    #[test]
    fn test_companions() {
        assert_eq!((-1i16).to_unsigned_lane(), u16::MAX);
        assert_eq!(u32::MAX.to_signed_lane(), -1);
        assert_eq!((-3.75f32).to_signed_lane(), -3);
        assert_eq!(f32::NAN.to_int_lane(), 0);
        assert_eq!(1e20f32.to_int_lane(), i32::MAX);
        assert_eq!(7i32.to_float_lane(), 7.0);
        assert_eq!(1024u16.to_float_lane(), f16::from_f32(1024.0));
    }

    #[test]
    fn test_precision_round_trip() {
        let x = f16::from_f32(0.333);
        assert_eq!(x.promote_lane().degrade_lane(), x);
        assert_eq!(0.1f32.promote_lane().degrade_lane(), 0.1f32);
        assert_eq!(<f16 as Element>::KIND, ElementKind::Float);
        assert_eq!(<f16 as Element>::BITS, 16);
    }
}
