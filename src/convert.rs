//! Conversions between vector families of the same lane count
//!
//! Each conversion is numeric and lane-for-lane: `N` is preserved, only the element changes.
//! A conversion exists only where the companion element supports `N` lanes, so for instance
//! `Simd<u8, N>` has no `to_float` and `Simd<f64, 16>` cannot be promoted from `Simd<f32, 16>`.
//!
//! | Conversion    | Rule                                                      |
//! |---------------|-----------------------------------------------------------|
//! | `to_unsigned` | integers reinterpret two's complement, floats truncate    |
//! | `to_signed`   | integers reinterpret two's complement, floats truncate    |
//! | `to_float`    | round to nearest                                          |
//! | `to_int`      | truncate toward zero, saturate, NaN becomes 0             |
//! | `promote`     | exact                                                     |
//! | `degrade`     | round to nearest-even                                     |

use crate::element::{Degrade, Element, FloatElement, HasFloat, Promote};
use crate::simd::Simd;
use crate::table::{Degraded, Float, Lanes, Promoted, Signed, Unsigned};

impl<T, const N: usize> Simd<T, N>
where
    T: Lanes<N>,
    T::Unsigned: Lanes<N>,
{
    /// Same-width unsigned vector
    ///
    /// ```rust
    /// use rigel_lanes::Simd;
    ///
    /// let v = Simd::<i8, 4>::from_array([-1, 0, 1, -128]);
    /// assert_eq!(v.to_unsigned().to_array(), [255, 0, 1, 128]);
    /// ```
    #[inline]
    pub fn to_unsigned(self) -> Unsigned<T, N> {
        Simd::from_array(self.to_array().map(Element::to_unsigned_lane))
    }
}

impl<T, const N: usize> Simd<T, N>
where
    T: Lanes<N>,
    T::Signed: Lanes<N>,
{
    /// Same-width signed vector
    #[inline]
    pub fn to_signed(self) -> Signed<T, N> {
        Simd::from_array(self.to_array().map(Element::to_signed_lane))
    }
}

impl<T, const N: usize> Simd<T, N>
where
    T: Lanes<N> + HasFloat,
    T::Float: Lanes<N>,
{
    /// Same-width float vector
    ///
    /// ```rust
    /// use rigel_lanes::Simd;
    ///
    /// let v = Simd::<i32, 8>::splat(-3);
    /// assert_eq!(v.to_float(), Simd::<f32, 8>::splat(-3.0));
    /// ```
    #[inline]
    pub fn to_float(self) -> Float<T, N> {
        Simd::from_array(self.to_array().map(HasFloat::to_float_lane))
    }
}

impl<T, const N: usize> Simd<T, N>
where
    T: Lanes<N> + FloatElement,
    T::Signed: Lanes<N>,
{
    /// Same-width signed integer vector, truncating toward zero
    ///
    /// ```rust
    /// use rigel_lanes::Simd;
    ///
    /// let v = Simd::<f64, 4>::from_array([2.9, -2.9, f64::NAN, 1e300]);
    /// assert_eq!(v.to_int().to_array(), [2, -2, 0, i64::MAX]);
    /// ```
    #[inline]
    pub fn to_int(self) -> Signed<T, N> {
        Simd::from_array(self.to_array().map(FloatElement::to_int_lane))
    }
}

impl<T, const N: usize> Simd<T, N>
where
    T: Lanes<N> + Promote,
    T::Wider: Lanes<N>,
{
    /// Higher-precision float vector with the same lanes
    ///
    /// ```rust
    /// use rigel_lanes::Simd;
    ///
    /// let v = Simd::<f32, 4>::splat(0.1);
    /// assert_eq!(v.promote().to_array(), [0.1f32 as f64; 4]);
    /// ```
    #[inline]
    pub fn promote(self) -> Promoted<T, N> {
        Simd::from_array(self.to_array().map(Promote::promote_lane))
    }
}

impl<T, const N: usize> Simd<T, N>
where
    T: Lanes<N> + Degrade,
    T::Narrower: Lanes<N>,
{
    /// Lower-precision float vector with the same lanes
    #[inline]
    pub fn degrade(self) -> Degraded<T, N> {
        Simd::from_array(self.to_array().map(Degrade::degrade_lane))
    }
}
