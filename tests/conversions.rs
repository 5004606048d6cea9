//! Conversion tests across element families at native and composed widths

use rigel_lanes::{f16, Float, Promoted, Signed, Simd, Unsigned};

#[test]
fn test_signed_unsigned_reinterpret_at_composed_width() {
    let v = Simd::<i8, 64>::from_array(core::array::from_fn(|i| (i as i8).wrapping_mul(7)));
    let u: Unsigned<i8, 64> = v.to_unsigned();

    for i in 0..64 {
        assert_eq!(u.extract(i), v.extract(i) as u8);
    }
    assert_eq!(u.to_signed(), v);
}

#[test]
fn test_integer_to_float_families() {
    let shorts = Simd::<u16, 32>::from_array(core::array::from_fn(|i| i as u16 * 100));
    let halves: Float<u16, 32> = shorts.to_float();
    assert_eq!(halves.extract(31), f16::from_f32(3100.0));

    let words = Simd::<i64, 8>::from_array([-4, -3, -2, -1, 0, 1, 2, i64::MIN]);
    assert_eq!(
        words.to_float().to_array(),
        [-4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, i64::MIN as f64]
    );
}

#[test]
fn test_float_to_int_truncates_and_saturates() {
    let v = Simd::<f32, 16>::from_array(core::array::from_fn(|i| i as f32 * 0.75 - 5.0));
    let ints: Signed<f32, 16> = v.to_int();
    for i in 0..16 {
        assert_eq!(ints.extract(i), (i as f32 * 0.75 - 5.0) as i32);
    }

    let special = Simd::<f16, 4>::from_array([f16::NAN, f16::INFINITY, f16::NEG_INFINITY, f16::MAX]);
    assert_eq!(special.to_int().to_array(), [0, i16::MAX, i16::MIN, i16::MAX]);
}

#[test]
fn test_float_to_unsigned() {
    let v = Simd::<f64, 4>::from_array([-3.5, 3.5, f64::NAN, 1e30]);
    assert_eq!(v.to_unsigned().to_array(), [0, 3, 0, u64::MAX]);
}

#[test]
fn test_promote_is_exact() {
    let h = Simd::<f16, 16>::from_array(core::array::from_fn(|i| f16::from_f32(i as f32 / 8.0)));
    let f: Promoted<f16, 16> = h.promote();
    for i in 0..16 {
        assert_eq!(f.extract(i), i as f32 / 8.0);
    }

    let d = Simd::<f32, 8>::splat(f32::MIN_POSITIVE).promote();
    assert_eq!(d, Simd::<f64, 8>::splat(f32::MIN_POSITIVE as f64));
}

#[test]
fn test_degrade_rounds_and_overflows() {
    let v = Simd::<f32, 16>::from_array(core::array::from_fn(|i| 1.0 + i as f32 / 4096.0));
    let h = v.degrade();
    for i in 0..16 {
        assert_eq!(h.extract(i), f16::from_f32(1.0 + i as f32 / 4096.0));
    }

    let big = Simd::<f32, 2>::from_array([1e6, -1e6]).degrade();
    assert_eq!(big.to_array(), [f16::INFINITY, f16::NEG_INFINITY]);
}

#[test]
fn test_conversion_preserves_lane_count() {
    let v = Simd::<u32, 16>::splat(7);
    assert_eq!(Simd::<u32, 16>::LANES, 16);
    assert_eq!(v.to_signed().to_array().len(), 16);
    assert_eq!(v.to_float().to_array().len(), 16);
}
