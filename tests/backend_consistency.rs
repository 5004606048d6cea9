//! Backend consistency tests
//!
//! Validates that the active backend (scalar, AVX2 or NEON, chosen by cargo feature) produces
//! bit-identical results to the portable scalar arrays, reductions included.

use rigel_lanes::{
    Arithmetic, BitwiseLogic, Comparable, DefaultSimdVector, HorizontalReduce, ScalarVector,
    Simd, SimdMask, SimdVector, Vector, NATIVE_F32_LANES,
};

type Reference = ScalarVector<f32, NATIVE_F32_LANES>;

fn lanes(v: DefaultSimdVector) -> [f32; NATIVE_F32_LANES] {
    let mut out = [0.0; NATIVE_F32_LANES];
    v.to_slice(&mut out);
    out
}

fn bits(lanes: [f32; NATIVE_F32_LANES]) -> [u32; NATIVE_F32_LANES] {
    lanes.map(f32::to_bits)
}

const VALUES: [f32; 16] = [
    2.0, -3.5, 0.0, -0.0, 1.0e8, 1.0, -1.0e8, 0.25, 100.0, 0.01, -7.0, 3.0, 1.0e-3, 5.5, -2.0, 9.0,
];

fn operands(offset: usize) -> (DefaultSimdVector, Reference) {
    let values: [f32; NATIVE_F32_LANES] = core::array::from_fn(|i| VALUES[(i + offset) % 16]);
    (DefaultSimdVector::from_slice(&values), ScalarVector(values))
}

#[test]
fn test_backend_arithmetic_consistency() {
    for offset in 0..16 {
        let (a, ra) = operands(offset);
        let (b, rb) = operands(offset + 5);

        assert_eq!(bits(lanes(a.add(b))), bits(ra.add(rb).0), "add at offset {}", offset);
        assert_eq!(bits(lanes(a.sub(b))), bits(ra.sub(rb).0), "sub at offset {}", offset);
        assert_eq!(bits(lanes(a.mul(b))), bits(ra.mul(rb).0), "mul at offset {}", offset);
        assert_eq!(bits(lanes(a.div(b))), bits(ra.div(rb).0), "div at offset {}", offset);
        assert_eq!(bits(lanes(a.min(b))), bits(ra.min(rb).0), "min at offset {}", offset);
        assert_eq!(bits(lanes(a.max(b))), bits(ra.max(rb).0), "max at offset {}", offset);
        assert_eq!(bits(lanes(a.bxor(b))), bits(ra.bxor(rb).0), "bxor at offset {}", offset);
    }
}

#[test]
fn test_backend_comparison_consistency() {
    let nan = DefaultSimdVector::splat(f32::NAN);
    let rnan = Reference::splat(f32::NAN);

    for offset in 0..16 {
        let (a, ra) = operands(offset);
        let (b, rb) = operands(offset + 3);

        assert_eq!(a.cmplt(b).to_bitmask(), ra.cmplt(rb).to_bitmask());
        assert_eq!(a.cmple(b).to_bitmask(), ra.cmple(rb).to_bitmask());
        assert_eq!(a.cmpgt(b).to_bitmask(), ra.cmpgt(rb).to_bitmask());
        assert_eq!(a.cmpge(b).to_bitmask(), ra.cmpge(rb).to_bitmask());
        assert_eq!(a.cmpeq(b).to_bitmask(), ra.cmpeq(rb).to_bitmask());
        assert_eq!(a.cmpne(nan).to_bitmask(), ra.cmpne(rnan).to_bitmask());
        assert!(a.cmpeq(nan).none());
    }
}

#[test]
fn test_backend_nan_min_max_consistency() {
    let (a, ra) = operands(0);
    let nan = DefaultSimdVector::splat(f32::NAN);
    let rnan = Reference::splat(f32::NAN);

    // A single NaN operand is ignored in either position
    assert_eq!(bits(lanes(a.min(nan))), bits(ra.min(rnan).0));
    assert_eq!(bits(lanes(nan.min(a))), bits(rnan.min(ra).0));
    assert_eq!(bits(lanes(a.max(nan))), bits(ra.max(rnan).0));
    assert_eq!(bits(lanes(nan.max(a))), bits(rnan.max(ra).0));
}

#[test]
fn test_backend_reduction_consistency() {
    for offset in 0..16 {
        let (a, ra) = operands(offset);
        assert_eq!(a.hadd().to_bits(), ra.hadd().to_bits(), "hadd at offset {}", offset);
        assert_eq!(a.hmul().to_bits(), ra.hmul().to_bits(), "hmul at offset {}", offset);
        assert_eq!(a.hmin().to_bits(), ra.hmin().to_bits(), "hmin at offset {}", offset);
        assert_eq!(a.hmax().to_bits(), ra.hmax().to_bits(), "hmax at offset {}", offset);
    }
}

#[test]
fn test_backend_mask_consistency() {
    let (a, ra) = operands(2);
    let (b, rb) = operands(9);
    let m = a.cmplt(b);
    let rm = ra.cmplt(rb);

    assert_eq!(m.not().to_bitmask(), rm.not().to_bitmask());
    assert_eq!(m.any(), rm.any());
    assert_eq!(m.all(), rm.all());
    assert_eq!(
        bits(lanes(a.add_masked(m, b))),
        bits(ra.add_masked(rm, rb).0),
        "masked add"
    );
    assert_eq!(
        bits(lanes(DefaultSimdVector::select(m, a, b))),
        bits(Reference::select(rm, ra, rb).0),
        "select"
    );
}

#[test]
fn test_integer_backend_consistency() {
    let a = Simd::<i32, 8>::from_array([i32::MAX, -7, 12, 0, i32::MIN, 3, -1, 100]);
    let b = Simd::<i32, 8>::from_array([1, 2, -3, 4, -1, 6, 7, -8]);
    let (ra, rb) = (ScalarVector(a.to_array()), ScalarVector(b.to_array()));

    assert_eq!(a.add(b).to_array(), ra.add(rb).0);
    assert_eq!(a.mul(b).to_array(), ra.mul(rb).0);
    assert_eq!(a.div(b).to_array(), ra.div(rb).0);
    assert_eq!(a.min(b).to_array(), ra.min(rb).0);
    assert_eq!(a.bnot().to_array(), ra.bnot().0);
    assert_eq!(a.cmpgt(b).to_bitmask(), ra.cmpgt(rb).to_bitmask());
    assert_eq!(a.hadd(), ra.hadd());
    assert_eq!(a.hbxor(), ra.hbxor());

    let native: Vector<i32, 8> = a.into_vector();
    assert_eq!(Simd::<i32, 8>::from_vector(native), a);
}

#[test]
fn test_backend_signed_zero_ties_consistency() {
    let zeros: [f32; NATIVE_F32_LANES] =
        core::array::from_fn(|i| if i % 2 == 0 { 0.0 } else { -0.0 });
    let flipped = zeros.map(|x| -x);
    let (a, ra) = (DefaultSimdVector::from_slice(&zeros), ScalarVector(zeros));
    let (b, rb) = (DefaultSimdVector::from_slice(&flipped), ScalarVector(flipped));

    // (+0, -0) and (-0, +0) both keep the left operand
    assert_eq!(bits(lanes(a.min(b))), bits(ra.min(rb).0), "min (+0, -0)");
    assert_eq!(bits(lanes(a.max(b))), bits(ra.max(rb).0), "max (+0, -0)");
    assert_eq!(bits(lanes(b.min(a))), bits(rb.min(ra).0), "min (-0, +0)");
    assert_eq!(bits(lanes(b.max(a))), bits(rb.max(ra).0), "max (-0, +0)");
    assert_eq!(bits(lanes(a.max(b))), bits(zeros), "max keeps self");
    assert_eq!(bits(lanes(b.min(a))), bits(flipped), "min keeps self");
    assert_eq!(a.hmax().to_bits(), ra.hmax().to_bits());
    assert_eq!(b.hmin().to_bits(), rb.hmin().to_bits());
}

#[test]
fn test_native_width_matches_composed_halves() {
    let lhs = [0.0, -0.0, 1.0, f32::NAN, -3.5, 0.0, 7.0, -0.0];
    let rhs = [-0.0, 0.0, 1.0, 2.0, f32::NAN, 0.0, -7.0, -0.0];
    let a = Simd::<f32, 8>::from_array(lhs);
    let b = Simd::<f32, 8>::from_array(rhs);
    let (a_lo, a_hi) = a.unpack();
    let (b_lo, b_hi) = b.unpack();

    let whole = [a.min(b), a.max(b), a.add(b), a.mul(b)];
    let halves = [
        Simd::<f32, 8>::pack(a_lo.min(b_lo), a_hi.min(b_hi)),
        Simd::<f32, 8>::pack(a_lo.max(b_lo), a_hi.max(b_hi)),
        Simd::<f32, 8>::pack(a_lo.add(b_lo), a_hi.add(b_hi)),
        Simd::<f32, 8>::pack(a_lo.mul(b_lo), a_hi.mul(b_hi)),
    ];
    for (op, (w, h)) in ["min", "max", "add", "mul"].iter().zip(whole.iter().zip(halves)) {
        assert_eq!(
            w.to_array().map(f32::to_bits),
            h.to_array().map(f32::to_bits),
            "{} at the native width",
            op
        );
    }
    assert_eq!(a.cmplt(b).to_bitmask(), b.cmpgt(a).to_bitmask());
}
