//! Reference value tests
//!
//! Deterministic expected values at boundary inputs (zero and symmetric
//! positive/negative pairs), checked through every layer: scalar primitives,
//! vector methods and the buffer functions, for both lane types.

use rigel_vecmath::functions::{abs_vec, cube_vec, sign_vec, square_vec};
use rigel_vecmath::{scalar, DefaultSimdVector, Sample, SimdSample, SimdVector};

use test_utils::*;

const SIGN: [f32; 4] = [-1.0, 0.0, 0.0, 1.0];
const ABS: [f32; 4] = [2.0, 0.0, 0.0, 2.0];
const SQUARE: [f32; 4] = [4.0, 0.0, 0.0, 4.0];
const CUBE: [f32; 4] = [-8.0, 0.0, 0.0, 8.0];

fn expected<T: Sample>(pattern: [f32; 4]) -> Vec<T> {
    pattern
        .iter()
        .cycle()
        .take(REFERENCE_SIZE)
        .map(|x| T::from_f64(*x as f64))
        .collect()
}

fn check_buffers<T: SimdSample>() {
    let input = reference_buffer::<T>();
    let mut output = vec![T::ZERO; REFERENCE_SIZE];

    sign_vec(&mut output, &input[..]);
    assert_eq!(output, expected::<T>(SIGN), "sign_vec");

    abs_vec(&mut output, &input[..]);
    assert_eq!(output, expected::<T>(ABS), "abs_vec");

    square_vec(&mut output, &input[..]);
    assert_eq!(output, expected::<T>(SQUARE), "square_vec");

    cube_vec(&mut output, &input[..]);
    assert_eq!(output, expected::<T>(CUBE), "cube_vec");
}

fn check_vectors<T: SimdSample>() {
    let input = reference_buffer::<T>();
    let lanes = <T::Vector as SimdVector>::LANES;

    for (i, chunk) in input.chunks_exact(lanes).enumerate() {
        let v = T::Vector::from_slice(chunk);
        let start = i * lanes;
        assert_eq!(lanes_of(v.sign()), expected::<T>(SIGN)[start..start + lanes]);
        assert_eq!(lanes_of(v.abs()), expected::<T>(ABS)[start..start + lanes]);
        assert_eq!(lanes_of(v.square()), expected::<T>(SQUARE)[start..start + lanes]);
        assert_eq!(lanes_of(v.cube()), expected::<T>(CUBE)[start..start + lanes]);
    }
}

#[test]
fn test_scalar_primitives_on_reference_block() {
    for (i, x) in REFERENCE_BLOCK.iter().enumerate() {
        assert_eq!(scalar::sign(*x), SIGN[i]);
        assert_eq!(scalar::abs(*x), ABS[i]);
        assert_eq!(scalar::square(*x), SQUARE[i]);
        assert_eq!(scalar::cube(*x), CUBE[i]);
    }
}

#[test]
fn test_buffer_functions_f32() {
    check_buffers::<f32>();
}

#[test]
fn test_buffer_functions_f64() {
    check_buffers::<f64>();
}

#[test]
fn test_vector_methods_f32() {
    check_vectors::<f32>();
}

#[test]
fn test_vector_methods_f64() {
    check_vectors::<f64>();
}

#[test]
fn test_sign_of_negative_zero_is_zero() {
    let v = DefaultSimdVector::<f32>::splat(-0.0);
    let sign = v.sign();
    for lane in 0..DefaultSimdVector::<f32>::LANES {
        assert_eq!(sign.get(lane).to_bits(), 0.0f32.to_bits());
    }
}

#[test]
fn test_domain_errors_propagate_through_vectors() {
    type V = DefaultSimdVector<f64>;
    let negative = V::splat(-1.0);
    let zero = V::zero();

    assert!(lanes_of(negative.sqrt()).iter().all(|x| x.is_nan()));
    assert!(lanes_of(negative.log()).iter().all(|x| x.is_nan()));
    assert!(lanes_of(zero.log()).iter().all(|x| *x == f64::NEG_INFINITY));
    assert!(lanes_of(zero.reciprocal()).iter().all(|x| *x == f64::INFINITY));
    assert!(lanes_of(V::splat(2.0).asin()).iter().all(|x| x.is_nan()));
}

#[test]
fn test_zero_and_infinity_through_estimates() {
    type V = DefaultSimdVector<f32>;

    assert!(lanes_of(V::zero().reciprocal()).iter().all(|x| *x == f32::INFINITY));
    assert!(lanes_of(V::zero().rsqrt()).iter().all(|x| *x == f32::INFINITY));
    assert!(lanes_of(V::splat(f32::INFINITY).reciprocal()).iter().all(|x| *x == 0.0));
    assert!(lanes_of(V::splat(f32::INFINITY).rsqrt()).iter().all(|x| *x == 0.0));
    assert!(lanes_of(V::splat(-4.0).rsqrt()).iter().all(|x| x.is_nan()));
}
