//! Property-based tests for rigel-vecmath
//!
//! Uses proptest to check the numeric invariants of the primitives and their
//! vector forms on the selected backend, and the sample-count guarantees of
//! the kernel generator for arbitrary buffer lengths.

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use rigel_vecmath::functions::{cube_vec, plus_vec, signed_pow_vec, signed_sqrt_vec};
use rigel_vecmath::{scalar, DefaultSimdVector, SimdVector};

use test_utils::*;

type V = DefaultSimdVector<f32>;

fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 2_000,
        ..ProptestConfig::default()
    }
}

/// Property: sign is -1, 0 or 1 according to the sign of x, in every lane
#[test]
fn test_sign_matches_comparison() {
    proptest!(proptest_config(), |(x in normal_f32())| {
        let expected = if x > 0.0 { 1.0 } else if x < 0.0 { -1.0 } else { 0.0 };
        prop_assert_eq!(scalar::sign(x), expected);

        let lanes = lanes_of(V::splat(x).sign());
        for lane in lanes {
            prop_assert_eq!(lane, expected);
        }
    });
}

/// Property: abs(x) == abs(-x) for finite x
#[test]
fn test_abs_symmetric() {
    proptest!(proptest_config(), |(x in normal_f32())| {
        prop_assert_eq!(scalar::abs(x), scalar::abs(-x));
        prop_assert_eq!(V::splat(x).abs().get(0), V::splat(-x).abs().get(0));
    });
}

/// Property: square(x) == x * x and cube(x) == x * x * x, with the sign of x
#[test]
fn test_square_and_cube() {
    proptest!(proptest_config(), |(x in normal_f32())| {
        prop_assert_eq!(scalar::square(x), x * x);
        prop_assert_eq!(scalar::cube(x), x * x * x);
        prop_assert_eq!(V::splat(x).cube().get(0), x * x * x);
        if x != 0.0 {
            prop_assert_eq!(scalar::cube(x) < 0.0, x < 0.0);
        }
    });
}

/// Property: sign(signed_pow(x, y)) == sign(x) and |signed_pow(x, y)| == |x|^y
#[test]
fn test_signed_pow_keeps_sign() {
    proptest!(proptest_config(), |((x, y) in (nonzero_signal_f32(), exponent_f32()))| {
        let result = scalar::signed_pow(x, y);
        let magnitude = libm::powf(libm::fabsf(x), y);

        prop_assert_eq!(scalar::sign(result), scalar::sign(x),
            "sign flipped: signed_pow({}, {}) = {}", x, y, result);
        prop_assert_eq!(libm::fabsf(result), magnitude);

        let vector = V::splat(x).signed_pow(V::splat(y));
        for lane in lanes_of(vector) {
            prop_assert_eq!(lane, result);
        }
    });
}

/// Property: a zero base gives zero for every non-negative exponent, so a
/// silent buffer stays silent
#[test]
fn test_signed_pow_of_silence_is_silence() {
    proptest!(proptest_config(), |((len, y, negative_zero) in (0usize..40, 0.0f32..4.0f32, any::<bool>()))| {
        let zero = if negative_zero { -0.0f32 } else { 0.0f32 };
        prop_assert_eq!(scalar::signed_pow(zero, y), 0.0);
        prop_assert_eq!(scalar::signed_pow(zero, 0.0), 0.0);

        let silence = vec![zero; len];
        let mut output = vec![f32::NAN; len];
        signed_pow_vec(&mut output, &silence[..], y);
        prop_assert!(output.iter().all(|s| *s == 0.0), "signed_pow_vec(silence, {}) = {:?}", y, output);

        signed_pow_vec(&mut output, &silence[..], 0.0f32);
        prop_assert!(output.iter().all(|s| *s == 0.0), "signed_pow_vec(silence, 0) = {:?}", output);
    });
}

/// Property: signed_sqrt(x)^2 recovers |x| with the sign of x
#[test]
fn test_signed_sqrt_inverts_signed_square() {
    proptest!(proptest_config(), |(x in normal_f32())| {
        let root = scalar::signed_sqrt(x);
        let back = root * libm::fabsf(root);
        assert_close(back, x, 1e-5, "signed_sqrt round trip");
    });
}

/// Property: clip output stays inside [low, high]
#[test]
fn test_clip_bounds() {
    proptest!(proptest_config(), |((x, a, b) in (normal_f32(), normal_f32(), normal_f32()))| {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let clipped = V::splat(x).clip(V::splat(low), V::splat(high)).get(0);
        prop_assert!(clipped >= low && clipped <= high);
        prop_assert_eq!(clipped, scalar::clip(x, low, high));
    });
}

/// Property: every sample of an arbitrary-length buffer is written once, from
/// the matching input sample
#[test]
fn test_kernel_covers_arbitrary_lengths() {
    proptest!(proptest_config(), |(input in signal_buffer())| {
        let mut output = vec![f32::NAN; input.len()];
        cube_vec(&mut output, &input[..]);
        for (x, y) in input.iter().zip(&output) {
            prop_assert_eq!(*y, x * x * x);
        }

        signed_sqrt_vec(&mut output, &input[..]);
        for (x, y) in input.iter().zip(&output) {
            prop_assert_eq!(*y, scalar::signed_sqrt(*x));
        }
    });
}

/// Property: a ramp operand produces start + i * slope at every sample index,
/// whether the sample fell in a block or in the tail
#[test]
fn test_ramp_operand_tracks_index() {
    proptest!(proptest_config(), |(len in 0usize..100, start in signal_f32(), slope in -0.01f32..0.01f32)| {
        let zeros = vec![0.0f32; len];
        let mut output = vec![0.0f32; len];
        plus_vec(&mut output, &zeros[..], (start, slope));
        for (i, y) in output.iter().enumerate() {
            assert_close(*y, start + slope * i as f32, 1e-5, "ramp operand");
        }
    });
}

/// Property: the buffer form of signed_pow matches the scalar primitive
#[test]
fn test_signed_pow_buffer_matches_scalar() {
    proptest!(proptest_config(), |((input, y) in (signal_buffer(), exponent_f32()))| {
        let mut output = vec![0.0f32; input.len()];
        signed_pow_vec(&mut output, &input[..], y);
        for (x, out) in input.iter().zip(&output) {
            prop_assert_eq!(*out, scalar::signed_pow(*x, y));
        }
    });
}

/// Property: the refined reciprocal stays within 1e-6 relative error
#[test]
fn test_reciprocal_relative_error() {
    proptest!(proptest_config(), |(x in positive_f32())| {
        let exact = 1.0f64 / x as f64;
        let approx = V::splat(x).reciprocal().get(0) as f64;
        prop_assert!(((approx - exact) / exact).abs() < 1e-6,
            "reciprocal({}) = {} (exact {})", x, approx, exact);

        let exact = 1.0f64 / (x as f64).sqrt();
        let approx = V::splat(x).rsqrt().get(0) as f64;
        prop_assert!(((approx - exact) / exact).abs() < 1e-6,
            "rsqrt({}) = {} (exact {})", x, approx, exact);
    });
}
