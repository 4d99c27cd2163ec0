//! Scalar math primitives
//!
//! Per-element functions over one `f32` or `f64` value. They are the semantic
//! reference for every vector operation: the per-lane fallback applies them
//! lane by lane, and kernels use them directly for the tail samples that do not
//! fill a whole vector.
//!
//! Domain errors are not trapped. `sqrt(-1.0)` is NaN and `log(0.0)` is
//! negative infinity, exactly as `libm` reports them.
//!
//! # Example
//!
//! ```rust
//! use rigel_vecmath::scalar::{cube, sign, signed_pow};
//!
//! assert_eq!(sign(-3.0f32), -1.0);
//! assert_eq!(cube(-2.0f64), -8.0);
//! assert_eq!(signed_pow(-4.0f32, 0.5), -2.0);
//! ```

use crate::traits::Sample;

/// `-1` for negative input, `1` for positive, `0` for zero (either sign) and NaN
#[inline(always)]
pub fn sign<T: Sample>(x: T) -> T {
    if x > T::ZERO {
        T::ONE
    } else if x < T::ZERO {
        T::NEG_ONE
    } else {
        T::ZERO
    }
}

/// Absolute value
#[inline(always)]
pub fn abs<T: Sample>(x: T) -> T {
    x.fabs()
}

/// `x * x`
#[inline(always)]
pub fn square<T: Sample>(x: T) -> T {
    x * x
}

/// `x * x * x`, keeps the sign of `x`
#[inline(always)]
pub fn cube<T: Sample>(x: T) -> T {
    x * x * x
}

/// Square root
#[inline(always)]
pub fn sqrt<T: Sample>(x: T) -> T {
    x.sqrt()
}

/// `1 / x`
#[inline(always)]
pub fn reciprocal<T: Sample>(x: T) -> T {
    T::ONE / x
}

/// `1 / sqrt(x)`
#[inline(always)]
pub fn rsqrt<T: Sample>(x: T) -> T {
    T::ONE / x.sqrt()
}

/// `sign(x) * sqrt(|x|)`
///
/// Compresses a bipolar signal without rectifying it.
#[inline(always)]
pub fn signed_sqrt<T: Sample>(x: T) -> T {
    if x >= T::ZERO {
        x.sqrt()
    } else {
        -(-x).sqrt()
    }
}

/// `x` raised to `y`
#[inline(always)]
pub fn pow<T: Sample>(x: T, y: T) -> T {
    x.powf(y)
}

/// `sign(x) * |x|^y`
///
/// The exponent only shapes the magnitude, so negative half-waves stay negative.
/// A zero base has sign `0`, so silence stays silent for any exponent that
/// keeps `|x|^y` finite (`signed_pow(0, 0) == 0`).
#[inline(always)]
pub fn signed_pow<T: Sample>(x: T, y: T) -> T {
    sign(x) * x.fabs().powf(y)
}

/// Round toward negative infinity
#[inline(always)]
pub fn floor<T: Sample>(x: T) -> T {
    x.floor()
}

/// Round toward positive infinity
#[inline(always)]
pub fn ceil<T: Sample>(x: T) -> T {
    x.ceil()
}

/// Round to nearest, ties away from zero
#[inline(always)]
pub fn round<T: Sample>(x: T) -> T {
    x.round()
}

/// Fractional part `x - floor(x)`, in `[0, 1)` for finite input
#[inline(always)]
pub fn frac<T: Sample>(x: T) -> T {
    x - x.floor()
}

/// Natural exponential
#[inline(always)]
pub fn exp<T: Sample>(x: T) -> T {
    x.exp()
}

/// Natural logarithm
#[inline(always)]
pub fn log<T: Sample>(x: T) -> T {
    x.ln()
}

/// Base-2 logarithm
#[inline(always)]
pub fn log2<T: Sample>(x: T) -> T {
    x.log2()
}

/// Base-10 logarithm
#[inline(always)]
pub fn log10<T: Sample>(x: T) -> T {
    x.log10()
}

/// Sine
#[inline(always)]
pub fn sin<T: Sample>(x: T) -> T {
    x.sin()
}

/// Cosine
#[inline(always)]
pub fn cos<T: Sample>(x: T) -> T {
    x.cos()
}

/// Tangent
#[inline(always)]
pub fn tan<T: Sample>(x: T) -> T {
    x.tan()
}

/// Arcsine
#[inline(always)]
pub fn asin<T: Sample>(x: T) -> T {
    x.asin()
}

/// Arccosine
#[inline(always)]
pub fn acos<T: Sample>(x: T) -> T {
    x.acos()
}

/// Arctangent
#[inline(always)]
pub fn atan<T: Sample>(x: T) -> T {
    x.atan()
}

/// Hyperbolic tangent
#[inline(always)]
pub fn tanh<T: Sample>(x: T) -> T {
    x.tanh()
}

/// `a` unless `b` is smaller
///
/// Same operand order as `minps`: a NaN in either position yields `b`.
#[inline(always)]
pub fn min<T: Sample>(a: T, b: T) -> T {
    if a < b {
        a
    } else {
        b
    }
}

/// `a` unless `b` is larger
///
/// Same operand order as `maxps`: a NaN in either position yields `b`.
#[inline(always)]
pub fn max<T: Sample>(a: T, b: T) -> T {
    if a > b {
        a
    } else {
        b
    }
}

/// Clamp `x` into `[low, high]`
#[inline(always)]
pub fn clip<T: Sample>(x: T, low: T, high: T) -> T {
    max(min(x, high), low)
}

/// `x * mul + add`
#[inline(always)]
pub fn muladd<T: Sample>(x: T, mul: T, add: T) -> T {
    x * mul + add
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: [f32; 4] = [-2.0, 0.0, 0.0, 2.0];

    #[test]
    fn test_sign_boundaries() {
        assert_eq!(sign(-2.0f32), -1.0);
        assert_eq!(sign(0.0f32), 0.0);
        assert_eq!(sign(-0.0f32), 0.0);
        assert_eq!(sign(2.0f64), 1.0);
        assert_eq!(sign(f32::NAN), 0.0);
        assert_eq!(sign(f64::NEG_INFINITY), -1.0);
    }

    #[test]
    fn test_reference_block() {
        assert_eq!(BLOCK.map(sign), [-1.0, 0.0, 0.0, 1.0]);
        assert_eq!(BLOCK.map(abs), [2.0, 0.0, 0.0, 2.0]);
        assert_eq!(BLOCK.map(square), [4.0, 0.0, 0.0, 4.0]);
        assert_eq!(BLOCK.map(cube), [-8.0, 0.0, 0.0, 8.0]);
    }

    #[test]
    fn test_abs_symmetric() {
        for x in [0.25f64, 1.0, 3.5, 1e10, f64::MIN_POSITIVE] {
            assert_eq!(abs(x), abs(-x));
        }
    }

    #[test]
    fn test_signed_pow_keeps_sign() {
        assert!(libm::fabs(signed_pow(-8.0f64, 1.0 / 3.0) + 2.0) < 1e-12);
        assert!(libm::fabsf(signed_pow(9.0f32, 0.5) - 3.0) < 1e-6);
        assert_eq!(signed_pow(0.0f32, 2.0), 0.0);
        assert_eq!(signed_pow(-3.0f32, 2.0), -9.0);
    }

    #[test]
    fn test_signed_pow_zero_base() {
        assert_eq!(signed_pow(0.0f32, 0.0), 0.0);
        assert_eq!(signed_pow(-0.0f64, 0.0), 0.0);
        assert_eq!(signed_pow(0.0f64, 0.5), 0.0);
        assert!(signed_pow(0.0f32, -1.0).is_nan());
        assert!(signed_pow(f32::NAN, 2.0).is_nan());
    }

    #[test]
    fn test_signed_sqrt() {
        assert_eq!(signed_sqrt(-16.0f32), -4.0);
        assert_eq!(signed_sqrt(16.0f64), 4.0);
        assert_eq!(signed_sqrt(0.0f32), 0.0);
        assert!(signed_sqrt(f32::NAN).is_nan());
    }

    #[test]
    fn test_domain_errors_propagate() {
        assert!(sqrt(-1.0f32).is_nan());
        assert_eq!(log(0.0f64), f64::NEG_INFINITY);
        assert!(log(-1.0f32).is_nan());
        assert_eq!(reciprocal(0.0f32), f32::INFINITY);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(floor(-1.5f32), -2.0);
        assert_eq!(ceil(-1.5f32), -1.0);
        assert_eq!(round(0.5f64), 1.0);
        assert_eq!(round(-0.5f64), -1.0);
        assert_eq!(frac(2.75f32), 0.75);
        assert_eq!(frac(-0.25f32), 0.75);
    }

    #[test]
    fn test_min_max_clip() {
        assert_eq!(min(1.0f32, 2.0), 1.0);
        assert_eq!(max(1.0f32, 2.0), 2.0);
        assert_eq!(clip(5.0f64, -1.0, 1.0), 1.0);
        assert_eq!(clip(-5.0f64, -1.0, 1.0), -1.0);
        assert_eq!(clip(0.5f32, -1.0, 1.0), 0.5);
        assert_eq!(min(f32::NAN, 1.0), 1.0);
    }

    #[test]
    fn test_muladd() {
        assert_eq!(muladd(2.0f32, 3.0, 1.0), 7.0);
    }
}
