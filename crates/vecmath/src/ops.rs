//! Operation descriptors for the kernel generator
//!
//! Each operation is a zero-sized type carrying both forms of the same
//! computation: `vector` for whole blocks and `scalar` for the tail samples.
//! Kernels are generic over the descriptor, so every operation is
//! monomorphized into its own loop with no indirect calls.
//!
//! Most descriptors are generated from the matching [`SimdVector`] method and
//! [`crate::scalar`] primitive of the same name.

use crate::scalar;
use crate::traits::{Sample, SimdVector};

/// Operation with one operand
pub trait UnaryOp: Copy {
    /// Apply to one sample
    fn scalar<T: Sample>(self, x: T) -> T;

    /// Apply to one vector
    fn vector<V: SimdVector>(self, x: V) -> V;
}

/// Operation with two operands
pub trait BinaryOp: Copy {
    /// Apply to one sample
    fn scalar<T: Sample>(self, a: T, b: T) -> T;

    /// Apply to one vector
    fn vector<V: SimdVector>(self, a: V, b: V) -> V;
}

/// Operation with three operands
pub trait TernaryOp: Copy {
    /// Apply to one sample
    fn scalar<T: Sample>(self, a: T, b: T, c: T) -> T;

    /// Apply to one vector
    fn vector<V: SimdVector>(self, a: V, b: V, c: V) -> V;
}

macro_rules! unary_ops {
    ($($(#[$meta:meta])* $name:ident => $method:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
            pub struct $name;

            impl UnaryOp for $name {
                #[inline(always)]
                fn scalar<T: Sample>(self, x: T) -> T {
                    scalar::$method(x)
                }

                #[inline(always)]
                fn vector<V: SimdVector>(self, x: V) -> V {
                    x.$method()
                }
            }
        )*
    };
}

macro_rules! binary_ops {
    ($($(#[$meta:meta])* $name:ident => |$a:ident, $b:ident| $scalar:expr, $vector:expr;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
            pub struct $name;

            impl BinaryOp for $name {
                #[inline(always)]
                fn scalar<T: Sample>(self, $a: T, $b: T) -> T {
                    $scalar
                }

                #[inline(always)]
                fn vector<V: SimdVector>(self, $a: V, $b: V) -> V {
                    $vector
                }
            }
        )*
    };
}

unary_ops! {
    /// `-1`, `0` or `1`
    Sign => sign,
    /// Absolute value
    Abs => abs,
    /// `x * x`
    Square => square,
    /// `x * x * x`
    Cube => cube,
    /// Square root
    Sqrt => sqrt,
    /// `1 / sqrt(x)`
    Rsqrt => rsqrt,
    /// `1 / x`
    Reciprocal => reciprocal,
    /// `sign(x) * sqrt(|x|)`
    SignedSqrt => signed_sqrt,
    /// Round toward negative infinity
    Floor => floor,
    /// Round toward positive infinity
    Ceil => ceil,
    /// Round to nearest, ties away from zero
    Round => round,
    /// `x - floor(x)`
    Frac => frac,
    /// Natural exponential
    Exp => exp,
    /// Natural logarithm
    Log => log,
    /// Base-2 logarithm
    Log2 => log2,
    /// Base-10 logarithm
    Log10 => log10,
    /// Sine
    Sin => sin,
    /// Cosine
    Cos => cos,
    /// Tangent
    Tan => tan,
    /// Arcsine
    Asin => asin,
    /// Arccosine
    Acos => acos,
    /// Arctangent
    Atan => atan,
    /// Hyperbolic tangent
    Tanh => tanh,
}

/// Passes the operand through unchanged (buffer fills and copies)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Identity;

impl UnaryOp for Identity {
    #[inline(always)]
    fn scalar<T: Sample>(self, x: T) -> T {
        x
    }

    #[inline(always)]
    fn vector<V: SimdVector>(self, x: V) -> V {
        x
    }
}

/// `-x`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Negate;

impl UnaryOp for Negate {
    #[inline(always)]
    fn scalar<T: Sample>(self, x: T) -> T {
        -x
    }

    #[inline(always)]
    fn vector<V: SimdVector>(self, x: V) -> V {
        -x
    }
}

binary_ops! {
    /// `a + b`
    Plus => |a, b| a + b, a + b;
    /// `a - b`
    Minus => |a, b| a - b, a - b;
    /// `a * b`
    Times => |a, b| a * b, a * b;
    /// `a / b`
    Over => |a, b| a / b, a / b;
    /// Smaller of the two (`a` unless `b` is smaller)
    Min => |a, b| scalar::min(a, b), a.min(b);
    /// Larger of the two (`a` unless `b` is larger)
    Max => |a, b| scalar::max(a, b), a.max(b);
    /// `a` raised to `b`
    Pow => |a, b| scalar::pow(a, b), a.pow(b);
    /// `sign(a) * |a|^b`
    SignedPow => |a, b| scalar::signed_pow(a, b), a.signed_pow(b);
}

/// `a * b + c`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MulAdd;

impl TernaryOp for MulAdd {
    #[inline(always)]
    fn scalar<T: Sample>(self, a: T, b: T, c: T) -> T {
        scalar::muladd(a, b, c)
    }

    #[inline(always)]
    fn vector<V: SimdVector>(self, a: V, b: V, c: V) -> V {
        a.muladd(b, c)
    }
}

/// `a` clamped into `[b, c]`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Clip;

impl TernaryOp for Clip {
    #[inline(always)]
    fn scalar<T: Sample>(self, a: T, b: T, c: T) -> T {
        scalar::clip(a, b, c)
    }

    #[inline(always)]
    fn vector<V: SimdVector>(self, a: V, b: V, c: V) -> V {
        a.clip(b, c)
    }
}
