//! Named elementwise functions over the default backend
//!
//! Each function fills `out` (whose length is the sample count) from wrapped
//! arguments, using [`DefaultSimdVector`](crate::DefaultSimdVector) for the
//! lane type. Any operand accepts whatever [`IntoArgument`] accepts: a scalar
//! constant, a slice, a `(start, slope)` ramp, or a wrapper.
//!
//! # Example
//!
//! ```rust
//! use rigel_vecmath::functions::{cube_vec, plus_vec, sign_vec};
//!
//! let input = [-2.0f32, 0.0, 0.0, 2.0];
//! let mut out = [0.0f32; 4];
//!
//! sign_vec(&mut out, &input[..]);
//! assert_eq!(out, [-1.0, 0.0, 0.0, 1.0]);
//!
//! cube_vec(&mut out, &input[..]);
//! assert_eq!(out, [-8.0, 0.0, 0.0, 8.0]);
//!
//! plus_vec(&mut out, &input[..], 1.0f32);
//! assert_eq!(out, [-1.0, 1.0, 1.0, 3.0]);
//! ```

use crate::args::{Argument, Constant, ExpRamp, IntoArgument, Ramp};
use crate::backends::SimdSample;
use crate::kernel::{map_binary, map_ternary, map_unary};
use crate::ops;

macro_rules! unary_functions {
    ($($(#[$meta:meta])* $name:ident => $op:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $name<T: SimdSample>(out: &mut [T], input: impl IntoArgument<T>) {
                map_unary::<T::Vector, _, _>(out, input.into_argument(), ops::$op);
            }
        )*
    };
}

macro_rules! binary_functions {
    ($($(#[$meta:meta])* $name:ident => $op:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $name<T: SimdSample>(
                out: &mut [T],
                a: impl IntoArgument<T>,
                b: impl IntoArgument<T>,
            ) {
                map_binary::<T::Vector, _, _, _>(
                    out,
                    a.into_argument(),
                    b.into_argument(),
                    ops::$op,
                );
            }
        )*
    };
}

unary_functions! {
    /// `out[i] = sign(input[i])`
    sign_vec => Sign,
    /// `out[i] = |input[i]|`
    abs_vec => Abs,
    /// `out[i] = input[i]^2`
    square_vec => Square,
    /// `out[i] = input[i]^3`
    cube_vec => Cube,
    /// `out[i] = sqrt(input[i])`
    sqrt_vec => Sqrt,
    /// `out[i] = 1 / sqrt(input[i])`
    rsqrt_vec => Rsqrt,
    /// `out[i] = 1 / input[i]`
    reciprocal_vec => Reciprocal,
    /// `out[i] = sign(input[i]) * sqrt(|input[i]|)`
    signed_sqrt_vec => SignedSqrt,
    /// `out[i] = floor(input[i])`
    floor_vec => Floor,
    /// `out[i] = ceil(input[i])`
    ceil_vec => Ceil,
    /// `out[i] = round(input[i])`, ties away from zero
    round_vec => Round,
    /// `out[i] = input[i] - floor(input[i])`
    frac_vec => Frac,
    /// `out[i] = e^input[i]`
    exp_vec => Exp,
    /// `out[i] = ln(input[i])`
    log_vec => Log,
    /// `out[i] = log2(input[i])`
    log2_vec => Log2,
    /// `out[i] = log10(input[i])`
    log10_vec => Log10,
    /// `out[i] = sin(input[i])`
    sin_vec => Sin,
    /// `out[i] = cos(input[i])`
    cos_vec => Cos,
    /// `out[i] = tan(input[i])`
    tan_vec => Tan,
    /// `out[i] = asin(input[i])`
    asin_vec => Asin,
    /// `out[i] = acos(input[i])`
    acos_vec => Acos,
    /// `out[i] = atan(input[i])`
    atan_vec => Atan,
    /// `out[i] = tanh(input[i])`
    tanh_vec => Tanh,
    /// `out[i] = -input[i]`
    negate_vec => Negate,
    /// `out[i] = input[i]`
    copy_vec => Identity,
}

binary_functions! {
    /// `out[i] = a[i] + b[i]`
    plus_vec => Plus,
    /// `out[i] = a[i] - b[i]`
    minus_vec => Minus,
    /// `out[i] = a[i] * b[i]`
    times_vec => Times,
    /// `out[i] = a[i] / b[i]`
    over_vec => Over,
    /// `out[i] = min(a[i], b[i])`
    min_vec => Min,
    /// `out[i] = max(a[i], b[i])`
    max_vec => Max,
    /// `out[i] = a[i]^b[i]`
    pow_vec => Pow,
    /// `out[i] = sign(a[i]) * |a[i]|^b[i]`
    signed_pow_vec => SignedPow,
}

/// `out[i] = x[i] * mul[i] + add[i]`
#[inline]
pub fn muladd_vec<T: SimdSample>(
    out: &mut [T],
    x: impl IntoArgument<T>,
    mul: impl IntoArgument<T>,
    add: impl IntoArgument<T>,
) {
    map_ternary::<T::Vector, _, _, _, _>(
        out,
        x.into_argument(),
        mul.into_argument(),
        add.into_argument(),
        ops::MulAdd,
    );
}

/// `out[i] = x[i]` clamped into `[low[i], high[i]]`
#[inline]
pub fn clip_vec<T: SimdSample>(
    out: &mut [T],
    x: impl IntoArgument<T>,
    low: impl IntoArgument<T>,
    high: impl IntoArgument<T>,
) {
    map_ternary::<T::Vector, _, _, _, _>(
        out,
        x.into_argument(),
        low.into_argument(),
        high.into_argument(),
        ops::Clip,
    );
}

/// Fill `out` with `value`
#[inline]
pub fn set_vec<T: SimdSample>(out: &mut [T], value: T) {
    map_unary::<T::Vector, _, _>(out, Constant::new(value), ops::Identity);
}

/// Fill `out` with zeros
#[inline]
pub fn zero_vec<T: SimdSample>(out: &mut [T]) {
    set_vec(out, T::ZERO);
}

/// Fill `out` with the linear ramp `start + i * slope`
///
/// Returns the value for the sample after the last one written, so
/// consecutive calls produce one continuous ramp.
///
/// # Example
///
/// ```rust
/// use rigel_vecmath::functions::set_slope_vec;
///
/// let mut first = [0.0f32; 6];
/// let mut second = [0.0f32; 3];
/// let next = set_slope_vec(&mut first, 0.0, 1.0);
/// set_slope_vec(&mut second, next, 1.0);
/// assert_eq!(first, [0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert_eq!(second, [6.0, 7.0, 8.0]);
/// ```
#[inline]
pub fn set_slope_vec<T: SimdSample>(out: &mut [T], start: T, slope: T) -> T {
    let mut ramp = Ramp::new(start, slope);
    map_unary::<T::Vector, _, _>(out, &mut ramp, ops::Identity);
    ramp.get()
}

/// Fill `out` with the geometric ramp `start * curve^i`
///
/// Returns the value for the sample after the last one written.
#[inline]
pub fn set_exp_vec<T: SimdSample>(out: &mut [T], start: T, curve: T) -> T {
    let mut ramp = ExpRamp::new(start, curve);
    map_unary::<T::Vector, _, _>(out, &mut ramp, ops::Identity);
    ramp.get()
}
