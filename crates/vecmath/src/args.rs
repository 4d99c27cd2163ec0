//! Argument wrappers for elementwise kernels
//!
//! Every operand of a kernel is one of a small closed set of argument kinds:
//!
//! - [`Constant`]: one value for every sample
//! - [`Stream`]: one value per sample, read from a borrowed buffer
//! - [`Ramp`]: a linear ramp, `data += slope` per sample
//! - [`ExpRamp`]: a geometric ramp, `data *= curve` per sample
//!
//! All of them implement [`Argument`]: read the current value, advance one
//! sample. A kernel calls `increment` exactly once per produced output sample
//! (or `load_block` once per vector block), in sample order. There is no way
//! to resynchronize a wrapper that was advanced too often or too rarely.
//!
//! [`wrap_arg`] picks the wrapper from the shape of the call-site value: a bare
//! scalar is a constant, a slice is a stream and a `(start, slope)` pair is a
//! ramp.
//!
//! # Example
//!
//! ```rust
//! use rigel_vecmath::args::{wrap_arg, Argument};
//!
//! let mut ramp = wrap_arg::<f32, _>((1.0, 0.5));
//! assert_eq!(ramp.get(), 1.0);
//! ramp.increment();
//! ramp.increment();
//! assert_eq!(ramp.get(), 2.0);
//! ```

use crate::traits::{Sample, SimdVector};

/// One operand stream of a kernel invocation
pub trait Argument<T: Sample> {
    /// Current value, without side effects
    fn get(&self) -> T;

    /// Advance by exactly one sample
    fn increment(&mut self);

    /// Read the next `V::LANES` values as one vector and advance that many samples
    ///
    /// The default gathers lane by lane through `get`/`increment`.
    #[inline(always)]
    fn load_block<V: SimdVector<Scalar = T>>(&mut self) -> V {
        let mut block = V::zero();
        for i in 0..V::LANES {
            block.set(i, self.get());
            self.increment();
        }
        block
    }
}

impl<T: Sample, A: Argument<T>> Argument<T> for &mut A {
    #[inline(always)]
    fn get(&self) -> T {
        (**self).get()
    }

    #[inline(always)]
    fn increment(&mut self) {
        (**self).increment()
    }

    #[inline(always)]
    fn load_block<V: SimdVector<Scalar = T>>(&mut self) -> V {
        (**self).load_block::<V>()
    }
}

/// The same value for every sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant<T> {
    value: T,
}

impl<T: Sample> Constant<T> {
    /// Wrap `value`
    pub const fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Sample> Argument<T> for Constant<T> {
    #[inline(always)]
    fn get(&self) -> T {
        self.value
    }

    #[inline(always)]
    fn increment(&mut self) {}

    #[inline(always)]
    fn load_block<V: SimdVector<Scalar = T>>(&mut self) -> V {
        V::splat(self.value)
    }
}

/// Cursor over a caller-owned buffer, one element per sample
///
/// The buffer must hold at least as many elements as the kernel consumes.
/// Reading past its end panics.
#[derive(Debug, Clone, Copy)]
pub struct Stream<'a, T> {
    data: &'a [T],
    position: usize,
}

impl<'a, T: Sample> Stream<'a, T> {
    /// Start at the first element of `data`
    pub const fn new(data: &'a [T]) -> Self {
        Self { data, position: 0 }
    }

    /// Elements consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Elements left in the buffer
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }
}

impl<T: Sample> Argument<T> for Stream<'_, T> {
    #[inline(always)]
    fn get(&self) -> T {
        self.data[self.position]
    }

    #[inline(always)]
    fn increment(&mut self) {
        self.position += 1;
    }

    #[inline(always)]
    fn load_block<V: SimdVector<Scalar = T>>(&mut self) -> V {
        let block = V::from_slice(&self.data[self.position..]);
        self.position += V::LANES;
        block
    }
}

/// Linear ramp: `start` at the first sample, `slope` added per sample
///
/// The value accumulates additively, so rounding error grows with the number
/// of samples. Block reads go through [`SimdVector::set_slope`] and carry its
/// continuation value forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp<T> {
    data: T,
    slope: T,
}

impl<T: Sample> Ramp<T> {
    /// Ramp from `start` by `slope` per sample
    pub const fn new(start: T, slope: T) -> Self {
        Self { data: start, slope }
    }

    /// Per-sample increment
    pub fn slope(&self) -> T {
        self.slope
    }
}

impl<T: Sample> Argument<T> for Ramp<T> {
    #[inline(always)]
    fn get(&self) -> T {
        self.data
    }

    #[inline(always)]
    fn increment(&mut self) {
        self.data += self.slope;
    }

    #[inline(always)]
    fn load_block<V: SimdVector<Scalar = T>>(&mut self) -> V {
        let mut block = V::zero();
        self.data = block.set_slope(self.data, self.slope);
        block
    }
}

/// Geometric ramp: `start` at the first sample, multiplied by `curve` per sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpRamp<T> {
    data: T,
    curve: T,
}

impl<T: Sample> ExpRamp<T> {
    /// Ramp from `start` by a factor of `curve` per sample
    pub const fn new(start: T, curve: T) -> Self {
        Self { data: start, curve }
    }
}

impl<T: Sample> Argument<T> for ExpRamp<T> {
    #[inline(always)]
    fn get(&self) -> T {
        self.data
    }

    #[inline(always)]
    fn increment(&mut self) {
        self.data *= self.curve;
    }

    #[inline(always)]
    fn load_block<V: SimdVector<Scalar = T>>(&mut self) -> V {
        let mut block = V::zero();
        self.data = block.set_exp(self.data, self.curve);
        block
    }
}

/// Conversion from a call-site value into an [`Argument`]
pub trait IntoArgument<T: Sample> {
    /// Wrapper produced by the conversion
    type Arg: Argument<T>;

    /// Wrap `self`
    fn into_argument(self) -> Self::Arg;
}

/// Select the argument wrapper for a call-site value
///
/// `x` gives [`Constant`], `&[x, ...]` gives [`Stream`], `(start, slope)`
/// gives [`Ramp`]. Wrappers (and `&mut` references to them) pass through.
#[inline(always)]
pub fn wrap_arg<T: Sample, I: IntoArgument<T>>(value: I) -> I::Arg {
    value.into_argument()
}

impl<'a, T: Sample> IntoArgument<T> for &'a [T] {
    type Arg = Stream<'a, T>;

    #[inline(always)]
    fn into_argument(self) -> Stream<'a, T> {
        Stream::new(self)
    }
}

impl<'a, T: Sample, const N: usize> IntoArgument<T> for &'a [T; N] {
    type Arg = Stream<'a, T>;

    #[inline(always)]
    fn into_argument(self) -> Stream<'a, T> {
        Stream::new(self)
    }
}

impl<T: Sample> IntoArgument<T> for (T, T) {
    type Arg = Ramp<T>;

    #[inline(always)]
    fn into_argument(self) -> Ramp<T> {
        Ramp::new(self.0, self.1)
    }
}

// A blanket `impl<T: Sample> IntoArgument<T> for T` would overlap the
// wrapper pass-through below, so bare constants are listed per lane type.
macro_rules! impl_into_argument {
    ($($float:ty),*) => {
        $(
            impl IntoArgument<$float> for $float {
                type Arg = Constant<$float>;

                #[inline(always)]
                fn into_argument(self) -> Constant<$float> {
                    Constant::new(self)
                }
            }
        )*
    };
}

impl_into_argument!(f32, f64);

macro_rules! impl_into_argument_passthrough {
    ($($wrapper:ident$(<$lt:lifetime>)?),*) => {
        $(
            impl<$($lt,)? T: Sample> IntoArgument<T> for $wrapper<$($lt,)? T> {
                type Arg = Self;

                #[inline(always)]
                fn into_argument(self) -> Self {
                    self
                }
            }
        )*
    };
}

impl_into_argument_passthrough!(Constant, Stream<'a>, Ramp, ExpRamp);

impl<'r, T: Sample, A: Argument<T>> IntoArgument<T> for &'r mut A {
    type Arg = &'r mut A;

    #[inline(always)]
    fn into_argument(self) -> &'r mut A {
        self
    }
}
