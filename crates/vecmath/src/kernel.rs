//! Elementwise kernel generator
//!
//! Generic loops that fill an output buffer from wrapped arguments:
//!
//! - Full blocks of `V::LANES` samples go through the vector form of the
//!   operation. Each argument supplies its block with `load_block`: streams
//!   load contiguous values, constants broadcast and ramps call
//!   `set_slope`/`set_exp`, carrying the continuation forward.
//! - The `len % V::LANES` tail samples go through the scalar form, one at a
//!   time, so no argument is read past the sample count.
//!
//! The output slice length is the sample count. Every argument advances by
//! exactly that many steps.
//!
//! # Example
//!
//! ```rust
//! use rigel_vecmath::args::{wrap_arg, Argument};
//! use rigel_vecmath::kernel::map_binary;
//! use rigel_vecmath::ops::Times;
//! use rigel_vecmath::DefaultSimdVector;
//!
//! let input = [1.0f32; 7];
//! let mut output = [0.0f32; 7];
//! let mut gain = wrap_arg::<f32, _>((0.0f32, 0.5f32));
//!
//! map_binary::<DefaultSimdVector<f32>, _, _, _>(
//!     &mut output,
//!     wrap_arg::<f32, _>(&input[..]),
//!     &mut gain,
//!     Times,
//! );
//!
//! assert_eq!(output, [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0]);
//! assert_eq!(gain.get(), 3.5);
//! ```

use crate::args::Argument;
use crate::ops::{BinaryOp, TernaryOp, UnaryOp};
use crate::traits::{Sample, SimdVector};

/// Produces output one vector block or one tail sample at a time
trait Source<V: SimdVector> {
    fn next_block(&mut self) -> V;
    fn next_sample(&mut self) -> V::Scalar;
}

#[inline(always)]
fn next<T: Sample, A: Argument<T>>(arg: &mut A) -> T {
    let value = arg.get();
    arg.increment();
    value
}

struct Unary<A, Op> {
    a: A,
    op: Op,
}

impl<V, A, Op> Source<V> for Unary<A, Op>
where
    V: SimdVector,
    A: Argument<V::Scalar>,
    Op: UnaryOp,
{
    #[inline(always)]
    fn next_block(&mut self) -> V {
        self.op.vector(self.a.load_block::<V>())
    }

    #[inline(always)]
    fn next_sample(&mut self) -> V::Scalar {
        self.op.scalar(next(&mut self.a))
    }
}

struct Binary<A, B, Op> {
    a: A,
    b: B,
    op: Op,
}

impl<V, A, B, Op> Source<V> for Binary<A, B, Op>
where
    V: SimdVector,
    A: Argument<V::Scalar>,
    B: Argument<V::Scalar>,
    Op: BinaryOp,
{
    #[inline(always)]
    fn next_block(&mut self) -> V {
        let a = self.a.load_block::<V>();
        let b = self.b.load_block::<V>();
        self.op.vector(a, b)
    }

    #[inline(always)]
    fn next_sample(&mut self) -> V::Scalar {
        let a = next(&mut self.a);
        let b = next(&mut self.b);
        self.op.scalar(a, b)
    }
}

struct Ternary<A, B, C, Op> {
    a: A,
    b: B,
    c: C,
    op: Op,
}

impl<V, A, B, C, Op> Source<V> for Ternary<A, B, C, Op>
where
    V: SimdVector,
    A: Argument<V::Scalar>,
    B: Argument<V::Scalar>,
    C: Argument<V::Scalar>,
    Op: TernaryOp,
{
    #[inline(always)]
    fn next_block(&mut self) -> V {
        let a = self.a.load_block::<V>();
        let b = self.b.load_block::<V>();
        let c = self.c.load_block::<V>();
        self.op.vector(a, b, c)
    }

    #[inline(always)]
    fn next_sample(&mut self) -> V::Scalar {
        let a = next(&mut self.a);
        let b = next(&mut self.b);
        let c = next(&mut self.c);
        self.op.scalar(a, b, c)
    }
}

#[inline(always)]
fn generate<V: SimdVector, S: Source<V>>(output: &mut [V::Scalar], mut source: S) {
    let mut chunks = output.chunks_exact_mut(V::LANES);
    for chunk in &mut chunks {
        source.next_block().to_slice(chunk);
    }

    for sample in chunks.into_remainder() {
        *sample = source.next_sample();
    }
}

/// # Safety
///
/// `output` must be aligned to `V::ALIGNMENT` bytes.
#[inline(always)]
unsafe fn generate_aligned<V: SimdVector, S: Source<V>>(output: &mut [V::Scalar], mut source: S) {
    debug_assert_eq!(
        output.as_ptr() as usize % V::ALIGNMENT,
        0,
        "Output buffer not aligned to {} bytes",
        V::ALIGNMENT
    );

    let mut chunks = output.chunks_exact_mut(V::LANES);
    for chunk in &mut chunks {
        // SAFETY: each chunk holds LANES values; LANES * size_of::<Scalar>()
        // is a multiple of ALIGNMENT, so every chunk keeps the base alignment.
        source.next_block().store_aligned(chunk.as_mut_ptr());
    }

    for sample in chunks.into_remainder() {
        *sample = source.next_sample();
    }
}

/// Fill `output` with `op(a)`
#[inline]
pub fn map_unary<V, A, Op>(output: &mut [V::Scalar], a: A, op: Op)
where
    V: SimdVector,
    A: Argument<V::Scalar>,
    Op: UnaryOp,
{
    generate::<V, _>(output, Unary { a, op });
}

/// Fill `output` with `op(a, b)`
#[inline]
pub fn map_binary<V, A, B, Op>(output: &mut [V::Scalar], a: A, b: B, op: Op)
where
    V: SimdVector,
    A: Argument<V::Scalar>,
    B: Argument<V::Scalar>,
    Op: BinaryOp,
{
    generate::<V, _>(output, Binary { a, b, op });
}

/// Fill `output` with `op(a, b, c)`
#[inline]
pub fn map_ternary<V, A, B, C, Op>(output: &mut [V::Scalar], a: A, b: B, c: C, op: Op)
where
    V: SimdVector,
    A: Argument<V::Scalar>,
    B: Argument<V::Scalar>,
    C: Argument<V::Scalar>,
    Op: TernaryOp,
{
    generate::<V, _>(output, Ternary { a, b, c, op });
}

/// [`map_unary`] with aligned stores
///
/// # Safety
///
/// `output` must start at an address aligned to `V::ALIGNMENT` bytes.
/// Misalignment is undefined behavior (checked only in debug builds).
#[inline]
pub unsafe fn map_unary_aligned<V, A, Op>(output: &mut [V::Scalar], a: A, op: Op)
where
    V: SimdVector,
    A: Argument<V::Scalar>,
    Op: UnaryOp,
{
    generate_aligned::<V, _>(output, Unary { a, op });
}

/// [`map_binary`] with aligned stores
///
/// # Safety
///
/// Same contract as [`map_unary_aligned`].
#[inline]
pub unsafe fn map_binary_aligned<V, A, B, Op>(output: &mut [V::Scalar], a: A, b: B, op: Op)
where
    V: SimdVector,
    A: Argument<V::Scalar>,
    B: Argument<V::Scalar>,
    Op: BinaryOp,
{
    generate_aligned::<V, _>(output, Binary { a, b, op });
}

/// [`map_ternary`] with aligned stores
///
/// # Safety
///
/// Same contract as [`map_unary_aligned`].
#[inline]
pub unsafe fn map_ternary_aligned<V, A, B, C, Op>(
    output: &mut [V::Scalar],
    a: A,
    b: B,
    c: C,
    op: Op,
) where
    V: SimdVector,
    A: Argument<V::Scalar>,
    B: Argument<V::Scalar>,
    C: Argument<V::Scalar>,
    Op: TernaryOp,
{
    generate_aligned::<V, _>(output, Ternary { a, b, c, op });
}
