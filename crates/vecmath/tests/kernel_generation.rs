//! Kernel generator tests
//!
//! Output coverage for every sample count around the lane width, the
//! exactly-once advance discipline of wrapped arguments, and agreement between
//! the vector blocks and the scalar tail.

use std::cell::Cell;

use rigel_vecmath::args::{Argument, Constant, Ramp, Stream};
use rigel_vecmath::functions::signed_pow_vec;
use rigel_vecmath::kernel::{map_binary, map_binary_aligned, map_ternary, map_unary};
use rigel_vecmath::ops::{Clip, Cube, Identity, Plus, Sin, Times, UnaryOp};
use rigel_vecmath::{scalar, DefaultSimdVector, ScalarVector, SimdVector};

use test_utils::*;

type V = DefaultSimdVector<f32>;

/// Argument that counts reads and advances, yielding its step index
struct Counting<'c> {
    step: usize,
    increments: &'c Cell<usize>,
    blocks: &'c Cell<usize>,
}

impl Argument<f32> for Counting<'_> {
    fn get(&self) -> f32 {
        self.step as f32
    }

    fn increment(&mut self) {
        self.step += 1;
        self.increments.set(self.increments.get() + 1);
    }

    fn load_block<W: SimdVector<Scalar = f32>>(&mut self) -> W {
        self.blocks.set(self.blocks.get() + 1);
        let mut block = W::zero();
        let next = block.set_slope(self.step as f32, 1.0);
        self.step = next as usize;
        block
    }
}

#[test]
fn test_every_count_written_exactly_once() {
    for count in 0..=(V::LANES * 4 + 3) {
        let input = ramp_inputs::<f32>(count, 2.0);
        let mut output = vec![f32::NAN; count];
        map_unary::<V, _, _>(&mut output, Stream::new(&input), Identity);
        assert_eq!(output, input, "count {}", count);
    }
}

#[test]
fn test_arguments_advance_exactly_count_steps() {
    for count in 0..=(V::LANES * 3 + 2) {
        let increments = Cell::new(0);
        let blocks = Cell::new(0);
        let counting = Counting {
            step: 0,
            increments: &increments,
            blocks: &blocks,
        };
        let mut output = vec![0.0f32; count];

        map_binary::<V, _, _, _>(&mut output, counting, Constant::new(0.0), Plus);

        let expected_blocks = count / V::LANES;
        assert_eq!(blocks.get(), expected_blocks, "blocks for count {}", count);
        assert_eq!(
            increments.get(),
            count % V::LANES,
            "tail increments for count {}",
            count
        );
        let indices: Vec<f32> = (0..count).map(|i| i as f32).collect();
        assert_eq!(output, indices, "sample order for count {}", count);
    }
}

#[test]
fn test_stream_never_read_past_count() {
    // Each stream is exactly `count` long; reading past it would panic.
    for count in 0..=(V::LANES * 2 + 3) {
        let a = vec![1.5f32; count];
        let b = vec![2.0f32; count];
        let mut stream_a = Stream::new(&a);
        let mut stream_b = Stream::new(&b);
        let mut output = vec![0.0f32; count];

        map_binary::<V, _, _, _>(&mut output, &mut stream_a, &mut stream_b, Times);

        assert!(output.iter().all(|x| *x == 3.0));
        assert_eq!(stream_a.position(), count);
        assert_eq!(stream_b.position(), count);
    }
}

#[test]
#[should_panic]
fn test_short_stream_panics_instead_of_over_reading() {
    let input = [1.0f32; 3];
    let mut output = [0.0f32; 9];
    map_unary::<V, _, _>(&mut output, Stream::new(&input), Identity);
}

#[test]
fn test_block_and_tail_agree_with_scalar() {
    let count = V::LANES * 5 + 3;
    let input = ramp_inputs::<f32>(count, 3.0);
    let mut output = vec![0.0f32; count];

    map_unary::<V, _, _>(&mut output, Stream::new(&input), Sin);

    let expected: Vec<f32> = input.iter().map(|x| Sin.scalar(*x)).collect();
    assert_slice_close(&output, &expected, F32_TOLERANCE, "sin");
}

#[test]
fn test_mixed_argument_kinds() {
    let count = 11;
    let signal = ramp_inputs::<f32>(count, 1.0);
    let mut output = vec![0.0f32; count];

    map_ternary::<V, _, _, _, _>(
        &mut output,
        Stream::new(&signal),
        Ramp::new(-1.0, 0.05),
        Constant::new(0.5),
        Clip,
    );

    for (i, x) in signal.iter().enumerate() {
        let low = -1.0 + 0.05 * i as f32;
        assert_close(output[i], scalar::clip(*x, low, 0.5), 1e-5, "clip with ramp");
    }
}

#[test]
fn test_signed_pow_buffer() {
    let input = reference_buffer::<f64>();
    let mut output = vec![0.0f64; input.len()];

    signed_pow_vec(&mut output, &input[..], 2.0f64);

    for (x, y) in input.iter().zip(&output) {
        assert_eq!(*y, signed_square(*x));
    }
}

#[test]
fn test_aligned_kernel_matches_unaligned() {
    #[repr(C, align(64))]
    struct Aligned([f32; 37]);

    let a = ramp_inputs::<f32>(37, 1.0);
    let b = ramp_inputs::<f32>(37, 5.0);
    let mut aligned = Aligned([0.0; 37]);
    let mut plain = vec![0.0f32; 37];

    unsafe {
        map_binary_aligned::<V, _, _, _>(&mut aligned.0, Stream::new(&a), Stream::new(&b), Plus);
    }
    map_binary::<V, _, _, _>(&mut plain, Stream::new(&a), Stream::new(&b), Plus);

    assert_eq!(&aligned.0[..], &plain[..]);
}

#[test]
fn test_explicit_scalar_backend_width() {
    // A wide scalar vector leaves a long tail for short buffers
    type Wide = ScalarVector<f64, 16>;
    let input = ramp_inputs::<f64>(21, 4.0);
    let mut output = vec![0.0f64; 21];

    map_unary::<Wide, _, _>(&mut output, Stream::new(&input), Cube);

    for (x, y) in input.iter().zip(&output) {
        assert_eq!(*y, x * x * x);
    }
}

/// `sign(x) * x^2` from the definition
fn signed_square(x: f64) -> f64 {
    if x < 0.0 {
        -(x * x)
    } else {
        x * x
    }
}
