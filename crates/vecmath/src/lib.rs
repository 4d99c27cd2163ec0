#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! rigel-vecmath: portable elementwise vector math for audio-rate buffers
//!
//! Kernels are written once against the [`SimdVector`] trait and the argument
//! wrappers in [`args`], and compile to the vector unit the build targets.
//!
//! # Features
//!
//! - **One vector trait, several backends**: SSE (x86/x86_64), NEON (aarch64)
//!   and a pure-scalar emulation, selected at compile time
//! - **Per-lane fallback**: operations without a native instruction run the
//!   scalar primitive lane by lane behind the same method name
//! - **Wrapped arguments**: every operand can be a constant, a buffer or a
//!   ramp without changing the kernel
//! - **No allocations**: `no_std`, all state is stack-local to one call
//!
//! # Quick Start
//!
//! ```rust
//! use rigel_vecmath::functions::{signed_pow_vec, times_vec};
//!
//! let signal = [-0.25f32, 0.0, 0.25, 1.0, -1.0];
//! let mut shaped = [0.0f32; 5];
//!
//! // Square-root shaping that keeps the sign of each sample
//! signed_pow_vec(&mut shaped, &signal[..], 0.5f32);
//! assert_eq!(shaped[0], -0.5);
//!
//! // Fade in with a per-sample linear ramp
//! let mut faded = [0.0f32; 5];
//! times_vec(&mut faded, &shaped[..], (0.0f32, 0.25f32));
//! assert_eq!(faded[4], -1.0);
//! ```

extern crate libm;

// Core trait definitions
pub mod traits;

// Scalar math primitives
pub mod scalar;

// Per-lane fallback dispatch
pub mod fallback;

// Backend implementations and compile-time selection
pub mod backends;

// Kernel arguments
pub mod args;

// Operation descriptors
pub mod ops;

// Kernel generator
pub mod kernel;

// Named elementwise functions
pub mod functions;

// Public re-exports for convenience
pub use traits::{Sample, SimdVector};

pub use args::{wrap_arg, Argument, Constant, ExpRamp, IntoArgument, Ramp, Stream};

pub use backends::scalar::ScalarVector;
pub use backends::{backend_name, DefaultSimdVector, SimdSample};

#[cfg(any(
    target_arch = "x86_64",
    all(target_arch = "x86", target_feature = "sse2")
))]
pub use backends::sse::{SseVector, SseVector64};

#[cfg(target_arch = "aarch64")]
pub use backends::neon::{NeonVector, NeonVector64};
