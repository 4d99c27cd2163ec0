//! SIMD backend implementations
//!
//! One `SimdVector` implementation per instruction set, plus the pure-scalar
//! emulation. Exactly one of them is the *default* vector of a build; the
//! choice is made here at compile time and never probed at runtime.
//!
//! | target                          | `f32`          | `f64`            |
//! |---------------------------------|----------------|------------------|
//! | x86 / x86_64 with SSE2          | [`sse::SseVector`] (4 lanes)  | [`sse::SseVector64`] (2 lanes)  |
//! | aarch64                         | `NeonVector` (4 lanes) | `NeonVector64` (2 lanes) |
//! | anything else, or `force-scalar`| [`scalar::ScalarVector`] (4 lanes) | [`scalar::ScalarVector`] (4 lanes) |
//!
//! The native backends are compiled whenever the target architecture has them,
//! so they can be tested against the scalar backend even when `force-scalar`
//! pins the default.

use crate::traits::{Sample, SimdVector};

/// Implements a `core::ops` binary operator family for a backend vector
///
/// Each entry names the operator trait and method plus a two-argument body.
/// Generic parameters for the impl go in the leading brackets and are passed
/// as one token group to the per-operator arm.
macro_rules! vector_operators {
    (@each [$($generics:tt)*] $vector:ty, $op:ident::$method:ident(|$lhs:ident, $rhs:ident| $body:expr)) => {
        impl<$($generics)*> core::ops::$op for $vector {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                let $lhs = self;
                let $rhs = rhs;
                $body
            }
        }
    };

    ($generics:tt $vector:ty {
        $($op:ident::$method:ident(|$lhs:ident, $rhs:ident| $body:expr)),* $(,)?
    }) => {
        $(
            vector_operators!(@each $generics $vector, $op::$method(|$lhs, $rhs| $body));
        )*
    };
}

/// Derives the in-place arithmetic operators from the binary ones
macro_rules! vector_assign_operators {
    ([$($generics:tt)*] $vector:ty) => {
        impl<$($generics)*> core::ops::AddAssign for $vector {
            #[inline(always)]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl<$($generics)*> core::ops::SubAssign for $vector {
            #[inline(always)]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl<$($generics)*> core::ops::MulAssign for $vector {
            #[inline(always)]
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        impl<$($generics)*> core::ops::DivAssign for $vector {
            #[inline(always)]
            fn div_assign(&mut self, rhs: Self) {
                *self = *self / rhs;
            }
        }
    };
}

// Scalar backend (always available)
pub mod scalar;

#[cfg(any(
    target_arch = "x86_64",
    all(target_arch = "x86", target_feature = "sse2")
))]
pub mod sse;

#[cfg(target_arch = "aarch64")]
pub mod neon;

/// A `Sample` type with a compile-time selected default vector
///
/// # Example
///
/// ```rust
/// use rigel_vecmath::{SimdSample, SimdVector};
///
/// fn lanes<T: SimdSample>() -> usize {
///     <T::Vector as SimdVector>::LANES
/// }
///
/// assert!(lanes::<f32>() >= 1);
/// ```
pub trait SimdSample: Sample {
    /// Default vector for this lane type in the current build
    type Vector: SimdVector<Scalar = Self>;
}

/// Default vector type for `T` in the current build
pub type DefaultSimdVector<T = f32> = <T as SimdSample>::Vector;

#[cfg(all(
    not(feature = "force-scalar"),
    any(
        target_arch = "x86_64",
        all(target_arch = "x86", target_feature = "sse2")
    )
))]
mod selected {
    pub type F32 = super::sse::SseVector;
    pub type F64 = super::sse::SseVector64;
    pub const NAME: &str = "sse";
}

#[cfg(all(not(feature = "force-scalar"), target_arch = "aarch64"))]
mod selected {
    pub type F32 = super::neon::NeonVector;
    pub type F64 = super::neon::NeonVector64;
    pub const NAME: &str = "neon";
}

#[cfg(any(
    feature = "force-scalar",
    not(any(
        target_arch = "x86_64",
        all(target_arch = "x86", target_feature = "sse2"),
        target_arch = "aarch64"
    ))
))]
mod selected {
    pub type F32 = super::scalar::ScalarVector<f32>;
    pub type F64 = super::scalar::ScalarVector<f64>;
    pub const NAME: &str = "scalar";
}

impl SimdSample for f32 {
    type Vector = selected::F32;
}

impl SimdSample for f64 {
    type Vector = selected::F64;
}

/// Name of the backend behind [`DefaultSimdVector`]: `"sse"`, `"neon"` or `"scalar"`
///
/// # Example
///
/// ```rust
/// let name = rigel_vecmath::backend_name();
/// assert!(["sse", "neon", "scalar"].contains(&name));
/// ```
#[inline]
pub const fn backend_name() -> &'static str {
    selected::NAME
}
