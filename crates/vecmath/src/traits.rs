//! Core abstraction traits
//!
//! `Sample` describes the scalar numeric types the crate operates on (`f32` and
//! `f64`). `SimdVector` is the vector value every backend provides. Kernels are
//! written once against these two traits and compile to whichever backend the
//! build selects.
//!
//! A backend only has to provide construction, lane access, memory transfer and
//! the `core::ops` operators. Every other operation has a default method: either
//! a composition of those primitives (`abs`, `sign`, `select`, `cmp_*`, ...) or
//! a per-lane decomposition through [`crate::fallback`]. Backends override the
//! defaults wherever the instruction set has a native instruction, so callers
//! never need to know which operations are native.

use core::fmt::Debug;
use core::ops::{
    Add, AddAssign, BitAnd, BitOr, BitXor, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign,
};

use crate::fallback::{fold_lanes, lane_mask, map_lanes, zip_lanes};
use crate::scalar;

/// Scalar numeric type usable as a vector lane
///
/// Implemented for `f32` and `f64`. Transcendental functions route to `libm`
/// since the crate is `no_std`.
pub trait Sample:
    Copy
    + Default
    + Debug
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    /// Additive identity
    const ZERO: Self;
    /// Multiplicative identity
    const ONE: Self;
    /// Negative one
    const NEG_ONE: Self;
    /// Negative zero: only the sign bit set
    const SIGN_MASK: Self;

    /// Value with every bit set, used as a "true" lane in bitmasks
    fn all_bits() -> Self;

    /// Convert a lane index or sample count
    fn from_usize(n: usize) -> Self;

    /// Convert from `f64` (rounding for `f32`)
    fn from_f64(x: f64) -> Self;

    /// Widen to `f64`
    fn to_f64(self) -> f64;

    /// Raw IEEE 754 bits, zero-extended to 64 bits
    fn to_bits64(self) -> u64;

    /// Inverse of [`Sample::to_bits64`]; upper bits are ignored for `f32`
    fn from_bits64(bits: u64) -> Self;

    /// Absolute value
    fn fabs(self) -> Self;
    /// Square root
    fn sqrt(self) -> Self;
    /// Round toward negative infinity
    fn floor(self) -> Self;
    /// Round toward positive infinity
    fn ceil(self) -> Self;
    /// Round to nearest, ties away from zero
    fn round(self) -> Self;
    /// Natural exponential
    fn exp(self) -> Self;
    /// Natural logarithm
    fn ln(self) -> Self;
    /// Base-2 logarithm
    fn log2(self) -> Self;
    /// Base-10 logarithm
    fn log10(self) -> Self;
    /// Sine
    fn sin(self) -> Self;
    /// Cosine
    fn cos(self) -> Self;
    /// Tangent
    fn tan(self) -> Self;
    /// Arcsine
    fn asin(self) -> Self;
    /// Arccosine
    fn acos(self) -> Self;
    /// Arctangent
    fn atan(self) -> Self;
    /// Hyperbolic tangent
    fn tanh(self) -> Self;
    /// `self` raised to `exponent`
    fn powf(self, exponent: Self) -> Self;
}

macro_rules! impl_sample {
    (
        $float:ty, $bits:ty,
        fabs: $fabs:path, sqrt: $sqrt:path, floor: $floor:path, ceil: $ceil:path,
        round: $round:path, exp: $exp:path, ln: $ln:path, log2: $log2:path,
        log10: $log10:path, sin: $sin:path, cos: $cos:path, tan: $tan:path,
        asin: $asin:path, acos: $acos:path, atan: $atan:path, tanh: $tanh:path,
        pow: $pow:path $(,)?
    ) => {
        impl Sample for $float {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const NEG_ONE: Self = -1.0;
            const SIGN_MASK: Self = -0.0;

            #[inline(always)]
            fn all_bits() -> Self {
                <$float>::from_bits(<$bits>::MAX)
            }

            #[inline(always)]
            fn from_usize(n: usize) -> Self {
                n as $float
            }

            #[inline(always)]
            fn from_f64(x: f64) -> Self {
                x as $float
            }

            #[inline(always)]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline(always)]
            fn to_bits64(self) -> u64 {
                self.to_bits() as u64
            }

            #[inline(always)]
            fn from_bits64(bits: u64) -> Self {
                <$float>::from_bits(bits as $bits)
            }

            #[inline(always)]
            fn fabs(self) -> Self {
                $fabs(self)
            }

            #[inline(always)]
            fn sqrt(self) -> Self {
                $sqrt(self)
            }

            #[inline(always)]
            fn floor(self) -> Self {
                $floor(self)
            }

            #[inline(always)]
            fn ceil(self) -> Self {
                $ceil(self)
            }

            #[inline(always)]
            fn round(self) -> Self {
                $round(self)
            }

            #[inline(always)]
            fn exp(self) -> Self {
                $exp(self)
            }

            #[inline(always)]
            fn ln(self) -> Self {
                $ln(self)
            }

            #[inline(always)]
            fn log2(self) -> Self {
                $log2(self)
            }

            #[inline(always)]
            fn log10(self) -> Self {
                $log10(self)
            }

            #[inline(always)]
            fn sin(self) -> Self {
                $sin(self)
            }

            #[inline(always)]
            fn cos(self) -> Self {
                $cos(self)
            }

            #[inline(always)]
            fn tan(self) -> Self {
                $tan(self)
            }

            #[inline(always)]
            fn asin(self) -> Self {
                $asin(self)
            }

            #[inline(always)]
            fn acos(self) -> Self {
                $acos(self)
            }

            #[inline(always)]
            fn atan(self) -> Self {
                $atan(self)
            }

            #[inline(always)]
            fn tanh(self) -> Self {
                $tanh(self)
            }

            #[inline(always)]
            fn powf(self, exponent: Self) -> Self {
                $pow(self, exponent)
            }
        }
    };
}

impl_sample!(
    f32, u32,
    fabs: libm::fabsf, sqrt: libm::sqrtf, floor: libm::floorf, ceil: libm::ceilf,
    round: libm::roundf, exp: libm::expf, ln: libm::logf, log2: libm::log2f,
    log10: libm::log10f, sin: libm::sinf, cos: libm::cosf, tan: libm::tanf,
    asin: libm::asinf, acos: libm::acosf, atan: libm::atanf, tanh: libm::tanhf,
    pow: libm::powf,
);

impl_sample!(
    f64, u64,
    fabs: libm::fabs, sqrt: libm::sqrt, floor: libm::floor, ceil: libm::ceil,
    round: libm::round, exp: libm::exp, ln: libm::log, log2: libm::log2,
    log10: libm::log10, sin: libm::sin, cos: libm::cos, tan: libm::tan,
    asin: libm::asin, acos: libm::acos, atan: libm::atan, tanh: libm::tanh,
    pow: libm::pow,
);

/// Core vector abstraction
///
/// A vector value holds `LANES` contiguous values of `Scalar`. It is `Copy`,
/// has no identity and no hidden shared state, so it can be moved freely
/// between threads.
///
/// # Example
///
/// ```rust
/// use rigel_vecmath::{DefaultSimdVector, SimdVector};
///
/// let a = DefaultSimdVector::<f32>::splat(2.0);
/// let b = DefaultSimdVector::<f32>::splat(3.0);
/// let sum = a + b;
/// assert_eq!(sum.horizontal_sum(), 5.0 * DefaultSimdVector::<f32>::LANES as f32);
/// ```
pub trait SimdVector:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
{
    /// Lane type (`f32` or `f64`)
    type Scalar: Sample;

    /// Number of lanes
    const LANES: usize;

    /// Byte alignment required by `load_aligned`, `store_aligned` and
    /// `store_aligned_stream`
    const ALIGNMENT: usize;

    // Construction and lane access

    /// Broadcast a scalar into every lane
    fn splat(value: Self::Scalar) -> Self;

    /// Read lane `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= LANES`
    fn get(self, index: usize) -> Self::Scalar;

    /// Overwrite lane `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= LANES`
    fn set(&mut self, index: usize, value: Self::Scalar);

    /// Vector with every lane zero
    #[inline(always)]
    fn zero() -> Self {
        Self::splat(Self::Scalar::ZERO)
    }

    /// Reset every lane to zero
    #[inline(always)]
    fn clear(&mut self) {
        *self = Self::zero();
    }

    /// Broadcast `value` into every lane of `self`
    #[inline(always)]
    fn set_vec(&mut self, value: Self::Scalar) {
        *self = Self::splat(value);
    }

    /// Fill lanes with the arithmetic progression `start + i * slope`
    ///
    /// Returns `start + LANES * slope`, the start value for the next block, so
    /// repeated calls produce one continuous ramp across blocks.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rigel_vecmath::{ScalarVector, SimdVector};
    ///
    /// let mut v = ScalarVector::<f32, 4>::zero();
    /// let next = v.set_slope(1.0, 0.5);
    /// assert_eq!(v.to_array(), [1.0, 1.5, 2.0, 2.5]);
    /// assert_eq!(next, 3.0);
    /// ```
    #[inline]
    fn set_slope(&mut self, start: Self::Scalar, slope: Self::Scalar) -> Self::Scalar {
        for i in 0..Self::LANES {
            self.set(i, start + slope * Self::Scalar::from_usize(i));
        }
        start + slope * Self::Scalar::from_usize(Self::LANES)
    }

    /// Fill lanes with the geometric progression `start * curve^i`
    ///
    /// Returns `start * curve^LANES`, the start value for the next block.
    #[inline]
    fn set_exp(&mut self, start: Self::Scalar, curve: Self::Scalar) -> Self::Scalar {
        let mut value = start;
        for i in 0..Self::LANES {
            self.set(i, value);
            value *= curve;
        }
        value
    }

    // Memory transfer

    /// Load `LANES` values from an arbitrarily aligned address
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading `LANES` values.
    unsafe fn load(ptr: *const Self::Scalar) -> Self;

    /// Load `LANES` values from an address aligned to `ALIGNMENT` bytes
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading `LANES` values and aligned to
    /// `ALIGNMENT` bytes. Misalignment is undefined behavior.
    unsafe fn load_aligned(ptr: *const Self::Scalar) -> Self;

    /// Store `LANES` values to an arbitrarily aligned address
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing `LANES` values.
    unsafe fn store(self, ptr: *mut Self::Scalar);

    /// Store `LANES` values to an address aligned to `ALIGNMENT` bytes
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing `LANES` values and aligned to
    /// `ALIGNMENT` bytes. Misalignment is undefined behavior.
    unsafe fn store_aligned(self, ptr: *mut Self::Scalar);

    /// Aligned store with a non-temporal hint, for write-once output buffers
    ///
    /// Functionally identical to `store_aligned`; backends without a streaming
    /// store use the regular one.
    ///
    /// # Safety
    ///
    /// Same contract as `store_aligned`.
    #[inline(always)]
    unsafe fn store_aligned_stream(self, ptr: *mut Self::Scalar) {
        self.store_aligned(ptr)
    }

    /// Load from the start of a slice
    ///
    /// # Panics
    ///
    /// Panics if the slice has fewer than `LANES` elements
    #[inline(always)]
    fn from_slice(slice: &[Self::Scalar]) -> Self {
        assert!(
            slice.len() >= Self::LANES,
            "Slice too short for vector load: {} < {}",
            slice.len(),
            Self::LANES
        );
        // SAFETY: the slice holds at least LANES readable values.
        unsafe { Self::load(slice.as_ptr()) }
    }

    /// Store to the start of a slice
    ///
    /// # Panics
    ///
    /// Panics if the slice has fewer than `LANES` elements
    #[inline(always)]
    fn to_slice(self, slice: &mut [Self::Scalar]) {
        assert!(
            slice.len() >= Self::LANES,
            "Slice too short for vector store: {} < {}",
            slice.len(),
            Self::LANES
        );
        // SAFETY: the slice holds at least LANES writable values.
        unsafe { self.store(slice.as_mut_ptr()) }
    }

    // Bitwise and relational

    /// `self & !rhs`
    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        self & (rhs ^ Self::splat(Self::Scalar::all_bits()))
    }

    /// All-bits mask where `self < rhs`
    #[inline(always)]
    fn mask_lt(self, rhs: Self) -> Self {
        zip_lanes(self, rhs, |a, b| lane_mask(a < b))
    }

    /// All-bits mask where `self <= rhs`
    #[inline(always)]
    fn mask_le(self, rhs: Self) -> Self {
        zip_lanes(self, rhs, |a, b| lane_mask(a <= b))
    }

    /// All-bits mask where `self > rhs`
    #[inline(always)]
    fn mask_gt(self, rhs: Self) -> Self {
        zip_lanes(self, rhs, |a, b| lane_mask(a > b))
    }

    /// All-bits mask where `self >= rhs`
    #[inline(always)]
    fn mask_ge(self, rhs: Self) -> Self {
        zip_lanes(self, rhs, |a, b| lane_mask(a >= b))
    }

    /// All-bits mask where `self == rhs`
    #[inline(always)]
    fn mask_eq(self, rhs: Self) -> Self {
        zip_lanes(self, rhs, |a, b| lane_mask(a == b))
    }

    /// All-bits mask where `self != rhs`
    #[inline(always)]
    fn mask_ne(self, rhs: Self) -> Self {
        zip_lanes(self, rhs, |a, b| lane_mask(a != b))
    }

    /// `1` where `self < rhs`, `0` elsewhere
    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Self {
        self.mask_lt(rhs) & Self::splat(Self::Scalar::ONE)
    }

    /// `1` where `self <= rhs`, `0` elsewhere
    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Self {
        self.mask_le(rhs) & Self::splat(Self::Scalar::ONE)
    }

    /// `1` where `self > rhs`, `0` elsewhere
    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Self {
        self.mask_gt(rhs) & Self::splat(Self::Scalar::ONE)
    }

    /// `1` where `self >= rhs`, `0` elsewhere
    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Self {
        self.mask_ge(rhs) & Self::splat(Self::Scalar::ONE)
    }

    /// `1` where `self == rhs`, `0` elsewhere
    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Self {
        self.mask_eq(rhs) & Self::splat(Self::Scalar::ONE)
    }

    /// `1` where `self != rhs`, `0` elsewhere
    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> Self {
        self.mask_ne(rhs) & Self::splat(Self::Scalar::ONE)
    }

    /// Lane-wise choice: `rhs` where `mask` is set, `lhs` elsewhere
    ///
    /// `mask` must come from the `mask_*` family (all bits set or clear per lane).
    ///
    /// # Example
    ///
    /// ```rust
    /// use rigel_vecmath::{DefaultSimdVector, SimdVector};
    ///
    /// type V = DefaultSimdVector<f32>;
    /// let a = V::splat(1.0);
    /// let b = V::splat(2.0);
    /// let picked = V::select(a, b, a.mask_lt(b));
    /// assert_eq!(picked.horizontal_sum(), 2.0 * V::LANES as f32);
    /// ```
    #[inline(always)]
    fn select(lhs: Self, rhs: Self, mask: Self) -> Self {
        (mask & rhs) | lhs.andnot(mask)
    }

    // Unary arithmetic

    /// Absolute value (clears the sign bit)
    #[inline(always)]
    fn abs(self) -> Self {
        self.andnot(Self::splat(Self::Scalar::SIGN_MASK))
    }

    /// `-1`, `0` or `1` per lane; zero and NaN map to `0`
    #[inline(always)]
    fn sign(self) -> Self {
        let zero = Self::zero();
        let positive = self.mask_gt(zero) & Self::splat(Self::Scalar::ONE);
        let negative = self.mask_lt(zero) & Self::splat(Self::Scalar::NEG_ONE);
        positive | negative
    }

    /// `x * x`
    #[inline(always)]
    fn square(self) -> Self {
        self * self
    }

    /// `x * x * x`
    #[inline(always)]
    fn cube(self) -> Self {
        self * self * self
    }

    /// Square root
    #[inline(always)]
    fn sqrt(self) -> Self {
        map_lanes(self, scalar::sqrt)
    }

    /// `1 / x`
    ///
    /// Backends with a reciprocal estimate instruction refine it with
    /// Newton-Raphson, so results are close to, not bit-identical with, a
    /// division.
    #[inline(always)]
    fn reciprocal(self) -> Self {
        Self::splat(Self::Scalar::ONE) / self
    }

    /// `1 / sqrt(x)`, refined the same way as `reciprocal`
    #[inline(always)]
    fn rsqrt(self) -> Self {
        Self::splat(Self::Scalar::ONE) / self.sqrt()
    }

    /// `sign(x) * sqrt(|x|)`
    #[inline(always)]
    fn signed_sqrt(self) -> Self {
        map_lanes(self, scalar::signed_sqrt)
    }

    // Rounding

    /// Round toward negative infinity
    #[inline(always)]
    fn floor(self) -> Self {
        map_lanes(self, scalar::floor)
    }

    /// Round toward positive infinity
    #[inline(always)]
    fn ceil(self) -> Self {
        map_lanes(self, scalar::ceil)
    }

    /// Round to nearest, ties away from zero
    #[inline(always)]
    fn round(self) -> Self {
        map_lanes(self, scalar::round)
    }

    /// `x - floor(x)`
    #[inline(always)]
    fn frac(self) -> Self {
        self - self.floor()
    }

    // Transcendental

    /// Natural exponential
    #[inline(always)]
    fn exp(self) -> Self {
        map_lanes(self, scalar::exp)
    }

    /// Natural logarithm
    #[inline(always)]
    fn log(self) -> Self {
        map_lanes(self, scalar::log)
    }

    /// Base-2 logarithm
    #[inline(always)]
    fn log2(self) -> Self {
        map_lanes(self, scalar::log2)
    }

    /// Base-10 logarithm
    #[inline(always)]
    fn log10(self) -> Self {
        map_lanes(self, scalar::log10)
    }

    /// Sine
    #[inline(always)]
    fn sin(self) -> Self {
        map_lanes(self, scalar::sin)
    }

    /// Cosine
    #[inline(always)]
    fn cos(self) -> Self {
        map_lanes(self, scalar::cos)
    }

    /// Tangent
    #[inline(always)]
    fn tan(self) -> Self {
        map_lanes(self, scalar::tan)
    }

    /// Arcsine
    #[inline(always)]
    fn asin(self) -> Self {
        map_lanes(self, scalar::asin)
    }

    /// Arccosine
    #[inline(always)]
    fn acos(self) -> Self {
        map_lanes(self, scalar::acos)
    }

    /// Arctangent
    #[inline(always)]
    fn atan(self) -> Self {
        map_lanes(self, scalar::atan)
    }

    /// Hyperbolic tangent
    #[inline(always)]
    fn tanh(self) -> Self {
        map_lanes(self, scalar::tanh)
    }

    // Binary

    /// `self` raised to `exponent`, lane-wise
    #[inline(always)]
    fn pow(self, exponent: Self) -> Self {
        zip_lanes(self, exponent, scalar::pow)
    }

    /// `sign(self) * |self|^exponent`
    #[inline(always)]
    fn signed_pow(self, exponent: Self) -> Self {
        zip_lanes(self, exponent, scalar::signed_pow)
    }

    /// Lane-wise minimum (`self` unless `rhs` is smaller)
    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        zip_lanes(self, rhs, scalar::min)
    }

    /// Lane-wise maximum (`self` unless `rhs` is larger)
    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        zip_lanes(self, rhs, scalar::max)
    }

    // Ternary

    /// Clamp into `[low, high]`
    #[inline(always)]
    fn clip(self, low: Self, high: Self) -> Self {
        self.min(high).max(low)
    }

    /// `self * mul + add`
    #[inline(always)]
    fn muladd(self, mul: Self, add: Self) -> Self {
        self * mul + add
    }

    // Horizontal

    /// Smallest lane
    #[inline(always)]
    fn horizontal_min(self) -> Self::Scalar {
        fold_lanes(self, scalar::min)
    }

    /// Largest lane
    #[inline(always)]
    fn horizontal_max(self) -> Self::Scalar {
        fold_lanes(self, scalar::max)
    }

    /// Sum of all lanes
    #[inline(always)]
    fn horizontal_sum(self) -> Self::Scalar {
        fold_lanes(self, |a, b| a + b)
    }
}
