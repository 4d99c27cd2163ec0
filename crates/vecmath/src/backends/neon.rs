//! NEON backend implementation (ARM64)
//!
//! 128-bit vectors: [`NeonVector`] holds 4 lanes of `f32` and [`NeonVector64`]
//! holds 2 lanes of `f64`. NEON is mandatory on aarch64, so no runtime
//! detection is needed.
//!
//! Native: load/store, arithmetic, bitwise (through the unsigned integer view
//! of the register), all comparisons, `select`, `abs`, `sqrt`, the three
//! rounding modes, `min`/`max` and horizontal reductions. The `f32`
//! reciprocal and rsqrt start from the hardware estimate and take two
//! Newton-Raphson steps. The transcendental set uses the per-lane fallback.
//!
//! `vminq`/`vmaxq` return NaN when either operand is NaN, which differs from
//! the operand-order rule of [`crate::scalar::min`].

use crate::traits::SimdVector;
use core::arch::aarch64::*;

/// NEON vector wrapper (4 lanes of f32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct NeonVector(float32x4_t);

/// NEON vector wrapper (2 lanes of f64)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct NeonVector64(float64x2_t);

impl NeonVector {
    #[inline(always)]
    fn to_lanes(self) -> [f32; 4] {
        let mut lanes = [0.0f32; 4];
        unsafe { vst1q_f32(lanes.as_mut_ptr(), self.0) };
        lanes
    }

    #[inline(always)]
    fn from_lanes(lanes: [f32; 4]) -> Self {
        unsafe { NeonVector(vld1q_f32(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn from_bits(bits: uint32x4_t) -> Self {
        unsafe { NeonVector(vreinterpretq_f32_u32(bits)) }
    }

    #[inline(always)]
    fn bits(self) -> uint32x4_t {
        unsafe { vreinterpretq_u32_f32(self.0) }
    }
}

impl NeonVector64 {
    #[inline(always)]
    fn to_lanes(self) -> [f64; 2] {
        let mut lanes = [0.0f64; 2];
        unsafe { vst1q_f64(lanes.as_mut_ptr(), self.0) };
        lanes
    }

    #[inline(always)]
    fn from_lanes(lanes: [f64; 2]) -> Self {
        unsafe { NeonVector64(vld1q_f64(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn from_bits(bits: uint64x2_t) -> Self {
        unsafe { NeonVector64(vreinterpretq_f64_u64(bits)) }
    }

    #[inline(always)]
    fn bits(self) -> uint64x2_t {
        unsafe { vreinterpretq_u64_f64(self.0) }
    }
}

impl core::fmt::Debug for NeonVector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("NeonVector").field(&self.to_lanes()).finish()
    }
}

impl core::fmt::Debug for NeonVector64 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("NeonVector64").field(&self.to_lanes()).finish()
    }
}

vector_operators!([] NeonVector {
    Add::add(|a, b| unsafe { NeonVector(vaddq_f32(a.0, b.0)) }),
    Sub::sub(|a, b| unsafe { NeonVector(vsubq_f32(a.0, b.0)) }),
    Mul::mul(|a, b| unsafe { NeonVector(vmulq_f32(a.0, b.0)) }),
    Div::div(|a, b| unsafe { NeonVector(vdivq_f32(a.0, b.0)) }),
    BitAnd::bitand(|a, b| unsafe { NeonVector::from_bits(vandq_u32(a.bits(), b.bits())) }),
    BitOr::bitor(|a, b| unsafe { NeonVector::from_bits(vorrq_u32(a.bits(), b.bits())) }),
    BitXor::bitxor(|a, b| unsafe { NeonVector::from_bits(veorq_u32(a.bits(), b.bits())) }),
});

vector_assign_operators!([] NeonVector);

vector_operators!([] NeonVector64 {
    Add::add(|a, b| unsafe { NeonVector64(vaddq_f64(a.0, b.0)) }),
    Sub::sub(|a, b| unsafe { NeonVector64(vsubq_f64(a.0, b.0)) }),
    Mul::mul(|a, b| unsafe { NeonVector64(vmulq_f64(a.0, b.0)) }),
    Div::div(|a, b| unsafe { NeonVector64(vdivq_f64(a.0, b.0)) }),
    BitAnd::bitand(|a, b| unsafe { NeonVector64::from_bits(vandq_u64(a.bits(), b.bits())) }),
    BitOr::bitor(|a, b| unsafe { NeonVector64::from_bits(vorrq_u64(a.bits(), b.bits())) }),
    BitXor::bitxor(|a, b| unsafe { NeonVector64::from_bits(veorq_u64(a.bits(), b.bits())) }),
});

vector_assign_operators!([] NeonVector64);

impl core::ops::Neg for NeonVector {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { NeonVector(vnegq_f32(self.0)) }
    }
}

impl core::ops::Neg for NeonVector64 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { NeonVector64(vnegq_f64(self.0)) }
    }
}

impl SimdVector for NeonVector {
    type Scalar = f32;

    const LANES: usize = 4;
    const ALIGNMENT: usize = 16;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { NeonVector(vdupq_n_f32(value)) }
    }

    #[inline(always)]
    fn get(self, index: usize) -> f32 {
        self.to_lanes()[index]
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: f32) {
        let mut lanes = self.to_lanes();
        lanes[index] = value;
        *self = Self::from_lanes(lanes);
    }

    #[inline(always)]
    fn set_slope(&mut self, start: f32, slope: f32) -> f32 {
        const STEPS: [f32; 4] = [0.0, 1.0, 2.0, 3.0];
        unsafe {
            let steps = vld1q_f32(STEPS.as_ptr());
            self.0 = vfmaq_f32(vdupq_n_f32(start), steps, vdupq_n_f32(slope));
        }
        start + slope * 4.0
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        NeonVector(vld1q_f32(ptr))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        NeonVector(vld1q_f32(ptr))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        vst1q_f32(ptr, self.0)
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut f32) {
        vst1q_f32(ptr, self.0)
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        // vbicq computes first & !second
        unsafe { NeonVector::from_bits(vbicq_u32(self.bits(), rhs.bits())) }
    }

    #[inline(always)]
    fn mask_lt(self, rhs: Self) -> Self {
        unsafe { NeonVector::from_bits(vcltq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_le(self, rhs: Self) -> Self {
        unsafe { NeonVector::from_bits(vcleq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_gt(self, rhs: Self) -> Self {
        unsafe { NeonVector::from_bits(vcgtq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_ge(self, rhs: Self) -> Self {
        unsafe { NeonVector::from_bits(vcgeq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_eq(self, rhs: Self) -> Self {
        unsafe { NeonVector::from_bits(vceqq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_ne(self, rhs: Self) -> Self {
        unsafe { NeonVector::from_bits(vmvnq_u32(vceqq_f32(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn select(lhs: Self, rhs: Self, mask: Self) -> Self {
        unsafe { NeonVector(vbslq_f32(mask.bits(), rhs.0, lhs.0)) }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { NeonVector(vabsq_f32(self.0)) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { NeonVector(vsqrtq_f32(self.0)) }
    }

    #[inline(always)]
    fn reciprocal(self) -> Self {
        unsafe {
            // vrecpsq(x, e) = 2 - x * e, and 2 for 0 * inf
            let mut estimate = vrecpeq_f32(self.0);
            estimate = vmulq_f32(vrecpsq_f32(self.0, estimate), estimate);
            estimate = vmulq_f32(vrecpsq_f32(self.0, estimate), estimate);
            NeonVector(estimate)
        }
    }

    #[inline(always)]
    fn rsqrt(self) -> Self {
        unsafe {
            // vrsqrtsq(a, b) = (3 - a * b) / 2, and 1.5 for 0 * inf
            let mut estimate = vrsqrteq_f32(self.0);
            estimate = vmulq_f32(
                vrsqrtsq_f32(self.0, vmulq_f32(estimate, estimate)),
                estimate,
            );
            estimate = vmulq_f32(
                vrsqrtsq_f32(self.0, vmulq_f32(estimate, estimate)),
                estimate,
            );
            NeonVector(estimate)
        }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { NeonVector(vrndmq_f32(self.0)) }
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { NeonVector(vrndpq_f32(self.0)) }
    }

    #[inline(always)]
    fn round(self) -> Self {
        unsafe { NeonVector(vrndaq_f32(self.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { NeonVector(vminq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { NeonVector(vmaxq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn muladd(self, mul: Self, add: Self) -> Self {
        unsafe { NeonVector(vfmaq_f32(add.0, self.0, mul.0)) }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f32 {
        unsafe { vaddvq_f32(self.0) }
    }

    #[inline(always)]
    fn horizontal_min(self) -> f32 {
        unsafe { vminvq_f32(self.0) }
    }

    #[inline(always)]
    fn horizontal_max(self) -> f32 {
        unsafe { vmaxvq_f32(self.0) }
    }
}

impl SimdVector for NeonVector64 {
    type Scalar = f64;

    const LANES: usize = 2;
    const ALIGNMENT: usize = 16;

    #[inline(always)]
    fn splat(value: f64) -> Self {
        unsafe { NeonVector64(vdupq_n_f64(value)) }
    }

    #[inline(always)]
    fn get(self, index: usize) -> f64 {
        self.to_lanes()[index]
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: f64) {
        let mut lanes = self.to_lanes();
        lanes[index] = value;
        *self = Self::from_lanes(lanes);
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f64) -> Self {
        NeonVector64(vld1q_f64(ptr))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f64) -> Self {
        NeonVector64(vld1q_f64(ptr))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f64) {
        vst1q_f64(ptr, self.0)
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut f64) {
        vst1q_f64(ptr, self.0)
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        unsafe { NeonVector64::from_bits(vbicq_u64(self.bits(), rhs.bits())) }
    }

    #[inline(always)]
    fn mask_lt(self, rhs: Self) -> Self {
        unsafe { NeonVector64::from_bits(vcltq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_le(self, rhs: Self) -> Self {
        unsafe { NeonVector64::from_bits(vcleq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_gt(self, rhs: Self) -> Self {
        unsafe { NeonVector64::from_bits(vcgtq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_ge(self, rhs: Self) -> Self {
        unsafe { NeonVector64::from_bits(vcgeq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_eq(self, rhs: Self) -> Self {
        unsafe { NeonVector64::from_bits(vceqq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_ne(self, rhs: Self) -> Self {
        // no vmvnq_u64
        unsafe {
            NeonVector64::from_bits(veorq_u64(
                vceqq_f64(self.0, rhs.0),
                vdupq_n_u64(u64::MAX),
            ))
        }
    }

    #[inline(always)]
    fn select(lhs: Self, rhs: Self, mask: Self) -> Self {
        unsafe { NeonVector64(vbslq_f64(mask.bits(), rhs.0, lhs.0)) }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { NeonVector64(vabsq_f64(self.0)) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { NeonVector64(vsqrtq_f64(self.0)) }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { NeonVector64(vrndmq_f64(self.0)) }
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { NeonVector64(vrndpq_f64(self.0)) }
    }

    #[inline(always)]
    fn round(self) -> Self {
        unsafe { NeonVector64(vrndaq_f64(self.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { NeonVector64(vminq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { NeonVector64(vmaxq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f64 {
        unsafe { vaddvq_f64(self.0) }
    }

    #[inline(always)]
    fn horizontal_min(self) -> f64 {
        unsafe { vminvq_f64(self.0) }
    }

    #[inline(always)]
    fn horizontal_max(self) -> f64 {
        unsafe { vmaxvq_f64(self.0) }
    }
}
