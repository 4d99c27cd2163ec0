//! SSE backend implementation (x86 / x86_64)
//!
//! 128-bit packed vectors: [`SseVector`] holds 4 lanes of `f32` (SSE) and
//! [`SseVector64`] holds 2 lanes of `f64` (SSE2). SSE2 is part of the x86_64
//! baseline, so no runtime detection is performed.
//!
//! Native: load/store (including the non-temporal `movntps` store),
//! arithmetic, bitwise, all comparisons, `min`/`max`, `sqrt`, `abs`, the
//! horizontal reductions, and reciprocal/rsqrt estimates refined by one
//! Newton-Raphson step. `floor` and `ceil` are native only when the build
//! enables `sse4.1`. Rounding with ties away from zero and the transcendental
//! set use the per-lane fallback.

use crate::traits::SimdVector;

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;

/// SSE vector wrapper (4 lanes of f32)
///
/// Aligned loads and stores require 16-byte alignment.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct SseVector(__m128);

/// SSE2 vector wrapper (2 lanes of f64)
///
/// Aligned loads and stores require 16-byte alignment.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct SseVector64(__m128d);

impl SseVector {
    #[inline(always)]
    fn to_lanes(self) -> [f32; 4] {
        let mut lanes = [0.0f32; 4];
        unsafe { _mm_storeu_ps(lanes.as_mut_ptr(), self.0) };
        lanes
    }

    #[inline(always)]
    fn from_lanes(lanes: [f32; 4]) -> Self {
        unsafe { SseVector(_mm_loadu_ps(lanes.as_ptr())) }
    }
}

impl SseVector64 {
    #[inline(always)]
    fn to_lanes(self) -> [f64; 2] {
        let mut lanes = [0.0f64; 2];
        unsafe { _mm_storeu_pd(lanes.as_mut_ptr(), self.0) };
        lanes
    }

    #[inline(always)]
    fn from_lanes(lanes: [f64; 2]) -> Self {
        unsafe { SseVector64(_mm_loadu_pd(lanes.as_ptr())) }
    }
}

/// The refinement step computes `0 * inf` for inputs of zero or infinity.
/// Those lanes take the raw estimate, which is already exact (`inf` or `0`).
#[inline(always)]
unsafe fn keep_estimate_where_nan(refined: __m128, estimate: __m128) -> __m128 {
    let nan = _mm_cmpunord_ps(refined, refined);
    _mm_or_ps(_mm_andnot_ps(nan, refined), _mm_and_ps(nan, estimate))
}

impl core::fmt::Debug for SseVector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("SseVector").field(&self.to_lanes()).finish()
    }
}

impl core::fmt::Debug for SseVector64 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("SseVector64").field(&self.to_lanes()).finish()
    }
}

vector_operators!([] SseVector {
    Add::add(|a, b| unsafe { SseVector(_mm_add_ps(a.0, b.0)) }),
    Sub::sub(|a, b| unsafe { SseVector(_mm_sub_ps(a.0, b.0)) }),
    Mul::mul(|a, b| unsafe { SseVector(_mm_mul_ps(a.0, b.0)) }),
    Div::div(|a, b| unsafe { SseVector(_mm_div_ps(a.0, b.0)) }),
    BitAnd::bitand(|a, b| unsafe { SseVector(_mm_and_ps(a.0, b.0)) }),
    BitOr::bitor(|a, b| unsafe { SseVector(_mm_or_ps(a.0, b.0)) }),
    BitXor::bitxor(|a, b| unsafe { SseVector(_mm_xor_ps(a.0, b.0)) }),
});

vector_assign_operators!([] SseVector);

vector_operators!([] SseVector64 {
    Add::add(|a, b| unsafe { SseVector64(_mm_add_pd(a.0, b.0)) }),
    Sub::sub(|a, b| unsafe { SseVector64(_mm_sub_pd(a.0, b.0)) }),
    Mul::mul(|a, b| unsafe { SseVector64(_mm_mul_pd(a.0, b.0)) }),
    Div::div(|a, b| unsafe { SseVector64(_mm_div_pd(a.0, b.0)) }),
    BitAnd::bitand(|a, b| unsafe { SseVector64(_mm_and_pd(a.0, b.0)) }),
    BitOr::bitor(|a, b| unsafe { SseVector64(_mm_or_pd(a.0, b.0)) }),
    BitXor::bitxor(|a, b| unsafe { SseVector64(_mm_xor_pd(a.0, b.0)) }),
});

vector_assign_operators!([] SseVector64);

impl core::ops::Neg for SseVector {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { SseVector(_mm_xor_ps(self.0, _mm_set1_ps(-0.0))) }
    }
}

impl core::ops::Neg for SseVector64 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { SseVector64(_mm_xor_pd(self.0, _mm_set1_pd(-0.0))) }
    }
}

impl SimdVector for SseVector {
    type Scalar = f32;

    const LANES: usize = 4;
    const ALIGNMENT: usize = 16;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { SseVector(_mm_set1_ps(value)) }
    }

    #[inline(always)]
    fn zero() -> Self {
        unsafe { SseVector(_mm_setzero_ps()) }
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
        unsafe {
            let steps = _mm_setr_ps(0.0, 1.0, 2.0, 3.0);
            self.0 = _mm_add_ps(_mm_set1_ps(start), _mm_mul_ps(steps, _mm_set1_ps(slope)));
        }
        start + slope * 4.0
    }

    #[inline(always)]
    fn set_exp(&mut self, start: f32, curve: f32) -> f32 {
        let v1 = start * curve;
        let v2 = v1 * curve;
        let v3 = v2 * curve;
        unsafe { self.0 = _mm_setr_ps(start, v1, v2, v3) };
        v3 * curve
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        SseVector(_mm_loadu_ps(ptr))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        SseVector(_mm_load_ps(ptr))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        _mm_storeu_ps(ptr, self.0)
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut f32) {
        _mm_store_ps(ptr, self.0)
    }

    #[inline(always)]
    unsafe fn store_aligned_stream(self, ptr: *mut f32) {
        _mm_stream_ps(ptr, self.0)
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        // andnps computes !first & second
        unsafe { SseVector(_mm_andnot_ps(rhs.0, self.0)) }
    }

    #[inline(always)]
    fn mask_lt(self, rhs: Self) -> Self {
        unsafe { SseVector(_mm_cmplt_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_le(self, rhs: Self) -> Self {
        unsafe { SseVector(_mm_cmple_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_gt(self, rhs: Self) -> Self {
        unsafe { SseVector(_mm_cmpgt_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_ge(self, rhs: Self) -> Self {
        unsafe { SseVector(_mm_cmpge_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_eq(self, rhs: Self) -> Self {
        unsafe { SseVector(_mm_cmpeq_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_ne(self, rhs: Self) -> Self {
        unsafe { SseVector(_mm_cmpneq_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(lhs: Self, rhs: Self, mask: Self) -> Self {
        unsafe {
            SseVector(_mm_or_ps(
                _mm_and_ps(mask.0, rhs.0),
                _mm_andnot_ps(mask.0, lhs.0),
            ))
        }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { SseVector(_mm_sqrt_ps(self.0)) }
    }

    #[inline(always)]
    fn reciprocal(self) -> Self {
        unsafe {
            // 12-bit estimate, then e * (2 - x * e)
            let estimate = _mm_rcp_ps(self.0);
            let two = _mm_set1_ps(2.0);
            let refined = _mm_mul_ps(
                estimate,
                _mm_sub_ps(two, _mm_mul_ps(self.0, estimate)),
            );
            SseVector(keep_estimate_where_nan(refined, estimate))
        }
    }

    #[inline(always)]
    fn rsqrt(self) -> Self {
        unsafe {
            // 12-bit estimate, then e * (1.5 - 0.5 * x * e * e)
            let estimate = _mm_rsqrt_ps(self.0);
            let half_x = _mm_mul_ps(_mm_set1_ps(0.5), self.0);
            let correction = _mm_sub_ps(
                _mm_set1_ps(1.5),
                _mm_mul_ps(half_x, _mm_mul_ps(estimate, estimate)),
            );
            let refined = _mm_mul_ps(estimate, correction);
            SseVector(keep_estimate_where_nan(refined, estimate))
        }
    }

    #[cfg(target_feature = "sse4.1")]
    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { SseVector(_mm_floor_ps(self.0)) }
    }

    #[cfg(target_feature = "sse4.1")]
    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { SseVector(_mm_ceil_ps(self.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { SseVector(_mm_min_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { SseVector(_mm_max_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f32 {
        unsafe {
            // [a, b, c, d] -> [b, a, d, c]
            let shuf = _mm_shuffle_ps::<0b10_11_00_01>(self.0, self.0);
            let sums = _mm_add_ps(self.0, shuf);
            let high = _mm_movehl_ps(shuf, sums);
            _mm_cvtss_f32(_mm_add_ss(sums, high))
        }
    }

    #[inline(always)]
    fn horizontal_min(self) -> f32 {
        unsafe {
            let shuf = _mm_shuffle_ps::<0b10_11_00_01>(self.0, self.0);
            let mins = _mm_min_ps(self.0, shuf);
            let high = _mm_movehl_ps(shuf, mins);
            _mm_cvtss_f32(_mm_min_ss(mins, high))
        }
    }

    #[inline(always)]
    fn horizontal_max(self) -> f32 {
        unsafe {
            let shuf = _mm_shuffle_ps::<0b10_11_00_01>(self.0, self.0);
            let maxs = _mm_max_ps(self.0, shuf);
            let high = _mm_movehl_ps(shuf, maxs);
            _mm_cvtss_f32(_mm_max_ss(maxs, high))
        }
    }
}

impl SimdVector for SseVector64 {
    type Scalar = f64;

    const LANES: usize = 2;
    const ALIGNMENT: usize = 16;

    #[inline(always)]
    fn splat(value: f64) -> Self {
        unsafe { SseVector64(_mm_set1_pd(value)) }
    }

    #[inline(always)]
    fn zero() -> Self {
        unsafe { SseVector64(_mm_setzero_pd()) }
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
    fn set_slope(&mut self, start: f64, slope: f64) -> f64 {
        unsafe { self.0 = _mm_setr_pd(start, start + slope) };
        start + slope * 2.0
    }

    #[inline(always)]
    fn set_exp(&mut self, start: f64, curve: f64) -> f64 {
        let v1 = start * curve;
        unsafe { self.0 = _mm_setr_pd(start, v1) };
        v1 * curve
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f64) -> Self {
        SseVector64(_mm_loadu_pd(ptr))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f64) -> Self {
        SseVector64(_mm_load_pd(ptr))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f64) {
        _mm_storeu_pd(ptr, self.0)
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut f64) {
        _mm_store_pd(ptr, self.0)
    }

    #[inline(always)]
    unsafe fn store_aligned_stream(self, ptr: *mut f64) {
        _mm_stream_pd(ptr, self.0)
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        unsafe { SseVector64(_mm_andnot_pd(rhs.0, self.0)) }
    }

    #[inline(always)]
    fn mask_lt(self, rhs: Self) -> Self {
        unsafe { SseVector64(_mm_cmplt_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_le(self, rhs: Self) -> Self {
        unsafe { SseVector64(_mm_cmple_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_gt(self, rhs: Self) -> Self {
        unsafe { SseVector64(_mm_cmpgt_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_ge(self, rhs: Self) -> Self {
        unsafe { SseVector64(_mm_cmpge_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_eq(self, rhs: Self) -> Self {
        unsafe { SseVector64(_mm_cmpeq_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mask_ne(self, rhs: Self) -> Self {
        unsafe { SseVector64(_mm_cmpneq_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(lhs: Self, rhs: Self, mask: Self) -> Self {
        unsafe {
            SseVector64(_mm_or_pd(
                _mm_and_pd(mask.0, rhs.0),
                _mm_andnot_pd(mask.0, lhs.0),
            ))
        }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { SseVector64(_mm_sqrt_pd(self.0)) }
    }

    #[cfg(target_feature = "sse4.1")]
    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { SseVector64(_mm_floor_pd(self.0)) }
    }

    #[cfg(target_feature = "sse4.1")]
    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { SseVector64(_mm_ceil_pd(self.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { SseVector64(_mm_min_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { SseVector64(_mm_max_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f64 {
        unsafe {
            let high = _mm_unpackhi_pd(self.0, self.0);
            _mm_cvtsd_f64(_mm_add_sd(self.0, high))
        }
    }

    #[inline(always)]
    fn horizontal_min(self) -> f64 {
        unsafe {
            let high = _mm_unpackhi_pd(self.0, self.0);
            _mm_cvtsd_f64(_mm_min_sd(self.0, high))
        }
    }

    #[inline(always)]
    fn horizontal_max(self) -> f64 {
        unsafe {
            let high = _mm_unpackhi_pd(self.0, self.0);
            _mm_cvtsd_f64(_mm_max_sd(self.0, high))
        }
    }
}
