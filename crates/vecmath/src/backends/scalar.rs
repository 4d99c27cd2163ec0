//! Scalar backend implementation
//!
//! Pure-scalar emulation of a vector: `N` independent lanes held in an array
//! and processed in tight loops. It builds on every target, is the default
//! when no vector unit is targeted (or `force-scalar` is enabled), and is the
//! reference the hardware backends are tested against.
//!
//! Only construction, lane access, memory transfer and the operators are
//! implemented here. Everything else uses the trait defaults, which for this
//! backend amount to the per-lane decomposition of [`crate::fallback`].

use crate::scalar;
use crate::traits::{Sample, SimdVector};

/// Scalar vector: `N` lanes (4 by default) of `T`
///
/// # Example
///
/// ```rust
/// use rigel_vecmath::{ScalarVector, SimdVector};
///
/// let v = ScalarVector::<f32>::from_array([-2.0, 0.0, 0.0, 2.0]);
/// assert_eq!(v.sign().to_array(), [-1.0, 0.0, 0.0, 1.0]);
/// assert_eq!(v.cube().to_array(), [-8.0, 0.0, 0.0, 8.0]);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
#[repr(transparent)]
pub struct ScalarVector<T, const N: usize = 4>(pub [T; N]);

impl<T: Sample, const N: usize> ScalarVector<T, N> {
    /// Wrap an array of lanes
    #[inline(always)]
    pub const fn from_array(lanes: [T; N]) -> Self {
        ScalarVector(lanes)
    }

    /// Copy the lanes out
    #[inline(always)]
    pub fn to_array(self) -> [T; N] {
        self.0
    }

    #[inline(always)]
    fn map(self, f: impl Fn(T) -> T) -> Self {
        let mut lanes = self.0;
        for lane in lanes.iter_mut() {
            *lane = f(*lane);
        }
        ScalarVector(lanes)
    }

    #[inline(always)]
    fn zip(self, rhs: Self, f: impl Fn(T, T) -> T) -> Self {
        let mut lanes = self.0;
        for (lane, other) in lanes.iter_mut().zip(rhs.0) {
            *lane = f(*lane, other);
        }
        ScalarVector(lanes)
    }
}

#[inline(always)]
fn bits<T: Sample>(a: T, b: T, f: impl Fn(u64, u64) -> u64) -> T {
    T::from_bits64(f(a.to_bits64(), b.to_bits64()))
}

vector_operators!([T: Sample, const N: usize] ScalarVector<T, N> {
    Add::add(|a, b| a.zip(b, |x, y| x + y)),
    Sub::sub(|a, b| a.zip(b, |x, y| x - y)),
    Mul::mul(|a, b| a.zip(b, |x, y| x * y)),
    Div::div(|a, b| a.zip(b, |x, y| x / y)),
    BitAnd::bitand(|a, b| a.zip(b, |x, y| bits(x, y, |p, q| p & q))),
    BitOr::bitor(|a, b| a.zip(b, |x, y| bits(x, y, |p, q| p | q))),
    BitXor::bitxor(|a, b| a.zip(b, |x, y| bits(x, y, |p, q| p ^ q))),
});

vector_assign_operators!([T: Sample, const N: usize] ScalarVector<T, N>);

impl<T: Sample, const N: usize> core::ops::Neg for ScalarVector<T, N> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        self.map(|x| -x)
    }
}

impl<T: Sample, const N: usize> SimdVector for ScalarVector<T, N> {
    type Scalar = T;

    const LANES: usize = N;
    const ALIGNMENT: usize = core::mem::align_of::<T>();

    #[inline(always)]
    fn splat(value: T) -> Self {
        ScalarVector([value; N])
    }

    #[inline(always)]
    fn get(self, index: usize) -> T {
        self.0[index]
    }

    #[inline(always)]
    fn set(&mut self, index: usize, value: T) {
        self.0[index] = value;
    }

    #[inline(always)]
    unsafe fn load(ptr: *const T) -> Self {
        ScalarVector(core::ptr::read_unaligned(ptr as *const [T; N]))
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const T) -> Self {
        ScalarVector(core::ptr::read(ptr as *const [T; N]))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut T) {
        core::ptr::write_unaligned(ptr as *mut [T; N], self.0)
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut T) {
        core::ptr::write(ptr as *mut [T; N], self.0)
    }

    #[inline(always)]
    fn abs(self) -> Self {
        self.map(scalar::abs)
    }

    #[inline(always)]
    fn sign(self) -> Self {
        self.map(scalar::sign)
    }

    #[inline(always)]
    fn select(lhs: Self, rhs: Self, mask: Self) -> Self {
        let mut lanes = lhs.0;
        for (i, lane) in lanes.iter_mut().enumerate() {
            if mask.0[i].to_bits64() != 0 {
                *lane = rhs.0[i];
            }
        }
        ScalarVector(lanes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_arithmetic() {
        let a = ScalarVector::<f32>::splat(2.0);
        let b = ScalarVector::<f32>::splat(3.0);

        assert_eq!(a + b, ScalarVector::splat(5.0));
        assert_eq!(a - b, ScalarVector::splat(-1.0));
        assert_eq!(a * b, ScalarVector::splat(6.0));
        assert_eq!((a / b).get(0), 2.0 / 3.0);
        assert_eq!(-a, ScalarVector::splat(-2.0));
    }

    #[test]
    fn test_scalar_assign_operators() {
        let mut v = ScalarVector::<f64>::splat(1.0);
        v += ScalarVector::splat(2.0);
        v *= ScalarVector::splat(4.0);
        v -= ScalarVector::splat(2.0);
        v /= ScalarVector::splat(5.0);
        assert_eq!(v, ScalarVector::splat(2.0));
    }

    #[test]
    fn test_scalar_bitwise_uses_float_bits() {
        let v = ScalarVector::<f32>::from_array([-1.5, 2.0, -0.0, 3.0]);
        let cleared = v.andnot(ScalarVector::splat(-0.0));
        assert_eq!(cleared.to_array(), [1.5, 2.0, 0.0, 3.0]);

        let flipped = v ^ ScalarVector::splat(-0.0);
        assert_eq!(flipped.to_array(), [1.5, -2.0, 0.0, -3.0]);
    }

    #[test]
    fn test_scalar_masks_and_select() {
        let a = ScalarVector::<f32>::from_array([1.0, 5.0, 3.0, 3.0]);
        let b = ScalarVector::<f32>::from_array([2.0, 4.0, 3.0, 0.0]);

        let mask = a.mask_lt(b);
        assert_eq!(mask.0[0].to_bits(), u32::MAX);
        assert_eq!(mask.0[1].to_bits(), 0);

        assert_eq!(a.cmp_lt(b).to_array(), [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(a.cmp_le(b).to_array(), [1.0, 0.0, 1.0, 0.0]);
        assert_eq!(a.cmp_gt(b).to_array(), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(a.cmp_ge(b).to_array(), [0.0, 1.0, 1.0, 1.0]);
        assert_eq!(a.cmp_eq(b).to_array(), [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(a.cmp_ne(b).to_array(), [1.0, 1.0, 0.0, 1.0]);

        let picked = ScalarVector::select(a, b, mask);
        assert_eq!(picked.to_array(), [2.0, 5.0, 3.0, 3.0]);
    }

    #[test]
    fn test_scalar_lane_access() {
        let mut v = ScalarVector::<f64, 8>::zero();
        v.set(7, 4.0);
        assert_eq!(v.get(7), 4.0);
        assert_eq!(v.horizontal_sum(), 4.0);
        v.clear();
        assert_eq!(v, ScalarVector::zero());
    }

    #[test]
    fn test_scalar_unaligned_load_store() {
        let data = [0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0];
        let v = ScalarVector::<f32>::from_slice(&data[1..]);
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 4.0]);

        let mut out = [0.0f32; 6];
        v.to_slice(&mut out[2..]);
        assert_eq!(out, [0.0, 0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "Slice too short")]
    fn test_scalar_short_slice_panics() {
        let data = [1.0f32; 3];
        let _ = ScalarVector::<f32>::from_slice(&data);
    }

    #[test]
    fn test_scalar_slope_and_exp() {
        let mut v = ScalarVector::<f32>::zero();
        let next = v.set_slope(0.0, 0.25);
        assert_eq!(v.to_array(), [0.0, 0.25, 0.5, 0.75]);
        assert_eq!(next, 1.0);

        let next = v.set_exp(1.0, 2.0);
        assert_eq!(v.to_array(), [1.0, 2.0, 4.0, 8.0]);
        assert_eq!(next, 16.0);
    }

    #[test]
    fn test_scalar_horizontal() {
        let v = ScalarVector::<f32>::from_array([5.0, -2.0, 9.0, 1.0]);
        assert_eq!(v.horizontal_sum(), 13.0);
        assert_eq!(v.horizontal_max(), 9.0);
        assert_eq!(v.horizontal_min(), -2.0);
    }

    #[test]
    fn test_single_lane_vector() {
        let v = ScalarVector::<f64, 1>::splat(-9.0);
        assert_eq!(v.abs().sqrt().get(0), 3.0);
        assert_eq!(v.signed_sqrt().get(0), -3.0);
    }
}
