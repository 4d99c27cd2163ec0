//! Per-lane fallback dispatch
//!
//! When a backend has no native instruction for an operation, the default
//! method on [`SimdVector`] decomposes the vector into lanes, applies the
//! matching scalar primitive from [`crate::scalar`] to each one and reassembles
//! the result. Call syntax is identical either way, so kernels never
//! special-case backend capability.
//!
//! The cost is `LANES` scalar calls plus `LANES` extractions and insertions.
//! That is only paid for operations without hardware support (typically the
//! transcendental set), never for the arithmetic hot path.
//!
//! Fallbacks always receive a genuine scalar function. Passing a vector method
//! back in here would recurse into the same default.
//!
//! # Example
//!
//! ```rust
//! use rigel_vecmath::fallback::map_lanes;
//! use rigel_vecmath::{scalar, ScalarVector, SimdVector};
//!
//! let v = ScalarVector::<f32, 4>::from_array([0.0, 1.0, 4.0, 9.0]);
//! let roots = map_lanes(v, scalar::sqrt);
//! assert_eq!(roots.to_array(), [0.0, 1.0, 2.0, 3.0]);
//! ```

use crate::traits::{Sample, SimdVector};

/// Apply `f` to every lane
#[inline(always)]
pub fn map_lanes<V, F>(v: V, f: F) -> V
where
    V: SimdVector,
    F: Fn(V::Scalar) -> V::Scalar,
{
    let mut out = v;
    for i in 0..V::LANES {
        out.set(i, f(v.get(i)));
    }
    out
}

/// Apply `f` to every pair of corresponding lanes
#[inline(always)]
pub fn zip_lanes<V, F>(a: V, b: V, f: F) -> V
where
    V: SimdVector,
    F: Fn(V::Scalar, V::Scalar) -> V::Scalar,
{
    let mut out = a;
    for i in 0..V::LANES {
        out.set(i, f(a.get(i), b.get(i)));
    }
    out
}

/// Collapse all lanes left to right with `f`
#[inline(always)]
pub fn fold_lanes<V, F>(v: V, f: F) -> V::Scalar
where
    V: SimdVector,
    F: Fn(V::Scalar, V::Scalar) -> V::Scalar,
{
    let mut acc = v.get(0);
    for i in 1..V::LANES {
        acc = f(acc, v.get(i));
    }
    acc
}

/// All bits set for `true`, zero for `false`
#[inline(always)]
pub fn lane_mask<T: Sample>(condition: bool) -> T {
    if condition {
        T::all_bits()
    } else {
        T::ZERO
    }
}
