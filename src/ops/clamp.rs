//! Inside-range mask for the gradient of clamp

use crate::dtype::{Element, Scalar};
use crate::error::{Error, Result};
use crate::tensor::Tensor;

/// Gradient mask of a clamp to `[min, max]`.
///
/// Each output element is `1` where the input lies inside the bounds
/// (inclusive on both ends) and `0` where the clamp would have flattened
/// it. `min` and `max` must carry exactly the tensor's dtype. Float outputs
/// keep the input dtype; integer inputs of any width produce an `i64` mask,
/// the same normalization gather applies. Float NaN is never inside the
/// range and masks to `0`.
pub fn clamp_backward(t: &Tensor, min: Scalar, max: Scalar) -> Result<Tensor> {
    if min.dtype() != t.dtype() {
        return Err(Error::dtype_mismatch(t.dtype(), min.dtype()));
    }
    if max.dtype() != t.dtype() {
        return Err(Error::dtype_mismatch(t.dtype(), max.dtype()));
    }
    match (min, max) {
        (Scalar::F64(lo), Scalar::F64(hi)) => {
            let mask = range_mask(t.to_vec::<f64>()?, lo, hi);
            Tensor::from_vec(mask, t.shape().clone())
        }
        (Scalar::F32(lo), Scalar::F32(hi)) => {
            let mask = range_mask(t.to_vec::<f32>()?, lo, hi);
            Tensor::from_vec(mask, t.shape().clone())
        }
        _ => integer_mask(t, min, max),
    }
}

/// Per-element inside-range map. Elements are independent, so the parallel
/// and sequential paths are the same map over the logical order.
fn range_mask<T: Element>(values: Vec<T>, lo: T, hi: T) -> Vec<T> {
    let inside = |v: &T| {
        if lo <= *v && *v <= hi {
            T::one()
        } else {
            T::zero()
        }
    };
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        values.par_iter().map(inside).collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        values.iter().map(inside).collect()
    }
}

/// Integer inputs compare in the platform index domain, so every width
/// shares one path and the mask comes out as `i64`.
fn integer_mask(t: &Tensor, min: Scalar, max: Scalar) -> Result<Tensor> {
    let lo = min.to_index()?;
    let hi = max.to_index()?;
    let mut out = Vec::with_capacity(t.numel());
    for i in 0..t.numel() {
        let coord = t.layout().linear_to_coord(i);
        let v = t.at(&coord)?.to_index()?;
        out.push(i64::from(lo <= v && v <= hi));
    }
    Tensor::from_vec(out, t.shape().clone())
}
