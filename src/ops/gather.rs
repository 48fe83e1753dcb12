//! Axis-wise gather and its backward selection mask

use crate::dtype::{DType, Scalar};
use crate::error::{Error, Result};
use crate::ops::axis::AxisSpec;
use crate::tensor::Tensor;

/// Validate the source/indices geometry shared by gather and its backward.
///
/// Checks run in a fixed order so callers see deterministic errors:
/// indices dtype, then rank, then per-dimension extents, then the axis.
/// An indices extent may be smaller than the source extent on non-axis
/// dimensions (a partial gather) but never larger.
fn validate_gather_geometry(source: &Tensor, axis: usize, indices: &Tensor) -> Result<AxisSpec> {
    if !indices.dtype().is_int() {
        return Err(Error::dtype_mismatch(DType::index(), indices.dtype()));
    }
    if source.ndim() != indices.ndim() {
        return Err(Error::RankMismatch {
            tensor: source.ndim(),
            indices: indices.ndim(),
        });
    }
    for d in 0..indices.ndim() {
        if d != axis && indices.shape()[d] > source.shape()[d] {
            return Err(Error::ShapeMismatch {
                dim: d,
                tensor: source.shape().to_vec(),
                indices: indices.shape().to_vec(),
            });
        }
    }
    AxisSpec::decompose(indices.shape(), axis)
}

/// Read one index value and resolve it against the axis extent.
fn resolve_index(indices: &Tensor, coord: &[usize], axis: usize, extent: usize) -> Result<usize> {
    let idx = indices.at(coord)?.to_index()?;
    usize::try_from(idx)
        .ok()
        .filter(|&pos| pos < extent)
        .ok_or(Error::IndexOutOfBounds {
            index: idx,
            dim: axis,
            size: extent,
        })
}

/// Gather elements of `source` along `axis` using `indices`.
///
/// The result has the shape of `indices`. For every coordinate `c` of
/// `indices`, the output holds `source[c']` where `c'` is `c` with its axis
/// component replaced by the index value found at `c`. Index values must lie
/// in `[0, source.shape()[axis])`; any violation aborts the whole call with
/// [`Error::IndexOutOfBounds`] and no partial result.
///
/// Float sources keep their dtype. Integer sources of any width produce an
/// `i64` result, so narrow integers collapse to the one canonical index
/// kind. The conversion is checked; a `u64` value above `i64::MAX` fails
/// with [`Error::IndexOverflow`].
pub fn gather(source: &Tensor, axis: usize, indices: &Tensor) -> Result<Tensor> {
    let spec = validate_gather_geometry(source, axis, indices)?;
    let extent = source.shape()[spec.axis];
    let normalize = source.dtype().is_int();
    let out_dtype = if normalize {
        DType::index()
    } else {
        source.dtype()
    };

    let mut out = Tensor::zeros(indices.shape().clone(), out_dtype);
    for i in 0..indices.numel() {
        let coord = indices.layout().linear_to_coord(i);
        let pos = resolve_index(indices, &coord, spec.axis, extent)?;
        let mut src = coord.clone();
        src[spec.axis] = pos;
        let value = source.at(&src)?;
        let value = if normalize {
            Scalar::I64(value.to_index()?)
        } else {
            value
        };
        out.set_at(&coord, value)?;
    }
    Ok(out)
}

/// Selection mask for the gradient of [`gather`].
///
/// Returns a zero tensor shaped like `source` with `1.0` at every source
/// location some index entry selects. Repeated index entries write the same
/// `1.0` again, so the mask stays idempotent rather than accumulating
/// counts. Only `f64` and `f32` sources are accepted; integer tensors carry
/// no gradient.
pub fn gather_backward(source: &Tensor, axis: usize, indices: &Tensor) -> Result<Tensor> {
    let one = match source.dtype() {
        DType::F64 => Scalar::F64(1.0),
        DType::F32 => Scalar::F32(1.0),
        other => return Err(Error::unsupported_dtype(other, "gather_backward")),
    };
    let spec = validate_gather_geometry(source, axis, indices)?;
    let extent = source.shape()[spec.axis];

    let mut mask = Tensor::zeros(source.shape().clone(), source.dtype());
    for i in 0..indices.numel() {
        let coord = indices.layout().linear_to_coord(i);
        let pos = resolve_index(indices, &coord, spec.axis, extent)?;
        let mut src = coord.clone();
        src[spec.axis] = pos;
        mask.set_at(&src, one)?;
    }
    Ok(mask)
}
