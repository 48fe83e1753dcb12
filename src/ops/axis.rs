//! Axis decomposition and per-row offset computation
//!
//! Every axis-wise operation in this crate views a tensor as a collection of
//! independent 1-D rows along the chosen axis. A tensor of shape
//! `[s0, .., s(n-1)]` decomposes at `axis` into `outer * inner` rows of
//! `dim_size` elements, where `outer` is the product of extents before the
//! axis and `inner` the product after it. The rows exactly partition the
//! logical elements of the tensor.

use crate::error::{Error, Result};
use crate::tensor::Layout;

/// The outer/inner decomposition of a shape around one axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisSpec {
    /// The axis the rows run along
    pub axis: usize,
    /// Extent of the axis dimension (row length)
    pub dim_size: usize,
    /// Product of extents before the axis
    pub outer: usize,
    /// Product of extents after the axis
    pub inner: usize,
}

impl AxisSpec {
    /// Decompose a shape around an axis.
    ///
    /// Fails with [`Error::AxisOutOfRange`] when `axis >= shape.len()`;
    /// rank-0 tensors therefore have no valid axis.
    pub fn decompose(shape: &[usize], axis: usize) -> Result<Self> {
        if axis >= shape.len() {
            return Err(Error::axis_out_of_range(axis, shape.len()));
        }
        Ok(Self {
            axis,
            dim_size: shape[axis],
            outer: shape[..axis].iter().product(),
            inner: shape[axis + 1..].iter().product(),
        })
    }

    /// Number of rows the tensor decomposes into.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.outer * self.inner
    }
}

/// Maps a row number to the buffer offsets of that row's elements
///
/// Row `r` has outer component `r / inner` and inner component `r % inner`.
/// For contiguous layouts the offsets follow directly from the decomposition
/// arithmetic; for strided layouts the non-axis coordinate is held fixed
/// while the axis coordinate is enumerated through the strides.
#[derive(Clone, Copy, Debug)]
pub struct RowIndexer<'a> {
    layout: &'a Layout,
    spec: AxisSpec,
    contiguous: bool,
}

impl<'a> RowIndexer<'a> {
    /// Create an indexer for one layout/axis pair.
    pub fn new(layout: &'a Layout, spec: AxisSpec) -> Self {
        Self {
            layout,
            spec,
            contiguous: layout.is_contiguous(),
        }
    }

    /// The decomposition this indexer was built from.
    #[inline]
    pub fn spec(&self) -> &AxisSpec {
        &self.spec
    }

    /// Buffer offsets of the `dim_size` elements of row `row`, in axis order.
    pub fn offsets(&self, row: usize) -> Vec<usize> {
        debug_assert!(row < self.spec.num_rows());
        if self.contiguous {
            let outer_comp = row / self.spec.inner;
            let inner_comp = row % self.spec.inner;
            let base = outer_comp * self.spec.dim_size * self.spec.inner + inner_comp;
            (0..self.spec.dim_size)
                .map(|k| base + k * self.spec.inner)
                .collect()
        } else {
            self.strided_offsets(row)
        }
    }

    fn strided_offsets(&self, row: usize) -> Vec<usize> {
        let shape = self.layout.shape();
        let strides = self.layout.strides();
        let axis = self.spec.axis;

        // Base offset of the row: the fixed non-axis coordinate mapped
        // through the strides. Row-major digit order on each side of the
        // axis matches the decomposition arithmetic.
        let mut base = 0isize;
        let mut rem = row % self.spec.inner;
        for d in (axis + 1..shape.ndim()).rev() {
            base += (rem % shape[d]) as isize * strides[d];
            rem /= shape[d];
        }
        let mut rem = row / self.spec.inner;
        for d in (0..axis).rev() {
            base += (rem % shape[d]) as isize * strides[d];
            rem /= shape[d];
        }

        (0..self.spec.dim_size)
            .map(|k| (base + k as isize * strides[axis]) as usize)
            .collect()
    }
}
