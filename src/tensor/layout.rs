//! Layout: shape plus strides, with coordinate/offset arithmetic

use super::shape::{Shape, STACK_DIMS};
use super::strides::Strides;
use crate::error::{Error, Result};
use smallvec::SmallVec;

/// A multi-dimensional coordinate, stack-allocated for low ranks.
pub type Coord = SmallVec<[usize; STACK_DIMS]>;

/// Memory layout of a tensor: its shape together with element strides.
///
/// The layout decides how a logical coordinate maps to an offset into the
/// backing buffer. Row-major contiguous layouts are the common case; strided
/// layouts cover views such as transposes without copying data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    shape: Shape,
    strides: Strides,
}

impl Layout {
    /// Row-major contiguous layout for a shape.
    pub fn contiguous(shape: impl Into<Shape>) -> Self {
        let shape = shape.into();
        let strides = Strides::contiguous(&shape);
        Self { shape, strides }
    }

    /// Layout with explicit strides.
    ///
    /// Strides must have the same rank as the shape and must keep every
    /// addressable element inside `[0, buffer_len)`.
    pub fn with_strides(
        shape: impl Into<Shape>,
        strides: impl Into<Strides>,
        buffer_len: usize,
    ) -> Result<Self> {
        let shape = shape.into();
        let strides = strides.into();
        if shape.ndim() != strides.len() {
            return Err(Error::InvalidStrides {
                shape: shape.to_vec(),
                strides: strides.to_vec(),
            });
        }
        if shape.numel() > 0 {
            let mut min = 0isize;
            let mut max = 0isize;
            for (&dim, &stride) in shape.iter().zip(strides.iter()) {
                let reach = stride * (dim as isize - 1);
                if reach < 0 {
                    min += reach;
                } else {
                    max += reach;
                }
            }
            if min < 0 || max as usize >= buffer_len {
                return Err(Error::InvalidStrides {
                    shape: shape.to_vec(),
                    strides: strides.to_vec(),
                });
            }
        }
        Ok(Self { shape, strides })
    }

    /// The shape of this layout.
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The strides of this layout.
    #[inline]
    pub fn strides(&self) -> &Strides {
        &self.strides
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Total number of logical elements.
    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    /// Whether this layout is row-major contiguous.
    pub fn is_contiguous(&self) -> bool {
        self.strides == Strides::contiguous(&self.shape)
    }

    /// Convert a logical linear index to a coordinate (row-major order).
    pub fn linear_to_coord(&self, mut linear: usize) -> Coord {
        let mut coord = Coord::from_elem(0, self.ndim());
        for d in (0..self.ndim()).rev() {
            coord[d] = linear % self.shape[d];
            linear /= self.shape[d];
        }
        coord
    }

    /// Map a coordinate to its offset into the backing buffer.
    ///
    /// Checks rank and per-dimension bounds.
    pub fn offset_of(&self, coord: &[usize]) -> Result<usize> {
        if coord.len() != self.ndim() {
            return Err(Error::RankMismatch {
                tensor: self.ndim(),
                indices: coord.len(),
            });
        }
        let mut offset = 0isize;
        for (d, (&c, &stride)) in coord.iter().zip(self.strides.iter()).enumerate() {
            if c >= self.shape[d] {
                return Err(Error::IndexOutOfBounds {
                    index: c as i64,
                    dim: d,
                    size: self.shape[d],
                });
            }
            offset += c as isize * stride;
        }
        // with_strides guarantees every in-bounds coordinate maps >= 0
        Ok(offset as usize)
    }
}
