//! Error types for topr

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using topr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in topr operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Axis index is not smaller than the tensor rank
    #[error("Axis {axis} out of range for tensor with {ndim} dimensions")]
    AxisOutOfRange {
        /// The invalid axis
        axis: usize,
        /// Number of dimensions
        ndim: usize,
    },

    /// Unsupported dtype for an operation
    #[error("Unsupported dtype {dtype} for operation '{op}'")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },

    /// Tensor and indices disagree on the number of dimensions
    #[error("Rank mismatch: tensor has {tensor} dimensions, indices has {indices}")]
    RankMismatch {
        /// Rank of the source tensor
        tensor: usize,
        /// Rank of the indices tensor
        indices: usize,
    },

    /// Indices extent exceeds the source extent on a non-axis dimension
    #[error(
        "Shape mismatch at dimension {dim}: indices shape {indices:?} must not \
         exceed tensor shape {tensor:?} outside the gather axis"
    )]
    ShapeMismatch {
        /// Dimension where the mismatch was found
        dim: usize,
        /// Shape of the source tensor
        tensor: Vec<usize>,
        /// Shape of the indices tensor
        indices: Vec<usize>,
    },

    /// DType mismatch between operands
    #[error("DType mismatch: {lhs} vs {rhs}")]
    DTypeMismatch {
        /// Expected dtype
        lhs: DType,
        /// Actual dtype
        rhs: DType,
    },

    /// An integer value cannot be represented losslessly as an i64 index
    #[error("Index value {value} cannot be represented as a platform index")]
    IndexOverflow {
        /// The offending value
        value: u64,
    },

    /// A coordinate component falls outside the tensor bounds
    #[error("Index {index} out of bounds for dimension {dim} of size {size}")]
    IndexOutOfBounds {
        /// The invalid index (may be negative when taken from an index tensor)
        index: i64,
        /// Dimension being indexed
        dim: usize,
        /// Size of that dimension
        size: usize,
    },

    /// Backing buffer length does not match the element count of the shape
    #[error("Buffer of length {len} does not match shape {shape:?} ({expected} elements)")]
    BufferMismatch {
        /// Provided buffer length
        len: usize,
        /// Element count implied by the shape
        expected: usize,
        /// The shape
        shape: Vec<usize>,
    },

    /// Strides address memory outside the backing buffer
    #[error("Strides {strides:?} are not valid for shape {shape:?}")]
    InvalidStrides {
        /// The shape
        shape: Vec<usize>,
        /// The offending strides
        strides: Vec<isize>,
    },
}

impl Error {
    /// Create an axis-out-of-range error
    pub fn axis_out_of_range(axis: usize, ndim: usize) -> Self {
        Self::AxisOutOfRange { axis, ndim }
    }

    /// Create an unsupported dtype error
    pub fn unsupported_dtype(dtype: DType, op: &'static str) -> Self {
        Self::UnsupportedDType { dtype, op }
    }

    /// Create a dtype mismatch error
    pub fn dtype_mismatch(lhs: DType, rhs: DType) -> Self {
        Self::DTypeMismatch { lhs, rhs }
    }
}
