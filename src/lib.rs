//! # topr
//!
//! Axis-wise ordering and index-based data movement for dense numeric
//! tensors: stable [`argsort`](ops::argsort), [`gather`](ops::gather), and
//! the gradient masks [`gather_backward`](ops::gather_backward) and
//! [`clamp_backward`](ops::clamp_backward).
//!
//! Tensors are dense, own their buffer, and carry a runtime dtype plus a
//! strided layout, so transposed views go through the same operations as
//! contiguous data. Sorting parallelizes over rows with `rayon` (on by
//! default; disable the `rayon` feature for a sequential build).
//!
//! ## Example
//!
//! ```
//! use topr::prelude::*;
//!
//! let t = Tensor::from_vec(vec![1.0f64, 5.0, 0.0, 3.0, 9.0, 8.0], vec![2, 3])?;
//! let order = argsort(&t, 1)?;
//! assert_eq!(order.to_vec::<i64>()?, vec![2, 0, 1, 0, 2, 1]);
//!
//! let sorted = gather(&t, 1, &order)?;
//! assert_eq!(sorted.to_vec::<f64>()?, vec![0.0, 1.0, 5.0, 3.0, 8.0, 9.0]);
//! # Ok::<(), topr::Error>(())
//! ```

#![warn(missing_docs)]

pub mod dtype;
pub mod error;
pub mod ops;
pub mod tensor;

pub use dtype::{DType, Element, Scalar};
pub use error::{Error, Result};
pub use tensor::Tensor;

/// Commonly used types and operations
pub mod prelude {
    pub use crate::dtype::{DType, Element, Scalar};
    pub use crate::error::{Error, Result};
    pub use crate::ops::{argsort, clamp_backward, gather, gather_backward};
    pub use crate::tensor::{Layout, Shape, Strides, Tensor};
}
