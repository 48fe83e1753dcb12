//! Axis-wise tensor operations
//!
//! All operations here share one view of the tensor: the axis decomposition
//! in [`axis`], which splits a tensor into independent rows along the chosen
//! dimension. Sorting fans rows out across threads; gather and the backward
//! masks walk coordinates built from the same arithmetic.

pub mod axis;

mod clamp;
mod gather;
mod sort;

pub use axis::{AxisSpec, RowIndexer};
pub use clamp::clamp_backward;
pub use gather::{gather, gather_backward};
pub use sort::argsort;
