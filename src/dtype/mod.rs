//! Data type system for topr tensors
//!
//! This module provides the `DType` enum representing all supported element
//! kinds, the `Scalar` value carrier used at the per-element interface, and
//! the `Element` trait connecting Rust types to runtime dtypes.

mod element;

pub use element::Element;

use crate::error::{Error, Result};
use std::fmt;

/// Data types supported by topr tensors
///
/// This enum represents the element type of a tensor at runtime. Using a
/// closed tagged union (rather than generics on the tensor type) allows
/// runtime type selection while a single generic row-processing function,
/// reached through [`dispatch_dtype!`](crate::dispatch_dtype), serves all
/// supported kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    /// 64-bit floating point
    F64,
    /// 32-bit floating point
    F32,
    /// 64-bit signed integer (the platform index type)
    I64,
    /// 32-bit signed integer
    I32,
    /// 16-bit signed integer
    I16,
    /// 8-bit signed integer
    I8,
    /// 64-bit unsigned integer
    U64,
    /// 32-bit unsigned integer
    U32,
    /// 16-bit unsigned integer
    U16,
    /// 8-bit unsigned integer
    U8,
}

impl DType {
    /// Returns true if this is a floating point type
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F64 | Self::F32)
    }

    /// Returns true if this is a signed integer type
    #[inline]
    pub const fn is_signed_int(self) -> bool {
        matches!(self, Self::I64 | Self::I32 | Self::I16 | Self::I8)
    }

    /// Returns true if this is an unsigned integer type
    #[inline]
    pub const fn is_unsigned_int(self) -> bool {
        matches!(self, Self::U64 | Self::U32 | Self::U16 | Self::U8)
    }

    /// Returns true if this is any integer type (signed or unsigned)
    #[inline]
    pub const fn is_int(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int()
    }

    /// The dtype used for index tensors and normalized integer results
    #[inline]
    pub const fn index() -> Self {
        Self::I64
    }

    /// Short name for display (e.g., "f32", "i64")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
            Self::I64 => "i64",
            Self::I32 => "i32",
            Self::I16 => "i16",
            Self::I8 => "i8",
            Self::U64 => "u64",
            Self::U32 => "u32",
            Self::U16 => "u16",
            Self::U8 => "u8",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// A single tensor element of any supported kind
///
/// `Scalar` is the currency of the per-element collaborator interface
/// (`Tensor::at` / `Tensor::set_at`) and of scalar parameters such as the
/// clamp bounds. It also carries the lossless integer-to-index conversion
/// contract used by gather and the integer clamp path.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Scalar {
    /// 64-bit float value
    F64(f64),
    /// 32-bit float value
    F32(f32),
    /// 64-bit signed value
    I64(i64),
    /// 32-bit signed value
    I32(i32),
    /// 16-bit signed value
    I16(i16),
    /// 8-bit signed value
    I8(i8),
    /// 64-bit unsigned value
    U64(u64),
    /// 32-bit unsigned value
    U32(u32),
    /// 16-bit unsigned value
    U16(u16),
    /// 8-bit unsigned value
    U8(u8),
}

impl Scalar {
    /// The dtype of this scalar
    pub const fn dtype(&self) -> DType {
        match self {
            Self::F64(_) => DType::F64,
            Self::F32(_) => DType::F32,
            Self::I64(_) => DType::I64,
            Self::I32(_) => DType::I32,
            Self::I16(_) => DType::I16,
            Self::I8(_) => DType::I8,
            Self::U64(_) => DType::U64,
            Self::U32(_) => DType::U32,
            Self::U16(_) => DType::U16,
            Self::U8(_) => DType::U8,
        }
    }

    /// Convert an integer-kind scalar losslessly to the platform index type
    ///
    /// Fails with [`Error::IndexOverflow`] when a `u64` value exceeds
    /// `i64::MAX`, and with [`Error::DTypeMismatch`] for float kinds.
    pub fn to_index(&self) -> Result<i64> {
        match *self {
            Self::I64(v) => Ok(v),
            Self::I32(v) => Ok(v as i64),
            Self::I16(v) => Ok(v as i64),
            Self::I8(v) => Ok(v as i64),
            Self::U64(v) => i64::try_from(v).map_err(|_| Error::IndexOverflow { value: v }),
            Self::U32(v) => Ok(v as i64),
            Self::U16(v) => Ok(v as i64),
            Self::U8(v) => Ok(v as i64),
            Self::F64(_) | Self::F32(_) => Err(Error::DTypeMismatch {
                lhs: DType::index(),
                rhs: self.dtype(),
            }),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
        }
    }
}

/// Macro for dtype dispatch to typed generic calls
///
/// Matches on a [`DType`] and executes the code block with `$T` bound to the
/// corresponding Rust type. Usage:
/// `dispatch_dtype!(dtype, T => { code using T })`
#[macro_export]
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block) => {
        match $dtype {
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::I64 => {
                type $T = i64;
                $body
            }
            $crate::dtype::DType::I32 => {
                type $T = i32;
                $body
            }
            $crate::dtype::DType::I16 => {
                type $T = i16;
                $body
            }
            $crate::dtype::DType::I8 => {
                type $T = i8;
                $body
            }
            $crate::dtype::DType::U64 => {
                type $T = u64;
                $body
            }
            $crate::dtype::DType::U32 => {
                type $T = u32;
                $body
            }
            $crate::dtype::DType::U16 => {
                type $T = u16;
                $body
            }
            $crate::dtype::DType::U8 => {
                type $T = u8;
                $body
            }
        }
    };
}
