//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};
use std::cmp::Ordering;

/// Trait for types that can be elements of a tensor
///
/// This trait connects Rust's type system to topr's runtime dtype system.
/// It's implemented for all primitive numeric types the crate supports.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `Pod + Zeroable` - Safe memory transmutation (bytemuck)
/// - `PartialOrd` - Ordering for argsort and clamp comparisons
pub trait Element:
    Copy + Send + Sync + Pod + Zeroable + 'static + PartialOrd + std::fmt::Debug
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;

    /// Total ordering over every bit pattern, NaN included.
    ///
    /// Integers use their natural `Ord`; floats use IEEE 754 `totalOrder`,
    /// which places negative NaN before `-inf` and positive NaN after
    /// `+inf`. Sort comparators must go through this instead of
    /// `partial_cmp`, which is not a total order in the presence of NaN.
    fn cmp_total(&self, other: &Self) -> Ordering;
}

macro_rules! impl_element {
    (float $ty:ty, $dtype:expr) => {
        impl Element for $ty {
            const DTYPE: DType = $dtype;

            #[inline]
            fn zero() -> Self {
                0.0
            }

            #[inline]
            fn one() -> Self {
                1.0
            }

            #[inline]
            fn cmp_total(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }
        }
    };
    (int $ty:ty, $dtype:expr) => {
        impl Element for $ty {
            const DTYPE: DType = $dtype;

            #[inline]
            fn zero() -> Self {
                0
            }

            #[inline]
            fn one() -> Self {
                1
            }

            #[inline]
            fn cmp_total(&self, other: &Self) -> Ordering {
                Ord::cmp(self, other)
            }
        }
    };
}

impl_element!(float f64, DType::F64);
impl_element!(float f32, DType::F32);
impl_element!(int i64, DType::I64);
impl_element!(int i32, DType::I32);
impl_element!(int i16, DType::I16);
impl_element!(int i8, DType::I8);
impl_element!(int u64, DType::U64);
impl_element!(int u32, DType::U32);
impl_element!(int u16, DType::U16);
impl_element!(int u8, DType::U8);
