//! Dense tensor type with typed storage and strided layouts

mod layout;
mod shape;
mod strides;

pub use layout::{Coord, Layout};
pub use shape::Shape;
pub use strides::Strides;

use crate::dtype::{DType, Element, Scalar};
use crate::error::{Error, Result};

/// Typed backing storage for a tensor
///
/// A closed union of owned vectors, one variant per supported dtype. Keeping
/// the buffer in its native type (instead of raw bytes) lets `as_slice` hand
/// out `&[T]` views without alignment concerns.
#[derive(Clone, Debug)]
pub enum TensorData {
    /// f64 buffer
    F64(Vec<f64>),
    /// f32 buffer
    F32(Vec<f32>),
    /// i64 buffer
    I64(Vec<i64>),
    /// i32 buffer
    I32(Vec<i32>),
    /// i16 buffer
    I16(Vec<i16>),
    /// i8 buffer
    I8(Vec<i8>),
    /// u64 buffer
    U64(Vec<u64>),
    /// u32 buffer
    U32(Vec<u32>),
    /// u16 buffer
    U16(Vec<u16>),
    /// u8 buffer
    U8(Vec<u8>),
}

macro_rules! impl_tensor_data_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for TensorData {
                fn from(value: Vec<$ty>) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_tensor_data_from!(
    f64 => F64, f32 => F32,
    i64 => I64, i32 => I32, i16 => I16, i8 => I8,
    u64 => U64, u32 => U32, u16 => U16, u8 => U8,
);

impl TensorData {
    /// The dtype of the stored elements
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

    /// Number of elements in the backing buffer
    pub fn len(&self) -> usize {
        match self {
            Self::F64(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::I64(v) => v.len(),
            Self::I32(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::I8(v) => v.len(),
            Self::U64(v) => v.len(),
            Self::U32(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::U8(v) => v.len(),
        }
    }

    /// Whether the backing buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Typed view of the buffer
    ///
    /// Fails with [`Error::DTypeMismatch`] when `T` does not match the
    /// stored dtype.
    pub fn as_slice<T: Element>(&self) -> Result<&[T]> {
        macro_rules! view {
            ($v:expr) => {
                if T::DTYPE == self.dtype() {
                    Ok(bytemuck::cast_slice($v.as_slice()))
                } else {
                    Err(Error::dtype_mismatch(T::DTYPE, self.dtype()))
                }
            };
        }
        match self {
            Self::F64(v) => view!(v),
            Self::F32(v) => view!(v),
            Self::I64(v) => view!(v),
            Self::I32(v) => view!(v),
            Self::I16(v) => view!(v),
            Self::I8(v) => view!(v),
            Self::U64(v) => view!(v),
            Self::U32(v) => view!(v),
            Self::U16(v) => view!(v),
            Self::U8(v) => view!(v),
        }
    }

    /// Read the element at a buffer offset as a [`Scalar`]
    fn get(&self, offset: usize) -> Scalar {
        match self {
            Self::F64(v) => Scalar::F64(v[offset]),
            Self::F32(v) => Scalar::F32(v[offset]),
            Self::I64(v) => Scalar::I64(v[offset]),
            Self::I32(v) => Scalar::I32(v[offset]),
            Self::I16(v) => Scalar::I16(v[offset]),
            Self::I8(v) => Scalar::I8(v[offset]),
            Self::U64(v) => Scalar::U64(v[offset]),
            Self::U32(v) => Scalar::U32(v[offset]),
            Self::U16(v) => Scalar::U16(v[offset]),
            Self::U8(v) => Scalar::U8(v[offset]),
        }
    }

    /// Write a scalar at a buffer offset, requiring an exact dtype match
    fn set(&mut self, offset: usize, value: Scalar) -> Result<()> {
        match (self, value) {
            (Self::F64(v), Scalar::F64(x)) => v[offset] = x,
            (Self::F32(v), Scalar::F32(x)) => v[offset] = x,
            (Self::I64(v), Scalar::I64(x)) => v[offset] = x,
            (Self::I32(v), Scalar::I32(x)) => v[offset] = x,
            (Self::I16(v), Scalar::I16(x)) => v[offset] = x,
            (Self::I8(v), Scalar::I8(x)) => v[offset] = x,
            (Self::U64(v), Scalar::U64(x)) => v[offset] = x,
            (Self::U32(v), Scalar::U32(x)) => v[offset] = x,
            (Self::U16(v), Scalar::U16(x)) => v[offset] = x,
            (Self::U8(v), Scalar::U8(x)) => v[offset] = x,
            (data, value) => return Err(Error::dtype_mismatch(data.dtype(), value.dtype())),
        }
        Ok(())
    }
}

/// A dense multi-dimensional array with runtime-selected dtype
///
/// The tensor owns its buffer; a [`Layout`] maps logical coordinates to
/// buffer offsets, so transposed and otherwise strided tensors share the
/// same access paths as contiguous ones.
#[derive(Clone, Debug)]
pub struct Tensor {
    data: TensorData,
    layout: Layout,
}

impl Tensor {
    /// Create a contiguous tensor from a vector of elements.
    ///
    /// The vector length must equal the element count of the shape.
    pub fn from_vec<T>(data: Vec<T>, shape: impl Into<Shape>) -> Result<Self>
    where
        T: Element,
        TensorData: From<Vec<T>>,
    {
        let shape = shape.into();
        if data.len() != shape.numel() {
            return Err(Error::BufferMismatch {
                len: data.len(),
                expected: shape.numel(),
                shape: shape.to_vec(),
            });
        }
        Ok(Self {
            data: TensorData::from(data),
            layout: Layout::contiguous(shape),
        })
    }

    /// Create a strided tensor over a vector of elements.
    ///
    /// Every coordinate reachable through the strides must land inside the
    /// buffer. This is how transposed inputs are constructed in tests.
    pub fn from_vec_with_strides<T>(
        data: Vec<T>,
        shape: impl Into<Shape>,
        strides: impl Into<Strides>,
    ) -> Result<Self>
    where
        T: Element,
        TensorData: From<Vec<T>>,
    {
        let layout = Layout::with_strides(shape, strides, data.len())?;
        Ok(Self {
            data: TensorData::from(data),
            layout,
        })
    }

    /// Create a contiguous zero-filled tensor of the given dtype.
    pub fn zeros(shape: impl Into<Shape>, dtype: DType) -> Self {
        let shape = shape.into();
        let numel = shape.numel();
        let data = crate::dispatch_dtype!(dtype, T => {
            TensorData::from(vec![<T as Element>::zero(); numel])
        });
        Self {
            data,
            layout: Layout::contiguous(shape),
        }
    }

    /// The dtype of this tensor's elements.
    #[inline]
    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    /// The shape of this tensor.
    #[inline]
    pub fn shape(&self) -> &Shape {
        self.layout.shape()
    }

    /// The strides of this tensor.
    #[inline]
    pub fn strides(&self) -> &Strides {
        self.layout.strides()
    }

    /// The layout of this tensor.
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Total number of logical elements.
    #[inline]
    pub fn numel(&self) -> usize {
        self.layout.numel()
    }

    /// Whether this tensor is row-major contiguous.
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Typed view of the backing buffer in memory order.
    pub fn as_slice<T: Element>(&self) -> Result<&[T]> {
        self.data.as_slice()
    }

    /// Read the element at a coordinate.
    pub fn at(&self, coord: &[usize]) -> Result<Scalar> {
        let offset = self.layout.offset_of(coord)?;
        Ok(self.data.get(offset))
    }

    /// Write the element at a coordinate. The scalar dtype must match.
    pub fn set_at(&mut self, coord: &[usize], value: Scalar) -> Result<()> {
        let offset = self.layout.offset_of(coord)?;
        self.data.set(offset, value)
    }

    /// Copy the logical elements out in row-major order.
    ///
    /// For contiguous tensors this is a plain buffer copy; strided tensors
    /// are walked coordinate by coordinate.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        let buf = self.as_slice::<T>()?;
        if self.is_contiguous() {
            return Ok(buf.to_vec());
        }
        let mut out = Vec::with_capacity(self.numel());
        for i in 0..self.numel() {
            let coord = self.layout.linear_to_coord(i);
            // coordinates from linear_to_coord are always in bounds
            let offset = self.layout.offset_of(&coord)?;
            out.push(buf[offset]);
        }
        Ok(out)
    }
}

impl PartialEq for Tensor {
    /// Logical equality: same dtype, same shape, same elements in row-major
    /// order. Layouts may differ.
    fn eq(&self, other: &Self) -> bool {
        if self.dtype() != other.dtype() || self.shape() != other.shape() {
            return false;
        }
        (0..self.numel()).all(|i| {
            let coord = self.layout.linear_to_coord(i);
            self.at(&coord) == other.at(&coord)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_shape_check() {
        let t = Tensor::from_vec(vec![1.0f32, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
        assert_eq!(t.dtype(), DType::F32);
        assert_eq!(t.numel(), 4);
        assert!(matches!(
            Tensor::from_vec(vec![1.0f32, 2.0, 3.0], vec![2, 2]),
            Err(Error::BufferMismatch { .. })
        ));
    }

    #[test]
    fn test_at_and_set_at() {
        let mut t = Tensor::zeros(vec![2, 3], DType::I64);
        t.set_at(&[1, 2], Scalar::I64(7)).unwrap();
        assert_eq!(t.at(&[1, 2]).unwrap(), Scalar::I64(7));
        assert_eq!(t.at(&[0, 0]).unwrap(), Scalar::I64(0));
        assert!(matches!(
            t.set_at(&[1, 2], Scalar::F64(1.0)),
            Err(Error::DTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_strided_to_vec_logical_order() {
        // Transpose view of [[1, 2, 3], [4, 5, 6]]
        let t = Tensor::from_vec_with_strides(
            vec![1i64, 2, 3, 4, 5, 6],
            vec![3, 2],
            vec![1isize, 3],
        )
        .unwrap();
        assert_eq!(t.to_vec::<i64>().unwrap(), vec![1, 4, 2, 5, 3, 6]);
        assert_eq!(t.at(&[2, 1]).unwrap(), Scalar::I64(6));
    }

    #[test]
    fn test_as_slice_dtype_guard() {
        let t = Tensor::from_vec(vec![1u8, 2], vec![2]).unwrap();
        assert_eq!(t.as_slice::<u8>().unwrap(), &[1, 2]);
        assert!(t.as_slice::<i8>().is_err());
    }

    #[test]
    fn test_logical_equality_across_layouts() {
        let a = Tensor::from_vec(vec![1i32, 4, 2, 5, 3, 6], vec![3, 2]).unwrap();
        let b = Tensor::from_vec_with_strides(
            vec![1i32, 2, 3, 4, 5, 6],
            vec![3, 2],
            vec![1isize, 3],
        )
        .unwrap();
        assert_eq!(a, b);
        let c = Tensor::from_vec(vec![1i32, 4, 2, 5, 3, 7], vec![3, 2]).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_zeros_dispatch() {
        let t = Tensor::zeros(vec![4], DType::U16);
        assert_eq!(t.to_vec::<u16>().unwrap(), vec![0, 0, 0, 0]);
    }
}
