//! Strides type: element offsets for tensor memory layout

use super::shape::STACK_DIMS;
use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// Strides type: element offsets between consecutive elements along each dimension
///
/// Stored signed so offset arithmetic stays in `isize`, but negative
/// strides are not currently constructible: `Layout` anchors every view at
/// buffer offset 0 and rejects strides that would reach below it.
/// NOTE: strides are in ELEMENTS, not bytes.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Strides(SmallVec<[isize; STACK_DIMS]>);

impl Strides {
    /// Row-major (C-contiguous) strides for a shape.
    pub fn contiguous(shape: &[usize]) -> Self {
        let mut strides = SmallVec::from_elem(1isize, shape.len());
        for d in (0..shape.len().saturating_sub(1)).rev() {
            strides[d] = strides[d + 1] * shape[d + 1] as isize;
        }
        Self(strides)
    }

    /// View strides as a slice.
    pub fn as_slice(&self) -> &[isize] {
        self.0.as_slice()
    }
}

impl Deref for Strides {
    type Target = [isize];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl fmt::Debug for Strides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<[isize]> for Strides {
    fn as_ref(&self) -> &[isize] {
        self.0.as_slice()
    }
}

impl From<&[isize]> for Strides {
    fn from(value: &[isize]) -> Self {
        Self(value.iter().copied().collect())
    }
}

impl From<Vec<isize>> for Strides {
    fn from(value: Vec<isize>) -> Self {
        Self(value.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_strides() {
        assert_eq!(Strides::contiguous(&[2, 3, 4]).as_slice(), &[12, 4, 1]);
        assert_eq!(Strides::contiguous(&[5]).as_slice(), &[1]);
        assert_eq!(Strides::contiguous(&[]).as_slice(), &[] as &[isize]);
    }
}
