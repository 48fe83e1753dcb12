//! Integration tests for the gradient masks
//!
//! Tests verify correctness across:
//! - Gather-backward selection masks, including repeated indices
//! - Clamp-backward inside-range masks for floats and integers
//! - Dtype restrictions on both backward passes

use topr::ops::{clamp_backward, gather_backward};
use topr::{DType, Error, Scalar, Tensor};

// ============================================================================
// Gather backward
// ============================================================================

#[test]
fn test_gather_backward_1d() {
    let source = Tensor::from_vec(vec![5.0f64, 6.0, 7.0, 8.0], vec![4]).unwrap();
    let indices = Tensor::from_vec(vec![3i64, 1], vec![2]).unwrap();
    let mask = gather_backward(&source, 0, &indices).unwrap();

    assert_eq!(mask.dtype(), DType::F64);
    assert_eq!(mask.shape().as_slice(), &[4]);
    assert_eq!(mask.to_vec::<f64>().unwrap(), vec![0.0, 1.0, 0.0, 1.0]);
}

#[test]
fn test_gather_backward_mask_shape_tracks_source() {
    // Indices are smaller than the source off-axis; the mask still has the
    // source's shape and untouched rows stay zero.
    let source = Tensor::zeros(vec![3, 4], DType::F32);
    let indices = Tensor::from_vec(vec![0i64, 2], vec![1, 2]).unwrap();
    let mask = gather_backward(&source, 1, &indices).unwrap();

    assert_eq!(mask.shape().as_slice(), &[3, 4]);
    assert_eq!(
        mask.to_vec::<f32>().unwrap(),
        vec![1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
    );
}

#[test]
fn test_gather_backward_repeated_index_idempotent() {
    // The same source location selected twice holds 1, not 2.
    let source = Tensor::from_vec(vec![5.0f64, 6.0, 7.0], vec![3]).unwrap();
    let indices = Tensor::from_vec(vec![1i64, 1, 1], vec![3]).unwrap();
    let mask = gather_backward(&source, 0, &indices).unwrap();
    assert_eq!(mask.to_vec::<f64>().unwrap(), vec![0.0, 1.0, 0.0]);
}

#[test]
fn test_gather_backward_2d_axis0() {
    let source = Tensor::zeros(vec![2, 3], DType::F64);
    let indices = Tensor::from_vec(vec![1i64, 0, 1], vec![1, 3]).unwrap();
    let mask = gather_backward(&source, 0, &indices).unwrap();
    assert_eq!(
        mask.to_vec::<f64>().unwrap(),
        vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0]
    );
}

#[test]
fn test_gather_backward_strided_indices() {
    // Transpose view: logical indices [[0, 2], [1, 0]] over a [2, 2] buffer.
    let source = Tensor::zeros(vec![2, 3], DType::F64);
    let indices =
        Tensor::from_vec_with_strides(vec![0i64, 1, 2, 0], vec![2, 2], vec![1isize, 2]).unwrap();
    let mask = gather_backward(&source, 1, &indices).unwrap();

    // Row 0 selects columns {0, 2}, row 1 selects {1, 0}.
    assert_eq!(
        mask.to_vec::<f64>().unwrap(),
        vec![1.0, 0.0, 1.0, 1.0, 1.0, 0.0]
    );
}

#[test]
fn test_gather_backward_strided_source() {
    // The source only contributes shape and dtype; a transposed source must
    // still produce a contiguous mask at the right logical locations.
    let source = Tensor::from_vec_with_strides(
        vec![0.0f64; 6],
        vec![3, 2],
        vec![1isize, 3],
    )
    .unwrap();
    let indices = Tensor::from_vec(vec![2i64, 0], vec![1, 2]).unwrap();
    let mask = gather_backward(&source, 0, &indices).unwrap();

    assert!(mask.is_contiguous());
    assert_eq!(mask.shape().as_slice(), &[3, 2]);
    assert_eq!(
        mask.to_vec::<f64>().unwrap(),
        vec![0.0, 1.0, 0.0, 0.0, 1.0, 0.0]
    );
}

#[test]
fn test_gather_backward_integer_source_rejected() {
    for dtype in [DType::I64, DType::U8] {
        let source = Tensor::zeros(vec![3], dtype);
        let indices = Tensor::from_vec(vec![0i64], vec![1]).unwrap();
        assert_eq!(
            gather_backward(&source, 0, &indices).unwrap_err(),
            Error::UnsupportedDType {
                dtype,
                op: "gather_backward"
            }
        );
    }
}

#[test]
fn test_gather_backward_out_of_bounds_aborts() {
    let source = Tensor::zeros(vec![2], DType::F64);
    let indices = Tensor::from_vec(vec![0i64, 2], vec![2]).unwrap();
    assert_eq!(
        gather_backward(&source, 0, &indices).unwrap_err(),
        Error::IndexOutOfBounds {
            index: 2,
            dim: 0,
            size: 2
        }
    );
}

// ============================================================================
// Clamp backward
// ============================================================================

#[test]
fn test_clamp_backward_boundaries_inclusive() {
    let t = Tensor::from_vec(vec![-3.0f64, -2.0, 0.0, 2.0, 3.0], vec![5]).unwrap();
    let mask = clamp_backward(&t, Scalar::F64(-2.0), Scalar::F64(2.0)).unwrap();
    assert_eq!(mask.dtype(), DType::F64);
    assert_eq!(mask.to_vec::<f64>().unwrap(), vec![0.0, 1.0, 1.0, 1.0, 0.0]);
}

#[test]
fn test_clamp_backward_f32() {
    let t = Tensor::from_vec(vec![0.5f32, 1.5, -0.5], vec![3]).unwrap();
    let mask = clamp_backward(&t, Scalar::F32(0.0), Scalar::F32(1.0)).unwrap();
    assert_eq!(mask.to_vec::<f32>().unwrap(), vec![1.0, 0.0, 0.0]);
}

#[test]
fn test_clamp_backward_2d_shape_preserved() {
    let t = Tensor::from_vec(vec![1.0f64, 10.0, -10.0, 2.0], vec![2, 2]).unwrap();
    let mask = clamp_backward(&t, Scalar::F64(0.0), Scalar::F64(5.0)).unwrap();
    assert_eq!(mask.shape().as_slice(), &[2, 2]);
    assert_eq!(mask.to_vec::<f64>().unwrap(), vec![1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_clamp_backward_integer_widths_normalize() {
    let t = Tensor::from_vec(vec![-5i32, 0, 5, 100], vec![4]).unwrap();
    let mask = clamp_backward(&t, Scalar::I32(-1), Scalar::I32(50)).unwrap();
    assert_eq!(mask.dtype(), DType::I64);
    assert_eq!(mask.to_vec::<i64>().unwrap(), vec![0, 1, 1, 0]);

    let t = Tensor::from_vec(vec![1u16, 2, 3], vec![3]).unwrap();
    let mask = clamp_backward(&t, Scalar::U16(2), Scalar::U16(3)).unwrap();
    assert_eq!(mask.dtype(), DType::I64);
    assert_eq!(mask.to_vec::<i64>().unwrap(), vec![0, 1, 1]);
}

#[test]
fn test_clamp_backward_strided_input() {
    // Transpose view: logical [[1, 4], [2, 5], [3, 6]]
    let t = Tensor::from_vec_with_strides(
        vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0],
        vec![3, 2],
        vec![1isize, 3],
    )
    .unwrap();
    let mask = clamp_backward(&t, Scalar::F64(2.0), Scalar::F64(5.0)).unwrap();
    assert_eq!(
        mask.to_vec::<f64>().unwrap(),
        vec![0.0, 1.0, 1.0, 1.0, 1.0, 0.0]
    );
}

#[test]
fn test_clamp_backward_bound_dtype_mismatch() {
    let t = Tensor::from_vec(vec![1.0f64], vec![1]).unwrap();
    assert_eq!(
        clamp_backward(&t, Scalar::F32(0.0), Scalar::F32(1.0)).unwrap_err(),
        Error::DTypeMismatch {
            lhs: DType::F64,
            rhs: DType::F32
        }
    );
    // The max bound is checked too, after min.
    assert_eq!(
        clamp_backward(&t, Scalar::F64(0.0), Scalar::I64(1)).unwrap_err(),
        Error::DTypeMismatch {
            lhs: DType::F64,
            rhs: DType::I64
        }
    );
}
