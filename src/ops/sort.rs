//! Stable axis-wise argsort

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::ops::axis::{AxisSpec, RowIndexer};
use crate::tensor::{Layout, Tensor};

/// Stable argsort along an axis.
///
/// Returns an `i64` tensor of the input's shape. Along the chosen axis each
/// row holds the row-local positions that would sort that row ascending, so
/// `0 <= index < shape[axis]` everywhere and gathering with the result
/// yields the sorted tensor. Equal elements keep their original order.
/// Floats order by IEEE 754 `totalOrder`, so positive NaN sorts after
/// `+inf` and negative NaN before `-inf`; rows with NaN never panic.
///
/// Supported dtypes: `f64`, `f32`, `i64`.
pub fn argsort(t: &Tensor, axis: usize) -> Result<Tensor> {
    match t.dtype() {
        DType::F64 | DType::F32 | DType::I64 => {}
        other => return Err(Error::unsupported_dtype(other, "argsort")),
    }
    let spec = AxisSpec::decompose(t.shape(), axis)?;
    let indexer = RowIndexer::new(t.layout(), spec);

    let rows = crate::dispatch_dtype!(t.dtype(), T => {
        let data = t.as_slice::<T>()?;
        sort_rows(data, &indexer, spec.num_rows())
    });

    // The output is freshly allocated and contiguous, so its row offsets
    // come from the plain decomposition arithmetic even when the input is
    // strided.
    let out_layout = Layout::contiguous(t.shape().clone());
    let out_indexer = RowIndexer::new(&out_layout, spec);
    let mut out = vec![0i64; t.numel()];
    for (row, args) in rows.into_iter().enumerate() {
        let offsets = out_indexer.offsets(row);
        for (k, arg) in args.into_iter().enumerate() {
            out[offsets[k]] = arg;
        }
    }
    Tensor::from_vec(out, t.shape().clone())
}

/// Argsort every row, fanning rows out across threads when rayon is enabled.
fn sort_rows<T: Element>(data: &[T], indexer: &RowIndexer<'_>, num_rows: usize) -> Vec<Vec<i64>> {
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        (0..num_rows)
            .into_par_iter()
            .map(|row| argsort_row(data, &indexer.offsets(row)))
            .collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        (0..num_rows)
            .map(|row| argsort_row(data, &indexer.offsets(row)))
            .collect()
    }
}

/// Stable argsort of one row, given the buffer offsets of its elements.
///
/// The comparator must be a total order or the stdlib sort may panic, so
/// this goes through [`Element::cmp_total`] rather than `partial_cmp`.
fn argsort_row<T: Element>(data: &[T], offsets: &[usize]) -> Vec<i64> {
    let mut args: Vec<i64> = (0..offsets.len() as i64).collect();
    args.sort_by(|&a, &b| {
        data[offsets[a as usize]].cmp_total(&data[offsets[b as usize]])
    });
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argsort_row_stable_on_ties() {
        let data = [2.0f64, 1.0, 2.0, 1.0];
        let offsets = [0usize, 1, 2, 3];
        assert_eq!(argsort_row(&data, &offsets), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_argsort_row_nan_sorts_last() {
        let data = [1.0f64, f64::NAN, -2.0, f64::NAN, 0.5];
        let offsets = [0usize, 1, 2, 3, 4];
        assert_eq!(argsort_row(&data, &offsets), vec![2, 4, 0, 1, 3]);
    }

    #[test]
    fn test_argsort_rejects_unsupported_dtype() {
        let t = Tensor::from_vec(vec![3u8, 1, 2], vec![3]).unwrap();
        assert_eq!(
            argsort(&t, 0).unwrap_err(),
            Error::UnsupportedDType {
                dtype: DType::U8,
                op: "argsort"
            }
        );
    }

    #[test]
    fn test_argsort_axis_out_of_range() {
        let t = Tensor::from_vec(vec![1.0f32, 2.0], vec![2]).unwrap();
        assert!(matches!(
            argsort(&t, 1),
            Err(Error::AxisOutOfRange { axis: 1, ndim: 1 })
        ));
    }
}
