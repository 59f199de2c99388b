//! Column-major unfolding and folding of space-time snapshot tensors
//!
//! A space-time snapshot tensor has axes (time T, space S, parameter P).
//! The reduction engines consume three different matricizations of it, and
//! reconstruction needs the exact inverse of one of them. All four
//! operations here share one flattening order — the first listed axis of a
//! combined index always varies fastest:
//!
//! - [`spatial_unfolding`]:   (T, S, P) -> (S, T*P), column index `t + T*p`
//! - [`temporal_unfolding`]:  (T, S, P) -> (T, S*P), column index `s + S*p`
//! - [`spacetime_unfolding`]: (T, S, P) -> (S*T, P), row index `s + S*t`
//! - [`fold_spacetime`]:      (S*T, n) -> (T, S, n), inverse of the above
//!
//! The combined space-time basis is laid out against the `s + S*t` row
//! order, so folding with any other order would silently scramble the
//! reconstructed fields. Keep these four functions as the only reshape
//! path between tensors and matrices.

use scirs2_core::ndarray_ext::{Array2, Array3, ArrayView2, ArrayView3};
use scirs2_core::numeric::Num;
use thiserror::Error;

/// Error type for layout conversions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error(
        "cannot fold a matrix with {rows} rows into {space_points} space points x {time_instants} time instants"
    )]
    FoldMismatch {
        rows: usize,
        space_points: usize,
        time_instants: usize,
    },
}

/// Unfold a snapshot tensor into the spatial matricization (S, T*P).
///
/// Each column is one spatial field; column `t + T*p` holds the field of
/// training sample `p` at time instant `t`. This is the matrix the spatial
/// POD is fitted on.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array3;
/// use podrom_core::layout::spatial_unfolding;
///
/// // 2 time instants, 3 space points, 2 training samples
/// let x = Array3::from_shape_fn((2, 3, 2), |(t, s, p)| (100 * p + 10 * s + t) as f64);
/// let x1 = spatial_unfolding(&x.view());
///
/// assert_eq!(x1.dim(), (3, 4));
/// // column t + T*p with T = 2
/// assert_eq!(x1[[1, 0]], x[[0, 1, 0]]);
/// assert_eq!(x1[[1, 3]], x[[1, 1, 1]]);
/// ```
pub fn spatial_unfolding<T>(snapshots: &ArrayView3<T>) -> Array2<T>
where
    T: Clone + Num,
{
    let (nt, ns, npar) = snapshots.dim();
    let mut out = Array2::<T>::zeros((ns, nt * npar));
    for p in 0..npar {
        for t in 0..nt {
            for s in 0..ns {
                out[[s, t + nt * p]] = snapshots[[t, s, p]].clone();
            }
        }
    }
    out
}

/// Unfold a snapshot tensor into the temporal matricization (T, S*P).
///
/// Each column is one time history; column `s + S*p` holds the trajectory
/// of space point `s` in training sample `p`. This is the matrix the
/// global temporal POD is fitted on.
pub fn temporal_unfolding<T>(snapshots: &ArrayView3<T>) -> Array2<T>
where
    T: Clone + Num,
{
    let (nt, ns, npar) = snapshots.dim();
    let mut out = Array2::<T>::zeros((nt, ns * npar));
    for p in 0..npar {
        for s in 0..ns {
            for t in 0..nt {
                out[[t, s + ns * p]] = snapshots[[t, s, p]].clone();
            }
        }
    }
    out
}

/// Unfold a snapshot tensor into the space-time matricization (S*T, P).
///
/// Each column is one full space-time snapshot, flattened with the space
/// index fastest: row `s + S*t`. Modal coefficients are recovered by
/// applying the cached basis inverse to this matrix, so its row order must
/// match the combined basis layout (see [`fold_spacetime`]).
pub fn spacetime_unfolding<T>(snapshots: &ArrayView3<T>) -> Array2<T>
where
    T: Clone + Num,
{
    let (nt, ns, npar) = snapshots.dim();
    let mut out = Array2::<T>::zeros((ns * nt, npar));
    for p in 0..npar {
        for t in 0..nt {
            for s in 0..ns {
                out[[s + ns * t, p]] = snapshots[[t, s, p]].clone();
            }
        }
    }
    out
}

/// Fold a space-time matrix (S*T, n) back into a (T, S, n) tensor.
///
/// Exact inverse of [`spacetime_unfolding`] on the first two axes: row
/// `s + S*t` of column `i` becomes element `(t, s, i)`. The column count
/// `n` is free, so reconstructions of fewer samples than the training set
/// fold the same way.
///
/// # Errors
///
/// Returns [`LayoutError::FoldMismatch`] when the row count is not
/// `space_points * time_instants`.
pub fn fold_spacetime<T>(
    matrix: &ArrayView2<T>,
    space_points: usize,
    time_instants: usize,
) -> Result<Array3<T>, LayoutError>
where
    T: Clone + Num,
{
    let (rows, cols) = matrix.dim();
    if rows != space_points * time_instants {
        return Err(LayoutError::FoldMismatch {
            rows,
            space_points,
            time_instants,
        });
    }

    let mut out = Array3::<T>::zeros((time_instants, space_points, cols));
    for i in 0..cols {
        for t in 0..time_instants {
            for s in 0..space_points {
                out[[t, s, i]] = matrix[[s + space_points * t, i]].clone();
            }
        }
    }
    Ok(out)
}
