//! Kronecker product of two mode matrices
//!
//! For A (m x n) and B (p x q), C = A ⊗ B is the (mp x nq) block matrix
//! whose (i, j) block is `a_ij * B`. Row `i*p + r` of C pairs row `i` of A
//! with row `r` of B, so the second factor's row index varies fastest.
//!
//! That ordering is what makes `kronecker(psi, phi)` — temporal modes Psi
//! (T x kt) first, spatial modes Phi (S x ks) second — produce a combined
//! basis whose row `t*S + s` addresses space point `s` at time instant `t`,
//! the same `s + S*t` flattening used by the space-time unfolding. Swapping
//! the factors would still build a valid matrix, but one whose rows no
//! longer line up with the flattened snapshots.

use scirs2_core::ndarray_ext::{Array2, ArrayView2};
use scirs2_core::numeric::Num;

/// Compute the Kronecker product A ⊗ B.
///
/// # Arguments
///
/// * `a` - Slow factor with shape (m, n); for space-time bases, the
///   temporal mode matrix
/// * `b` - Fast factor with shape (p, q); for space-time bases, the
///   spatial mode matrix
///
/// # Returns
///
/// The (mp x nq) block matrix with `a[[i, j]] * b` at block (i, j).
///
/// # Complexity
///
/// Time and space: O(m * n * p * q)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use podrom_kernels::kronecker;
///
/// let psi = array![[1.0, 0.0], [0.0, 1.0]]; // 2 time instants, 2 modes
/// let phi = array![[2.0], [3.0], [4.0]];    // 3 space points, 1 mode
/// let basis = kronecker(&psi.view(), &phi.view());
///
/// assert_eq!(basis.dim(), (6, 2));
/// // column 0 is psi[:, 0] ⊗ phi[:, 0]: phi stacked at t = 0, zeros at t = 1
/// assert_eq!(basis[[0, 0]], 2.0);
/// assert_eq!(basis[[2, 0]], 4.0);
/// assert_eq!(basis[[3, 0]], 0.0);
/// // column 1 carries phi at t = 1 instead
/// assert_eq!(basis[[3, 1]], 2.0);
/// assert_eq!(basis[[5, 1]], 4.0);
/// ```
pub fn kronecker<T>(a: &ArrayView2<T>, b: &ArrayView2<T>) -> Array2<T>
where
    T: Clone + Num,
{
    let (m, n) = a.dim();
    let (p, q) = b.dim();

    let mut out = Array2::<T>::zeros((m * p, n * q));
    for i in 0..m {
        for j in 0..n {
            let scale = a[[i, j]].clone();
            for r in 0..p {
                for c in 0..q {
                    out[[i * p + r, j * q + c]] = scale.clone() * b[[r, c]].clone();
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_block_structure() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[0.0, 5.0], [6.0, 7.0]];
        let c = kronecker(&a.view(), &b.view());

        assert_eq!(c.dim(), (4, 4));
        for i in 0..2 {
            for j in 0..2 {
                for r in 0..2 {
                    for s in 0..2 {
                        assert_eq!(c[[2 * i + r, 2 * j + s]], a[[i, j]] * b[[r, s]]);
                    }
                }
            }
        }
    }

    #[test]
    fn test_rectangular_factors() {
        let a = array![[1.0, 2.0, 3.0]]; // 1 x 3
        let b = array![[4.0], [5.0]]; // 2 x 1
        let c = kronecker(&a.view(), &b.view());

        assert_eq!(c.dim(), (2, 3));
        assert_eq!(c[[0, 0]], 4.0);
        assert_eq!(c[[1, 0]], 5.0);
        assert_eq!(c[[0, 2]], 12.0);
        assert_eq!(c[[1, 2]], 15.0);
    }

    #[test]
    fn test_identity_slow_factor_gives_block_diagonal() {
        let eye = array![[1.0, 0.0], [0.0, 1.0]];
        let b = array![[2.0, 3.0], [4.0, 5.0]];
        let c = kronecker(&eye.view(), &b.view());

        // diagonal blocks are B, off-diagonal blocks vanish
        assert_eq!(c[[0, 0]], 2.0);
        assert_eq!(c[[1, 1]], 5.0);
        assert_eq!(c[[2, 2]], 2.0);
        assert_eq!(c[[3, 3]], 5.0);
        assert_eq!(c[[0, 2]], 0.0);
        assert_eq!(c[[2, 0]], 0.0);
    }

    #[test]
    fn test_spacetime_row_convention() {
        // psi: 3 time instants x 2 modes, phi: 2 space points x 2 modes.
        let psi = array![[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]];
        let phi = array![[0.5, -1.0], [0.25, 2.0]];
        let basis = kronecker(&psi.view(), &phi.view());

        let (ns, nt) = (2, 3);
        assert_eq!(basis.dim(), (ns * nt, 4));
        // row t*S + s of column (j*ks + i) must be psi[t, j] * phi[s, i]
        for t in 0..nt {
            for s in 0..ns {
                for j in 0..2 {
                    for i in 0..2 {
                        assert_eq!(
                            basis[[t * ns + s, j * 2 + i]],
                            psi[[t, j]] * phi[[s, i]],
                            "row convention broken at t={}, s={}",
                            t,
                            s
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_column_vectors() {
        let a = array![[2.0], [3.0]];
        let b = array![[4.0], [5.0]];
        let c = kronecker(&a.view(), &b.view());

        assert_eq!(c.dim(), (4, 1));
        assert_eq!(c[[0, 0]], 8.0);
        assert_eq!(c[[1, 0]], 10.0);
        assert_eq!(c[[2, 0]], 12.0);
        assert_eq!(c[[3, 0]], 15.0);
    }
}
