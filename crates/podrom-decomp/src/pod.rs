//! Single-axis POD (Proper Orthogonal Decomposition)
//!
//! Extracts a truncated orthonormal basis from a snapshot matrix via the
//! thin SVD: for X (n x m) with snapshots as columns, X = U Σ Vᵀ, and the
//! POD modes are the leading k columns of U. `reduce` fits the basis and
//! returns the modal coefficients `modesᵀ X`; `expand` maps coefficients
//! back through `modes * coefficients`.
//!
//! Truncation is configured per instance through [`PodConfig`]: an exact
//! mode count, a cumulative-energy fraction over the squared singular
//! values, or the full available rank.
//!
//! # SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`.
//! SVD computation uses `scirs2_linalg`.

use scirs2_core::ndarray_ext::{s, Array1, Array2, ArrayView2, ScalarOperand};
use scirs2_core::numeric::{Float, NumAssign, NumCast};
use scirs2_linalg::{svd, LinalgError};
use std::iter::Sum;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PodError {
    #[error("POD basis has not been fitted; call reduce first")]
    NotFitted,

    #[error("coefficient rows ({actual}) do not match the basis width ({expected})")]
    CoefficientMismatch { expected: usize, actual: usize },

    #[error("snapshot rows ({actual}) do not match the fitted basis rows ({expected})")]
    SnapshotRowsMismatch { expected: usize, actual: usize },

    #[error("snapshot matrix has an empty axis ({rows} x {cols})")]
    EmptySnapshots { rows: usize, cols: usize },

    #[error("energy fraction must lie in (0, 1], got {0}")]
    InvalidEnergyFraction(f64),

    #[error("SVD failed: {0}")]
    Linalg(#[from] LinalgError),
}

/// Truncation rule applied to the singular value spectrum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PodTruncation {
    /// Keep every available mode (rank of the thin SVD).
    Full,
    /// Keep exactly this many modes (clamped to the available rank).
    Rank(usize),
    /// Keep the smallest mode count whose cumulative squared singular
    /// values reach this fraction of the total energy.
    Energy(f64),
}

/// Per-instance POD configuration.
///
/// Each reduction object owns its configuration; there are no shared
/// defaults to mutate from a distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PodConfig {
    pub truncation: PodTruncation,
}

impl Default for PodConfig {
    fn default() -> Self {
        Self {
            truncation: PodTruncation::Full,
        }
    }
}

impl PodConfig {
    /// Keep the full available rank (no truncation).
    pub fn full() -> Self {
        Self::default()
    }

    /// Keep exactly `rank` modes.
    pub fn with_rank(rank: usize) -> Self {
        Self {
            truncation: PodTruncation::Rank(rank),
        }
    }

    /// Keep the smallest mode count reaching the given energy fraction.
    pub fn with_energy(fraction: f64) -> Self {
        Self {
            truncation: PodTruncation::Energy(fraction),
        }
    }
}

/// Truncated-SVD reduction over one axis of a snapshot matrix.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array2;
/// use podrom_decomp::{Pod, PodConfig};
///
/// // Two independent column patterns: rank-2 data.
/// let x = Array2::from_shape_fn((6, 4), |(i, j)| {
///     (i as f64 + 1.0) * if j % 2 == 0 { 1.0 } else { -0.5 }
///         + (i as f64).sin() * j as f64
/// });
///
/// let mut pod = Pod::new(PodConfig::full());
/// let coeffs = pod.reduce(&x.view())?;
/// let back = pod.expand(&coeffs.view())?;
///
/// for (a, b) in x.iter().zip(back.iter()) {
///     assert!((a - b).abs() < 1e-10);
/// }
/// # Ok::<(), podrom_decomp::PodError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Pod<T> {
    config: PodConfig,
    modes: Option<Array2<T>>,
    singular_values: Option<Array1<T>>,
}

impl<T> Pod<T>
where
    T: Float
        + NumCast
        + NumAssign
        + Sum
        + Send
        + Sync
        + ScalarOperand
        + std::fmt::Debug
        + 'static,
{
    pub fn new(config: PodConfig) -> Self {
        Self {
            config,
            modes: None,
            singular_values: None,
        }
    }

    /// Fit the basis on a snapshot matrix and return the modal
    /// coefficients `modesᵀ X` (k x m).
    ///
    /// Fitting again replaces the previous basis.
    pub fn reduce(&mut self, snapshots: &ArrayView2<T>) -> Result<Array2<T>, PodError> {
        let (rows, cols) = snapshots.dim();
        if rows == 0 || cols == 0 {
            return Err(PodError::EmptySnapshots { rows, cols });
        }

        let (u, sigma, _vt) = svd(snapshots, false, None)?;
        let rank = self.truncation_rank(&sigma)?;

        let modes = u.slice(s![.., ..rank]).to_owned();
        let coefficients = modes.t().dot(snapshots);

        self.singular_values = Some(sigma.slice(s![..rank]).to_owned());
        self.modes = Some(modes);
        Ok(coefficients)
    }

    /// Project snapshots onto the fitted modes without refitting:
    /// `modesᵀ X`. The dual of [`Pod::expand`] for data that shares the
    /// training row layout.
    pub fn project(&self, snapshots: &ArrayView2<T>) -> Result<Array2<T>, PodError> {
        let modes = self.modes.as_ref().ok_or(PodError::NotFitted)?;
        if snapshots.nrows() != modes.nrows() {
            return Err(PodError::SnapshotRowsMismatch {
                expected: modes.nrows(),
                actual: snapshots.nrows(),
            });
        }
        Ok(modes.t().dot(snapshots))
    }

    /// Map modal coefficients (k x m) back to the full space (n x m).
    pub fn expand(&self, coefficients: &ArrayView2<T>) -> Result<Array2<T>, PodError> {
        let modes = self.modes.as_ref().ok_or(PodError::NotFitted)?;
        if coefficients.nrows() != modes.ncols() {
            return Err(PodError::CoefficientMismatch {
                expected: modes.ncols(),
                actual: coefficients.nrows(),
            });
        }
        Ok(modes.dot(coefficients))
    }

    /// Fitted mode matrix (columns orthonormal), or None before `reduce`.
    pub fn modes(&self) -> Option<&Array2<T>> {
        self.modes.as_ref()
    }

    /// Retained singular values, or None before `reduce`.
    pub fn singular_values(&self) -> Option<&Array1<T>> {
        self.singular_values.as_ref()
    }

    /// Number of retained modes, or None before `reduce`.
    pub fn n_modes(&self) -> Option<usize> {
        self.modes.as_ref().map(|m| m.ncols())
    }

    fn truncation_rank(&self, sigma: &Array1<T>) -> Result<usize, PodError> {
        let available = sigma.len();
        match self.config.truncation {
            PodTruncation::Full => Ok(available),
            PodTruncation::Rank(rank) => Ok(rank.clamp(1, available)),
            PodTruncation::Energy(fraction) => {
                if !(fraction > 0.0 && fraction <= 1.0) {
                    return Err(PodError::InvalidEnergyFraction(fraction));
                }
                let total: T = sigma.iter().map(|&x| x * x).sum();
                let target = total * T::from(fraction).unwrap();

                let mut cumulative = T::zero();
                let mut rank = available;
                for (i, &x) in sigma.iter().enumerate() {
                    cumulative += x * x;
                    if cumulative >= target {
                        rank = i + 1;
                        break;
                    }
                }
                Ok(rank)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::Array2;

    // A matrix with exactly two independent column directions.
    fn rank2_matrix(rows: usize, cols: usize) -> Array2<f64> {
        Array2::from_shape_fn((rows, cols), |(i, j)| {
            let a = (i as f64 * 0.7).sin();
            let b = (i as f64 * 0.3).cos();
            a * (j as f64 + 1.0) + b * (j as f64 * j as f64 - 2.0)
        })
    }

    #[test]
    fn test_full_rank_round_trip() {
        let x = Array2::from_shape_fn((8, 5), |(i, j)| ((i * 5 + j) as f64 * 0.37).sin());
        let mut pod = Pod::new(PodConfig::full());

        let coeffs = pod.reduce(&x.view()).unwrap();
        assert_eq!(coeffs.ncols(), 5);

        let back = pod.expand(&coeffs.view()).unwrap();
        for (a, b) in x.iter().zip(back.iter()) {
            assert!((a - b).abs() < 1e-10, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_rank_truncation_captures_low_rank_data() {
        let x = rank2_matrix(20, 7);
        let mut pod = Pod::new(PodConfig::with_rank(2));

        let coeffs = pod.reduce(&x.view()).unwrap();
        assert_eq!(pod.n_modes(), Some(2));
        assert_eq!(coeffs.dim(), (2, 7));

        // Rank-2 data survives a rank-2 truncation.
        let back = pod.expand(&coeffs.view()).unwrap();
        for (a, b) in x.iter().zip(back.iter()) {
            assert!((a - b).abs() < 1e-8, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_rank_clamped_to_available() {
        let x = Array2::from_shape_fn((6, 3), |(i, j)| (i + j) as f64);
        let mut pod = Pod::new(PodConfig::with_rank(10));

        pod.reduce(&x.view()).unwrap();
        assert_eq!(pod.n_modes(), Some(3));
    }

    #[test]
    fn test_energy_truncation_finds_dominant_modes() {
        // One dominant direction plus tiny noise: 90% energy needs 1 mode.
        let x = Array2::from_shape_fn((12, 6), |(i, j)| {
            (i as f64 * 0.5).sin() * (j as f64 + 1.0) + 1e-6 * ((i * j) as f64).cos()
        });
        let mut pod = Pod::new(PodConfig::with_energy(0.9));

        pod.reduce(&x.view()).unwrap();
        assert_eq!(pod.n_modes(), Some(1));
    }

    #[test]
    fn test_energy_one_keeps_everything() {
        // Generic full-rank data: every singular value carries energy.
        let x = Array2::from_shape_fn((10, 4), |(i, j)| ((i * 7 + j * 3) as f64 * 0.29).sin());
        let mut pod = Pod::new(PodConfig::with_energy(1.0));

        pod.reduce(&x.view()).unwrap();
        // Cumulative energy reaches 100% only at the full spectrum length.
        assert_eq!(pod.n_modes(), Some(4));
    }

    #[test]
    fn test_invalid_energy_fraction() {
        let x = rank2_matrix(6, 3);
        let mut pod = Pod::new(PodConfig::with_energy(1.5));

        let err = pod.reduce(&x.view()).unwrap_err();
        assert!(matches!(err, PodError::InvalidEnergyFraction(f) if f == 1.5));
    }

    #[test]
    fn test_expand_before_reduce_fails() {
        let pod = Pod::<f64>::new(PodConfig::full());
        let coeffs = Array2::<f64>::zeros((2, 3));

        let err = pod.expand(&coeffs.view()).unwrap_err();
        assert!(matches!(err, PodError::NotFitted));
    }

    #[test]
    fn test_expand_rejects_wrong_coefficient_rows() {
        let x = rank2_matrix(10, 5);
        let mut pod = Pod::new(PodConfig::with_rank(2));
        pod.reduce(&x.view()).unwrap();

        let coeffs = Array2::<f64>::zeros((3, 5));
        let err = pod.expand(&coeffs.view()).unwrap_err();
        assert!(matches!(
            err,
            PodError::CoefficientMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_empty_snapshots_rejected() {
        let x = Array2::<f64>::zeros((0, 4));
        let mut pod = Pod::new(PodConfig::full());

        let err = pod.reduce(&x.view()).unwrap_err();
        assert!(matches!(err, PodError::EmptySnapshots { rows: 0, cols: 4 }));
    }

    #[test]
    fn test_project_matches_training_coefficients() {
        let x = rank2_matrix(12, 6);
        let mut pod = Pod::new(PodConfig::with_rank(2));
        let coeffs = pod.reduce(&x.view()).unwrap();

        // Projecting the training data reproduces the training coefficients.
        let projected = pod.project(&x.view()).unwrap();
        assert_eq!(projected.dim(), coeffs.dim());
        for (a, b) in coeffs.iter().zip(projected.iter()) {
            assert!((a - b).abs() < 1e-12);
        }

        // Wrong row count is rejected with the expected extents.
        let short = Array2::<f64>::zeros((11, 6));
        let err = pod.project(&short.view()).unwrap_err();
        assert!(matches!(
            err,
            PodError::SnapshotRowsMismatch {
                expected: 12,
                actual: 11
            }
        ));
    }

    #[test]
    fn test_modes_are_orthonormal() {
        let x = Array2::from_shape_fn((15, 8), |(i, j)| ((i * 3 + j * 7) as f64 * 0.11).cos());
        let mut pod = Pod::new(PodConfig::with_rank(4));
        pod.reduce(&x.view()).unwrap();

        let modes = pod.modes().unwrap();
        let gram = modes.t().dot(modes);
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (gram[[i, j]] - expected).abs() < 1e-10,
                    "gram[{}, {}] = {}",
                    i,
                    j,
                    gram[[i, j]]
                );
            }
        }
    }
}
