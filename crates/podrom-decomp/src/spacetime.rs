//! Space-time POD: projection-based reduction over space and time at once
//!
//! Combines two single-axis POD reductions — one over space, one over time
//! — into a reduced representation of a 3-axis snapshot tensor
//! (time x space x parameter). Three basis-construction strategies are
//! supported, selected at construction through [`SpaceTimeStrategy`]:
//!
//! - **Kronecker**: one global spatial basis Phi and one global temporal
//!   basis Psi; the combined basis is Psi ⊗ Phi.
//! - **Tailored**: a dedicated temporal basis per spatial mode. Each
//!   spatial mode u contributes Psi_u ⊗ u, where Psi_u is fitted on the
//!   snapshots projected onto u. Strictly more expressive than Kronecker
//!   at the price of a wider basis (the sum of the per-mode widths).
//! - **Nested**: a two-stage reduction. The spatial POD's coefficients
//!   are themselves reduced by a temporal POD; no combined basis matrix
//!   exists, and reconstruction inverts the two stages in reverse order.
//!
//! For the strategies with an explicit basis, modal coefficients are
//! recovered through a cached inverse operator: either the exact
//! least-squares operator `(MᵀM)⁻¹Mᵀ` or the SVD pseudo-inverse of M,
//! chosen by the `optimal_modal_coefficients` flag. The operator is
//! computed once when the basis is fitted and reused by every projection.
//!
//! `reduce` is called exactly once per instance; `expand` may then be
//! called any number of times, including on coefficient sets narrower
//! than the training set. Coefficients are always an explicit 2-D matrix
//! (one column per sample); [`SpaceTimePod::expand_single`] handles the
//! one-column case with a 1-D vector and a 2-D field in return.
//!
//! Reference: arXiv:2102.03505v1
//!
//! # SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`.
//! SVD and least-squares solves use `scirs2_linalg`.

use podrom_core::layout::{
    fold_spacetime, spacetime_unfolding, spatial_unfolding, temporal_unfolding, LayoutError,
};
use podrom_kernels::kronecker;
use scirs2_core::ndarray_ext::{
    Array1, Array2, Array3, ArrayView1, ArrayView2, ArrayView3, Axis, ScalarOperand,
};
use scirs2_core::numeric::{Float, NumAssign, NumCast};
use scirs2_linalg::{lstsq, svd, LinalgError};
use std::fmt;
use std::iter::Sum;
use thiserror::Error;

use crate::pod::{Pod, PodConfig, PodError};

#[derive(Error, Debug)]
pub enum SpaceTimeError {
    #[error("unknown strategy '{name}'; valid strategies are: tailored, kronecker, nested")]
    UnknownStrategy { name: String },

    #[error("snapshot tensor {axis_name} axis (axis {axis}) is empty")]
    EmptyAxis { axis: usize, axis_name: &'static str },

    #[error(
        "snapshot tensor {axis_name} axis (axis {axis}) has extent {actual}, expected {expected}"
    )]
    AxisMismatch {
        axis: usize,
        axis_name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error(
        "coefficient rows ({actual}) do not match the space-time basis width ({expected})"
    )]
    CoefficientMismatch { expected: usize, actual: usize },

    #[error("reduce has not been called; the space-time basis is not available")]
    NotFitted,

    #[error("reduce was already called on this instance; build a fresh SpaceTimePod per dataset")]
    AlreadyFitted,

    #[error(transparent)]
    Pod(#[from] PodError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("linear algebra failure: {0}")]
    Linalg(#[from] LinalgError),
}

/// Basis-construction strategy, one tagged case per algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceTimeStrategy {
    Tailored,
    Kronecker,
    Nested,
}

impl SpaceTimeStrategy {
    pub const ALL: [SpaceTimeStrategy; 3] = [
        SpaceTimeStrategy::Tailored,
        SpaceTimeStrategy::Kronecker,
        SpaceTimeStrategy::Nested,
    ];

    /// Lowercase configuration name of this strategy.
    pub fn name(&self) -> &'static str {
        match self {
            SpaceTimeStrategy::Tailored => "tailored",
            SpaceTimeStrategy::Kronecker => "kronecker",
            SpaceTimeStrategy::Nested => "nested",
        }
    }

    /// Resolve a configuration name.
    ///
    /// # Errors
    ///
    /// [`SpaceTimeError::UnknownStrategy`] for anything but the lowercase
    /// names `tailored`, `kronecker`, `nested`.
    pub fn from_name(name: &str) -> Result<Self, SpaceTimeError> {
        match name {
            "tailored" => Ok(SpaceTimeStrategy::Tailored),
            "kronecker" => Ok(SpaceTimeStrategy::Kronecker),
            "nested" => Ok(SpaceTimeStrategy::Nested),
            other => Err(SpaceTimeError::UnknownStrategy {
                name: other.to_string(),
            }),
        }
    }
}

impl std::str::FromStr for SpaceTimeStrategy {
    type Err = SpaceTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for SpaceTimeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis extents recorded by `reduce` and reused by every `expand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotDims {
    pub time_instants: usize,
    pub space_points: usize,
    pub ntrain: usize,
}

/// Fitted per-strategy state. Immutable once built.
enum SpaceTimeBasis<T> {
    /// Kronecker and tailored: the combined basis ((S*T) x m) and the
    /// cached inverse operator (m x (S*T)).
    Explicit {
        modes: Array2<T>,
        inverse: Array2<T>,
    },
    /// Nested: the two retained sub-reductions, inverted in reverse order.
    Nested { spatial: Pod<T>, temporal: Pod<T> },
}

struct Fitted<T> {
    dims: SnapshotDims,
    basis: SpaceTimeBasis<T>,
}

/// Space-time reduction object.
///
/// Constructed with a strategy and the two sub-POD configurations; fitted
/// by a single `reduce` call; queried by any number of `expand` calls.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array3;
/// use podrom_decomp::{PodConfig, SpaceTimePod, SpaceTimeStrategy};
///
/// // 12 time instants, 7 space points, 4 training samples
/// let x = Array3::from_shape_fn((12, 7, 4), |(t, s, p)| {
///     ((t as f64 * 0.4) + (p as f64)).sin() * ((s as f64 * 0.8).cos() + 1.5)
/// });
///
/// let mut rom = SpaceTimePod::new(SpaceTimeStrategy::Kronecker);
/// let coeffs = rom.reduce(&x.view())?;
/// assert_eq!(coeffs.ncols(), 4);
///
/// let back = rom.expand(&coeffs.view())?;
/// assert_eq!(back.dim(), (12, 7, 4));
/// for (a, b) in x.iter().zip(back.iter()) {
///     assert!((a - b).abs() < 1e-8);
/// }
/// # Ok::<(), podrom_decomp::SpaceTimeError>(())
/// ```
pub struct SpaceTimePod<T> {
    strategy: SpaceTimeStrategy,
    optimal_modal_coefficients: bool,
    spatial_config: PodConfig,
    temporal_config: PodConfig,
    fitted: Option<Fitted<T>>,
}

impl<T> SpaceTimePod<T>
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
    /// New unfitted reduction with full-rank sub-PODs and exact
    /// least-squares coefficient recovery.
    pub fn new(strategy: SpaceTimeStrategy) -> Self {
        Self {
            strategy,
            optimal_modal_coefficients: true,
            spatial_config: PodConfig::full(),
            temporal_config: PodConfig::full(),
            fitted: None,
        }
    }

    /// Configure the spatial and temporal sub-PODs.
    pub fn with_pod_configs(mut self, spatial: PodConfig, temporal: PodConfig) -> Self {
        self.spatial_config = spatial;
        self.temporal_config = temporal;
        self
    }

    /// Choose between the exact least-squares inverse (`true`) and the
    /// SVD pseudo-inverse (`false`) for coefficient recovery. Only
    /// relevant for the kronecker and tailored strategies.
    pub fn with_optimal_modal_coefficients(mut self, enabled: bool) -> Self {
        self.optimal_modal_coefficients = enabled;
        self
    }

    pub fn strategy(&self) -> SpaceTimeStrategy {
        self.strategy
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Axis extents of the training tensor, available after `reduce`.
    pub fn dims(&self) -> Option<SnapshotDims> {
        self.fitted.as_ref().map(|f| f.dims)
    }

    /// Combined space-time basis, one column per mode.
    ///
    /// None before `reduce`, and always None for the nested strategy,
    /// which never forms a combined basis matrix.
    pub fn modes(&self) -> Option<&Array2<T>> {
        match self.fitted.as_ref()?.basis {
            SpaceTimeBasis::Explicit { ref modes, .. } => Some(modes),
            SpaceTimeBasis::Nested { .. } => None,
        }
    }

    /// Width of the reduced representation, available after `reduce`.
    pub fn n_modes(&self) -> Option<usize> {
        match self.fitted.as_ref()?.basis {
            SpaceTimeBasis::Explicit { ref modes, .. } => Some(modes.ncols()),
            SpaceTimeBasis::Nested { ref temporal, .. } => temporal.n_modes(),
        }
    }

    /// Fit the space-time basis on a (time, space, parameter) tensor and
    /// return the training coefficients (n_modes x ntrain).
    ///
    /// # Errors
    ///
    /// [`SpaceTimeError::AlreadyFitted`] on a second call — one instance
    /// serves one dataset. [`SpaceTimeError::EmptyAxis`] when any axis
    /// has extent zero.
    pub fn reduce(&mut self, snapshots: &ArrayView3<T>) -> Result<Array2<T>, SpaceTimeError> {
        if self.fitted.is_some() {
            return Err(SpaceTimeError::AlreadyFitted);
        }

        let (nt, ns, npar) = snapshots.dim();
        for (axis, (axis_name, extent)) in
            [("time", nt), ("space", ns), ("parameter", npar)].into_iter().enumerate()
        {
            if extent == 0 {
                return Err(SpaceTimeError::EmptyAxis { axis, axis_name });
            }
        }
        let dims = SnapshotDims {
            time_instants: nt,
            space_points: ns,
            ntrain: npar,
        };

        let x1 = spatial_unfolding(snapshots);

        let (basis, coefficients) = match self.strategy {
            SpaceTimeStrategy::Kronecker => {
                let modes = self.kronecker_basis(&x1, snapshots)?;
                self.explicit_state(modes, snapshots)?
            }
            SpaceTimeStrategy::Tailored => {
                let modes = self.tailored_basis(&x1, snapshots)?;
                self.explicit_state(modes, snapshots)?
            }
            SpaceTimeStrategy::Nested => {
                let mut spatial = Pod::new(self.spatial_config);
                let spatial_coefficients = spatial.reduce(&x1.view())?;
                let stacked = stack_time_blocks(&spatial_coefficients, nt, npar);

                let mut temporal = Pod::new(self.temporal_config);
                let coefficients = temporal.reduce(&stacked.view())?;
                (SpaceTimeBasis::Nested { spatial, temporal }, coefficients)
            }
        };

        self.fitted = Some(Fitted { dims, basis });
        Ok(coefficients)
    }

    /// Project full-order snapshots onto the fitted basis without
    /// refitting, returning their reduced coefficients (n_modes x n).
    ///
    /// The tensor must share the fitted time and space extents; the
    /// parameter axis is free. The explicit strategies reuse the inverse
    /// operator cached by `reduce`; the nested strategy routes through the
    /// two retained sub-reductions.
    ///
    /// # Errors
    ///
    /// [`SpaceTimeError::NotFitted`] before `reduce`;
    /// [`SpaceTimeError::AxisMismatch`] when the time or space extent
    /// disagrees with the training tensor.
    pub fn project(&self, snapshots: &ArrayView3<T>) -> Result<Array2<T>, SpaceTimeError> {
        let fitted = self.fitted.as_ref().ok_or(SpaceTimeError::NotFitted)?;
        let dims = fitted.dims;

        let (nt, ns, npar) = snapshots.dim();
        ensure_axis(0, "time", dims.time_instants, nt)?;
        ensure_axis(1, "space", dims.space_points, ns)?;
        if npar == 0 {
            return Err(SpaceTimeError::EmptyAxis {
                axis: 2,
                axis_name: "parameter",
            });
        }

        match &fitted.basis {
            SpaceTimeBasis::Explicit { inverse, .. } => {
                let x3 = spacetime_unfolding(snapshots);
                Ok(inverse.dot(&x3))
            }
            SpaceTimeBasis::Nested { spatial, temporal } => {
                let x1 = spatial_unfolding(snapshots);
                let spatial_coefficients = spatial.project(&x1.view())?;
                let stacked = stack_time_blocks(&spatial_coefficients, nt, npar);
                Ok(temporal.project(&stacked.view())?)
            }
        }
    }

    /// Reconstruct approximate snapshots from reduced coefficients.
    ///
    /// Takes an (n_modes x n) coefficient matrix — n may be anything from
    /// a single column up to and beyond the training count — and returns
    /// the (time, space, n) tensor.
    ///
    /// # Errors
    ///
    /// [`SpaceTimeError::NotFitted`] before `reduce`;
    /// [`SpaceTimeError::CoefficientMismatch`] when the row count differs
    /// from the fitted basis width.
    pub fn expand(&self, coefficients: &ArrayView2<T>) -> Result<Array3<T>, SpaceTimeError> {
        let fitted = self.fitted.as_ref().ok_or(SpaceTimeError::NotFitted)?;
        let dims = fitted.dims;

        match &fitted.basis {
            SpaceTimeBasis::Explicit { modes, .. } => {
                if coefficients.nrows() != modes.ncols() {
                    return Err(SpaceTimeError::CoefficientMismatch {
                        expected: modes.ncols(),
                        actual: coefficients.nrows(),
                    });
                }
                let flat = modes.dot(coefficients);
                Ok(fold_spacetime(
                    &flat.view(),
                    dims.space_points,
                    dims.time_instants,
                )?)
            }
            SpaceTimeBasis::Nested { spatial, temporal } => {
                let expected = temporal.n_modes().ok_or(PodError::NotFitted)?;
                if coefficients.nrows() != expected {
                    return Err(SpaceTimeError::CoefficientMismatch {
                        expected,
                        actual: coefficients.nrows(),
                    });
                }

                // Invert the temporal stage: (ks*T, n) stacked coefficients.
                let stacked = temporal.expand(coefficients)?;
                let ks = spatial.n_modes().ok_or(PodError::NotFitted)?;
                let nt = dims.time_instants;
                let n = stacked.ncols();

                // Unstack back to the spatial-coefficient layout (ks, T*n),
                // column t + T*i, then invert the spatial stage.
                let spatial_coefficients = Array2::from_shape_fn((ks, nt * n), |(k, c)| {
                    let t = c % nt;
                    let i = c / nt;
                    stacked[[k + ks * t, i]]
                });
                let x1 = spatial.expand(&spatial_coefficients.view())?;

                // Column t + T*i of x1 is the spatial field of sample i at
                // time t; reassemble the public (time, space, n) layout.
                let out = Array3::from_shape_fn((nt, dims.space_points, n), |(t, s, i)| {
                    x1[[s, t + nt * i]]
                });
                Ok(out)
            }
        }
    }

    /// Reconstruct a single snapshot from one coefficient vector,
    /// returning the (time, space) field.
    pub fn expand_single(&self, coefficients: &ArrayView1<T>) -> Result<Array2<T>, SpaceTimeError> {
        let column = coefficients.to_owned().insert_axis(Axis(1));
        let tensor = self.expand(&column.view())?;
        let (nt, ns, _) = tensor.dim();
        Ok(Array2::from_shape_fn((nt, ns), |(t, s)| tensor[[t, s, 0]]))
    }

    /// Kronecker basis: Psi ⊗ Phi from the two global sub-reductions.
    fn kronecker_basis(
        &self,
        x1: &Array2<T>,
        snapshots: &ArrayView3<T>,
    ) -> Result<Array2<T>, SpaceTimeError> {
        let mut spatial = Pod::new(self.spatial_config);
        spatial.reduce(&x1.view())?;
        let phi = spatial.modes().ok_or(PodError::NotFitted)?;

        let x2 = temporal_unfolding(snapshots);
        let mut temporal = Pod::new(self.temporal_config);
        temporal.reduce(&x2.view())?;
        let psi = temporal.modes().ok_or(PodError::NotFitted)?;

        Ok(kronecker(&psi.view(), &phi.view()))
    }

    /// Tailored basis: one dedicated temporal reduction per spatial mode,
    /// each contributing Psi_u ⊗ u.
    fn tailored_basis(
        &self,
        x1: &Array2<T>,
        snapshots: &ArrayView3<T>,
    ) -> Result<Array2<T>, SpaceTimeError> {
        let (nt, ns, npar) = snapshots.dim();

        let mut spatial = Pod::new(self.spatial_config);
        spatial.reduce(&x1.view())?;
        let phi = spatial.modes().ok_or(PodError::NotFitted)?;

        let mut pieces: Vec<Array2<T>> = Vec::with_capacity(phi.ncols());
        for mode_index in 0..phi.ncols() {
            let u = phi.column(mode_index);

            // Project every training sample's space-time block onto u:
            // proj[t, p] = sum_s snapshots[t, s, p] * u[s].
            let projected = Array2::from_shape_fn((nt, npar), |(t, p)| {
                let mut acc = T::zero();
                for s in 0..ns {
                    acc += snapshots[[t, s, p]] * u[s];
                }
                acc
            });

            let mut temporal = Pod::new(self.temporal_config);
            temporal.reduce(&projected.view())?;
            let psi_u = temporal.modes().ok_or(PodError::NotFitted)?;

            let u_column = u.to_owned().insert_axis(Axis(1));
            pieces.push(kronecker(&psi_u.view(), &u_column.view()));
        }

        // Concatenate the per-mode contributions as columns.
        let width: usize = pieces.iter().map(|piece| piece.ncols()).sum();
        let mut modes = Array2::<T>::zeros((ns * nt, width));
        let mut offset = 0;
        for piece in &pieces {
            for c in 0..piece.ncols() {
                for r in 0..piece.nrows() {
                    modes[[r, offset + c]] = piece[[r, c]];
                }
            }
            offset += piece.ncols();
        }
        Ok(modes)
    }

    /// Cache the inverse operator and project the training tensor.
    fn explicit_state(
        &self,
        modes: Array2<T>,
        snapshots: &ArrayView3<T>,
    ) -> Result<(SpaceTimeBasis<T>, Array2<T>), SpaceTimeError> {
        let inverse = if self.optimal_modal_coefficients {
            optimal_inverse(&modes)?
        } else {
            pseudo_inverse(&modes)?
        };

        let x3 = spacetime_unfolding(snapshots);
        let coefficients = inverse.dot(&x3);
        Ok((SpaceTimeBasis::Explicit { modes, inverse }, coefficients))
    }
}

fn ensure_axis(
    axis: usize,
    axis_name: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), SpaceTimeError> {
    if expected != actual {
        return Err(SpaceTimeError::AxisMismatch {
            axis,
            axis_name,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Reshape spatial coefficients (ks, T*P) with column `t + T*p` into the
/// stacked matrix (ks*T, P) with row `k + ks*t`, ready for the temporal
/// stage of the nested strategy.
fn stack_time_blocks<T>(
    spatial_coefficients: &Array2<T>,
    time_instants: usize,
    ntrain: usize,
) -> Array2<T>
where
    T: Clone,
{
    let ks = spatial_coefficients.nrows();
    Array2::from_shape_fn((ks * time_instants, ntrain), |(r, p)| {
        let k = r % ks;
        let t = r / ks;
        spatial_coefficients[[k, t + time_instants * p]].clone()
    })
}

/// Exact least-squares operator `(MᵀM)⁻¹Mᵀ`, built once by solving the
/// Gram system against every column of Mᵀ.
///
/// Requires M to have full column rank; a numerically rank-deficient
/// basis is reported through `log::warn!` and the solve proceeds.
fn optimal_inverse<T>(modes: &Array2<T>) -> Result<Array2<T>, SpaceTimeError>
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
    let (rows, width) = modes.dim();

    let (_u, sigma, _vt) = svd(&modes.view(), false, None)?;
    let cutoff = rank_cutoff(&sigma, rows, width);
    let numerical_rank = sigma.iter().filter(|&&x| x > cutoff).count();
    if numerical_rank < width {
        log::warn!(
            "space-time basis is rank-deficient (width {}, numerical rank {}); \
             optimal modal coefficients may be inaccurate, consider \
             with_optimal_modal_coefficients(false)",
            width,
            numerical_rank
        );
    }

    let gram = modes.t().dot(modes);
    let modes_t = modes.t().to_owned();

    let mut inverse = Array2::<T>::zeros((width, rows));
    for j in 0..rows {
        let rhs = modes_t.column(j).to_owned();
        let solution = lstsq(&gram.view(), &rhs.view(), None)?;
        for i in 0..width {
            inverse[[i, j]] = solution.x[i];
        }
    }
    Ok(inverse)
}

/// SVD pseudo-inverse `V S⁻¹ Uᵀ` with a relative singular value cutoff.
fn pseudo_inverse<T>(modes: &Array2<T>) -> Result<Array2<T>, SpaceTimeError>
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
    let (rows, width) = modes.dim();
    let (u, sigma, vt) = svd(&modes.view(), false, None)?;
    let cutoff = rank_cutoff(&sigma, rows, width);

    // diag(1/s) Uᵀ, with singular values below the cutoff zeroed.
    let k = sigma.len();
    let mut scaled_ut = Array2::<T>::zeros((k, rows));
    for i in 0..k {
        let inv_sigma = if sigma[i] > cutoff {
            T::one() / sigma[i]
        } else {
            T::zero()
        };
        for j in 0..rows {
            scaled_ut[[i, j]] = u[[j, i]] * inv_sigma;
        }
    }

    Ok(vt.t().dot(&scaled_ut))
}

/// Relative cutoff `s_max * eps * max(rows, cols)` below which singular
/// values are treated as zero.
fn rank_cutoff<T>(sigma: &Array1<T>, rows: usize, cols: usize) -> T
where
    T: Float + NumCast,
{
    if sigma.is_empty() {
        return T::zero();
    }
    sigma[0] * T::epsilon() * T::from(rows.max(cols)).unwrap()
}
