//! Space-time snapshot database collected during the offline stage
//!
//! Holds the training data of a parametric, time-dependent simulation
//! campaign: one parameter vector per training sample, one shared time
//! grid, and the snapshot tensor in the workspace axis convention
//! (time x space x parameter). All extents are validated against each
//! other at construction, so the reduction engines can trust the shapes
//! they receive.

use scirs2_core::ndarray_ext::{Array1, Array2, Array3};
use thiserror::Error;

/// Error type for snapshot database operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    #[error("snapshot time axis holds {actual} instants, but {expected} time instants were given")]
    TimeAxisMismatch { expected: usize, actual: usize },

    #[error(
        "snapshot parameter axis holds {actual} samples, but {expected} parameter rows were given"
    )]
    ParameterAxisMismatch { expected: usize, actual: usize },

    #[error("appended snapshots use {actual} time instants, but the database holds {expected}")]
    TimeGridMismatch { expected: usize, actual: usize },

    #[error("appended snapshots have {actual} space points, but the database holds {expected}")]
    SpacePointsMismatch { expected: usize, actual: usize },

    #[error("appended parameters have {actual} components, but the database holds {expected}")]
    ParameterWidthMismatch { expected: usize, actual: usize },

    #[error("parameter index {index} is out of range for {len} training samples")]
    ParameterIndexOutOfRange { index: usize, len: usize },

    #[error("time index {index} is out of range for {len} time instants")]
    TimeIndexOutOfRange { index: usize, len: usize },
}

/// Training database for space-time model reduction.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::{Array1, Array2, Array3};
/// use podrom_core::SpaceTimeDatabase;
///
/// // 4 time instants, 6 space points, 3 training samples
/// let parameters = Array2::from_shape_fn((3, 2), |(p, c)| (p + c) as f64);
/// let times = Array1::from_shape_fn(4, |t| t as f64 * 0.1);
/// let snapshots = Array3::from_shape_fn((4, 6, 3), |(t, s, p)| (t + s + p) as f64);
///
/// let db = SpaceTimeDatabase::new(parameters, times, snapshots)?;
/// assert_eq!(db.ntrain(), 3);
/// assert_eq!(db.space_points(), 6);
/// assert_eq!(db.n_time_instants(), 4);
/// # Ok::<(), podrom_core::DatabaseError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SpaceTimeDatabase<T> {
    parameters: Array2<T>,
    time_instants: Array1<T>,
    snapshots: Array3<T>,
}

impl<T> SpaceTimeDatabase<T>
where
    T: Clone,
{
    /// Build a database from parameters (P x n_components), time instants
    /// (T) and the snapshot tensor (T, S, P).
    ///
    /// # Errors
    ///
    /// Returns a [`DatabaseError`] naming the offending axis when the
    /// snapshot extents disagree with the parameter rows or the time grid.
    pub fn new(
        parameters: Array2<T>,
        time_instants: Array1<T>,
        snapshots: Array3<T>,
    ) -> Result<Self, DatabaseError> {
        let (nt, _ns, npar) = snapshots.dim();
        if nt != time_instants.len() {
            return Err(DatabaseError::TimeAxisMismatch {
                expected: time_instants.len(),
                actual: nt,
            });
        }
        if npar != parameters.nrows() {
            return Err(DatabaseError::ParameterAxisMismatch {
                expected: parameters.nrows(),
                actual: npar,
            });
        }

        Ok(Self {
            parameters,
            time_instants,
            snapshots,
        })
    }

    /// Parameter matrix, one training sample per row.
    pub fn parameters(&self) -> &Array2<T> {
        &self.parameters
    }

    /// Shared time grid of all training samples.
    pub fn time_instants(&self) -> &Array1<T> {
        &self.time_instants
    }

    /// Snapshot tensor in (time, space, parameter) order.
    pub fn snapshots(&self) -> &Array3<T> {
        &self.snapshots
    }

    /// Number of training samples.
    pub fn ntrain(&self) -> usize {
        self.snapshots.dim().2
    }

    /// Number of spatial degrees of freedom per snapshot.
    pub fn space_points(&self) -> usize {
        self.snapshots.dim().1
    }

    /// Number of time instants per training sample.
    pub fn n_time_instants(&self) -> usize {
        self.snapshots.dim().0
    }

    /// Append further training samples on the same time grid.
    ///
    /// `parameters` contributes new rows and `snapshots` new entries along
    /// the parameter axis; the time and space extents must match the data
    /// already stored.
    pub fn add(
        &mut self,
        parameters: Array2<T>,
        snapshots: Array3<T>,
    ) -> Result<(), DatabaseError> {
        let (nt, ns, npar) = snapshots.dim();
        if nt != self.n_time_instants() {
            return Err(DatabaseError::TimeGridMismatch {
                expected: self.n_time_instants(),
                actual: nt,
            });
        }
        if ns != self.space_points() {
            return Err(DatabaseError::SpacePointsMismatch {
                expected: self.space_points(),
                actual: ns,
            });
        }
        if npar != parameters.nrows() {
            return Err(DatabaseError::ParameterAxisMismatch {
                expected: parameters.nrows(),
                actual: npar,
            });
        }
        if parameters.ncols() != self.parameters.ncols() {
            return Err(DatabaseError::ParameterWidthMismatch {
                expected: self.parameters.ncols(),
                actual: parameters.ncols(),
            });
        }

        let old_ntrain = self.ntrain();
        let merged_parameters =
            Array2::from_shape_fn((old_ntrain + npar, self.parameters.ncols()), |(p, c)| {
                if p < old_ntrain {
                    self.parameters[[p, c]].clone()
                } else {
                    parameters[[p - old_ntrain, c]].clone()
                }
            });
        let merged_snapshots =
            Array3::from_shape_fn((nt, ns, old_ntrain + npar), |(t, s, p)| {
                if p < old_ntrain {
                    self.snapshots[[t, s, p]].clone()
                } else {
                    snapshots[[t, s, p - old_ntrain]].clone()
                }
            });

        self.parameters = merged_parameters;
        self.snapshots = merged_snapshots;
        Ok(())
    }

    /// New database restricted to the given parameter and time indices.
    ///
    /// Indices may repeat and appear in any order; the snapshot tensor is
    /// sliced consistently on both axes.
    pub fn select(
        &self,
        parameter_indices: &[usize],
        time_indices: &[usize],
    ) -> Result<Self, DatabaseError> {
        for &p in parameter_indices {
            if p >= self.ntrain() {
                return Err(DatabaseError::ParameterIndexOutOfRange {
                    index: p,
                    len: self.ntrain(),
                });
            }
        }
        for &t in time_indices {
            if t >= self.n_time_instants() {
                return Err(DatabaseError::TimeIndexOutOfRange {
                    index: t,
                    len: self.n_time_instants(),
                });
            }
        }

        let parameters = Array2::from_shape_fn(
            (parameter_indices.len(), self.parameters.ncols()),
            |(p, c)| self.parameters[[parameter_indices[p], c]].clone(),
        );
        let time_instants =
            Array1::from_shape_fn(time_indices.len(), |t| self.time_instants[time_indices[t]].clone());
        let snapshots = Array3::from_shape_fn(
            (time_indices.len(), self.space_points(), parameter_indices.len()),
            |(t, s, p)| self.snapshots[[time_indices[t], s, parameter_indices[p]]].clone(),
        );

        Ok(Self {
            parameters,
            time_instants,
            snapshots,
        })
    }
}
