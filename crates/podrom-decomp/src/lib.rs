//! # podrom-decomp - POD Reduction Engines
//!
//! Projection-based model reduction for parametric, time-dependent
//! simulations:
//!
//! - [`pod`]: the single-axis POD engine — truncated-SVD basis extraction
//!   from a snapshot matrix, with per-instance truncation configuration
//!   (exact rank or cumulative-energy fraction).
//! - [`spacetime`]: the space-time engine — two POD stages composed over
//!   a (time x space x parameter) snapshot tensor under one of three
//!   strategies (tailored, kronecker, nested), with a cached inverse
//!   operator for coefficient recovery and a bidirectional
//!   `reduce`/`expand` projection contract.
//!
//! ## Quick Start
//!
//! ```
//! use scirs2_core::ndarray_ext::Array3;
//! use podrom_decomp::{PodConfig, SpaceTimePod, SpaceTimeStrategy};
//!
//! // 20 time instants, 10 space points, 5 training samples
//! let snapshots = Array3::from_shape_fn((20, 10, 5), |(t, s, p)| {
//!     ((t as f64 * 0.3) * (1.0 + p as f64 * 0.2)).sin() * (s as f64 * 0.5).cos()
//! });
//!
//! let mut rom = SpaceTimePod::new(SpaceTimeStrategy::Tailored)
//!     .with_pod_configs(PodConfig::with_rank(3), PodConfig::with_rank(4));
//!
//! let coefficients = rom.reduce(&snapshots.view())?;
//! let approximation = rom.expand(&coefficients.view())?;
//! assert_eq!(approximation.dim(), (20, 10, 5));
//! # Ok::<(), podrom_decomp::SpaceTimeError>(())
//! ```
//!
//! ## SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`.
//! All SVD and least-squares solves use `scirs2_linalg`.
//!
//! ## References
//!
//! - Berkooz, Holmes & Lumley (1993), "The Proper Orthogonal Decomposition
//!   in the Analysis of Turbulent Flows"
//! - Choi & Carlberg (2019), arXiv:2102.03505 for the space-time basis
//!   composition strategies

#![deny(warnings)]

pub mod pod;
pub mod spacetime;

#[cfg(test)]
mod property_tests;

// Re-exports
pub use pod::{Pod, PodConfig, PodError, PodTruncation};
pub use spacetime::{
    SnapshotDims, SpaceTimeError, SpaceTimePod, SpaceTimeStrategy,
};
