//! # PodRom - Reduced-Order Modeling via Proper Orthogonal Decomposition
//!
//! Builds compact space-time bases from expensive full-order simulation
//! snapshots and projects between full and reduced representations.
//!
//! This is the **meta crate** that re-exports all PodRom components for
//! convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use podrom::prelude::*;
//! use scirs2_core::ndarray_ext::Array3;
//!
//! // 20 time instants, 10 space points, 5 training samples
//! let snapshots = Array3::from_shape_fn((20, 10, 5), |(t, s, p)| {
//!     ((t as f64 * 0.3) * (1.0 + 0.2 * p as f64)).sin() * (s as f64 * 0.5).cos()
//! });
//!
//! let mut rom = SpaceTimePod::new(SpaceTimeStrategy::Kronecker)
//!     .with_pod_configs(PodConfig::with_rank(3), PodConfig::with_rank(4));
//!
//! let coefficients = rom.reduce(&snapshots.view())?;
//! assert_eq!(coefficients.dim(), (12, 5));
//!
//! let approximation = rom.expand(&coefficients.view())?;
//! assert_eq!(approximation.dim(), (20, 10, 5));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Core Containers and Layout ([`core`])
//!
//! The space-time snapshot database and the column-major unfolding/folding
//! conventions shared by every engine.
//!
//! ### Basis Composition Kernels ([`kernels`])
//!
//! The Kronecker product used to combine temporal and spatial mode
//! matrices into one space-time basis.
//!
//! ### Reduction Engines ([`decomp`])
//!
//! The single-axis POD engine and the space-time POD with its three
//! basis-construction strategies (tailored, kronecker, nested).

#![deny(warnings)]

// Re-export all components
pub use podrom_core as core;
pub use podrom_decomp as decomp;
pub use podrom_kernels as kernels;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use podrom::prelude::*;
    //!
    //! let config = PodConfig::with_energy(0.999);
    //! let _ = Pod::<f64>::new(config);
    //! ```

    // Containers and layout
    pub use crate::core::{
        fold_spacetime, spacetime_unfolding, spatial_unfolding, temporal_unfolding,
        SpaceTimeDatabase,
    };

    // Reduction engines
    pub use crate::decomp::{
        Pod, PodConfig, PodTruncation, SnapshotDims, SpaceTimePod, SpaceTimeStrategy,
    };

    // Kernels
    pub use crate::kernels::kronecker;
}
