//! # podrom-core - Snapshot Containers and Layout Conventions
//!
//! Data-handling foundation for POD-based reduced-order modeling:
//!
//! - [`layout`]: the fixed column-major unfolding/folding conventions that
//!   connect a 3-axis snapshot tensor (time x space x parameter) to the
//!   matrices consumed by the spatial and temporal reduction stages.
//! - [`database`]: the space-time snapshot database collected during the
//!   offline stage — physical parameters, time instants, and the snapshot
//!   tensor, validated for mutual consistency.
//!
//! ## Axis convention
//!
//! Every public API in this workspace uses the same snapshot tensor layout:
//! axis 0 is time, axis 1 is space, axis 2 is the training parameter. The
//! unfolding helpers in [`layout`] are the only place where this convention
//! is converted to and from 2-D matrices, so a single flattening order is
//! applied everywhere.
//!
//! ## SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`.

#![deny(warnings)]

pub mod database;
pub mod layout;

pub use database::{DatabaseError, SpaceTimeDatabase};
pub use layout::{
    fold_spacetime, spacetime_unfolding, spatial_unfolding, temporal_unfolding, LayoutError,
};
