//! # podrom-kernels - Basis Composition Kernels
//!
//! Dense matrix kernels shared by the space-time basis builders. The only
//! resident today is the [`kronecker`] product, which combines a temporal
//! mode matrix and a spatial mode matrix into one space-time basis whose
//! row order matches the workspace's `s + S*t` flattening convention.
//!
//! ## SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`.

#![deny(warnings)]

pub mod kronecker;

pub use kronecker::kronecker;
