//! Validation helpers for finished triangulations.

pub mod delaunay_validation;

pub use delaunay_validation::*;
