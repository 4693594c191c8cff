//! Geometric utility functions for planar triangulation.
//!
//! - [`circumcircle`]: circumcenter, circumradius and the degeneracy test
//!   shared by every triangle in the mesh
//! - [`point_generation`]: reproducible random point sets for tests and
//!   benchmarks

pub mod circumcircle;
pub mod point_generation;

pub use circumcircle::*;
pub use point_generation::*;

/// Errors that can occur while computing the circumcircle of three points.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum CircumcircleError {
    /// The three points are collinear or coincident: the circumcircle
    /// determinant is zero or below the configured relative tolerance.
    #[error(
        "Degenerate geometry: circumcircle determinant {determinant} is within tolerance of zero (points are collinear or coincident)"
    )]
    DegenerateGeometry {
        /// The determinant `D = 2·(Ax(By−Cy) + Bx(Cy−Ay) + Cx(Ay−By))`, as a string.
        determinant: String,
    },

    /// The computation overflowed and produced NaN or infinity.
    #[error("Circumcircle computation produced a non-finite value: {value}")]
    NonFiniteResult {
        /// The offending value, as a string.
        value: String,
    },
}

/// Errors that can occur during random point generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum RandomPointGenerationError {
    /// The coordinate range is empty or inverted.
    #[error("Invalid coordinate range: min {min} must be less than max {max}")]
    InvalidRange {
        /// Lower bound, as a string.
        min: String,
        /// Upper bound, as a string.
        max: String,
    },
}
