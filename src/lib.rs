//! # delaunay-dual
//!
//! Incremental [Bowyer–Watson](https://en.wikipedia.org/wiki/Bowyer%E2%80%93Watson_algorithm)
//! Delaunay triangulation of planar point sets, and extraction of the
//! vertices of the dual [Voronoi diagram](https://en.wikipedia.org/wiki/Voronoi_diagram).
//!
//! # Features
//!
//! - Incremental point insertion seeded with an enclosing super-triangle
//! - Explicit triangulation lifecycle (`Empty → SuperTriangleSeeded → Inserting → Done`)
//! - Configurable degeneracy handling for collinear and near-coincident points
//! - Deterministic, sorted Voronoi vertex output independent of insertion order
//! - Generic floating-point coordinate types (`f32`, `f64`)
//! - Serialization of points and edges with [serde](https://serde.rs)
//!
//! # Basic Usage
//!
//! ```rust
//! use delaunay_dual::prelude::*;
//!
//! let points = [
//!     Point::new(0.0, 0.0),
//!     Point::new(4.0, 0.0),
//!     Point::new(4.5, 4.0),
//!     Point::new(0.5, 3.5),
//! ];
//!
//! let dt = DelaunayTriangulation::from_points(&points, TriangulationOptions::default()).unwrap();
//! assert!(dt.is_finished());
//! assert_eq!(dt.number_of_vertices(), 4);
//! assert_eq!(dt.number_of_delaunay_triangles(), 2);
//!
//! // Two triangles sharing one edge give two Voronoi vertices.
//! let vertices = voronoi_vertices(&dt).unwrap();
//! assert_eq!(vertices.len(), 2);
//! assert_eq!(vertices[0], Point::new(2.0, 1.5));
//! ```
//!
//! # Step-by-step Construction
//!
//! [`DelaunayTriangulation::from_points`](core::delaunay_triangulation::DelaunayTriangulation::from_points)
//! runs the whole lifecycle. The individual transitions are available for
//! streaming input:
//!
//! ```rust
//! use delaunay_dual::prelude::*;
//!
//! let mut dt = DelaunayTriangulation::new(TriangulationOptions::default());
//! assert_eq!(dt.state(), TriangulationState::Empty);
//!
//! dt.seed(&BoundingBox::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0))).unwrap();
//! for (x, y) in [(1.0, 1.0), (9.0, 2.0), (5.0, 8.0), (5.0, 4.0)] {
//!     dt.insert(Point::new(x, y)).unwrap();
//! }
//! assert_eq!(dt.state(), TriangulationState::Inserting(4));
//!
//! dt.finish().unwrap();
//! assert_eq!(dt.state(), TriangulationState::Done);
//! assert!(dt.validate_delaunay().is_ok());
//! ```
//!
//! # Triangulation Invariants
//!
//! - **Delaunay property**: no inserted point lies strictly inside the
//!   circumcircle of a triangle that does not touch the super-triangle.
//! - **Edge sharing**: every edge belongs to at most two triangles.
//! - **Cavity shape**: inserting a point into `k` bad triangles creates
//!   exactly `k + 2` new ones; any other count aborts the insertion with
//!   [`InsertionError::NonSimpleCavity`](core::algorithms::incremental_insertion::InsertionError::NonSimpleCavity)
//!   and leaves the mesh untouched.
//! - **Hull coverage**: super-triangle corners are treated as points at
//!   infinity in the conflict test, so the remaining triangles tile the
//!   convex hull of the input.
//! - **Super-triangle filtering**: triangles incident to a super-triangle
//!   corner remain in the mesh but never contribute to the Voronoi dual.
//!
//! These are checked by [`core::util::delaunay_validation`].
//!
//! # Degenerate Input
//!
//! Collinear or coincident triples have no finite circumcircle. Triangle
//! construction reports them as
//! [`CircumcircleError::DegenerateGeometry`](geometry::util::CircumcircleError::DegenerateGeometry).
//! During insertion, [`DegeneracyPolicy`](core::delaunay_triangulation::DegeneracyPolicy)
//! decides whether the offending point is skipped (the default) or the run
//! aborts. Exact duplicates are always skipped.
//!
//! # Command-line Program
//!
//! The `voronoi-vertices` binary reads a point count followed by coordinate
//! pairs from standard input and writes the sorted Voronoi vertices, one
//! `x y` line each. Set `RUST_LOG=debug` to trace insertion.

#![forbid(unsafe_code)]

#[macro_use]
extern crate derive_builder;

/// Mesh data structures and the triangulation algorithms built on them.
///
/// The driver is [`DelaunayTriangulation`](delaunay_triangulation::DelaunayTriangulation);
/// the per-point cavity search and re-triangulation live in [`algorithms`].
pub mod core {
    /// Triangulation algorithms for construction and dual extraction
    pub mod algorithms {
        /// Cavity-based point insertion
        pub mod incremental_insertion;
        /// Conflict region search and cavity boundary extraction
        pub mod locate;
        /// Voronoi vertices and edges of a finished triangulation
        pub mod voronoi;
    }
    /// Small-buffer and ordered collection aliases used during insertion
    pub mod collections;
    pub mod delaunay_triangulation;
    pub mod edge;
    pub mod mesh;
    pub mod super_triangle;
    pub mod triangle;
    pub mod util;

    // Re-export the `core` modules.
    pub use delaunay_triangulation::*;
    pub use edge::*;
    pub use mesh::*;
    pub use super_triangle::*;
    pub use triangle::*;
    pub use util::*;
    // Note: collections module not re-exported here to avoid namespace pollution
}

/// Contains geometric types including the `Point` struct and geometry predicates.
///
/// Every type is generic over a scalar implementing
/// [`CoordinateScalar`](traits::coordinate::CoordinateScalar), with exact,
/// NaN-aware equality and ordering of coordinates.
pub mod geometry {
    pub mod point;
    pub mod predicates;
    /// Circumcircle computation and random point generation
    pub mod util;
    /// Traits module containing coordinate abstractions.
    pub mod traits {
        pub mod coordinate;
        pub use coordinate::*;
    }
    pub use point::*;
    pub use predicates::*;
    pub use traits::*;
    pub use util::*;
}

/// Plain-text point input and vertex output used by the binary.
pub mod io;

/// A prelude module that re-exports commonly used types.
/// This makes it easier to import the most commonly used items from the crate.
pub mod prelude {
    pub use crate::core::{
        algorithms::{
            incremental_insertion::{InsertionError, InsertionOutcome, InsertionStatistics},
            voronoi::{VoronoiDual, VoronoiEdge, VoronoiError, voronoi_vertices},
        },
        delaunay_triangulation::*,
        edge::Edge,
        mesh::Mesh,
        super_triangle::{BoundingBox, SuperTriangle},
        triangle::Triangle,
        util::delaunay_validation::{DelaunayValidationError, validate_delaunay},
    };

    pub use crate::geometry::{
        point::Point,
        predicates::{InCircle, Orientation},
        traits::coordinate::{CoordinateScalar, CoordinateValidationError, FiniteCheck},
        util::{
            Circumcircle, CircumcircleError, generate_random_points,
            generate_random_points_seeded,
        },
    };
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}
