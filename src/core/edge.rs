//! Unordered edges between two points.
//!
//! Edges are not stored in the mesh; they are inferred from triangles when
//! the cavity boundary is extracted and when the dual graph is built. An
//! [`Edge`]:
//!
//! - identifies an edge purely by its two endpoint [`Point`]s
//! - canonicalizes endpoint ordering so `(a, b)` and `(b, a)` are the same edge
//! - is `Copy`/`Hash`/`Ord` for use in ordered sets and maps
//!
//! ## Determinism
//!
//! Edge ordering is derived from the total order on points (lexicographic on
//! coordinates), so iteration over a `BTreeMap<Edge, _>` is identical across
//! runs and platforms.

use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use serde::Serialize;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Canonical identifier for an undirected edge.
///
/// # Examples
///
/// ```rust
/// use delaunay_dual::core::edge::Edge;
/// use delaunay_dual::geometry::point::Point;
///
/// let a = Point::new(2.0, 1.0);
/// let b = Point::new(1.0, 1.0);
/// let e1 = Edge::new(a, b);
/// let e2 = Edge::new(b, a);
/// assert_eq!(e1, e2);
/// assert_eq!(e1.v0(), b);
/// ```
#[derive(Copy, Clone, Debug, Serialize)]
#[serde(bound = "T: CoordinateScalar")]
pub struct Edge<T>
where
    T: CoordinateScalar,
{
    v0: Point<T>,
    v1: Point<T>,
}

impl<T> Edge<T>
where
    T: CoordinateScalar,
{
    /// Creates a new canonical edge.
    ///
    /// The endpoints are reordered so that `v0 <= v1` under the point order.
    #[must_use]
    pub fn new(a: Point<T>, b: Point<T>) -> Self {
        if a <= b {
            Self { v0: a, v1: b }
        } else {
            Self { v0: b, v1: a }
        }
    }

    /// Returns the first (canonical) endpoint.
    #[inline]
    #[must_use]
    pub const fn v0(&self) -> Point<T> {
        self.v0
    }

    /// Returns the second (canonical) endpoint.
    #[inline]
    #[must_use]
    pub const fn v1(&self) -> Point<T> {
        self.v1
    }

    /// Returns the two endpoints as a tuple.
    #[inline]
    #[must_use]
    pub const fn endpoints(&self) -> (Point<T>, Point<T>) {
        (self.v0, self.v1)
    }

    /// Returns true if `point` is one of the endpoints.
    #[inline]
    #[must_use]
    pub fn has_endpoint(&self, point: &Point<T>) -> bool {
        self.v0 == *point || self.v1 == *point
    }

    /// Euclidean length of the edge.
    #[inline]
    #[must_use]
    pub fn length(&self) -> T {
        self.v0.distance(&self.v1)
    }
}

impl<T> PartialEq for Edge<T>
where
    T: CoordinateScalar,
{
    fn eq(&self, other: &Self) -> bool {
        self.v0 == other.v0 && self.v1 == other.v1
    }
}

impl<T> Eq for Edge<T> where T: CoordinateScalar {}

impl<T> PartialOrd for Edge<T>
where
    T: CoordinateScalar,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Edge<T>
where
    T: CoordinateScalar,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.v0.cmp(&other.v0).then_with(|| self.v1.cmp(&other.v1))
    }
}

impl<T> Hash for Edge<T>
where
    T: CoordinateScalar,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.v0.hash(state);
        self.v1.hash(state);
    }
}
