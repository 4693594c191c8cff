//! Triangles with cached circumcircles.
//!
//! A [`Triangle`] stores its three vertices in canonical (sorted) order
//! together with its circumcircle, which is computed once at construction.
//! Construction fails for collinear or coincident vertices, so every
//! triangle held by a mesh has a finite circumcenter and radius.
//!
//! Triangle identity is the unordered vertex triple: two triangles built
//! from the same three points in any order compare equal, hash equal and
//! have bit-identical circumcircles. The canonical vertex order is what
//! makes the circumcenter independent of the order in which a triangle's
//! vertices were discovered during insertion.

use crate::core::edge::Edge;
use crate::geometry::point::Point;
use crate::geometry::predicates::{InCircle, in_circumcircle, orient2d};
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::{Circumcircle, CircumcircleError, circumcircle_with_tolerance};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

// =============================================================================
// TRIANGLE STRUCT DEFINITION
// =============================================================================

/// A non-degenerate triangle and its circumcircle.
///
/// # Examples
///
/// ```rust
/// use delaunay_dual::core::triangle::Triangle;
/// use delaunay_dual::geometry::point::Point;
///
/// let t = Triangle::new(
///     Point::new(0.0, 0.0),
///     Point::new(4.0, 0.0),
///     Point::new(0.0, 3.0),
/// )
/// .unwrap();
/// assert_eq!(t.circumcenter(), Point::new(2.0, 1.5));
/// assert_eq!(t.circumradius(), 2.5);
/// ```
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(bound = "T: CoordinateScalar")]
pub struct Triangle<T>
where
    T: CoordinateScalar,
{
    vertices: [Point<T>; 3],
    #[serde(skip)]
    circle: Circumcircle<T>,
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

impl<T> Triangle<T>
where
    T: CoordinateScalar,
{
    /// Creates a triangle using [`CoordinateScalar::default_tolerance`] for the
    /// degeneracy test.
    ///
    /// # Errors
    ///
    /// Returns [`CircumcircleError::DegenerateGeometry`] if the vertices are
    /// collinear or coincident, and [`CircumcircleError::NonFiniteResult`] if
    /// the circumcircle overflows.
    pub fn new(a: Point<T>, b: Point<T>, c: Point<T>) -> Result<Self, CircumcircleError> {
        Self::with_tolerance(a, b, c, T::default_tolerance())
    }

    /// Creates a triangle with an explicit relative degeneracy tolerance.
    ///
    /// # Errors
    ///
    /// See [`Triangle::new`].
    pub fn with_tolerance(
        a: Point<T>,
        b: Point<T>,
        c: Point<T>,
        tolerance: T,
    ) -> Result<Self, CircumcircleError> {
        let mut vertices = [a, b, c];
        vertices.sort_unstable();
        let [p, q, r] = vertices;
        let circle = circumcircle_with_tolerance(&p, &q, &r, tolerance)?;
        Ok(Self { vertices, circle })
    }
}

// =============================================================================
// ACCESSORS AND QUERIES
// =============================================================================

impl<T> Triangle<T>
where
    T: CoordinateScalar,
{
    /// The three vertices in canonical (ascending) order.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> &[Point<T>; 3] {
        &self.vertices
    }

    /// The cached circumcircle.
    #[inline]
    #[must_use]
    pub const fn circumcircle(&self) -> &Circumcircle<T> {
        &self.circle
    }

    /// The cached circumcenter.
    #[inline]
    #[must_use]
    pub const fn circumcenter(&self) -> Point<T> {
        self.circle.center
    }

    /// The cached circumradius.
    #[inline]
    #[must_use]
    pub const fn circumradius(&self) -> T {
        self.circle.radius
    }

    /// The three edges, in canonical form.
    #[must_use]
    pub fn edges(&self) -> [Edge<T>; 3] {
        let [a, b, c] = self.vertices;
        [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]
    }

    /// Returns true if `point` is one of the three vertices.
    #[inline]
    #[must_use]
    pub fn contains_vertex(&self, point: &Point<T>) -> bool {
        self.vertices.contains(point)
    }

    /// Returns true if `edge` is one of the three edges.
    #[must_use]
    pub fn has_edge(&self, edge: &Edge<T>) -> bool {
        self.contains_vertex(&edge.v0()) && self.contains_vertex(&edge.v1())
    }

    /// Returns the edge shared with `other`, if the two triangles are distinct
    /// and have exactly two vertices in common.
    #[must_use]
    pub fn shared_edge(&self, other: &Self) -> Option<Edge<T>> {
        let mut common = self
            .vertices
            .iter()
            .filter(|v| other.contains_vertex(v))
            .copied();
        match (common.next(), common.next(), common.next()) {
            (Some(a), Some(b), None) => Some(Edge::new(a, b)),
            _ => None,
        }
    }

    /// Returns true if `other` shares exactly one edge with this triangle.
    #[inline]
    #[must_use]
    pub fn shares_edge(&self, other: &Self) -> bool {
        self.shared_edge(other).is_some()
    }

    /// Classifies `point` against the circumcircle.
    #[inline]
    #[must_use]
    pub fn in_circumcircle(&self, point: &Point<T>) -> InCircle {
        in_circumcircle(&self.circle, point)
    }

    /// Returns true if `point` lies strictly inside the circumcircle, which
    /// makes this triangle part of the cavity for `point`.
    #[inline]
    #[must_use]
    pub fn is_bad_for(&self, point: &Point<T>) -> bool {
        self.in_circumcircle(point) == InCircle::INSIDE
    }

    /// Returns true if `point` lies inside the triangle or on its boundary.
    #[must_use]
    pub fn contains_point(&self, point: &Point<T>) -> bool {
        let [a, b, c] = &self.vertices;
        let zero = T::zero();
        let turns = [orient2d(a, b, point), orient2d(b, c, point), orient2d(c, a, point)];
        turns.iter().all(|&o| o >= zero) || turns.iter().all(|&o| o <= zero)
    }

    /// Unsigned area.
    #[must_use]
    pub fn area(&self) -> T {
        let [a, b, c] = &self.vertices;
        let two = T::one() + T::one();
        orient2d(a, b, c).abs() / two
    }
}

// =============================================================================
// TRAIT IMPLEMENTATIONS
// =============================================================================

impl<T> PartialEq for Triangle<T>
where
    T: CoordinateScalar,
{
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
    }
}

impl<T> Eq for Triangle<T> where T: CoordinateScalar {}

impl<T> PartialOrd for Triangle<T>
where
    T: CoordinateScalar,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Triangle<T>
where
    T: CoordinateScalar,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.vertices.cmp(&other.vertices)
    }
}

impl<T> Hash for Triangle<T>
where
    T: CoordinateScalar,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vertices.hash(state);
    }
}

impl<T> fmt::Display for Triangle<T>
where
    T: CoordinateScalar,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = &self.vertices;
        write!(f, "({a}), ({b}), ({c})")
    }
}
