//! Bounding boxes and the synthetic super-triangle.
//!
//! Incremental insertion needs an initial triangle that strictly contains
//! every point that will ever be inserted. The [`SuperTriangle`] is built
//! from the [`BoundingBox`] of the input, scaled by a margin so that its
//! vertices sit far away from the data. Triangles that keep a super vertex
//! after insertion are artifacts of the construction and are filtered out
//! before the triangulation is used.
//!
//! # Corners at infinity
//!
//! The circumcircle of a triangle with a super vertex depends on how far
//! away the corner is placed, so a finite corner can swallow a flat hull
//! triangle and keep it out of the mesh. [`SuperTriangle::conflicts`]
//! therefore treats every corner symbolically as `c + R·w` (box center `c`,
//! corner direction `w`) with `R → ∞`, and decides the circumcircle test by
//! the sign of the leading non-vanishing term of the in-circle determinant.
//! The resulting triangles without super vertices are the Delaunay
//! triangulation of the inserted points, whatever the margin.

use std::cmp::Ordering;

use crate::core::collections::SmallBuffer;
use crate::core::triangle::Triangle;
use crate::geometry::point::Point;
use crate::geometry::predicates::orient2d;
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::CircumcircleError;
use serde::Serialize;

/// Smallest super-triangle margin that still encloses the bounding box.
///
/// The enclosing triangle's slanted edges clear the corners of a square box
/// for any margin above `(1 + √3) / 2 ≈ 1.37`; anything below 2 is rejected.
pub const MIN_SUPER_TRIANGLE_MARGIN: f64 = 2.0;

/// Default multiple of the bounding-box extent used to place the
/// super-triangle vertices.
pub const DEFAULT_SUPER_TRIANGLE_MARGIN: f64 = 20.0;

// =============================================================================
// BOUNDING BOX
// =============================================================================

/// Axis-aligned bounding box of a point set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(bound = "T: CoordinateScalar")]
pub struct BoundingBox<T>
where
    T: CoordinateScalar,
{
    min: Point<T>,
    max: Point<T>,
}

impl<T> BoundingBox<T>
where
    T: CoordinateScalar,
{
    /// Creates a bounding box from two opposite corners, in any order.
    #[must_use]
    pub fn new(a: Point<T>, b: Point<T>) -> Self {
        Self {
            min: Point::new(a.x().min(b.x()), a.y().min(b.y())),
            max: Point::new(a.x().max(b.x()), a.y().max(b.y())),
        }
    }

    /// Computes the bounding box of `points`, or `None` if there are none.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaunay_dual::core::super_triangle::BoundingBox;
    /// use delaunay_dual::geometry::point::Point;
    ///
    /// let points = [Point::new(1.0, 5.0), Point::new(-2.0, 3.0), Point::new(4.0, -1.0)];
    /// let bbox = BoundingBox::from_points(&points).unwrap();
    /// assert_eq!(bbox.min(), Point::new(-2.0, -1.0));
    /// assert_eq!(bbox.max(), Point::new(4.0, 5.0));
    /// assert!(BoundingBox::<f64>::from_points(&[]).is_none());
    /// ```
    #[must_use]
    pub fn from_points(points: &[Point<T>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (mut min_x, mut min_y) = (first.x(), first.y());
        let (mut max_x, mut max_y) = (min_x, min_y);
        for p in rest {
            min_x = min_x.min(p.x());
            min_y = min_y.min(p.y());
            max_x = max_x.max(p.x());
            max_y = max_y.max(p.y());
        }
        Some(Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        })
    }

    /// Lower-left corner.
    #[inline]
    #[must_use]
    pub const fn min(&self) -> Point<T> {
        self.min
    }

    /// Upper-right corner.
    #[inline]
    #[must_use]
    pub const fn max(&self) -> Point<T> {
        self.max
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Point<T> {
        let two = T::one() + T::one();
        Point::new(
            (self.min.x() + self.max.x()) / two,
            (self.min.y() + self.max.y()) / two,
        )
    }

    /// The larger of the box's width and height.
    #[must_use]
    pub fn extent(&self) -> T {
        (self.max.x() - self.min.x()).max(self.max.y() - self.min.y())
    }

    /// Returns true if `point` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, point: &Point<T>) -> bool {
        point.x() >= self.min.x()
            && point.x() <= self.max.x()
            && point.y() >= self.min.y()
            && point.y() <= self.max.y()
    }
}

// =============================================================================
// SUPER-TRIANGLE
// =============================================================================

/// A triangle strictly enclosing a bounding box, used to seed the mesh.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(bound = "T: CoordinateScalar")]
pub struct SuperTriangle<T>
where
    T: CoordinateScalar,
{
    /// Corners in counter-clockwise order: bottom-left, bottom-right, apex.
    corners: [Point<T>; 3],
    #[serde(skip)]
    triangle: Triangle<T>,
    /// Center of the enclosed bounding box.
    #[serde(skip)]
    center: Point<T>,
    /// `corners[i] - center`, kept exact for the symbolic conflict test.
    #[serde(skip)]
    directions: [[T; 2]; 3],
}

impl<T> SuperTriangle<T>
where
    T: CoordinateScalar,
{
    /// Builds the super-triangle for `bbox`.
    ///
    /// With `c` the box center and `d` its extent (or 1 for a box of zero
    /// extent), the corners are `c + (−m·d, −d)`, `c + (m·d, −d)` and
    /// `c + (0, m·d)` for margin `m`. Any margin of at least
    /// [`MIN_SUPER_TRIANGLE_MARGIN`] places the whole box strictly inside.
    ///
    /// # Errors
    ///
    /// Returns a [`CircumcircleError`] if the corners overflow or collapse
    /// numerically, which only happens for extreme coordinates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaunay_dual::core::super_triangle::{BoundingBox, SuperTriangle};
    /// use delaunay_dual::geometry::point::Point;
    ///
    /// let bbox = BoundingBox::new(Point::new(0.0, 0.0), Point::new(10.0, 4.0));
    /// let st = SuperTriangle::enclosing(&bbox, 20.0, 1e-12).unwrap();
    /// assert!(st.contains(&Point::new(0.0, 0.0)));
    /// assert!(st.contains(&Point::new(10.0, 4.0)));
    /// assert!(!st.contains(&Point::new(0.0, 1000.0)));
    /// ```
    pub fn enclosing(
        bbox: &BoundingBox<T>,
        margin: T,
        tolerance: T,
    ) -> Result<Self, CircumcircleError> {
        let center = bbox.center();
        let extent = bbox.extent();
        let delta = if extent > T::zero() { extent } else { T::one() };
        let reach = margin * delta;

        let directions = [[-reach, -delta], [reach, -delta], [T::zero(), reach]];
        let corners = directions.map(|[dx, dy]| Point::new(center.x() + dx, center.y() + dy));
        let [a, b, c] = corners;
        let triangle = Triangle::with_tolerance(a, b, c, tolerance)?;

        tracing::debug!(
            "Super-triangle corners ({}), ({}), ({}) for extent {:?}",
            a,
            b,
            c,
            extent
        );
        Ok(Self {
            corners,
            triangle,
            center,
            directions,
        })
    }

    /// Corners in counter-clockwise order.
    #[inline]
    #[must_use]
    pub const fn corners(&self) -> &[Point<T>; 3] {
        &self.corners
    }

    /// The super-triangle as a mesh triangle.
    #[inline]
    #[must_use]
    pub const fn triangle(&self) -> &Triangle<T> {
        &self.triangle
    }

    /// Returns true if `point` lies strictly inside the super-triangle.
    #[must_use]
    pub fn contains(&self, point: &Point<T>) -> bool {
        let [a, b, c] = &self.corners;
        let zero = T::zero();
        orient2d(a, b, point) > zero
            && orient2d(b, c, point) > zero
            && orient2d(c, a, point) > zero
    }

    /// Returns true if `point` is one of the three corners.
    #[inline]
    #[must_use]
    pub fn is_super_vertex(&self, point: &Point<T>) -> bool {
        self.corners.contains(point)
    }

    /// Returns true if `triangle` has at least one super vertex.
    #[must_use]
    pub fn touches(&self, triangle: &Triangle<T>) -> bool {
        triangle.vertices().iter().any(|v| self.is_super_vertex(v))
    }

    /// Returns true if `point` lies strictly inside the circumcircle of
    /// `triangle`, with the super vertices placed at infinity.
    ///
    /// Triangles without super vertices use their cached circumcircle. A
    /// triangle with one super vertex conflicts with the open half-plane
    /// beyond its real edge on the side of that corner (plus the open edge
    /// itself); the super-triangle itself conflicts with every point.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaunay_dual::core::super_triangle::{BoundingBox, SuperTriangle};
    /// use delaunay_dual::core::triangle::Triangle;
    /// use delaunay_dual::geometry::point::Point;
    ///
    /// let bbox = BoundingBox::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
    /// let st = SuperTriangle::enclosing(&bbox, 20.0, 1e-12).unwrap();
    /// let [left, _, _] = *st.corners();
    ///
    /// // The finite circumcircle of this triangle also covers (1, 50), but
    /// // with the corner at infinity only the far side of the edge conflicts.
    /// let hull = Triangle::new(Point::new(0.0, 0.0), Point::new(0.0, 100.0), left).unwrap();
    /// assert!(st.conflicts(&hull, &Point::new(-1.0, 50.0)));
    /// assert!(!st.conflicts(&hull, &Point::new(1.0, 50.0)));
    /// assert!(st.conflicts(st.triangle(), &Point::new(50.0, 50.0)));
    /// ```
    #[must_use]
    pub fn conflicts(&self, triangle: &Triangle<T>, point: &Point<T>) -> bool {
        let mut real: SmallBuffer<Point<T>, 3> = SmallBuffer::new();
        let mut at_infinity: SmallBuffer<[T; 2], 3> = SmallBuffer::new();
        for vertex in triangle.vertices() {
            match self.corners.iter().position(|corner| corner == vertex) {
                Some(index) => at_infinity.push(self.directions[index]),
                None => real.push(*vertex),
            }
        }

        match (real.as_slice(), at_infinity.as_slice()) {
            (_, []) => triangle.is_bad_for(point),
            ([a, b], [w]) => self.edge_conflicts(a, b, *w, point),
            ([a], [wi, wj]) => self.vertex_conflicts(a, *wi, *wj, point),
            _ => true,
        }
    }

    /// Triangle `(a, b, c + R·w)`.
    fn edge_conflicts(&self, a: &Point<T>, b: &Point<T>, w: [T; 2], point: &Point<T>) -> bool {
        let edge = difference(b, a);
        let side = sign(orient2d(a, b, point));
        let corner_side = sign(cross(edge, w));

        if corner_side != Ordering::Equal {
            if side != Ordering::Equal {
                return side == corner_side;
            }
            // On the supporting line: inside only strictly between a and b.
            return dot(difference(a, point), difference(b, point)) < T::zero();
        }
        // Edge parallel to the corner direction: the center offset decides.
        side != Ordering::Equal && side == sign(cross(edge, difference(&self.center, a)))
    }

    /// Triangle `(a, c + R·wi, c + R·wj)`.
    fn vertex_conflicts(&self, a: &Point<T>, wi: [T; 2], wj: [T; 2], point: &Point<T>) -> bool {
        let to_a = difference(a, point);
        let to_center = difference(&self.center, point);
        let (ni, nj) = (dot(wi, wi), dot(wj, wj));

        // Coefficient of R³ in the in-circle determinant, then of R².
        let leading = nj * cross(to_a, wi) - ni * cross(to_a, wj);
        let decisive = if leading == T::zero() {
            let two = T::one() + T::one();
            (nj - ni) * cross(to_a, to_center) + dot(to_a, to_a) * cross(wi, wj)
                - two * dot(to_center, wi) * cross(to_a, wj)
                + two * dot(to_center, wj) * cross(to_a, wi)
        } else {
            leading
        };
        decisive != T::zero() && sign(decisive) == sign(cross(wi, wj))
    }
}

#[inline]
fn difference<T>(a: &Point<T>, b: &Point<T>) -> [T; 2]
where
    T: CoordinateScalar,
{
    [a.x() - b.x(), a.y() - b.y()]
}

#[inline]
fn cross<T>(u: [T; 2], v: [T; 2]) -> T
where
    T: CoordinateScalar,
{
    u[0] * v[1] - u[1] * v[0]
}

#[inline]
fn dot<T>(u: [T; 2], v: [T; 2]) -> T
where
    T: CoordinateScalar,
{
    u[0] * v[0] + u[1] * v[1]
}

#[inline]
fn sign<T>(value: T) -> Ordering
where
    T: CoordinateScalar,
{
    value.partial_cmp(&T::zero()).unwrap_or(Ordering::Equal)
}
