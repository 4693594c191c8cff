//! Geometric predicates for planar triangulation.
//!
//! The circumcircle test follows the distance form used by the cavity
//! detector: a point is strictly inside a triangle's circumcircle iff its
//! distance to the circumcenter is strictly less than the circumradius.
//! Points on the circle are [`InCircle::BOUNDARY`] and never conflict, which
//! matches the empty-circumcircle definition of a Delaunay triangulation.

use std::cmp::Ordering;

use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::Circumcircle;

/// Represents the position of a point relative to a circumcircle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InCircle {
    /// The point is outside the circumcircle
    OUTSIDE,
    /// The point is exactly on the circumcircle
    BOUNDARY,
    /// The point is strictly inside the circumcircle
    INSIDE,
}

impl std::fmt::Display for InCircle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OUTSIDE => write!(f, "OUTSIDE"),
            Self::BOUNDARY => write!(f, "BOUNDARY"),
            Self::INSIDE => write!(f, "INSIDE"),
        }
    }
}

/// Represents the orientation of three points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Clockwise turn
    NEGATIVE,
    /// Collinear points
    DEGENERATE,
    /// Counter-clockwise turn
    POSITIVE,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NEGATIVE => write!(f, "NEGATIVE"),
            Self::DEGENERATE => write!(f, "DEGENERATE"),
            Self::POSITIVE => write!(f, "POSITIVE"),
        }
    }
}

/// Twice the signed area of the triangle `(a, b, c)`.
#[inline]
#[must_use]
pub fn orient2d<T>(a: &Point<T>, b: &Point<T>, c: &Point<T>) -> T
where
    T: CoordinateScalar,
{
    (b.x() - a.x()) * (c.y() - a.y()) - (b.y() - a.y()) * (c.x() - a.x())
}

/// Classifies the turn `a → b → c` by the exact sign of [`orient2d`].
///
/// ```
/// use delaunay_dual::geometry::point::Point;
/// use delaunay_dual::geometry::predicates::{orientation, Orientation};
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(1.0, 0.0);
/// assert_eq!(orientation(&a, &b, &Point::new(0.0, 1.0)), Orientation::POSITIVE);
/// assert_eq!(orientation(&a, &b, &Point::new(2.0, 0.0)), Orientation::DEGENERATE);
/// ```
#[must_use]
pub fn orientation<T>(a: &Point<T>, b: &Point<T>, c: &Point<T>) -> Orientation
where
    T: CoordinateScalar,
{
    match orient2d(a, b, c).partial_cmp(&T::zero()) {
        Some(Ordering::Greater) => Orientation::POSITIVE,
        Some(Ordering::Less) => Orientation::NEGATIVE,
        _ => Orientation::DEGENERATE,
    }
}

/// Classifies `point` against a circumcircle by comparing its distance to
/// the center with the radius.
///
/// ```
/// use delaunay_dual::geometry::point::Point;
/// use delaunay_dual::geometry::predicates::{in_circumcircle, InCircle};
/// use delaunay_dual::geometry::util::circumcircle;
///
/// let circle = circumcircle(
///     &Point::new(0.0, 0.0),
///     &Point::new(2.0, 0.0),
///     &Point::new(0.0, 2.0),
/// )
/// .unwrap();
/// assert_eq!(in_circumcircle(&circle, &Point::new(1.0, 1.0)), InCircle::INSIDE);
/// assert_eq!(in_circumcircle(&circle, &Point::new(5.0, 5.0)), InCircle::OUTSIDE);
/// ```
#[must_use]
pub fn in_circumcircle<T>(circle: &Circumcircle<T>, point: &Point<T>) -> InCircle
where
    T: CoordinateScalar,
{
    match circle.center.distance(point).partial_cmp(&circle.radius) {
        Some(Ordering::Less) => InCircle::INSIDE,
        Some(Ordering::Equal) => InCircle::BOUNDARY,
        _ => InCircle::OUTSIDE,
    }
}
