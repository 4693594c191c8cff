//! Immutable planar points.
//!
//! # Exact Equality Semantics
//!
//! Point equality is exact-value comparison of both coordinates, never
//! approximate. Comparison, ordering and hashing go through the
//! [`OrderedEq`], [`OrderedCmp`] and [`HashCoordinate`] scalar traits, which
//! give `Point` a total order (lexicographic on `(x, y)`) so points can key
//! ordered containers such as `BTreeSet`.
//! `-0.0` and `0.0` compare equal.
//!
//! Points with non-finite coordinates can be constructed with [`Point::new`]
//! but are rejected by [`Point::validate`], by [`Point::try_from`] and by
//! deserialization.

#![forbid(unsafe_code)]

use crate::geometry::traits::coordinate::{
    CoordinateScalar, CoordinateValidationError, FiniteCheck, HashCoordinate, OrderedCmp,
    OrderedEq,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

// =============================================================================
// POINT STRUCT DEFINITION
// =============================================================================

/// A point in the plane with coordinates of scalar type `T`.
///
/// Points serialize as a two-element array `[x, y]`.
///
/// # Examples
///
/// ```rust
/// use delaunay_dual::geometry::point::Point;
///
/// let p = Point::new(1.0, 2.0);
/// assert_eq!(p.coords(), [1.0, 2.0]);
/// assert_eq!(p.to_string(), "1 2");
/// ```
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(
    try_from = "[T; 2]",
    into = "[T; 2]",
    bound(serialize = "T: CoordinateScalar", deserialize = "T: CoordinateScalar")
)]
pub struct Point<T> {
    x: T,
    y: T,
}

// =============================================================================
// PUBLIC API
// =============================================================================

impl<T> Point<T>
where
    T: CoordinateScalar,
{
    /// Creates a point from its coordinates.
    #[inline]
    #[must_use]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Returns the x coordinate.
    #[inline]
    #[must_use]
    pub const fn x(&self) -> T {
        self.x
    }

    /// Returns the y coordinate.
    #[inline]
    #[must_use]
    pub const fn y(&self) -> T {
        self.y
    }

    /// Returns the coordinates as an array `[x, y]`.
    #[inline]
    #[must_use]
    pub const fn coords(&self) -> [T; 2] {
        [self.x, self.y]
    }

    /// Validates that both coordinates are finite.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateValidationError::InvalidCoordinate`] naming the
    /// first non-finite coordinate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaunay_dual::geometry::point::Point;
    ///
    /// assert!(Point::new(0.0, 1.0).validate().is_ok());
    /// assert!(Point::new(0.0, f64::NAN).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CoordinateValidationError> {
        for (index, coord) in self.coords().iter().enumerate() {
            if !coord.is_finite_generic() {
                return Err(CoordinateValidationError::InvalidCoordinate {
                    coordinate_index: index,
                    coordinate_value: format!("{coord:?}"),
                });
            }
        }
        Ok(())
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    #[must_use]
    pub fn squared_distance(&self, other: &Self) -> T {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to `other`, computed with `hypot` to avoid
    /// intermediate overflow.
    ///
    /// ```rust
    /// use delaunay_dual::geometry::point::Point;
    ///
    /// let d = Point::new(0.0, 0.0).distance(&Point::new(3.0, 4.0));
    /// assert_eq!(d, 5.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn distance(&self, other: &Self) -> T {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

// =============================================================================
// STANDARD TRAIT IMPLEMENTATIONS
// =============================================================================

impl<T> PartialEq for Point<T>
where
    T: CoordinateScalar,
{
    fn eq(&self, other: &Self) -> bool {
        self.x.ordered_eq(&other.x) && self.y.ordered_eq(&other.y)
    }
}

impl<T> Eq for Point<T> where T: CoordinateScalar {}

impl<T> PartialOrd for Point<T>
where
    T: CoordinateScalar,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Point<T>
where
    T: CoordinateScalar,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .ordered_cmp(&other.x)
            .then_with(|| self.y.ordered_cmp(&other.y))
    }
}

impl<T> Hash for Point<T>
where
    T: CoordinateScalar,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash_scalar(state);
        self.y.hash_scalar(state);
    }
}

impl<T> Default for Point<T>
where
    T: CoordinateScalar,
{
    fn default() -> Self {
        Self::new(T::zero(), T::zero())
    }
}

impl<T> fmt::Display for Point<T>
where
    T: CoordinateScalar,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

impl<T> TryFrom<[T; 2]> for Point<T>
where
    T: CoordinateScalar,
{
    type Error = CoordinateValidationError;

    fn try_from(coords: [T; 2]) -> Result<Self, Self::Error> {
        let point = Self::new(coords[0], coords[1]);
        point.validate()?;
        Ok(point)
    }
}

impl<T> From<Point<T>> for [T; 2]
where
    T: CoordinateScalar,
{
    fn from(point: Point<T>) -> Self {
        point.coords()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::{BTreeSet, HashSet};

    #[test]
    fn point_accessors() {
        let p = Point::new(1.5_f64, -2.0);
        assert_relative_eq!(p.x(), 1.5);
        assert_relative_eq!(p.y(), -2.0);
        assert_eq!(<[f64; 2]>::from(p), [1.5, -2.0]);
    }

    #[test]
    fn point_equality_is_exact() {
        let a = Point::new(0.1_f64 + 0.2, 1.0);
        let b = Point::new(0.3_f64, 1.0);
        assert_ne!(a, b, "0.1 + 0.2 differs from 0.3 in the last bit");
        assert_eq!(Point::new(-0.0_f64, 2.0), Point::new(0.0, 2.0));
    }

    #[test]
    fn point_ordering_is_lexicographic() {
        let mut points = vec![
            Point::new(2.0_f64, 0.0),
            Point::new(1.0, 5.0),
            Point::new(1.0, -3.0),
        ];
        points.sort();
        assert_eq!(
            points,
            vec![
                Point::new(1.0, -3.0),
                Point::new(1.0, 5.0),
                Point::new(2.0, 0.0)
            ]
        );
    }

    #[test]
    fn point_dedup_in_hash_and_ordered_sets() {
        let points = [
            Point::new(1.0_f64, 1.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 1.0),
        ];
        assert_eq!(points.iter().collect::<HashSet<_>>().len(), 2);
        assert_eq!(points.iter().collect::<BTreeSet<_>>().len(), 2);
    }

    #[test]
    fn point_validate_rejects_non_finite() {
        let err = Point::new(f64::INFINITY, 0.0).validate().unwrap_err();
        assert_eq!(
            err,
            CoordinateValidationError::InvalidCoordinate {
                coordinate_index: 0,
                coordinate_value: "inf".to_string(),
            }
        );
        assert!(Point::try_from([0.0_f64, f64::NAN]).is_err());
    }

    #[test]
    fn point_distance() {
        let a = Point::new(1.0_f64, 1.0);
        let b = Point::new(4.0, 5.0);
        assert_relative_eq!(a.distance(&b), 5.0);
        assert_relative_eq!(a.squared_distance(&b), 25.0);
    }

    #[test]
    fn point_display_uses_shortest_representation() {
        assert_eq!(Point::new(208.0_f64, 231.5).to_string(), "208 231.5");
    }

    #[test]
    fn point_serialization_roundtrip_and_validation() {
        let p = Point::new(656.0_f64, 607.25);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "[656.0,607.25]");
        let back: Point<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);

        // Non-finite values cannot be expressed in JSON, but malformed
        // arrays must still be rejected.
        assert!(serde_json::from_str::<Point<f64>>("[1.0]").is_err());
    }
}
