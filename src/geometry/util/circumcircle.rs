//! Circumcircle calculations for triangles.
//!
//! All functions use the closed form built on the determinant
//!
//! ```text
//! D = 2·(Ax(By−Cy) + Bx(Cy−Ay) + Cx(Ay−By))
//! ```
//!
//! The circumcenter `(h, k)` is
//!
//! ```text
//! h = (|A|²(By−Cy) + |B|²(Cy−Ay) + |C|²(Ay−By)) / D
//! k = (|A|²(Cx−Bx) + |B|²(Ax−Cx) + |C|²(Bx−Ax)) / D
//! ```
//!
//! and the circumradius is `sqrt(|AB|²·|BC|²·|CA|²) / |D|`.
//!
//! A triangle is degenerate when `|D|` is within a relative tolerance of
//! zero. The tolerance is scaled by the larger of the magnitude of the three
//! summed products (which bounds the rounding error of `D`) and the squared
//! longest edge (which makes thin slivers degenerate regardless of their
//! position). In that case both quantities are undefined and every function
//! here returns [`CircumcircleError::DegenerateGeometry`] instead of an
//! infinite or NaN coordinate.

use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::{CoordinateScalar, FiniteCheck};

pub use super::CircumcircleError;

/// The circle through the three vertices of a non-degenerate triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circumcircle<T>
where
    T: CoordinateScalar,
{
    /// Point equidistant from all three vertices.
    pub center: Point<T>,
    /// Distance from `center` to the vertices.
    pub radius: T,
}

/// Splits the circumcircle determinant into its three products.
#[inline]
fn determinant_terms<T>(a: &Point<T>, b: &Point<T>, c: &Point<T>) -> [T; 3]
where
    T: CoordinateScalar,
{
    [
        a.x() * (b.y() - c.y()),
        b.x() * (c.y() - a.y()),
        c.x() * (a.y() - b.y()),
    ]
}

/// Returns the circumcircle determinant `D` of three points.
///
/// `D` is four times the signed area of the triangle: positive for
/// counter-clockwise vertices, negative for clockwise, zero when collinear.
///
/// ```
/// use delaunay_dual::geometry::point::Point;
/// use delaunay_dual::geometry::util::circumcircle_determinant;
///
/// let d = circumcircle_determinant(
///     &Point::new(0.0, 0.0),
///     &Point::new(1.0, 0.0),
///     &Point::new(0.0, 1.0),
/// );
/// assert_eq!(d, 2.0);
/// ```
#[must_use]
pub fn circumcircle_determinant<T>(a: &Point<T>, b: &Point<T>, c: &Point<T>) -> T
where
    T: CoordinateScalar,
{
    let two = T::one() + T::one();
    let [t1, t2, t3] = determinant_terms(a, b, c);
    two * (t1 + t2 + t3)
}

/// Computes `D` and checks it against the relative degeneracy tolerance.
///
/// # Errors
///
/// Returns [`CircumcircleError::DegenerateGeometry`] when
/// `|D| <= tolerance · max(2·(|t1| + |t2| + |t3|), longest_edge²)`, where
/// `t1..t3` are the three products of `D`. Exactly collinear or coincident
/// points always fail because their determinant is exactly zero.
///
/// Returns [`CircumcircleError::NonFiniteResult`] if `D` overflows.
pub fn checked_determinant<T>(
    a: &Point<T>,
    b: &Point<T>,
    c: &Point<T>,
    tolerance: T,
) -> Result<T, CircumcircleError>
where
    T: CoordinateScalar,
{
    let two = T::one() + T::one();
    let [t1, t2, t3] = determinant_terms(a, b, c);
    let determinant = two * (t1 + t2 + t3);
    let longest_edge = a
        .squared_distance(b)
        .max(b.squared_distance(c))
        .max(c.squared_distance(a));
    let scale = (two * (t1.abs() + t2.abs() + t3.abs())).max(longest_edge);

    if !determinant.is_finite_generic() {
        return Err(CircumcircleError::NonFiniteResult {
            value: format!("{determinant:?}"),
        });
    }
    if determinant.abs() <= tolerance * scale {
        return Err(CircumcircleError::DegenerateGeometry {
            determinant: format!("{determinant:?}"),
        });
    }
    Ok(determinant)
}

/// Computes the circumcircle of three points with an explicit relative
/// degeneracy tolerance.
///
/// # Errors
///
/// - [`CircumcircleError::DegenerateGeometry`] for collinear or coincident
///   points
/// - [`CircumcircleError::NonFiniteResult`] if the computation overflows
pub fn circumcircle_with_tolerance<T>(
    a: &Point<T>,
    b: &Point<T>,
    c: &Point<T>,
    tolerance: T,
) -> Result<Circumcircle<T>, CircumcircleError>
where
    T: CoordinateScalar,
{
    let d = checked_determinant(a, b, c, tolerance)?;

    let a2 = a.x() * a.x() + a.y() * a.y();
    let b2 = b.x() * b.x() + b.y() * b.y();
    let c2 = c.x() * c.x() + c.y() * c.y();

    let h = (a2 * (b.y() - c.y()) + b2 * (c.y() - a.y()) + c2 * (a.y() - b.y())) / d;
    let k = (a2 * (c.x() - b.x()) + b2 * (a.x() - c.x()) + c2 * (b.x() - a.x())) / d;

    let ab = a.squared_distance(b);
    let bc = b.squared_distance(c);
    let ca = c.squared_distance(a);
    let radius = (ab * bc * ca).sqrt() / d.abs();

    for value in [h, k, radius] {
        if !value.is_finite_generic() {
            return Err(CircumcircleError::NonFiniteResult {
                value: format!("{value:?}"),
            });
        }
    }

    Ok(Circumcircle {
        center: Point::new(h, k),
        radius,
    })
}

/// Computes the circumcircle of three points using
/// [`CoordinateScalar::default_tolerance`].
///
/// # Errors
///
/// See [`circumcircle_with_tolerance`].
pub fn circumcircle<T>(
    a: &Point<T>,
    b: &Point<T>,
    c: &Point<T>,
) -> Result<Circumcircle<T>, CircumcircleError>
where
    T: CoordinateScalar,
{
    circumcircle_with_tolerance(a, b, c, T::default_tolerance())
}

/// Calculates the circumcenter of three points.
///
/// # Errors
///
/// See [`circumcircle_with_tolerance`].
///
/// # Example
///
/// ```
/// use delaunay_dual::geometry::point::Point;
/// use delaunay_dual::geometry::util::circumcenter;
///
/// let center = circumcenter(
///     &Point::new(1.0, 1.0),
///     &Point::new(2.0, 1.0),
///     &Point::new(2.0, 2.0),
/// )
/// .unwrap();
/// assert_eq!(center, Point::new(1.5, 1.5));
/// ```
pub fn circumcenter<T>(
    a: &Point<T>,
    b: &Point<T>,
    c: &Point<T>,
) -> Result<Point<T>, CircumcircleError>
where
    T: CoordinateScalar,
{
    circumcircle(a, b, c).map(|circle| circle.center)
}

/// Calculates the circumradius of three points.
///
/// # Errors
///
/// See [`circumcircle_with_tolerance`].
///
/// # Example
///
/// ```
/// use approx::assert_relative_eq;
/// use delaunay_dual::geometry::point::Point;
/// use delaunay_dual::geometry::util::circumradius;
///
/// let r = circumradius(
///     &Point::new(0.0, 0.0),
///     &Point::new(2.0, 0.0),
///     &Point::new(0.0, 2.0),
/// )
/// .unwrap();
/// assert_relative_eq!(r, 2.0_f64.sqrt(), epsilon = 1e-12);
/// ```
pub fn circumradius<T>(
    a: &Point<T>,
    b: &Point<T>,
    c: &Point<T>,
) -> Result<T, CircumcircleError>
where
    T: CoordinateScalar,
{
    circumcircle(a, b, c).map(|circle| circle.radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn circumcircle_right_triangle() {
        let a = Point::new(0.0_f64, 0.0);
        let b = Point::new(4.0, 0.0);
        let c = Point::new(0.0, 3.0);
        let circle = circumcircle(&a, &b, &c).unwrap();
        // Hypotenuse midpoint.
        assert_relative_eq!(circle.center.x(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(circle.center.y(), 1.5, epsilon = 1e-12);
        assert_relative_eq!(circle.radius, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn circumcircle_is_equidistant_from_vertices() {
        let a = Point::new(656.0_f64, 607.0);
        let b = Point::new(349.0, 228.0);
        let c = Point::new(460.0, 380.0);
        let circle = circumcircle(&a, &b, &c).unwrap();
        for v in [a, b, c] {
            assert_relative_eq!(circle.center.distance(&v), circle.radius, max_relative = 1e-9);
        }
    }

    #[test]
    fn circumcenter_is_independent_of_orientation() {
        let a = Point::new(1.0_f64, 1.0);
        let b = Point::new(2.0, 1.0);
        let c = Point::new(2.0, 2.0);
        let ccw = circumcircle(&a, &b, &c).unwrap();
        let cw = circumcircle(&a, &c, &b).unwrap();
        assert_relative_eq!(ccw.center.x(), cw.center.x(), epsilon = 1e-12);
        assert_relative_eq!(ccw.center.y(), cw.center.y(), epsilon = 1e-12);
        assert_relative_eq!(ccw.radius, cw.radius, epsilon = 1e-12);
    }

    #[test]
    fn determinant_sign_follows_orientation() {
        let a = Point::new(0.0_f64, 0.0);
        let b = Point::new(1.0, 0.0);
        let c = Point::new(0.0, 1.0);
        assert!(circumcircle_determinant(&a, &b, &c) > 0.0);
        assert!(circumcircle_determinant(&a, &c, &b) < 0.0);
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let a = Point::new(0.0_f64, 0.0);
        let b = Point::new(1.0, 1.0);
        let c = Point::new(3.0, 3.0);
        assert!(matches!(
            circumcenter(&a, &b, &c),
            Err(CircumcircleError::DegenerateGeometry { .. })
        ));
        assert!(matches!(
            circumradius(&a, &b, &c),
            Err(CircumcircleError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn coincident_points_are_degenerate() {
        let a = Point::new(5.0_f64, 5.0);
        let b = Point::new(7.0, 1.0);
        assert!(matches!(
            circumcircle(&a, &a, &b),
            Err(CircumcircleError::DegenerateGeometry { .. })
        ));
        assert!(matches!(
            circumcircle(&a, &a, &a),
            Err(CircumcircleError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn nearly_collinear_points_respect_tolerance() {
        let a = Point::new(0.0_f64, 0.0);
        let b = Point::new(1.0, 1e-14);
        let c = Point::new(2.0, 0.0);
        assert!(circumcircle(&a, &b, &c).is_err());
        // A zero tolerance only rejects exact zeros.
        assert!(circumcircle_with_tolerance(&a, &b, &c, 0.0).is_ok());
    }

    #[test]
    fn translated_small_triangle_is_not_degenerate() {
        let a = Point::new(1.0e6_f64, 0.0);
        let b = Point::new(1.0e6 + 1.0, 0.0);
        let c = Point::new(1.0e6, 1.0);
        let circle = circumcircle(&a, &b, &c).unwrap();
        assert_relative_eq!(circle.center.x(), 1.0e6 + 0.5, epsilon = 1e-6);
        assert_relative_eq!(circle.center.y(), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn overflow_is_reported_as_non_finite() {
        let a = Point::new(0.0_f64, 0.0);
        let b = Point::new(1.0e200, 0.0);
        let c = Point::new(0.0, 1.0e200);
        assert!(matches!(
            circumcircle(&a, &b, &c),
            Err(CircumcircleError::NonFiniteResult { .. })
        ));
    }

    #[test]
    fn circumcircle_f32() {
        let circle = circumcircle(
            &Point::new(0.0_f32, 0.0),
            &Point::new(2.0, 0.0),
            &Point::new(0.0, 2.0),
        )
        .unwrap();
        assert_relative_eq!(circle.center.x(), 1.0_f32, epsilon = 1e-6);
        assert_relative_eq!(circle.center.y(), 1.0_f32, epsilon = 1e-6);
    }
}
