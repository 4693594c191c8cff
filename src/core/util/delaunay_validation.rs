//! Delaunay empty-circumcircle property and mesh structure validation.
//!
//! These checks are quadratic and meant for tests and debugging, not for
//! the insertion hot path.
//!
//! A point counts as inside a circumcircle only when it is closer to the
//! center than the radius by more than [`CoordinateScalar::default_tolerance`]
//! relative to the radius, so cocircular input validates.

use std::collections::BTreeSet;

use crate::core::collections::EdgeCountMap;
use crate::core::delaunay_triangulation::DelaunayTriangulation;
use crate::core::mesh::Mesh;
use crate::core::triangle::Triangle;
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use thiserror::Error;

/// Errors that can occur during Delaunay property validation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DelaunayValidationError {
    /// An input point lies strictly inside the circumcircle of a triangle.
    #[error("Triangle {triangle} violates the Delaunay property: ({vertex}) is inside its circumcircle")]
    DelaunayViolation {
        /// The offending triangle.
        triangle: String,
        /// The point inside its circumcircle.
        vertex: String,
    },
    /// The same triangle is stored twice.
    #[error("Duplicate triangle {triangle}")]
    DuplicateTriangle {
        /// The repeated triangle.
        triangle: String,
    },
    /// An edge belongs to more than two triangles.
    #[error("Edge {edge} is shared by {count} triangles (at most 2 allowed)")]
    NonManifoldEdge {
        /// The offending edge.
        edge: String,
        /// Number of triangles containing it.
        count: usize,
    },
    /// An inserted point is not a vertex of any triangle.
    #[error("Inserted point ({vertex}) is not a vertex of any triangle")]
    MissingVertex {
        /// The orphaned point.
        vertex: String,
    },
}

// =============================================================================
// DELAUNAY PROPERTY VALIDATION
// =============================================================================

/// Returns true if `point` is inside the circumcircle of `triangle` by more
/// than the relative tolerance of `T`.
fn violates<T>(triangle: &Triangle<T>, point: &Point<T>) -> bool
where
    T: CoordinateScalar,
{
    if triangle.contains_vertex(point) {
        return false;
    }
    let circle = triangle.circumcircle();
    let margin = T::default_tolerance() * circle.radius;
    circle.center.distance(point) < circle.radius - margin
}

/// Returns the indices (into [`DelaunayTriangulation::triangles`]) of the
/// non-super triangles whose circumcircle strictly contains an inserted
/// point other than their own vertices.
///
/// An empty result means the empty-circumcircle property holds.
#[must_use]
pub fn find_delaunay_violations<T>(dt: &DelaunayTriangulation<T>) -> Vec<usize>
where
    T: CoordinateScalar,
{
    let violations: Vec<usize> = dt
        .triangles()
        .iter()
        .enumerate()
        .filter(|(_, triangle)| !dt.touches_super_triangle(triangle))
        .filter(|(_, triangle)| {
            dt.vertices()
                .iter()
                .any(|v| violates(triangle, v))
        })
        .map(|(index, _)| index)
        .collect();

    if !violations.is_empty() {
        tracing::debug!("Found {} Delaunay violations", violations.len());
    }
    violations
}

/// Checks that every edge of `mesh` belongs to at most two triangles.
///
/// # Errors
///
/// Returns [`DelaunayValidationError::NonManifoldEdge`] for the first
/// overshared edge in canonical edge order.
pub fn validate_edge_sharing<T>(mesh: &Mesh<T>) -> Result<(), DelaunayValidationError>
where
    T: CoordinateScalar,
{
    let mut edge_counts: EdgeCountMap<T> = EdgeCountMap::new();
    for triangle in mesh {
        for edge in triangle.edges() {
            *edge_counts.entry(edge).or_insert(0) += 1;
        }
    }
    match edge_counts.into_iter().find(|&(_, count)| count > 2) {
        Some((edge, count)) => Err(DelaunayValidationError::NonManifoldEdge {
            edge: format!("({})-({})", edge.v0(), edge.v1()),
            count,
        }),
        None => Ok(()),
    }
}

/// Checks that no triangle is stored twice.
///
/// # Errors
///
/// Returns [`DelaunayValidationError::DuplicateTriangle`] for the first
/// repeated triangle.
pub fn validate_no_duplicate_triangles<T>(mesh: &Mesh<T>) -> Result<(), DelaunayValidationError>
where
    T: CoordinateScalar,
{
    let mut seen = BTreeSet::new();
    for triangle in mesh {
        if !seen.insert(triangle) {
            return Err(DelaunayValidationError::DuplicateTriangle {
                triangle: triangle.to_string(),
            });
        }
    }
    Ok(())
}

/// Runs every structural and geometric check on `dt`.
///
/// # Errors
///
/// Returns the first failure among, in order: duplicate triangles,
/// overshared edges, inserted points missing from the mesh, and Delaunay
/// violations.
///
/// # Examples
///
/// ```rust
/// use delaunay_dual::core::delaunay_triangulation::{DelaunayTriangulation, TriangulationOptions};
/// use delaunay_dual::core::util::delaunay_validation::validate_delaunay;
/// use delaunay_dual::geometry::util::generate_random_points_seeded;
///
/// let points = generate_random_points_seeded::<f64>(50, (0.0, 100.0), 3).unwrap();
/// let dt = DelaunayTriangulation::from_points(&points, TriangulationOptions::default()).unwrap();
/// assert!(validate_delaunay(&dt).is_ok());
/// ```
pub fn validate_delaunay<T>(dt: &DelaunayTriangulation<T>) -> Result<(), DelaunayValidationError>
where
    T: CoordinateScalar,
{
    validate_no_duplicate_triangles(dt.mesh())?;
    validate_edge_sharing(dt.mesh())?;

    let mesh_vertices: BTreeSet<_> = dt
        .triangles()
        .iter()
        .flat_map(|triangle| triangle.vertices().iter().copied())
        .collect();
    if let Some(missing) = dt.vertices().iter().find(|v| !mesh_vertices.contains(v)) {
        return Err(DelaunayValidationError::MissingVertex {
            vertex: missing.to_string(),
        });
    }

    if let Some(&index) = find_delaunay_violations(dt).first() {
        let triangle = &dt.triangles()[index];
        let vertex = dt
            .vertices()
            .iter()
            .find(|v| violates(triangle, v))
            .map(ToString::to_string)
            .unwrap_or_default();
        return Err(DelaunayValidationError::DelaunayViolation {
            triangle: triangle.to_string(),
            vertex,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::delaunay_triangulation::TriangulationOptions;
    use std::f64::consts::TAU;

    fn pt(x: f64, y: f64) -> Point<f64> {
        Point::new(x, y)
    }

    #[test]
    fn finished_triangulation_is_valid() {
        let points = [
            pt(0.0, 0.0),
            pt(10.0, 0.5),
            pt(9.5, 10.0),
            pt(0.3, 9.0),
            pt(4.1, 5.2),
            pt(6.7, 2.9),
        ];
        let dt = DelaunayTriangulation::from_points(&points, TriangulationOptions::default())
            .unwrap();
        assert!(find_delaunay_violations(&dt).is_empty());
        assert_eq!(validate_delaunay(&dt), Ok(()));
    }

    #[test]
    fn cocircular_points_are_not_violations() {
        let octagon: Vec<_> = (0_u8..8)
            .map(|i| {
                let angle = TAU * f64::from(i) / 8.0;
                pt(100.0 * angle.cos(), 100.0 * angle.sin())
            })
            .collect();
        let triangle = Triangle::new(octagon[0], octagon[1], octagon[2]).unwrap();
        for v in &octagon {
            assert!(!violates(&triangle, v), "({v}) flagged");
        }
        assert!(violates(&triangle, &pt(0.0, 99.0)));
        assert!(!violates(&triangle, &pt(0.0, 101.0)));

        let dt = DelaunayTriangulation::from_points(&octagon, TriangulationOptions::default())
            .unwrap();
        assert_eq!(validate_delaunay(&dt), Ok(()));
    }

    #[test]
    fn overshared_edge_is_detected() {
        let (a, b) = (pt(0.0, 0.0), pt(2.0, 0.0));
        let mut mesh = Mesh::new();
        for apex in [pt(1.0, 1.0), pt(1.0, -1.0), pt(1.0, 3.0)] {
            mesh.push(Triangle::new(a, b, apex).unwrap());
        }
        assert!(matches!(
            validate_edge_sharing(&mesh),
            Err(DelaunayValidationError::NonManifoldEdge { count: 3, .. })
        ));
    }

    #[test]
    fn duplicate_triangle_is_detected() {
        let mut mesh = Mesh::new();
        mesh.push(Triangle::new(pt(0.0, 0.0), pt(1.0, 0.0), pt(0.0, 1.0)).unwrap());
        mesh.push(Triangle::new(pt(0.0, 1.0), pt(0.0, 0.0), pt(1.0, 0.0)).unwrap());
        assert!(matches!(
            validate_no_duplicate_triangles(&mesh),
            Err(DelaunayValidationError::DuplicateTriangle { .. })
        ));
    }
}
