//! Conflict-region detection for incremental insertion.
//!
//! Inserting a point `p` into a Delaunay mesh invalidates exactly the
//! triangles whose circumcircle strictly contains `p`. Those triangles form
//! the *conflict region* (or cavity). Removing them leaves a star-shaped
//! polygonal hole whose boundary edges are re-connected to `p`.
//!
//! # Algorithm
//!
//! 1. [`find_conflict_region`] scans every triangle of the mesh and keeps
//!    the ones for which `p` is [`InCircle::INSIDE`](crate::geometry::predicates::InCircle),
//!    with super-triangle corners treated as points at infinity
//!    ([`SuperTriangle::conflicts`]). Points exactly on a circumcircle do not
//!    conflict.
//! 2. Of those, only the triangles edge-connected to a triangle containing
//!    `p` are kept. Near-cocircular input can put rounding-noise conflicts
//!    anywhere in the mesh; they are never part of the cavity.
//! 3. [`extract_cavity_boundary`] counts how often each edge occurs among the
//!    conflicting triangles. Edges seen twice are interior to the cavity and
//!    disappear; edges seen once form the boundary.
//!
//! The scan is linear in the number of triangles. Adjacency is rebuilt from
//! the conflicting triangles alone, so the mesh stores none.

use crate::core::collections::{
    BadTriangleBuffer, BoundaryEdgeBuffer, EdgeCountMap, EdgeTriangleMap,
};
use crate::core::mesh::Mesh;
use crate::core::super_triangle::SuperTriangle;
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// Error during conflict region processing.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConflictError {
    /// A conflict index does not refer to a triangle of the mesh.
    #[error("Invalid triangle index {index} for a mesh of {len} triangles")]
    InvalidTriangle {
        /// The offending index.
        index: usize,
        /// Number of triangles in the mesh.
        len: usize,
    },

    /// An edge is shared by more than two conflicting triangles, so the mesh
    /// is not a valid planar triangulation.
    #[error("Edge {edge} is shared by {count} conflicting triangles (at most 2 allowed)")]
    NonManifoldEdge {
        /// The offending edge, formatted as `"(x0 y0)-(x1 y1)"`.
        edge: String,
        /// Number of conflicting triangles containing the edge.
        count: usize,
    },
}

/// Finds the indices of the triangles whose circumcircle strictly contains
/// `point` and that are edge-connected to a triangle containing `point`.
///
/// With a `super_triangle`, its corners are treated as points at infinity
/// ([`SuperTriangle::conflicts`]); without one, every triangle is tested
/// against its cached circumcircle. If no conflicting triangle contains
/// `point`, every conflicting triangle is returned.
///
/// Indices are returned in ascending order and refer to
/// [`Mesh::triangles`]. An empty result means that inserting `point` would
/// not change the mesh.
///
/// # Examples
///
/// ```rust
/// use delaunay_dual::core::algorithms::locate::find_conflict_region;
/// use delaunay_dual::core::mesh::Mesh;
/// use delaunay_dual::core::triangle::Triangle;
/// use delaunay_dual::geometry::point::Point;
///
/// let mut mesh = Mesh::new();
/// mesh.push(
///     Triangle::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 3.0)).unwrap(),
/// );
/// assert_eq!(find_conflict_region(&mesh, &Point::new(1.0, 1.0), None).as_slice(), &[0]);
/// // Circumcircle is centered at (2, 1.5) with radius 2.5; (4, 3) lies on it.
/// assert!(find_conflict_region(&mesh, &Point::new(4.0, 3.0), None).is_empty());
/// ```
#[must_use]
pub fn find_conflict_region<T>(
    mesh: &Mesh<T>,
    point: &Point<T>,
    super_triangle: Option<&SuperTriangle<T>>,
) -> BadTriangleBuffer
where
    T: CoordinateScalar,
{
    let conflicts: BadTriangleBuffer = mesh
        .iter()
        .enumerate()
        .filter(|(_, triangle)| {
            super_triangle.map_or_else(
                || triangle.is_bad_for(point),
                |st| st.conflicts(triangle, point),
            )
        })
        .map(|(index, _)| index)
        .collect();

    let region = if conflicts.len() > 1 {
        connected_to_point(mesh, &conflicts, point)
    } else {
        conflicts
    };

    tracing::trace!(
        "Point ({}) conflicts with {} of {} triangles",
        point,
        region.len(),
        mesh.len()
    );
    region
}

/// Keeps the conflicting triangles reachable across shared edges from the
/// first one that contains `point`.
fn connected_to_point<T>(
    mesh: &Mesh<T>,
    conflicts: &[usize],
    point: &Point<T>,
) -> BadTriangleBuffer
where
    T: CoordinateScalar,
{
    let triangles = mesh.triangles();
    let Some(&start) = conflicts
        .iter()
        .find(|&&index| triangles[index].contains_point(point))
    else {
        tracing::debug!(
            "No conflicting triangle contains ({}); keeping all {} conflicts",
            point,
            conflicts.len()
        );
        return BadTriangleBuffer::from_slice(conflicts);
    };

    let mut incident: EdgeTriangleMap<T> = EdgeTriangleMap::new();
    for &index in conflicts {
        for edge in triangles[index].edges() {
            incident.entry(edge).or_default().push(index);
        }
    }

    let mut region = BadTriangleBuffer::new();
    let mut stack = BadTriangleBuffer::new();
    stack.push(start);
    while let Some(index) = stack.pop() {
        if region.contains(&index) {
            continue;
        }
        region.push(index);
        for edge in triangles[index].edges() {
            if let Some(neighbors) = incident.get(&edge) {
                stack.extend(neighbors.iter().copied().filter(|n| !region.contains(n)));
            }
        }
    }

    if region.len() < conflicts.len() {
        tracing::debug!(
            "Dropped {} conflicting triangles not connected to ({})",
            conflicts.len() - region.len(),
            point
        );
    }
    region.sort_unstable();
    region
}

/// Extracts the boundary edges of a conflict region.
///
/// Returns the edges that belong to exactly one of the triangles at
/// `conflict_triangles`, in canonical edge order. Duplicate indices in
/// `conflict_triangles` are ignored.
///
/// # Errors
///
/// - [`ConflictError::InvalidTriangle`] if an index is out of bounds
/// - [`ConflictError::NonManifoldEdge`] if an edge occurs in more than two
///   conflicting triangles
///
/// # Examples
///
/// ```rust
/// use delaunay_dual::core::algorithms::locate::extract_cavity_boundary;
/// use delaunay_dual::core::edge::Edge;
/// use delaunay_dual::core::mesh::Mesh;
/// use delaunay_dual::core::triangle::Triangle;
/// use delaunay_dual::geometry::point::Point;
///
/// let (a, b, c, d) = (
///     Point::new(0.0, 0.0),
///     Point::new(4.0, 0.0),
///     Point::new(4.5, 4.0),
///     Point::new(0.5, 3.5),
/// );
/// let mut mesh = Mesh::new();
/// mesh.push(Triangle::new(a, b, d).unwrap());
/// mesh.push(Triangle::new(b, c, d).unwrap());
///
/// let boundary = extract_cavity_boundary(&mesh, &[0, 1]).unwrap();
/// assert_eq!(boundary.len(), 4);
/// assert!(!boundary.contains(&Edge::new(b, d)));
/// ```
pub fn extract_cavity_boundary<T>(
    mesh: &Mesh<T>,
    conflict_triangles: &[usize],
) -> Result<BoundaryEdgeBuffer<T>, ConflictError>
where
    T: CoordinateScalar,
{
    let mut unique = BadTriangleBuffer::from_slice(conflict_triangles);
    unique.sort_unstable();
    unique.dedup();

    let mut edge_counts: EdgeCountMap<T> = EdgeCountMap::new();
    for &index in &unique {
        let triangle = mesh.get(index).ok_or(ConflictError::InvalidTriangle {
            index,
            len: mesh.len(),
        })?;
        for edge in triangle.edges() {
            *edge_counts.entry(edge).or_insert(0) += 1;
        }
    }

    let mut boundary = BoundaryEdgeBuffer::new();
    for (edge, count) in edge_counts {
        match count {
            1 => boundary.push(edge),
            2 => {}
            _ => {
                return Err(ConflictError::NonManifoldEdge {
                    edge: format!("({})-({})", edge.v0(), edge.v1()),
                    count,
                });
            }
        }
    }

    tracing::trace!(
        "Cavity of {} triangles has {} boundary edges",
        unique.len(),
        boundary.len()
    );
    Ok(boundary)
}
