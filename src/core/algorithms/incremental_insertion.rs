//! Incremental Delaunay insertion using the cavity-based (Bowyer–Watson)
//! algorithm.
//!
//! Inserting a point `p` proceeds in two phases so that a failure never
//! leaves the mesh half-modified:
//!
//! 1. **Plan** (read-only)
//!    - find the conflict region of `p` ([`find_conflict_region`])
//!    - extract the cavity boundary ([`extract_cavity_boundary`])
//!    - check the cavity topology
//!    - build one fan triangle `(a, b, p)` per boundary edge ([`fill_cavity`])
//! 2. **Commit**
//!    - remove the conflicting triangles ([`Mesh::remove_marked`])
//!    - append the fan triangles
//!
//! # Invariants
//!
//! A conflict region around a point strictly inside the mesh is a
//! topological disk with no interior vertices, so a cavity of `t` triangles
//! has exactly `t + 2` boundary edges. Rounding on near-cocircular input can
//! still produce another count; that is reported as
//! [`InsertionError::NonSimpleCavity`] and handled like degenerate geometry.
//! A non-empty cavity without any boundary edge can only come from a
//! malformed mesh and is an [`InsertionError::InvariantViolation`]. Nothing
//! is modified in either case.

use crate::core::algorithms::locate::{
    ConflictError, extract_cavity_boundary, find_conflict_region,
};
use crate::core::collections::{CAVITY_BUFFER_SIZE, SmallBuffer};
use crate::core::edge::Edge;
use crate::core::mesh::{Mesh, MeshError};
use crate::core::super_triangle::SuperTriangle;
use crate::core::triangle::Triangle;
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::CircumcircleError;
use serde::Serialize;

/// Triangles created to fill one cavity.
pub type FanTriangleBuffer<T> = SmallBuffer<Triangle<T>, CAVITY_BUFFER_SIZE>;

/// Error during incremental insertion.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum InsertionError {
    /// Conflict region processing failed
    #[error("Conflict region error: {0}")]
    ConflictRegion(#[from] ConflictError),

    /// A fan triangle would be degenerate
    #[error("Cavity filling failed: {0}")]
    DegenerateGeometry(#[from] CircumcircleError),

    /// Mesh mutation failed
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// The cavity is not a topological disk, so its fan would not tile it
    #[error(
        "Cavity of {triangles} triangles has {boundary_edges} boundary edges, expected {}",
        triangles + 2
    )]
    NonSimpleCavity {
        /// Number of conflicting triangles
        triangles: usize,
        /// Number of boundary edges found
        boundary_edges: usize,
    },

    /// The mesh or the cavity violates a structural invariant
    #[error("Invariant violation: {message}")]
    InvariantViolation {
        /// Error message
        message: String,
    },
}

impl InsertionError {
    /// Returns true for failures caused by the geometry of the inserted
    /// point, which a degeneracy policy may choose to skip.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        matches!(
            self,
            Self::DegenerateGeometry(_) | Self::NonSimpleCavity { .. }
        )
    }
}

// =============================================================================
// OUTCOMES AND STATISTICS
// =============================================================================

/// What happened to a single point handed to the triangulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InsertionOutcome {
    /// The point was inserted and the cavity re-triangulated.
    Inserted {
        /// Number of triangles removed with the cavity
        triangles_removed: usize,
        /// Number of fan triangles created
        triangles_created: usize,
    },
    /// No circumcircle strictly contains the point; the mesh is unchanged.
    NoConflict,
    /// The point equals an already inserted point; the mesh is unchanged.
    Duplicate,
    /// Inserting the point would create a degenerate triangle and the
    /// degeneracy policy chose to skip it; the mesh is unchanged.
    SkippedDegenerate,
}

impl InsertionOutcome {
    /// Returns true if the point became a vertex of the mesh.
    #[inline]
    #[must_use]
    pub const fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted { .. })
    }
}

/// Running totals over all points handed to a triangulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InsertionStatistics {
    /// Points that became mesh vertices
    pub vertices_inserted: usize,
    /// Fan triangles created
    pub triangles_created: usize,
    /// Conflicting triangles removed
    pub triangles_removed: usize,
    /// Points skipped as exact duplicates
    pub duplicates_skipped: usize,
    /// Points skipped by the degeneracy policy
    pub degenerate_skipped: usize,
    /// Points that conflicted with no triangle
    pub no_conflict: usize,
}

impl InsertionStatistics {
    /// Creates zeroed statistics.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices_inserted: 0,
            triangles_created: 0,
            triangles_removed: 0,
            duplicates_skipped: 0,
            degenerate_skipped: 0,
            no_conflict: 0,
        }
    }

    /// Adds one insertion outcome to the totals.
    pub const fn record(&mut self, outcome: &InsertionOutcome) {
        match *outcome {
            InsertionOutcome::Inserted {
                triangles_removed,
                triangles_created,
            } => {
                self.vertices_inserted += 1;
                self.triangles_removed += triangles_removed;
                self.triangles_created += triangles_created;
            }
            InsertionOutcome::NoConflict => self.no_conflict += 1,
            InsertionOutcome::Duplicate => self.duplicates_skipped += 1,
            InsertionOutcome::SkippedDegenerate => self.degenerate_skipped += 1,
        }
    }

    /// Total number of points processed, inserted or not.
    #[must_use]
    pub const fn points_processed(&self) -> usize {
        self.vertices_inserted
            + self.duplicates_skipped
            + self.degenerate_skipped
            + self.no_conflict
    }
}

// =============================================================================
// CAVITY FILLING
// =============================================================================

/// Builds one triangle `(a, b, point)` for every boundary edge `(a, b)`.
///
/// The mesh is not touched; the caller commits the triangles.
///
/// # Errors
///
/// Returns [`InsertionError::DegenerateGeometry`] for the first fan triangle
/// whose vertices are collinear within `tolerance`.
///
/// # Examples
///
/// ```rust
/// use delaunay_dual::core::algorithms::incremental_insertion::fill_cavity;
/// use delaunay_dual::core::edge::Edge;
/// use delaunay_dual::geometry::point::Point;
///
/// let (a, b, c) = (Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 4.0));
/// let boundary = [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)];
/// let fan = fill_cavity(&boundary, Point::new(1.0, 1.0), 1e-12).unwrap();
/// assert_eq!(fan.len(), 3);
/// assert!(fan.iter().all(|t| t.contains_vertex(&Point::new(1.0, 1.0))));
///
/// // The point lies on edge (a, b): the fan triangle on that edge is flat.
/// assert!(fill_cavity(&boundary, Point::new(2.0, 0.0), 1e-12).is_err());
/// ```
pub fn fill_cavity<T>(
    boundary: &[Edge<T>],
    point: Point<T>,
    tolerance: T,
) -> Result<FanTriangleBuffer<T>, InsertionError>
where
    T: CoordinateScalar,
{
    let mut fan = FanTriangleBuffer::with_capacity(boundary.len());
    for edge in boundary {
        let triangle = Triangle::with_tolerance(edge.v0(), edge.v1(), point, tolerance)
            .inspect_err(|e| {
                tracing::debug!(
                    "Fan triangle ({}), ({}), ({}) is degenerate: {}",
                    edge.v0(),
                    edge.v1(),
                    point,
                    e
                );
            })?;
        fan.push(triangle);
    }
    Ok(fan)
}

/// Inserts `point` into `mesh` by re-triangulating its cavity.
///
/// The cavity is found with [`find_conflict_region`], passing
/// `super_triangle` through. Returns [`InsertionOutcome::NoConflict`]
/// without touching the mesh when no circumcircle strictly contains `point`
/// (for example when `point` is already a vertex). Otherwise returns
/// [`InsertionOutcome::Inserted`].
///
/// # Errors
///
/// - [`InsertionError::InvariantViolation`] if the cavity has no boundary
/// - [`InsertionError::NonSimpleCavity`] if its boundary size does not match
///   its triangle count
/// - [`InsertionError::DegenerateGeometry`] if a fan triangle is degenerate
/// - [`InsertionError::ConflictRegion`] if the mesh is not a valid planar
///   triangulation
///
/// The mesh is unchanged whenever an error is returned.
///
/// # Examples
///
/// ```rust
/// use delaunay_dual::core::algorithms::incremental_insertion::{
///     InsertionOutcome, insert_into_cavity,
/// };
/// use delaunay_dual::core::mesh::Mesh;
/// use delaunay_dual::core::triangle::Triangle;
/// use delaunay_dual::geometry::point::Point;
///
/// let mut mesh = Mesh::new();
/// mesh.push(
///     Triangle::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 10.0)).unwrap(),
/// );
/// let outcome = insert_into_cavity(&mut mesh, Point::new(2.0, 3.0), None, 1e-12).unwrap();
/// assert_eq!(
///     outcome,
///     InsertionOutcome::Inserted { triangles_removed: 1, triangles_created: 3 }
/// );
/// assert_eq!(mesh.len(), 3);
/// ```
pub fn insert_into_cavity<T>(
    mesh: &mut Mesh<T>,
    point: Point<T>,
    super_triangle: Option<&SuperTriangle<T>>,
    tolerance: T,
) -> Result<InsertionOutcome, InsertionError>
where
    T: CoordinateScalar,
{
    let bad_triangles = find_conflict_region(mesh, &point, super_triangle);
    if bad_triangles.is_empty() {
        tracing::debug!("Point ({}) conflicts with no triangle; mesh unchanged", point);
        return Ok(InsertionOutcome::NoConflict);
    }

    let boundary = extract_cavity_boundary(mesh, &bad_triangles)?;
    if boundary.is_empty() {
        return Err(InsertionError::InvariantViolation {
            message: format!(
                "cavity of {} triangles around ({point}) has an empty boundary",
                bad_triangles.len()
            ),
        });
    }
    if boundary.len() != bad_triangles.len() + 2 {
        tracing::debug!(
            "Cavity around ({}) is not a disk: {} triangles, {} boundary edges",
            point,
            bad_triangles.len(),
            boundary.len()
        );
        return Err(InsertionError::NonSimpleCavity {
            triangles: bad_triangles.len(),
            boundary_edges: boundary.len(),
        });
    }

    let fan = fill_cavity(&boundary, point, tolerance)?;

    let triangles_removed = mesh.remove_marked(&bad_triangles)?;
    let triangles_created = fan.len();
    mesh.extend(fan);

    tracing::trace!(
        "Inserted ({}): removed {} triangles, created {}",
        point,
        triangles_removed,
        triangles_created
    );
    Ok(InsertionOutcome::Inserted {
        triangles_removed,
        triangles_created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::util::generate_random_points_seeded;

    fn pt(x: f64, y: f64) -> Point<f64> {
        Point::new(x, y)
    }

    fn seeded_mesh() -> Mesh<f64> {
        let mut mesh = Mesh::new();
        mesh.push(Triangle::new(pt(-100.0, -100.0), pt(100.0, -100.0), pt(0.0, 100.0)).unwrap());
        mesh
    }

    #[test]
    fn inserting_into_single_triangle_creates_three() {
        let mut mesh = seeded_mesh();
        let outcome = insert_into_cavity(&mut mesh, pt(1.0, 2.0), None, 1e-12).unwrap();
        assert_eq!(
            outcome,
            InsertionOutcome::Inserted {
                triangles_removed: 1,
                triangles_created: 3
            }
        );
        assert!(mesh.iter().all(|t| t.contains_vertex(&pt(1.0, 2.0))));
    }

    #[test]
    fn existing_vertex_is_a_no_op() {
        let mut mesh = seeded_mesh();
        insert_into_cavity(&mut mesh, pt(1.0, 2.0), None, 1e-12).unwrap();
        let before = mesh.triangles().to_vec();
        let outcome = insert_into_cavity(&mut mesh, pt(1.0, 2.0), None, 1e-12).unwrap();
        assert_eq!(outcome, InsertionOutcome::NoConflict);
        assert_eq!(mesh.triangles(), before.as_slice());
    }

    #[test]
    fn every_insertion_adds_two_triangles() {
        let mut mesh = seeded_mesh();
        let points = generate_random_points_seeded::<f64>(60, (-10.0, 10.0), 5).unwrap();
        for (i, p) in points.iter().enumerate() {
            let outcome = insert_into_cavity(&mut mesh, *p, None, 1e-12).unwrap();
            assert!(outcome.is_inserted());
            // Euler: a triangulated triangle with n interior vertices has 2n + 1 faces.
            assert_eq!(mesh.len(), 2 * (i + 1) + 1);
        }
    }

    #[test]
    fn degenerate_fan_leaves_mesh_unchanged() {
        let mut mesh = seeded_mesh();
        insert_into_cavity(&mut mesh, pt(0.0, 0.0), None, 1e-12).unwrap();
        let before = mesh.triangles().to_vec();
        // A huge tolerance makes the sliver next to (0, 0) degenerate.
        let err = insert_into_cavity(&mut mesh, pt(0.0, 0.001), None, 0.1).unwrap_err();
        assert!(matches!(err, InsertionError::DegenerateGeometry(_)));
        assert_eq!(mesh.triangles(), before.as_slice());
    }

    #[test]
    fn repeated_triangle_is_an_invariant_violation() {
        let triangle = Triangle::new(pt(0.0, 0.0), pt(3.0, 0.0), pt(0.0, 3.0)).unwrap();
        let mut mesh = Mesh::new();
        mesh.push(triangle);
        mesh.push(triangle);
        let before = mesh.triangles().to_vec();

        let err = insert_into_cavity(&mut mesh, pt(1.0, 1.0), None, 1e-12).unwrap_err();
        assert_eq!(
            err,
            InsertionError::InvariantViolation {
                message: "cavity of 2 triangles around (1 1) has an empty boundary".to_string()
            }
        );
        assert!(!err.is_degenerate());
        assert_eq!(mesh.triangles(), before.as_slice());
    }

    #[test]
    fn folded_cavity_is_not_simple() {
        // Three triangles over the square (0,0)-(4,4), two of them
        // overlapping: every pair shares an edge, so the cavity is a cycle.
        let (a, b, c, d) = (pt(0.0, 0.0), pt(4.0, 0.0), pt(0.0, 4.0), pt(4.0, 4.0));
        let mut mesh = Mesh::new();
        mesh.push(Triangle::new(a, b, c).unwrap());
        mesh.push(Triangle::new(a, b, d).unwrap());
        mesh.push(Triangle::new(b, c, d).unwrap());
        let before = mesh.triangles().to_vec();

        let err = insert_into_cavity(&mut mesh, pt(1.0, 1.0), None, 1e-12).unwrap_err();
        assert_eq!(
            err,
            InsertionError::NonSimpleCavity {
                triangles: 3,
                boundary_edges: 3
            }
        );
        assert!(err.is_degenerate());
        assert_eq!(mesh.triangles(), before.as_slice());
    }

    #[test]
    fn overlapping_conflict_without_shared_edge_is_left_alone() {
        // A second triangle inside the first shares no edge with it; only the
        // first triangle that contains the point is re-triangulated.
        let mut mesh = seeded_mesh();
        let inner = Triangle::new(pt(-50.0, -50.0), pt(50.0, -50.0), pt(0.0, 50.0)).unwrap();
        mesh.push(inner);
        let outcome = insert_into_cavity(&mut mesh, pt(0.0, 0.0), None, 1e-12).unwrap();
        assert_eq!(
            outcome,
            InsertionOutcome::Inserted {
                triangles_removed: 1,
                triangles_created: 3
            }
        );
        assert_eq!(mesh.triangles()[0], inner);
    }

    #[test]
    fn statistics_record_outcomes() {
        let mut stats = InsertionStatistics::new();
        stats.record(&InsertionOutcome::Inserted {
            triangles_removed: 2,
            triangles_created: 4,
        });
        stats.record(&InsertionOutcome::Duplicate);
        stats.record(&InsertionOutcome::SkippedDegenerate);
        stats.record(&InsertionOutcome::NoConflict);
        assert_eq!(stats.vertices_inserted, 1);
        assert_eq!(stats.triangles_removed, 2);
        assert_eq!(stats.triangles_created, 4);
        assert_eq!(stats.points_processed(), 4);
        assert_eq!(stats, {
            let mut expected = InsertionStatistics::default();
            expected.record(&InsertionOutcome::NoConflict);
            expected.record(&InsertionOutcome::SkippedDegenerate);
            expected.record(&InsertionOutcome::Duplicate);
            expected.record(&InsertionOutcome::Inserted {
                triangles_removed: 2,
                triangles_created: 4,
            });
            expected
        });
    }
}
