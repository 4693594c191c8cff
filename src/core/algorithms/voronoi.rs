//! Voronoi vertices and finite Voronoi edges from a finished triangulation.
//!
//! Every Delaunay triangle corresponds to a Voronoi vertex (its
//! circumcenter), and every edge shared by two Delaunay triangles
//! corresponds to a finite Voronoi edge joining their circumcenters.
//!
//! Triangles touching the super-triangle are excluded first, so only
//! triangles whose three vertices are input points contribute. A
//! circumcenter is reported only if its triangle shares an edge with
//! another contributing triangle. Results are collected in ordered sets, so
//! the output is sorted and independent of insertion order.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::core::delaunay_triangulation::{DelaunayTriangulation, TriangulationState};
use crate::core::edge::Edge;
use crate::core::triangle::Triangle;
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// Errors raised while building the Voronoi dual.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum VoronoiError {
    /// The triangulation must be finished before its dual is built.
    #[error("Voronoi dual requires a finished triangulation, but it is in state {state}")]
    TriangulationNotFinished {
        /// The state of the triangulation.
        state: TriangulationState,
    },
}

/// A finite Voronoi edge and the Delaunay edge it is dual to.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(bound = "T: CoordinateScalar")]
pub struct VoronoiEdge<T>
where
    T: CoordinateScalar,
{
    /// Segment between the circumcenters of the two adjacent triangles.
    pub segment: Edge<T>,
    /// The Delaunay edge shared by the two triangles.
    pub dual: Edge<T>,
}

impl<T> PartialEq for VoronoiEdge<T>
where
    T: CoordinateScalar,
{
    fn eq(&self, other: &Self) -> bool {
        self.segment == other.segment && self.dual == other.dual
    }
}

impl<T> Eq for VoronoiEdge<T> where T: CoordinateScalar {}

impl<T> PartialOrd for VoronoiEdge<T>
where
    T: CoordinateScalar,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for VoronoiEdge<T>
where
    T: CoordinateScalar,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.segment
            .cmp(&other.segment)
            .then_with(|| self.dual.cmp(&other.dual))
    }
}

/// Voronoi vertices and finite Voronoi edges of a triangulation.
///
/// # Examples
///
/// ```rust
/// use delaunay_dual::core::algorithms::voronoi::VoronoiDual;
/// use delaunay_dual::core::delaunay_triangulation::{DelaunayTriangulation, TriangulationOptions};
/// use delaunay_dual::geometry::point::Point;
///
/// let points = [
///     Point::new(0.0, 0.0),
///     Point::new(4.0, 0.0),
///     Point::new(4.5, 4.0),
///     Point::new(0.5, 3.5),
/// ];
/// let dt = DelaunayTriangulation::from_points(&points, TriangulationOptions::default()).unwrap();
/// let dual = VoronoiDual::from_triangulation(&dt).unwrap();
///
/// // Two triangles sharing one edge: two Voronoi vertices, one finite edge.
/// assert_eq!(dual.number_of_vertices(), 2);
/// assert_eq!(dual.number_of_edges(), 1);
/// ```
#[derive(Clone, Debug, Default, Serialize)]
#[serde(bound = "T: CoordinateScalar")]
pub struct VoronoiDual<T>
where
    T: CoordinateScalar,
{
    vertices: Vec<Point<T>>,
    edges: Vec<VoronoiEdge<T>>,
}

impl<T> VoronoiDual<T>
where
    T: CoordinateScalar,
{
    /// Builds the dual of a finished triangulation.
    ///
    /// Every unordered pair of distinct Delaunay triangles is tested for a
    /// shared edge. Both circumcenters of each adjacent pair become Voronoi
    /// vertices; the pair also yields a Voronoi edge unless the two
    /// circumcenters coincide (four cocircular points).
    ///
    /// # Errors
    ///
    /// Returns [`VoronoiError::TriangulationNotFinished`] unless `dt` is in
    /// state [`TriangulationState::Done`].
    pub fn from_triangulation(dt: &DelaunayTriangulation<T>) -> Result<Self, VoronoiError> {
        if !dt.is_finished() {
            return Err(VoronoiError::TriangulationNotFinished { state: dt.state() });
        }

        let triangles: Vec<&Triangle<T>> = dt.delaunay_triangles().collect();
        let mut vertices = BTreeSet::new();
        let mut edges = BTreeSet::new();

        for (i, first) in triangles.iter().enumerate() {
            for second in &triangles[i + 1..] {
                let Some(shared) = first.shared_edge(second) else {
                    continue;
                };
                let (c1, c2) = (first.circumcenter(), second.circumcenter());
                vertices.insert(c1);
                vertices.insert(c2);
                if c1 != c2 {
                    edges.insert(VoronoiEdge {
                        segment: Edge::new(c1, c2),
                        dual: shared,
                    });
                }
            }
        }

        tracing::debug!(
            "Voronoi dual of {} triangles: {} vertices, {} finite edges",
            triangles.len(),
            vertices.len(),
            edges.len()
        );
        Ok(Self {
            vertices: vertices.into_iter().collect(),
            edges: edges.into_iter().collect(),
        })
    }

    /// Voronoi vertices in ascending lexicographic order.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Point<T>] {
        &self.vertices
    }

    /// Finite Voronoi edges in ascending order of their segments.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[VoronoiEdge<T>] {
        &self.edges
    }

    /// Number of Voronoi vertices.
    #[inline]
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of finite Voronoi edges.
    #[inline]
    #[must_use]
    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    /// Consumes the dual and returns its vertices.
    #[must_use]
    pub fn into_vertices(self) -> Vec<Point<T>> {
        self.vertices
    }
}

/// Returns the sorted, deduplicated Voronoi vertices of a finished
/// triangulation.
///
/// # Errors
///
/// Returns [`VoronoiError::TriangulationNotFinished`] unless `dt` is in
/// state [`TriangulationState::Done`].
///
/// # Examples
///
/// ```rust
/// use delaunay_dual::core::algorithms::voronoi::voronoi_vertices;
/// use delaunay_dual::core::delaunay_triangulation::{DelaunayTriangulation, TriangulationOptions};
/// use delaunay_dual::geometry::point::Point;
///
/// // A single Delaunay triangle has no neighbor, hence no Voronoi vertex.
/// let points = [Point::new(1.0, 1.0), Point::new(2.0, 1.0), Point::new(2.0, 2.0)];
/// let dt = DelaunayTriangulation::from_points(&points, TriangulationOptions::default()).unwrap();
/// assert!(voronoi_vertices(&dt).unwrap().is_empty());
/// ```
pub fn voronoi_vertices<T>(dt: &DelaunayTriangulation<T>) -> Result<Vec<Point<T>>, VoronoiError>
where
    T: CoordinateScalar,
{
    VoronoiDual::from_triangulation(dt).map(VoronoiDual::into_vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::delaunay_triangulation::TriangulationOptions;
    use crate::core::super_triangle::BoundingBox;
    use approx::assert_relative_eq;

    fn pt(x: f64, y: f64) -> Point<f64> {
        Point::new(x, y)
    }

    fn quad() -> DelaunayTriangulation<f64> {
        let points = [pt(0.0, 0.0), pt(4.0, 0.0), pt(4.5, 4.0), pt(0.5, 3.5)];
        DelaunayTriangulation::from_points(&points, TriangulationOptions::default()).unwrap()
    }

    #[test]
    fn unfinished_triangulation_is_rejected() {
        let mut dt = DelaunayTriangulation::<f64>::empty();
        assert_eq!(
            voronoi_vertices(&dt),
            Err(VoronoiError::TriangulationNotFinished {
                state: TriangulationState::Empty
            })
        );
        dt.seed(&BoundingBox::new(pt(0.0, 0.0), pt(1.0, 1.0))).unwrap();
        dt.insert(pt(0.5, 0.5)).unwrap();
        assert!(matches!(
            VoronoiDual::from_triangulation(&dt),
            Err(VoronoiError::TriangulationNotFinished {
                state: TriangulationState::Inserting(1)
            })
        ));
    }

    #[test]
    fn quad_dual_has_two_vertices_and_one_edge() {
        let dt = quad();
        assert_eq!(dt.number_of_delaunay_triangles(), 2);
        let dual = VoronoiDual::from_triangulation(&dt).unwrap();

        let vertices = dual.vertices();
        assert_eq!(vertices.len(), 2);
        // Circumcenters of (0,0),(4,0),(0.5,3.5) and (4,0),(4.5,4),(0.5,3.5).
        assert_relative_eq!(vertices[0].x(), 2.0);
        assert_relative_eq!(vertices[0].y(), 1.5);
        assert_relative_eq!(vertices[1].x(), 2.694_444_444_444_444_6, epsilon = 1e-12);
        assert_relative_eq!(vertices[1].y(), 2.194_444_444_444_444_6, epsilon = 1e-12);

        let edge = dual.edges()[0];
        assert_eq!(edge.dual, Edge::new(pt(4.0, 0.0), pt(0.5, 3.5)));
        assert_eq!(edge.segment, Edge::new(vertices[0], vertices[1]));
    }

    #[test]
    fn vertices_are_sorted_and_unique() {
        let points = [
            pt(656.0, 607.0),
            pt(349.0, 228.0),
            pt(460.0, 380.0),
            pt(657.0, 378.0),
            pt(618.0, 187.0),
            pt(155.0, 99.0),
        ];
        let dt =
            DelaunayTriangulation::from_points(&points, TriangulationOptions::default()).unwrap();
        let vertices = voronoi_vertices(&dt).unwrap();
        assert!(!vertices.is_empty());
        assert!(vertices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn vertices_match_dual_vertices() {
        let dt = quad();
        let dual = VoronoiDual::from_triangulation(&dt).unwrap();
        assert_eq!(voronoi_vertices(&dt).unwrap(), dual.vertices());
    }
}
