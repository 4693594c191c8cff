//! Delaunay triangulation driver with incremental insertion.
//!
//! [`DelaunayTriangulation`] owns the mesh and walks it through a small
//! state machine:
//!
//! ```text
//! Empty ──seed──▶ SuperTriangleSeeded ──insert──▶ Inserting(1) ──insert──▶ … ──finish──▶ Done
//!                          └───────────────────────finish──────────────────────────────────▲
//! ```
//!
//! Seeding places a [`SuperTriangle`] around the bounding box of the data.
//! Every inserted point must lie strictly inside it. Points are inserted in
//! the order they are given; the raw mesh keeps the triangles attached to
//! super vertices, and [`DelaunayTriangulation::delaunay_triangles`] is the
//! filtered view of the triangulation of the input points proper.
//!
//! # Degeneracy policy
//!
//! A point whose insertion would create a (near-)degenerate triangle is
//! handled according to [`DegeneracyPolicy`]: it is either skipped with a
//! warning, leaving the mesh unchanged, or the error aborts the run.
//! Exact duplicates of inserted points are always skipped.

use std::collections::BTreeSet;
use std::fmt;

use num_traits::cast;
use serde::{Deserialize, Serialize};

use crate::core::algorithms::incremental_insertion::{
    InsertionError, InsertionOutcome, InsertionStatistics, insert_into_cavity,
};
use crate::core::mesh::Mesh;
use crate::core::super_triangle::{
    BoundingBox, DEFAULT_SUPER_TRIANGLE_MARGIN, MIN_SUPER_TRIANGLE_MARGIN, SuperTriangle,
};
use crate::core::triangle::Triangle;
use crate::core::util::delaunay_validation::{DelaunayValidationError, validate_delaunay};
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::{CoordinateScalar, CoordinateValidationError};
use crate::geometry::util::CircumcircleError;

// =============================================================================
// STATE, POLICY AND OPTIONS
// =============================================================================

/// Lifecycle state of a [`DelaunayTriangulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TriangulationState {
    /// No super-triangle yet.
    Empty,
    /// The super-triangle is the only triangle; no point processed yet.
    SuperTriangleSeeded,
    /// The given number of points has been processed.
    Inserting(usize),
    /// Finished; no further insertion is allowed.
    Done,
}

impl fmt::Display for TriangulationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::SuperTriangleSeeded => write!(f, "SuperTriangleSeeded"),
            Self::Inserting(n) => write!(f, "Inserting({n})"),
            Self::Done => write!(f, "Done"),
        }
    }
}

/// What to do with a point whose insertion would create a degenerate
/// triangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegeneracyPolicy {
    /// Skip the point, keep the mesh unchanged and log a warning.
    #[default]
    SkipVertex,
    /// Return the degeneracy as an error.
    Abort,
}

/// Configuration of a [`DelaunayTriangulation`].
///
/// # Examples
///
/// ```rust
/// use delaunay_dual::core::delaunay_triangulation::{
///     DegeneracyPolicy, TriangulationOptionsBuilder,
/// };
///
/// let options = TriangulationOptionsBuilder::<f64>::default()
///     .super_triangle_margin(50.0)
///     .degeneracy_policy(DegeneracyPolicy::Abort)
///     .build()
///     .unwrap();
/// assert_eq!(options.super_triangle_margin, 50.0);
/// assert_eq!(options.degeneracy_tolerance, 1e-12);
///
/// // Margins too small to enclose the data are rejected.
/// assert!(
///     TriangulationOptionsBuilder::<f64>::default()
///         .super_triangle_margin(1.0)
///         .build()
///         .is_err()
/// );
/// ```
#[derive(Builder, Clone, Copy, Debug, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct TriangulationOptions<T>
where
    T: CoordinateScalar,
{
    /// Multiple of the bounding-box extent used to place the super-triangle
    /// vertices.
    #[builder(default = "DEFAULT_SUPER_TRIANGLE_MARGIN")]
    pub super_triangle_margin: f64,
    /// Relative tolerance of the degeneracy test on new triangles.
    #[builder(default = "T::default_tolerance()")]
    pub degeneracy_tolerance: T,
    /// Handling of points that would create degenerate triangles.
    #[builder(default)]
    pub degeneracy_policy: DegeneracyPolicy,
}

impl<T> TriangulationOptionsBuilder<T>
where
    T: CoordinateScalar,
{
    fn validate(&self) -> Result<(), String> {
        if let Some(margin) = self.super_triangle_margin
            && !(margin.is_finite() && margin >= MIN_SUPER_TRIANGLE_MARGIN)
        {
            return Err(format!(
                "super_triangle_margin must be finite and at least {MIN_SUPER_TRIANGLE_MARGIN}, got {margin}"
            ));
        }
        if let Some(tolerance) = self.degeneracy_tolerance
            && !(tolerance.is_finite() && tolerance >= T::zero())
        {
            return Err(format!(
                "degeneracy_tolerance must be finite and non-negative, got {tolerance:?}"
            ));
        }
        Ok(())
    }
}

impl<T> Default for TriangulationOptions<T>
where
    T: CoordinateScalar,
{
    fn default() -> Self {
        Self {
            super_triangle_margin: DEFAULT_SUPER_TRIANGLE_MARGIN,
            degeneracy_tolerance: T::default_tolerance(),
            degeneracy_policy: DegeneracyPolicy::default(),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised by the triangulation driver.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum TriangulationError {
    /// The operation is not allowed in the current state.
    #[error("Cannot {operation} a triangulation in state {state}")]
    InvalidState {
        /// The attempted operation.
        operation: &'static str,
        /// The state at the time of the call.
        state: TriangulationState,
    },

    /// A point has a non-finite coordinate.
    #[error("Invalid point: {source}")]
    InvalidPoint {
        /// The coordinate validation failure.
        #[from]
        source: CoordinateValidationError,
    },

    /// A point does not lie strictly inside the super-triangle.
    #[error("Point ({point}) lies outside the super-triangle")]
    OutsideSuperTriangle {
        /// The rejected point, formatted as `"x y"`.
        point: String,
    },

    /// The options cannot be applied to the coordinate type.
    #[error("Invalid options: {message}")]
    InvalidOptions {
        /// Error message
        message: String,
    },

    /// Inserting a point failed.
    #[error("Insertion failed: {0}")]
    Insertion(#[from] InsertionError),

    /// The super-triangle could not be constructed.
    #[error("Super-triangle construction failed: {0}")]
    SuperTriangle(#[from] CircumcircleError),
}

// =============================================================================
// DELAUNAY TRIANGULATION
// =============================================================================

/// Incremental Bowyer–Watson triangulation of planar points.
///
/// # Examples
///
/// ```rust
/// use delaunay_dual::core::delaunay_triangulation::{
///     DelaunayTriangulation, TriangulationOptions, TriangulationState,
/// };
/// use delaunay_dual::geometry::point::Point;
///
/// let points = [Point::new(1.0, 1.0), Point::new(2.0, 1.0), Point::new(2.0, 2.0)];
/// let dt = DelaunayTriangulation::from_points(&points, TriangulationOptions::default()).unwrap();
///
/// assert_eq!(dt.state(), TriangulationState::Done);
/// assert_eq!(dt.number_of_vertices(), 3);
/// assert_eq!(dt.number_of_triangles(), 7);
/// assert_eq!(dt.delaunay_triangles().count(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct DelaunayTriangulation<T>
where
    T: CoordinateScalar,
{
    mesh: Mesh<T>,
    super_triangle: Option<SuperTriangle<T>>,
    vertices: Vec<Point<T>>,
    vertex_set: BTreeSet<Point<T>>,
    state: TriangulationState,
    statistics: InsertionStatistics,
    options: TriangulationOptions<T>,
}

impl<T> Default for DelaunayTriangulation<T>
where
    T: CoordinateScalar,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> DelaunayTriangulation<T>
where
    T: CoordinateScalar,
{
    /// Creates an empty triangulation with the given options.
    #[must_use]
    pub const fn new(options: TriangulationOptions<T>) -> Self {
        Self {
            mesh: Mesh::new(),
            super_triangle: None,
            vertices: Vec::new(),
            vertex_set: BTreeSet::new(),
            state: TriangulationState::Empty,
            statistics: InsertionStatistics::new(),
            options,
        }
    }

    /// Creates an empty triangulation with default options.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(TriangulationOptions::default())
    }

    /// Triangulates `points` in order and finishes the triangulation.
    ///
    /// The super-triangle is built from the bounding box of `points`. An
    /// empty slice yields a finished triangulation holding only the
    /// super-triangle of the unit box at the origin.
    ///
    /// # Errors
    ///
    /// - [`TriangulationError::InvalidPoint`] if any point is non-finite
    ///   (checked before anything is built)
    /// - [`TriangulationError::SuperTriangle`] if the super-triangle overflows
    /// - any error of [`DelaunayTriangulation::insert`]
    pub fn from_points(
        points: &[Point<T>],
        options: TriangulationOptions<T>,
    ) -> Result<Self, TriangulationError> {
        for point in points {
            point.validate()?;
        }
        let bbox = BoundingBox::from_points(points)
            .unwrap_or_else(|| BoundingBox::new(Point::default(), Point::default()));

        let mut dt = Self::new(options);
        dt.seed(&bbox)?;
        for point in points {
            dt.insert(*point)?;
        }
        dt.finish()?;
        Ok(dt)
    }

    /// Seeds the mesh with the super-triangle enclosing `bbox`.
    ///
    /// # Errors
    ///
    /// - [`TriangulationError::InvalidState`] unless the state is
    ///   [`TriangulationState::Empty`]
    /// - [`TriangulationError::InvalidPoint`] if a corner of `bbox` is
    ///   non-finite
    /// - [`TriangulationError::InvalidOptions`] if the margin cannot be
    ///   represented in `T`
    /// - [`TriangulationError::SuperTriangle`] if the super-triangle overflows
    pub fn seed(&mut self, bbox: &BoundingBox<T>) -> Result<(), TriangulationError> {
        if self.state != TriangulationState::Empty {
            return Err(TriangulationError::InvalidState {
                operation: "seed",
                state: self.state,
            });
        }
        bbox.min().validate()?;
        bbox.max().validate()?;

        let margin: T = cast(self.options.super_triangle_margin).ok_or_else(|| {
            TriangulationError::InvalidOptions {
                message: format!(
                    "super_triangle_margin {} is not representable",
                    self.options.super_triangle_margin
                ),
            }
        })?;
        let super_triangle =
            SuperTriangle::enclosing(bbox, margin, self.options.degeneracy_tolerance)?;

        self.mesh.push(*super_triangle.triangle());
        self.super_triangle = Some(super_triangle);
        self.state = TriangulationState::SuperTriangleSeeded;
        tracing::debug!(
            "Seeded triangulation for bounding box ({})-({})",
            bbox.min(),
            bbox.max()
        );
        Ok(())
    }

    /// Inserts one point.
    ///
    /// Exact duplicates of already inserted points, and points skipped by
    /// [`DegeneracyPolicy::SkipVertex`], leave the mesh unchanged but still
    /// count as processed.
    ///
    /// # Errors
    ///
    /// - [`TriangulationError::InvalidState`] in state `Empty` or `Done`
    /// - [`TriangulationError::InvalidPoint`] for non-finite coordinates
    /// - [`TriangulationError::OutsideSuperTriangle`] if the point is not
    ///   strictly inside the super-triangle
    /// - [`TriangulationError::Insertion`] for invariant violations, and for
    ///   degenerate triangles or non-simple cavities under
    ///   [`DegeneracyPolicy::Abort`]
    ///
    /// The mesh is unchanged whenever an error is returned.
    pub fn insert(&mut self, point: Point<T>) -> Result<InsertionOutcome, TriangulationError> {
        let processed = match self.state {
            TriangulationState::SuperTriangleSeeded => 0,
            TriangulationState::Inserting(n) => n,
            TriangulationState::Empty | TriangulationState::Done => {
                return Err(TriangulationError::InvalidState {
                    operation: "insert into",
                    state: self.state,
                });
            }
        };
        point.validate()?;

        let Some(super_triangle) = self.super_triangle else {
            return Err(TriangulationError::InvalidState {
                operation: "insert into",
                state: self.state,
            });
        };
        if !super_triangle.contains(&point) {
            return Err(TriangulationError::OutsideSuperTriangle {
                point: point.to_string(),
            });
        }

        let outcome = if self.vertex_set.contains(&point) {
            tracing::debug!("Skipping duplicate point ({})", point);
            InsertionOutcome::Duplicate
        } else {
            match insert_into_cavity(
                &mut self.mesh,
                point,
                Some(&super_triangle),
                self.options.degeneracy_tolerance,
            ) {
                Ok(outcome) => outcome,
                Err(e)
                    if e.is_degenerate()
                        && self.options.degeneracy_policy == DegeneracyPolicy::SkipVertex =>
                {
                    tracing::warn!("Skipping point ({}): {}", point, e);
                    InsertionOutcome::SkippedDegenerate
                }
                Err(e) => return Err(e.into()),
            }
        };

        if outcome.is_inserted() {
            self.vertices.push(point);
            self.vertex_set.insert(point);
        }
        self.statistics.record(&outcome);
        self.state = TriangulationState::Inserting(processed + 1);
        Ok(outcome)
    }

    /// Marks the triangulation as finished.
    ///
    /// # Errors
    ///
    /// Returns [`TriangulationError::InvalidState`] in state `Empty` or `Done`.
    pub fn finish(&mut self) -> Result<(), TriangulationError> {
        match self.state {
            TriangulationState::SuperTriangleSeeded | TriangulationState::Inserting(_) => {
                self.state = TriangulationState::Done;
                tracing::debug!(
                    "Finished triangulation: {} vertices, {} triangles ({} Delaunay), {:?}",
                    self.vertices.len(),
                    self.mesh.len(),
                    self.number_of_delaunay_triangles(),
                    self.statistics
                );
                Ok(())
            }
            TriangulationState::Empty | TriangulationState::Done => {
                Err(TriangulationError::InvalidState {
                    operation: "finish",
                    state: self.state,
                })
            }
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Current lifecycle state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> TriangulationState {
        self.state
    }

    /// Returns true once [`finish`](Self::finish) has been called.
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == TriangulationState::Done
    }

    /// The options this triangulation was created with.
    #[inline]
    #[must_use]
    pub const fn options(&self) -> &TriangulationOptions<T> {
        &self.options
    }

    /// Running insertion statistics.
    #[inline]
    #[must_use]
    pub const fn statistics(&self) -> &InsertionStatistics {
        &self.statistics
    }

    /// The super-triangle, once seeded.
    #[inline]
    #[must_use]
    pub const fn super_triangle(&self) -> Option<&SuperTriangle<T>> {
        self.super_triangle.as_ref()
    }

    /// Points that became mesh vertices, in insertion order.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Point<T>] {
        &self.vertices
    }

    /// Number of inserted points.
    #[inline]
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// The raw mesh, including triangles attached to super vertices.
    #[inline]
    #[must_use]
    pub const fn mesh(&self) -> &Mesh<T> {
        &self.mesh
    }

    /// All triangles of the raw mesh.
    #[inline]
    #[must_use]
    pub fn triangles(&self) -> &[Triangle<T>] {
        self.mesh.triangles()
    }

    /// Number of triangles in the raw mesh.
    #[inline]
    #[must_use]
    pub fn number_of_triangles(&self) -> usize {
        self.mesh.len()
    }

    /// Returns true if `point` is a vertex of the super-triangle.
    #[must_use]
    pub fn is_super_vertex(&self, point: &Point<T>) -> bool {
        self.super_triangle
            .as_ref()
            .is_some_and(|st| st.is_super_vertex(point))
    }

    /// Returns true if `triangle` has a super-triangle vertex.
    #[must_use]
    pub fn touches_super_triangle(&self, triangle: &Triangle<T>) -> bool {
        self.super_triangle
            .as_ref()
            .is_some_and(|st| st.touches(triangle))
    }

    /// Triangles whose vertices are all input points.
    pub fn delaunay_triangles(&self) -> impl Iterator<Item = &Triangle<T>> + '_ {
        self.mesh
            .iter()
            .filter(move |triangle| !self.touches_super_triangle(triangle))
    }

    /// Number of triangles whose vertices are all input points.
    #[must_use]
    pub fn number_of_delaunay_triangles(&self) -> usize {
        self.delaunay_triangles().count()
    }

    /// Checks the empty-circumcircle property and mesh structure.
    ///
    /// # Errors
    ///
    /// See [`validate_delaunay`].
    pub fn validate_delaunay(&self) -> Result<(), DelaunayValidationError> {
        validate_delaunay(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::util::generate_random_points_seeded;
    use std::sync::Once;

    static INIT: Once = Once::new();

    fn init_tracing() {
        INIT.call_once(|| {
            let filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_test_writer()
                .try_init();
        });
    }

    fn pt(x: f64, y: f64) -> Point<f64> {
        Point::new(x, y)
    }

    fn unit_box() -> BoundingBox<f64> {
        BoundingBox::new(pt(0.0, 0.0), pt(1.0, 1.0))
    }

    // =========================================================================
    // STATE MACHINE
    // =========================================================================

    #[test]
    fn lifecycle_walks_through_states() {
        init_tracing();
        let mut dt = DelaunayTriangulation::<f64>::empty();
        assert_eq!(dt.state(), TriangulationState::Empty);
        assert!(dt.triangles().is_empty());

        dt.seed(&unit_box()).unwrap();
        assert_eq!(dt.state(), TriangulationState::SuperTriangleSeeded);
        assert_eq!(dt.number_of_triangles(), 1);
        assert_eq!(dt.number_of_delaunay_triangles(), 0);

        dt.insert(pt(0.2, 0.3)).unwrap();
        assert_eq!(dt.state(), TriangulationState::Inserting(1));
        dt.insert(pt(0.8, 0.1)).unwrap();
        dt.insert(pt(0.6, 0.9)).unwrap();
        assert_eq!(dt.state(), TriangulationState::Inserting(3));

        dt.finish().unwrap();
        assert!(dt.is_finished());
        assert_eq!(dt.number_of_delaunay_triangles(), 1);
    }

    #[test]
    fn misuse_is_rejected_with_invalid_state() {
        init_tracing();
        let mut dt = DelaunayTriangulation::<f64>::empty();
        assert_eq!(
            dt.insert(pt(0.5, 0.5)),
            Err(TriangulationError::InvalidState {
                operation: "insert into",
                state: TriangulationState::Empty
            })
        );
        assert!(matches!(
            dt.finish(),
            Err(TriangulationError::InvalidState { .. })
        ));

        dt.seed(&unit_box()).unwrap();
        assert!(matches!(
            dt.seed(&unit_box()),
            Err(TriangulationError::InvalidState { operation: "seed", .. })
        ));

        dt.finish().unwrap();
        assert!(matches!(
            dt.insert(pt(0.5, 0.5)),
            Err(TriangulationError::InvalidState {
                state: TriangulationState::Done,
                ..
            })
        ));
        assert!(dt.finish().is_err());
        assert_eq!(dt.state(), TriangulationState::Done);
    }

    #[test]
    fn invalid_and_outside_points_are_rejected() {
        init_tracing();
        let mut dt = DelaunayTriangulation::<f64>::empty();
        dt.seed(&unit_box()).unwrap();
        assert!(matches!(
            dt.insert(pt(f64::NAN, 0.5)),
            Err(TriangulationError::InvalidPoint { .. })
        ));
        assert!(matches!(
            dt.insert(pt(0.5, -10.0)),
            Err(TriangulationError::OutsideSuperTriangle { .. })
        ));
        // Super vertices themselves are not strictly inside.
        let corner = dt.super_triangle().unwrap().corners()[0];
        assert!(dt.insert(corner).is_err());
        assert_eq!(dt.state(), TriangulationState::SuperTriangleSeeded);
        assert_eq!(dt.number_of_triangles(), 1);
    }

    #[test]
    fn seed_rejects_non_finite_box() {
        let mut dt = DelaunayTriangulation::<f64>::empty();
        let bbox = BoundingBox::new(pt(0.0, 0.0), pt(f64::INFINITY, 1.0));
        assert!(matches!(
            dt.seed(&bbox),
            Err(TriangulationError::InvalidPoint { .. })
        ));
        assert_eq!(dt.state(), TriangulationState::Empty);
    }

    // =========================================================================
    // FROM POINTS
    // =========================================================================

    #[test]
    fn from_points_empty_input_is_done_with_super_triangle_only() {
        let dt = DelaunayTriangulation::<f64>::from_points(&[], TriangulationOptions::default())
            .unwrap();
        assert!(dt.is_finished());
        assert_eq!(dt.number_of_triangles(), 1);
        assert_eq!(dt.number_of_delaunay_triangles(), 0);
        assert_eq!(dt.number_of_vertices(), 0);
    }

    #[test]
    fn from_points_rejects_non_finite_input_up_front() {
        let points = [pt(0.0, 0.0), pt(1.0, f64::INFINITY)];
        assert!(matches!(
            DelaunayTriangulation::from_points(&points, TriangulationOptions::default()),
            Err(TriangulationError::InvalidPoint { .. })
        ));
    }

    #[test]
    fn mesh_size_follows_euler_formula() {
        init_tracing();
        let points = generate_random_points_seeded::<f64>(100, (-5.0, 5.0), 17).unwrap();
        let dt = DelaunayTriangulation::from_points(&points, TriangulationOptions::default())
            .unwrap();
        assert_eq!(dt.number_of_vertices(), 100);
        assert_eq!(dt.number_of_triangles(), 2 * 100 + 1);
        assert_eq!(dt.statistics().vertices_inserted, 100);
        assert_eq!(
            dt.statistics().triangles_created - dt.statistics().triangles_removed,
            2 * 100
        );
        assert!(dt.validate_delaunay().is_ok());
    }

    #[test]
    fn duplicates_are_skipped() {
        init_tracing();
        let points = [pt(0.0, 0.0), pt(3.0, 0.5), pt(1.0, 2.0), pt(3.0, 0.5), pt(-0.0, 0.0)];
        let dt = DelaunayTriangulation::from_points(&points, TriangulationOptions::default())
            .unwrap();
        assert_eq!(dt.number_of_vertices(), 3);
        assert_eq!(dt.statistics().duplicates_skipped, 2);
        assert_eq!(dt.state(), TriangulationState::Done);
        assert_eq!(dt.number_of_delaunay_triangles(), 1);
    }

    // =========================================================================
    // DEGENERACY POLICY
    // =========================================================================

    /// Four spread points, a centre point, and a second point 1e-9 above it.
    fn near_duplicate_points() -> Vec<Point<f64>> {
        vec![
            pt(0.0, 0.0),
            pt(10.0, 1.0),
            pt(1.0, 9.0),
            pt(9.0, 10.0),
            pt(5.0, 5.0),
            pt(5.0, 5.0 + 1e-9),
        ]
    }

    #[test]
    fn skip_vertex_policy_drops_degenerate_point() {
        init_tracing();
        let options = TriangulationOptionsBuilder::default()
            .degeneracy_tolerance(1e-6)
            .build()
            .unwrap();
        let dt = DelaunayTriangulation::from_points(&near_duplicate_points(), options).unwrap();
        assert_eq!(dt.statistics().degenerate_skipped, 1);
        assert_eq!(dt.number_of_vertices(), 5);
        assert!(!dt.vertices().contains(&pt(5.0, 5.0 + 1e-9)));
        assert_eq!(dt.number_of_delaunay_triangles(), 4);
    }

    #[test]
    fn abort_policy_propagates_degenerate_geometry() {
        init_tracing();
        let options = TriangulationOptionsBuilder::default()
            .degeneracy_tolerance(1e-6)
            .degeneracy_policy(DegeneracyPolicy::Abort)
            .build()
            .unwrap();
        let result = DelaunayTriangulation::from_points(&near_duplicate_points(), options);
        assert!(matches!(
            result,
            Err(TriangulationError::Insertion(
                InsertionError::DegenerateGeometry(_)
            ))
        ));
    }

    // =========================================================================
    // OPTIONS
    // =========================================================================

    #[test]
    fn options_builder_defaults_and_validation() {
        let options = TriangulationOptionsBuilder::<f32>::default().build().unwrap();
        assert_eq!(options, TriangulationOptions::<f32>::default());
        assert_eq!(options.degeneracy_tolerance, 1e-5);
        assert_eq!(options.degeneracy_policy, DegeneracyPolicy::SkipVertex);

        assert!(
            TriangulationOptionsBuilder::<f64>::default()
                .super_triangle_margin(f64::NAN)
                .build()
                .is_err()
        );
        assert!(
            TriangulationOptionsBuilder::<f64>::default()
                .degeneracy_tolerance(-1.0)
                .build()
                .is_err()
        );
    }

    #[test]
    fn state_display() {
        assert_eq!(TriangulationState::Inserting(4).to_string(), "Inserting(4)");
        assert_eq!(TriangulationState::Done.to_string(), "Done");
        let err = TriangulationError::InvalidState {
            operation: "finish",
            state: TriangulationState::Empty,
        };
        assert_eq!(err.to_string(), "Cannot finish a triangulation in state Empty");
    }
}
