//! Collection aliases used by the insertion and dual-building algorithms.
//!
//! Everything that must iterate deterministically uses the ordered
//! `BTreeMap`/`BTreeSet`; small per-insertion scratch buffers use
//! [`SmallBuffer`] so typical cavities stay on the stack.

use smallvec::SmallVec;
use std::collections::BTreeMap;

use crate::core::edge::Edge;

/// Inline capacity for cavity-sized buffers.
///
/// A point inserted into a well-shaped mesh typically conflicts with four to
/// eight triangles; 16 leaves headroom before spilling to the heap.
pub const CAVITY_BUFFER_SIZE: usize = 16;

/// Small-optimized Vec that uses stack allocation for up to `N` elements.
///
/// # Examples
///
/// ```rust
/// use delaunay_dual::core::collections::SmallBuffer;
///
/// let mut buffer: SmallBuffer<i32, 8> = SmallBuffer::new();
/// buffer.extend(0..5);
/// assert!(!buffer.spilled());
/// ```
pub type SmallBuffer<T, const N: usize> = SmallVec<[T; N]>;

/// Indices of the triangles whose circumcircle strictly contains a point.
pub type BadTriangleBuffer = SmallBuffer<usize, CAVITY_BUFFER_SIZE>;

/// Edges on the boundary of a cavity.
pub type BoundaryEdgeBuffer<T> = SmallBuffer<Edge<T>, CAVITY_BUFFER_SIZE>;

/// Edge multiplicity counts, ordered by the canonical edge order.
pub type EdgeCountMap<T> = BTreeMap<Edge<T>, usize>;

/// Triangle indices incident to each edge, ordered by the canonical edge
/// order. A manifold edge has at most two entries.
pub type EdgeTriangleMap<T> = BTreeMap<Edge<T>, SmallBuffer<usize, 2>>;
