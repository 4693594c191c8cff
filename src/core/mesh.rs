//! Mutable triangle storage.
//!
//! The [`Mesh`] is a flat, growable collection of [`Triangle`]s. Removal is
//! two-phase: the cavity detector first collects the indices of the
//! triangles to remove, then [`Mesh::remove_marked`] compacts the storage in
//! a single pass. Indices are never invalidated while they are being
//! collected, and the relative order of surviving triangles is preserved.

use crate::core::triangle::Triangle;
use crate::geometry::traits::coordinate::CoordinateScalar;
use serde::Serialize;

/// Errors raised by mesh mutation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum MeshError {
    /// A marked index does not refer to a stored triangle.
    #[error("Triangle index {index} is out of bounds for a mesh of {len} triangles")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of triangles in the mesh.
        len: usize,
    },
}

/// A collection of triangles supporting append and mark-then-compact removal.
#[derive(Clone, Debug, Serialize)]
#[serde(bound = "T: CoordinateScalar")]
pub struct Mesh<T>
where
    T: CoordinateScalar,
{
    triangles: Vec<Triangle<T>>,
}

impl<T> Default for Mesh<T>
where
    T: CoordinateScalar,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mesh<T>
where
    T: CoordinateScalar,
{
    /// Creates an empty mesh.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    /// Number of stored triangles.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh holds no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The stored triangles, in insertion order.
    #[inline]
    #[must_use]
    pub fn triangles(&self) -> &[Triangle<T>] {
        &self.triangles
    }

    /// Returns the triangle at `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Triangle<T>> {
        self.triangles.get(index)
    }

    /// Iterates over the stored triangles.
    pub fn iter(&self) -> std::slice::Iter<'_, Triangle<T>> {
        self.triangles.iter()
    }

    /// Appends a triangle.
    pub fn push(&mut self, triangle: Triangle<T>) {
        self.triangles.push(triangle);
    }

    /// Removes every triangle.
    pub fn clear(&mut self) {
        self.triangles.clear();
    }

    /// Removes the triangles at the given indices and returns how many were
    /// removed.
    ///
    /// Duplicate indices are counted once. The mesh is left untouched if any
    /// index is out of bounds.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::IndexOutOfBounds`] for the first invalid index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaunay_dual::core::mesh::Mesh;
    /// use delaunay_dual::core::triangle::Triangle;
    /// use delaunay_dual::geometry::point::Point;
    ///
    /// let mut mesh = Mesh::new();
    /// for dx in [0.0, 10.0, 20.0] {
    ///     mesh.push(
    ///         Triangle::new(
    ///             Point::new(dx, 0.0),
    ///             Point::new(dx + 1.0, 0.0),
    ///             Point::new(dx, 1.0),
    ///         )
    ///         .unwrap(),
    ///     );
    /// }
    /// assert_eq!(mesh.remove_marked(&[0, 2]).unwrap(), 2);
    /// assert_eq!(mesh.len(), 1);
    /// assert!(mesh.triangles()[0].contains_vertex(&Point::new(10.0, 0.0)));
    /// ```
    pub fn remove_marked(&mut self, marked: &[usize]) -> Result<usize, MeshError> {
        let len = self.triangles.len();
        let mut remove = vec![false; len];
        for &index in marked {
            match remove.get_mut(index) {
                Some(flag) => *flag = true,
                None => return Err(MeshError::IndexOutOfBounds { index, len }),
            }
        }

        let mut flags = remove.into_iter();
        self.triangles.retain(|_| !flags.next().unwrap_or(false));
        Ok(len - self.triangles.len())
    }
}

impl<T> Extend<Triangle<T>> for Mesh<T>
where
    T: CoordinateScalar,
{
    fn extend<I: IntoIterator<Item = Triangle<T>>>(&mut self, iter: I) {
        self.triangles.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a Mesh<T>
where
    T: CoordinateScalar,
{
    type Item = &'a Triangle<T>;
    type IntoIter = std::slice::Iter<'a, Triangle<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point::Point;

    fn unit_at(dx: f64) -> Triangle<f64> {
        Triangle::new(
            Point::new(dx, 0.0),
            Point::new(dx + 1.0, 0.0),
            Point::new(dx, 1.0),
        )
        .unwrap()
    }

    fn mesh_of(n: usize) -> Mesh<f64> {
        let mut mesh = Mesh::new();
        mesh.extend((0..n).map(|i| unit_at(10.0 * i as f64)));
        mesh
    }

    #[test]
    fn compaction_preserves_survivor_order() {
        let mut mesh = mesh_of(5);
        assert_eq!(mesh.remove_marked(&[3, 1]).unwrap(), 2);
        let survivors: Vec<_> = mesh.iter().map(|t| t.vertices()[0].x()).collect();
        assert_eq!(survivors, vec![0.0, 20.0, 40.0]);
    }

    #[test]
    fn duplicate_marks_are_counted_once() {
        let mut mesh = mesh_of(3);
        assert_eq!(mesh.remove_marked(&[1, 1, 1]).unwrap(), 1);
        assert_eq!(mesh.len(), 2);
    }

    #[test]
    fn out_of_bounds_mark_leaves_mesh_untouched() {
        let mut mesh = mesh_of(2);
        assert_eq!(
            mesh.remove_marked(&[0, 7]),
            Err(MeshError::IndexOutOfBounds { index: 7, len: 2 })
        );
        assert_eq!(mesh.len(), 2);
    }

    #[test]
    fn removing_nothing_or_everything() {
        let mut mesh = mesh_of(3);
        assert_eq!(mesh.remove_marked(&[]).unwrap(), 0);
        assert_eq!(mesh.remove_marked(&[0, 1, 2]).unwrap(), 3);
        assert!(mesh.is_empty());
    }
}
