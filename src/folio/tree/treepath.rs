//! Treepath: a back-chained position inside an immutable tree
//!
//!     A treepath of length 1 holds only the root (the "start"). Each further step records
//!     the index of the child taken in the previous step's node. Steps are shared through
//!     `Arc`, so extending a path never copies the steps before it.
//!
//!     Equality means "same position in the same tree": same indices from the start and the
//!     same start node (pointer identity). Paths over different revisions of a document are
//!     never equal and have no defined order.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::error::{TreeError, TreeResult};
use super::Tree;

pub struct Treepath<T> {
    previous: Option<Arc<Treepath<T>>>,
    index_in_previous: usize,
    tree_at_end: T,
}

impl<T: Tree> Treepath<T> {
    /// Creates a treepath of length 1 pointing at `root`.
    pub fn new(root: T) -> Self {
        Treepath {
            previous: None,
            index_in_previous: 0,
            tree_at_end: root,
        }
    }

    /// Extends this path by one step to the child at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the end node has no child at `index`.
    pub fn child(&self, index: usize) -> Self {
        let child = self.tree_at_end.child_at(index).clone();
        Treepath {
            previous: Some(Arc::new(self.clone())),
            index_in_previous: index,
            tree_at_end: child,
        }
    }

    /// Fallible variant of [`Treepath::child`].
    pub fn try_child(&self, index: usize) -> TreeResult<Self> {
        let child_count = self.tree_at_end.child_count();
        if index < child_count {
            Ok(self.child(index))
        } else {
            Err(TreeError::IndexOutOfRange { index, child_count })
        }
    }

    pub fn from_indices(root: T, indices: &[usize]) -> Self {
        Treepath::new(root).extend(indices)
    }

    /// Descends along `indices`, one step per index.
    pub fn extend(&self, indices: &[usize]) -> Self {
        indices
            .iter()
            .fold(self.clone(), |path, &index| path.child(index))
    }

    pub fn previous(&self) -> Option<&Treepath<T>> {
        self.previous.as_deref()
    }

    /// Owned path to the parent position.
    pub fn parent(&self) -> TreeResult<Treepath<T>> {
        self.previous().cloned().ok_or(TreeError::PathTooShort {
            required: 2,
            actual: 1,
        })
    }

    /// Index of the end node among its parent's children, `None` at the start.
    pub fn index_in_previous(&self) -> Option<usize> {
        self.previous.as_ref().map(|_| self.index_in_previous)
    }

    pub fn tree_at_end(&self) -> &T {
        &self.tree_at_end
    }

    pub fn into_tree_at_end(self) -> T {
        self.tree_at_end
    }

    pub fn is_start(&self) -> bool {
        self.previous.is_none()
    }

    /// The length-1 path pointing at the root.
    pub fn start(&self) -> Treepath<T> {
        let mut path = self;
        while let Some(previous) = path.previous() {
            path = previous;
        }
        path.clone()
    }

    pub fn tree_at_start(&self) -> &T {
        let mut path = self;
        while let Some(previous) = path.previous() {
            path = previous;
        }
        path.tree_at_end()
    }

    /// Number of nodes on the path, root included.
    pub fn len(&self) -> usize {
        let mut length = 1;
        let mut path = self;
        while let Some(previous) = path.previous() {
            length += 1;
            path = previous;
        }
        length
    }

    /// Child indices from the start down to the end. Empty for a start path.
    pub fn indices_in_parent(&self) -> Vec<usize> {
        let mut indices = Vec::with_capacity(self.len() - 1);
        let mut path = self;
        while let Some(previous) = path.previous() {
            indices.push(path.index_in_previous);
            path = previous;
        }
        indices.reverse();
        indices
    }

    /// Walks `distance` steps back towards the start. Distance 0 is this path.
    pub fn treepath_at_distance(&self, distance: usize) -> TreeResult<&Treepath<T>> {
        let mut path = self;
        for _ in 0..distance {
            path = path.previous().ok_or(TreeError::IllegalDistance {
                distance,
                length: self.len(),
            })?;
        }
        Ok(path)
    }

    pub fn tree_at_distance(&self, distance: usize) -> TreeResult<&T> {
        self.treepath_at_distance(distance)
            .map(Treepath::tree_at_end)
    }

    /// Distance 0 is the start, `len() - 1` is this path.
    pub fn treepath_at_distance_from_start(&self, distance: usize) -> TreeResult<&Treepath<T>> {
        let length = self.len();
        if distance >= length {
            return Err(TreeError::IllegalDistance { distance, length });
        }
        self.treepath_at_distance(length - 1 - distance)
    }
}

impl<T: Clone> Clone for Treepath<T> {
    fn clone(&self) -> Self {
        Treepath {
            previous: self.previous.clone(),
            index_in_previous: self.index_in_previous,
            tree_at_end: self.tree_at_end.clone(),
        }
    }
}

impl<T: Tree> PartialEq for Treepath<T> {
    fn eq(&self, other: &Self) -> bool {
        self.indices_in_parent() == other.indices_in_parent()
            && self.tree_at_start().same_node(other.tree_at_start())
    }
}

impl<T: Tree> Eq for Treepath<T> {}

/// Pre-order position: indices compare from the start, and on a common prefix the
/// shorter path (the ancestor) comes first. Paths with different starts are unordered.
impl<T: Tree> PartialOrd for Treepath<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.tree_at_start().same_node(other.tree_at_start()) {
            return None;
        }
        Some(self.indices_in_parent().cmp(&other.indices_in_parent()))
    }
}

impl<T: Tree + fmt::Debug> fmt::Debug for Treepath<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Treepath")
            .field("indices", &self.indices_in_parent())
            .field("end", &self.tree_at_end)
            .finish()
    }
}

impl<T: Tree> fmt::Display for Treepath<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/")?;
        let indices = self
            .indices_in_parent()
            .iter()
            .map(|index| index.to_string())
            .collect::<Vec<_>>()
            .join("/");
        write!(f, "{}", indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folio::testing::{label, labeled};

    fn sample() -> crate::folio::ast::Node {
        // a
        // ├─ b
        // │  └─ c
        // └─ d
        labeled("a", [labeled("b", [labeled("c", [])]), labeled("d", [])])
    }

    #[test]
    fn test_start_path() {
        let root = sample();
        let path = Treepath::new(root.clone());
        assert!(path.is_start());
        assert_eq!(path.len(), 1);
        assert_eq!(path.index_in_previous(), None);
        assert!(path.indices_in_parent().is_empty());
        assert!(path.tree_at_end().same_node(&root));
    }

    #[test]
    fn test_child_and_indices() {
        let path = Treepath::from_indices(sample(), &[0, 0]);
        assert_eq!(label(path.tree_at_end()), "c");
        assert_eq!(path.len(), 3);
        assert_eq!(path.indices_in_parent(), vec![0, 0]);
        assert_eq!(path.index_in_previous(), Some(0));
        assert_eq!(label(path.tree_at_start()), "a");
        assert_eq!(path.to_string(), "/0/0");
    }

    #[test]
    #[should_panic(expected = "Unsupported index: 5")]
    fn test_child_out_of_range_panics() {
        Treepath::new(sample()).child(5);
    }

    #[test]
    fn test_try_child_out_of_range() {
        let err = Treepath::new(sample()).try_child(2).unwrap_err();
        assert_eq!(
            err,
            TreeError::IndexOutOfRange {
                index: 2,
                child_count: 2
            }
        );
    }

    #[test]
    fn test_distances() {
        let path = Treepath::from_indices(sample(), &[0, 0]);
        assert_eq!(label(path.tree_at_distance(0).unwrap()), "c");
        assert_eq!(label(path.tree_at_distance(1).unwrap()), "b");
        assert_eq!(label(path.tree_at_distance(2).unwrap()), "a");
        assert!(path.tree_at_distance(3).is_err());

        let from_start = path.treepath_at_distance_from_start(1).unwrap();
        assert_eq!(label(from_start.tree_at_end()), "b");
        assert!(path.treepath_at_distance_from_start(3).is_err());
    }

    #[test]
    fn test_equality_requires_same_start() {
        let root = sample();
        let first = Treepath::from_indices(root.clone(), &[1]);
        let second = Treepath::new(root).child(1);
        assert_eq!(first, second);

        let other_revision = Treepath::from_indices(sample(), &[1]);
        assert_ne!(first, other_revision);
        assert_eq!(first.partial_cmp(&other_revision), None);
    }

    #[test]
    fn test_preorder_ordering() {
        let root = sample();
        let a = Treepath::new(root.clone());
        let b = Treepath::from_indices(root.clone(), &[0]);
        let c = Treepath::from_indices(root.clone(), &[0, 0]);
        let d = Treepath::from_indices(root, &[1]);
        assert!(a < b);
        assert!(b < c);
        assert!(c < d);
    }

    #[test]
    fn test_parent_of_start_is_error() {
        let path = Treepath::new(sample());
        assert!(matches!(
            path.parent(),
            Err(TreeError::PathTooShort { .. })
        ));
    }
}
