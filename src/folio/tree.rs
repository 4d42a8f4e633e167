//! Persistent trees and path addressing
//!
//!     Every rewrite pass of the pipeline consumes one tree and produces a new one. Trees are
//!     immutable: a pass never modifies a node, it builds a new node with different children
//!     and a new spine up to the root. Everything the pass did not touch is shared by
//!     reference with the previous revision, so a pass costs O(depth) fresh nodes per edit,
//!     not O(size).
//!
//!     Addressing is done with [`Treepath`], a chain of (parent path, index) steps ending on a
//!     node. Edits through a treepath return a new treepath that points to the same logical
//!     position in the rebuilt tree:
//!
//!     ```text
//!      *t0          *t0'
//!       |            |
//!      *t1    -->   *t1'
//!       |            |
//!      *old        *new
//!     ```
//!
//!     The star marks nodes referenced by the treepath, the apostrophe marks freshly allocated
//!     nodes. `t1`'s other children are shared, untouched, by `t1'`.
//!
//! Modules
//!
//!     - `treepath`: the [`Treepath`] itself and its navigation.
//!     - `tools`: node-level rebuild helpers (add, insert, replace, remove a child).
//!     - `edit`: path-level rebuild helpers, propagating a node change up to the root.
//!     - `traversal`: filtered, restartable pre-order and mirrored post-order walks.
//!     - `robust_path`: a treepath encoded against a filtered skeleton, re-appliable on a
//!       later revision of the tree.
//!     - `error`: [`TreeError`] for fallible path operations.

pub mod edit;
pub mod error;
pub mod robust_path;
pub mod tools;
pub mod traversal;
pub mod treepath;

pub use error::{SiblingDirection, TreeError};
pub use robust_path::RobustPath;
pub use traversal::{MirroredPostorder, Preorder, Traversal};
pub use treepath::Treepath;

/// Contract of an immutable n-ary tree node.
///
/// Implementors are cheap to clone (a reference count bump) and never change once built.
/// [`Tree::adopt`] is the only way to "modify" a node: it returns a node of the same kind
/// holding the given children.
pub trait Tree: Clone {
    fn child_count(&self) -> usize;

    /// Returns the child at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= child_count()`. An out-of-range index is a defect in the caller.
    fn child_at(&self, index: usize) -> &Self;

    /// Returns a node identical to this one except for its children.
    fn adopt(&self, children: Vec<Self>) -> Self;

    /// Returns true when both handles point to the same allocated node.
    fn same_node(&self, other: &Self) -> bool;

    /// Restartable lazy sequence over the children.
    fn children(&self) -> Children<'_, Self> {
        Children {
            tree: self,
            index: 0,
        }
    }

    fn has_children(&self) -> bool {
        self.child_count() > 0
    }
}

/// Iterator over the children of a [`Tree`], created by [`Tree::children`].
#[derive(Debug)]
pub struct Children<'a, T> {
    tree: &'a T,
    index: usize,
}

impl<'a, T: Tree> Iterator for Children<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.tree.child_count() {
            let child = self.tree.child_at(self.index);
            self.index += 1;
            Some(child)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tree.child_count().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a, T: Tree> ExactSizeIterator for Children<'a, T> {}

impl<'a, T> Clone for Children<'a, T> {
    fn clone(&self) -> Self {
        Children {
            tree: self.tree,
            index: self.index,
        }
    }
}
