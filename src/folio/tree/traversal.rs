//! Filtered, restartable tree walks
//!
//!     A traversal is a pair of functions over treepaths: `first` finds the first position,
//!     `next` finds the position after a given one. Neither keeps state, so a pass can edit
//!     the tree at the current position and continue the walk from the treepath the edit
//!     returned.
//!
//!     Both walks descend through every node but yield only nodes accepted by the filter.
//!     They always start from the root of the given path.
//!
//!     - [`Preorder`]: parent before children, children left to right. `next_up` skips the
//!       subtree of the current node.
//!     - [`MirroredPostorder`]: children before parent, children right to left. An edit to
//!       the current node (adding or removing its children, replacing it) never shifts the
//!       position of a node still to be visited, which makes it the walk of choice for
//!       passes that remove or insert children.

use std::marker::PhantomData;

use super::treepath::Treepath;
use super::Tree;

pub trait Traversal<T: Tree> {
    /// First accepted position in the tree the path belongs to.
    fn first(&self, path: &Treepath<T>) -> Option<Treepath<T>>;

    /// Accepted position following `path`, `None` when the walk is over.
    fn next(&self, path: &Treepath<T>) -> Option<Treepath<T>>;

    /// Read-only iteration over the accepted positions.
    fn walk<'a>(&'a self, path: &Treepath<T>) -> Walk<'a, T, Self>
    where
        Self: Sized,
    {
        Walk {
            traversal: self,
            pending: self.first(path),
            _marker: PhantomData,
        }
    }
}

/// Iterator produced by [`Traversal::walk`].
pub struct Walk<'a, T: Tree, W> {
    traversal: &'a W,
    pending: Option<Treepath<T>>,
    _marker: PhantomData<T>,
}

impl<'a, T: Tree, W: Traversal<T>> Iterator for Walk<'a, T, W> {
    type Item = Treepath<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.pending.take()?;
        self.pending = self.traversal.next(&current);
        Some(current)
    }
}

pub fn accept_all<T>(_: &T) -> bool {
    true
}

/// Parent first, children left to right.
pub struct Preorder<T, F> {
    filter: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T: Tree> Preorder<T, fn(&T) -> bool> {
    pub fn unfiltered() -> Self {
        Preorder::new(accept_all::<T> as fn(&T) -> bool)
    }
}

impl<T: Tree, F: Fn(&T) -> bool> Preorder<T, F> {
    pub fn new(filter: F) -> Self {
        Preorder {
            filter,
            _marker: PhantomData,
        }
    }

    /// Next accepted position outside the subtree of `path`.
    pub fn next_up(&self, path: &Treepath<T>) -> Option<Treepath<T>> {
        self.accepted_from(raw_next_up(path))
    }

    fn accepted_from(&self, mut candidate: Option<Treepath<T>>) -> Option<Treepath<T>> {
        while let Some(path) = candidate {
            if (self.filter)(path.tree_at_end()) {
                return Some(path);
            }
            candidate = raw_preorder_next(&path);
        }
        None
    }
}

impl<T: Tree, F: Fn(&T) -> bool> Traversal<T> for Preorder<T, F> {
    fn first(&self, path: &Treepath<T>) -> Option<Treepath<T>> {
        self.accepted_from(Some(path.start()))
    }

    fn next(&self, path: &Treepath<T>) -> Option<Treepath<T>> {
        self.accepted_from(raw_preorder_next(path))
    }
}

fn raw_preorder_next<T: Tree>(path: &Treepath<T>) -> Option<Treepath<T>> {
    if path.tree_at_end().has_children() {
        Some(path.child(0))
    } else {
        raw_next_up(path)
    }
}

fn raw_next_up<T: Tree>(path: &Treepath<T>) -> Option<Treepath<T>> {
    let mut current = path;
    loop {
        let previous = current.previous()?;
        let index = current.index_in_previous()?;
        if index + 1 < previous.tree_at_end().child_count() {
            return Some(previous.child(index + 1));
        }
        current = previous;
    }
}

/// Children right to left, then the parent.
pub struct MirroredPostorder<T, F> {
    filter: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T: Tree> MirroredPostorder<T, fn(&T) -> bool> {
    pub fn unfiltered() -> Self {
        MirroredPostorder::new(accept_all::<T> as fn(&T) -> bool)
    }
}

impl<T: Tree, F: Fn(&T) -> bool> MirroredPostorder<T, F> {
    pub fn new(filter: F) -> Self {
        MirroredPostorder {
            filter,
            _marker: PhantomData,
        }
    }

    fn accepted_from(&self, mut candidate: Option<Treepath<T>>) -> Option<Treepath<T>> {
        while let Some(path) = candidate {
            if (self.filter)(path.tree_at_end()) {
                return Some(path);
            }
            candidate = raw_mirrored_next(&path);
        }
        None
    }
}

impl<T: Tree, F: Fn(&T) -> bool> Traversal<T> for MirroredPostorder<T, F> {
    fn first(&self, path: &Treepath<T>) -> Option<Treepath<T>> {
        self.accepted_from(Some(deepest_last(path.start())))
    }

    fn next(&self, path: &Treepath<T>) -> Option<Treepath<T>> {
        self.accepted_from(raw_mirrored_next(path))
    }
}

fn deepest_last<T: Tree>(mut path: Treepath<T>) -> Treepath<T> {
    while path.tree_at_end().has_children() {
        let last = path.tree_at_end().child_count() - 1;
        path = path.child(last);
    }
    path
}

fn raw_mirrored_next<T: Tree>(path: &Treepath<T>) -> Option<Treepath<T>> {
    let previous = path.previous()?;
    match path.index_in_previous()? {
        0 => Some(previous.clone()),
        index => Some(deepest_last(previous.child(index - 1))),
    }
}
