//! Robust paths
//!
//!     A [`Treepath`] is only meaningful for the revision of the tree it was built on. A
//!     robust path survives edits: instead of child indices it records, for each step, the
//!     rank of the child among the siblings accepted by a filter. Any edit that only adds,
//!     removes or changes nodes rejected by the filter leaves the filtered skeleton intact,
//!     so applying the robust path to the edited tree lands on the corresponding node.
//!
//!     With an always-true filter ranks equal indices and the robust path behaves like a
//!     plain list of indices.

use std::fmt;
use std::sync::Arc;

use super::error::{TreeError, TreeResult};
use super::treepath::Treepath;
use super::Tree;

type Filter<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

pub struct RobustPath<T> {
    filter: Filter<T>,
    ranks: Vec<usize>,
}

impl<T: Tree + 'static> RobustPath<T> {
    /// Robust path with an always-true filter.
    pub fn create(path: &Treepath<T>) -> Self {
        RobustPath {
            filter: Arc::new(|_: &T| true),
            ranks: path.indices_in_parent(),
        }
    }

    /// Encodes `path` against the skeleton accepted by `filter`.
    ///
    /// Fails with [`TreeError::FilterMismatch`] when a node on the path below the start is
    /// rejected by the filter: such a node has no rank.
    pub fn create_with_filter<F>(path: &Treepath<T>, filter: F) -> TreeResult<Self>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let length = path.len();
        let mut ranks = Vec::with_capacity(length - 1);
        for depth in 1..length {
            let step = path.treepath_at_distance_from_start(depth)?;
            let parent = path.treepath_at_distance_from_start(depth - 1)?.tree_at_end();
            let index = step.index_in_previous().unwrap_or_default();
            if !filter(step.tree_at_end()) {
                return Err(TreeError::FilterMismatch {
                    depth,
                    rank: index,
                    matching: count_matching(parent, &filter),
                });
            }
            let rank = parent
                .children()
                .take(index)
                .filter(|child| filter(*child))
                .count();
            ranks.push(rank);
        }
        Ok(RobustPath {
            filter: Arc::new(filter),
            ranks,
        })
    }

    /// Resolves this robust path against `root`, which may be a later revision of the tree
    /// it was created on.
    pub fn apply(&self, root: &T) -> TreeResult<Treepath<T>> {
        let mut path = Treepath::new(root.clone());
        for (step, &rank) in self.ranks.iter().enumerate() {
            let index = path
                .tree_at_end()
                .children()
                .enumerate()
                .filter(|(_, child)| (self.filter)(*child))
                .map(|(index, _)| index)
                .nth(rank);
            match index {
                Some(index) => path = path.child(index),
                None => {
                    return Err(TreeError::FilterMismatch {
                        depth: step + 1,
                        rank,
                        matching: count_matching(path.tree_at_end(), self.filter.as_ref()),
                    })
                }
            }
        }
        Ok(path)
    }

    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }
}

fn count_matching<T: Tree, F: Fn(&T) -> bool + ?Sized>(parent: &T, filter: &F) -> usize {
    parent.children().filter(|child| filter(*child)).count()
}

impl<T> Clone for RobustPath<T> {
    fn clone(&self) -> Self {
        RobustPath {
            filter: Arc::clone(&self.filter),
            ranks: self.ranks.clone(),
        }
    }
}

/// Two robust paths are equal when their ranks are; the filter is not compared.
impl<T> PartialEq for RobustPath<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ranks == other.ranks
    }
}

impl<T> Eq for RobustPath<T> {}

impl<T> fmt::Debug for RobustPath<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RobustPath")
            .field("ranks", &self.ranks)
            .finish()
    }
}

impl<T> fmt::Display for RobustPath<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranks = self
            .ranks
            .iter()
            .map(|rank| rank.to_string())
            .collect::<Vec<_>>()
            .join("/");
        write!(f, "~/{}", ranks)
    }
}
