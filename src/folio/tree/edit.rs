//! Path-level edits
//!
//!     Every function here takes a [`Treepath`] into one revision of a tree and returns a
//!     treepath into a new revision. The node change is propagated up to the root by
//!     rebuilding each ancestor on the path with [`Tree::adopt`]; everything off the path
//!     is shared.
//!
//!     The returned treepath points to the logically corresponding position, documented per
//!     function. Functions that need a parent or a sibling return [`TreeError`] when it does
//!     not exist.

use super::error::{SiblingDirection, TreeError, TreeResult};
use super::tools;
use super::treepath::Treepath;
use super::Tree;

/// Replaces the end node. Returns the path to `replacement`.
pub fn replace_end<T: Tree>(path: &Treepath<T>, replacement: T) -> Treepath<T> {
    match (path.previous(), path.index_in_previous()) {
        (Some(previous), Some(index)) => {
            let new_parent = tools::replace(previous.tree_at_end(), index, replacement);
            replace_end(previous, new_parent).child(index)
        }
        _ => Treepath::new(replacement),
    }
}

/// Removes the end node. Returns the path to its former parent.
pub fn remove_end<T: Tree>(path: &Treepath<T>) -> TreeResult<Treepath<T>> {
    let (previous, index) = parent_and_index(path)?;
    let new_parent = tools::remove(previous.tree_at_end(), index);
    Ok(replace_end(previous, new_parent))
}

/// Returns the path to the added child.
pub fn add_child_first<T: Tree>(path: &Treepath<T>, child: T) -> Treepath<T> {
    add_child_at(path, child, 0)
}

/// Returns the path to the added child.
pub fn add_child_last<T: Tree>(path: &Treepath<T>, child: T) -> Treepath<T> {
    let index = path.tree_at_end().child_count();
    add_child_at(path, child, index)
}

/// Inserts `child` under the end node at `index`. Returns the path to the added child.
///
/// # Panics
///
/// Panics if `index` is greater than the end node's child count.
pub fn add_child_at<T: Tree>(path: &Treepath<T>, child: T, index: usize) -> Treepath<T> {
    let new_parent = tools::insert(path.tree_at_end(), index, child);
    replace_end(path, new_parent).child(index)
}

/// Adds `sibling` as the last child of the end node's parent. Returns the path to it.
pub fn add_sibling_last<T: Tree>(path: &Treepath<T>, sibling: T) -> TreeResult<Treepath<T>> {
    let (previous, _) = parent_and_index(path)?;
    Ok(add_child_last(previous, sibling))
}

/// Inserts `tree` right before the end node. Returns the path to the inserted node.
pub fn insert_at<T: Tree>(path: &Treepath<T>, tree: T) -> TreeResult<Treepath<T>> {
    let (previous, index) = parent_and_index(path)?;
    Ok(add_child_at(previous, tree, index))
}

pub fn has_previous_sibling<T: Tree>(path: &Treepath<T>) -> bool {
    matches!(path.index_in_previous(), Some(index) if index > 0)
}

pub fn has_next_sibling<T: Tree>(path: &Treepath<T>) -> bool {
    match (path.previous(), path.index_in_previous()) {
        (Some(previous), Some(index)) => index + 1 < previous.tree_at_end().child_count(),
        _ => false,
    }
}

pub fn previous_sibling<T: Tree>(path: &Treepath<T>) -> TreeResult<Treepath<T>> {
    let (previous, index) = parent_and_index(path)?;
    if index == 0 {
        return Err(TreeError::NoSibling {
            direction: SiblingDirection::Previous,
        });
    }
    Ok(previous.child(index - 1))
}

pub fn next_sibling<T: Tree>(path: &Treepath<T>) -> TreeResult<Treepath<T>> {
    let (previous, index) = parent_and_index(path)?;
    if index + 1 >= previous.tree_at_end().child_count() {
        return Err(TreeError::NoSibling {
            direction: SiblingDirection::Next,
        });
    }
    Ok(previous.child(index + 1))
}

/// Path to the sibling at `index` (which may be the end node itself).
pub fn sibling_at<T: Tree>(path: &Treepath<T>, index: usize) -> TreeResult<Treepath<T>> {
    let (previous, _) = parent_and_index(path)?;
    previous.try_child(index)
}

/// Removes the previous sibling. Returns the path to the same end node, one index lower.
pub fn remove_previous_sibling<T: Tree>(path: &Treepath<T>) -> TreeResult<Treepath<T>> {
    let sibling = previous_sibling(path)?;
    let (_, index) = parent_and_index(path)?;
    Ok(remove_end(&sibling)?.child(index - 1))
}

/// Removes the next sibling. Returns the path to the same end node.
pub fn remove_next_sibling<T: Tree>(path: &Treepath<T>) -> TreeResult<Treepath<T>> {
    let sibling = next_sibling(path)?;
    let (_, index) = parent_and_index(path)?;
    Ok(remove_end(&sibling)?.child(index))
}

/// Moves the end node to the last position among its previous sibling's children.
/// Returns the path to the moved node.
pub fn become_last_child_of_previous_sibling<T: Tree>(
    path: &Treepath<T>,
) -> TreeResult<Treepath<T>> {
    let sibling_index = previous_sibling(path)?
        .index_in_previous()
        .unwrap_or_default();
    let moved = path.tree_at_end().clone();
    let parent = remove_end(path)?;
    Ok(add_child_last(&parent.child(sibling_index), moved))
}

fn parent_and_index<T: Tree>(path: &Treepath<T>) -> TreeResult<(&Treepath<T>, usize)> {
    match (path.previous(), path.index_in_previous()) {
        (Some(previous), Some(index)) => Ok((previous, index)),
        _ => Err(TreeError::PathTooShort {
            required: 2,
            actual: path.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folio::ast::Node;
    use crate::folio::testing::{label, labeled};

    fn labels(tree: &Node) -> Vec<String> {
        tree.children().map(|c| label(c).to_string()).collect()
    }

    fn sample() -> Node {
        labeled(
            "root",
            [
                labeled("a", [labeled("a1", []), labeled("a2", [])]),
                labeled("b", []),
                labeled("c", []),
            ],
        )
    }

    #[test]
    fn test_replace_end_rebuilds_spine_only() {
        let root = sample();
        let path = Treepath::from_indices(root.clone(), &[0, 1]);
        let edited = replace_end(&path, labeled("x", []));

        assert_eq!(label(edited.tree_at_end()), "x");
        assert_eq!(edited.indices_in_parent(), vec![0, 1]);

        let new_root = edited.tree_at_start();
        assert!(!new_root.same_node(&root));
        assert!(!new_root.child_at(0).same_node(root.child_at(0)));
        assert!(new_root.child_at(0).child_at(0).same_node(root.child_at(0).child_at(0)));
        assert!(new_root.child_at(1).same_node(root.child_at(1)));
        assert!(new_root.child_at(2).same_node(root.child_at(2)));
        assert_eq!(labels(root.child_at(0)), ["a1", "a2"]);
    }

    #[test]
    fn test_replace_end_at_start() {
        let path = Treepath::new(sample());
        let edited = replace_end(&path, labeled("other", []));
        assert!(edited.is_start());
        assert_eq!(label(edited.tree_at_end()), "other");
    }

    #[test]
    fn test_remove_end_returns_parent() {
        let path = Treepath::from_indices(sample(), &[1]);
        let parent = remove_end(&path).unwrap();
        assert!(parent.is_start());
        assert_eq!(labels(parent.tree_at_end()), ["a", "c"]);

        assert!(matches!(
            remove_end(&Treepath::new(sample())),
            Err(TreeError::PathTooShort { .. })
        ));
    }

    #[test]
    fn test_add_children() {
        let path = Treepath::from_indices(sample(), &[0]);

        let first = add_child_first(&path, labeled("f", []));
        assert_eq!(first.indices_in_parent(), vec![0, 0]);
        assert_eq!(labels(first.tree_at_distance(1).unwrap()), ["f", "a1", "a2"]);

        let last = add_child_last(&path, labeled("l", []));
        assert_eq!(last.indices_in_parent(), vec![0, 2]);
        assert_eq!(label(last.tree_at_end()), "l");

        let middle = add_child_at(&path, labeled("m", []), 1);
        assert_eq!(labels(middle.tree_at_distance(1).unwrap()), ["a1", "m", "a2"]);
    }

    #[test]
    fn test_add_sibling_last_and_insert_at() {
        let path = Treepath::from_indices(sample(), &[0]);
        let sibling = add_sibling_last(&path, labeled("d", [])).unwrap();
        assert_eq!(sibling.indices_in_parent(), vec![3]);
        assert_eq!(labels(sibling.tree_at_start()), ["a", "b", "c", "d"]);

        let path = Treepath::from_indices(sample(), &[1]);
        let inserted = insert_at(&path, labeled("n", [])).unwrap();
        assert_eq!(inserted.indices_in_parent(), vec![1]);
        assert_eq!(labels(inserted.tree_at_start()), ["a", "n", "b", "c"]);
    }

    #[test]
    fn test_sibling_navigation() {
        let root = sample();
        let first = Treepath::from_indices(root.clone(), &[0]);
        let middle = Treepath::from_indices(root.clone(), &[1]);
        let last = Treepath::from_indices(root.clone(), &[2]);

        assert!(!has_previous_sibling(&first));
        assert!(has_next_sibling(&first));
        assert!(has_previous_sibling(&last));
        assert!(!has_next_sibling(&last));
        assert!(!has_next_sibling(&Treepath::new(root)));

        assert_eq!(label(previous_sibling(&middle).unwrap().tree_at_end()), "a");
        assert_eq!(label(next_sibling(&middle).unwrap().tree_at_end()), "c");
        assert_eq!(label(sibling_at(&middle, 2).unwrap().tree_at_end()), "c");
        assert_eq!(
            previous_sibling(&first).unwrap_err(),
            TreeError::NoSibling {
                direction: SiblingDirection::Previous
            }
        );
        assert_eq!(
            next_sibling(&last).unwrap_err(),
            TreeError::NoSibling {
                direction: SiblingDirection::Next
            }
        );
    }

    #[test]
    fn test_remove_siblings_keeps_end() {
        let middle = Treepath::from_indices(sample(), &[1]);

        let after_previous = remove_previous_sibling(&middle).unwrap();
        assert_eq!(label(after_previous.tree_at_end()), "b");
        assert_eq!(after_previous.indices_in_parent(), vec![0]);
        assert_eq!(labels(after_previous.tree_at_start()), ["b", "c"]);

        let after_next = remove_next_sibling(&middle).unwrap();
        assert_eq!(label(after_next.tree_at_end()), "b");
        assert_eq!(after_next.indices_in_parent(), vec![1]);
        assert_eq!(labels(after_next.tree_at_start()), ["a", "b"]);
    }

    #[test]
    fn test_become_last_child_of_previous_sibling() {
        let path = Treepath::from_indices(sample(), &[1]);
        let moved = become_last_child_of_previous_sibling(&path).unwrap();
        assert_eq!(label(moved.tree_at_end()), "b");
        assert_eq!(moved.indices_in_parent(), vec![0, 2]);

        let root = moved.tree_at_start();
        assert_eq!(labels(root), ["a", "c"]);
        assert_eq!(labels(root.child_at(0)), ["a1", "a2", "b"]);

        let first = Treepath::from_indices(sample(), &[0]);
        assert!(become_last_child_of_previous_sibling(&first).is_err());
    }
}
