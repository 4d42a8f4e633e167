//! Node-level rebuild helpers
//!
//! Each function returns a new parent holding the edited child list. Untouched children are
//! shared with the original parent. Indices out of range panic, like [`Tree::child_at`].

use super::Tree;

fn cloned_children<T: Tree>(tree: &T) -> Vec<T> {
    tree.children().cloned().collect()
}

fn check_index<T: Tree>(tree: &T, index: usize, inclusive: bool) {
    let child_count = tree.child_count();
    let in_range = if inclusive {
        index <= child_count
    } else {
        index < child_count
    };
    if !in_range {
        panic!(
            "Unsupported index: {} (child count: {})",
            index, child_count
        );
    }
}

pub fn add_first<T: Tree>(tree: &T, child: T) -> T {
    insert(tree, 0, child)
}

pub fn add_last<T: Tree>(tree: &T, child: T) -> T {
    let mut children = cloned_children(tree);
    children.push(child);
    tree.adopt(children)
}

/// Inserts `child` so that it ends up at `index`. `index == child_count` appends.
pub fn insert<T: Tree>(tree: &T, index: usize, child: T) -> T {
    check_index(tree, index, true);
    let mut children = cloned_children(tree);
    children.insert(index, child);
    tree.adopt(children)
}

pub fn replace<T: Tree>(tree: &T, index: usize, child: T) -> T {
    check_index(tree, index, false);
    let mut children = cloned_children(tree);
    children[index] = child;
    tree.adopt(children)
}

pub fn remove<T: Tree>(tree: &T, index: usize) -> T {
    check_index(tree, index, false);
    let mut children = cloned_children(tree);
    children.remove(index);
    tree.adopt(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folio::testing::{label, labeled};

    fn labels(tree: &crate::folio::ast::Node) -> Vec<String> {
        tree.children().map(|c| label(c).to_string()).collect()
    }

    #[test]
    fn test_add_and_insert() {
        let parent = labeled("p", [labeled("x", []), labeled("y", [])]);
        assert_eq!(labels(&add_first(&parent, labeled("w", []))), ["w", "x", "y"]);
        assert_eq!(labels(&add_last(&parent, labeled("z", []))), ["x", "y", "z"]);
        assert_eq!(labels(&insert(&parent, 1, labeled("m", []))), ["x", "m", "y"]);
        assert_eq!(labels(&insert(&parent, 2, labeled("z", []))), ["x", "y", "z"]);
    }

    #[test]
    fn test_replace_and_remove_share_siblings() {
        let parent = labeled("p", [labeled("x", []), labeled("y", [])]);
        let replaced = replace(&parent, 0, labeled("q", []));
        assert_eq!(labels(&replaced), ["q", "y"]);
        assert!(replaced.child_at(1).same_node(parent.child_at(1)));

        let removed = remove(&parent, 0);
        assert_eq!(labels(&removed), ["y"]);
        assert!(removed.child_at(0).same_node(parent.child_at(1)));
        // the original is untouched
        assert_eq!(labels(&parent), ["x", "y"]);
    }

    #[test]
    #[should_panic(expected = "Unsupported index: 3")]
    fn test_insert_out_of_range() {
        let parent = labeled("p", [labeled("x", [])]);
        insert(&parent, 3, labeled("z", []));
    }
}
