//! Tag restriction
//!
//!     Keeps only the parts of a document carrying one of the requested tags:
//!
//!     - a terminal node (paragraph) is kept if it is tagged;
//!     - a scope (level) is kept whole if it is tagged, otherwise it is filtered like a
//!       traversable node and dropped when nothing inside it survives;
//!     - a traversable node keeps its non traversable children (titles, identifiers, tags)
//!       and the children that survive filtering.
//!
//!     Runs after [tag enhancement](super::tags), so implicit tags count.

use std::collections::BTreeSet;

use crate::folio::ast::{Node, NodeKind, TagBehavior};
use crate::folio::designator::Tag;
use crate::folio::tree::edit;
use crate::folio::tree::{Tree, Treepath};

const TAG_KINDS: &[NodeKind] = &[
    NodeKind::ExplicitTag,
    NodeKind::ImplicitTag,
    NodeKind::PromotedTag,
];

/// Restricts the tree at the end of `path` to `restrict`. An empty restriction keeps
/// everything.
pub fn filter(path: &Treepath<Node>, restrict: &BTreeSet<Tag>) -> Treepath<Node> {
    if restrict.is_empty() {
        return path.clone();
    }
    let node = path.tree_at_end();
    let filtered = match filter_node(node, restrict) {
        Some(Filtered { tree, .. }) => tree,
        None => node.adopt(Vec::new()),
    };
    if filtered.same_node(node) {
        path.clone()
    } else {
        edit::replace_end(path, filtered)
    }
}

/// What survives of a node, and whether it carries (or contains) a requested tag.
struct Filtered {
    tagged: bool,
    tree: Node,
}

impl Filtered {
    fn tagged(tree: &Node) -> Filtered {
        Filtered {
            tagged: true,
            tree: tree.clone(),
        }
    }
}

fn filter_node(node: &Node, restrict: &BTreeSet<Tag>) -> Option<Filtered> {
    match node.tag_behavior() {
        TagBehavior::Terminal | TagBehavior::Scope if has_tag(node, restrict) => {
            Some(Filtered::tagged(node))
        }
        TagBehavior::Terminal => None,
        TagBehavior::Scope => filter_traversable(node, restrict).filter(|result| result.tagged),
        TagBehavior::Traversable => filter_traversable(node, restrict),
        TagBehavior::NonTraversable => Some(Filtered {
            tagged: false,
            tree: node.clone(),
        }),
    }
}

fn filter_traversable(node: &Node, restrict: &BTreeSet<Tag>) -> Option<Filtered> {
    let mut tagged = false;
    let mut changed = false;
    let mut children = Vec::with_capacity(node.child_count());
    for child in node.child_nodes() {
        if child.tag_behavior() == TagBehavior::NonTraversable {
            children.push(child.clone());
            continue;
        }
        match filter_node(child, restrict) {
            Some(result) if result.tagged => {
                tagged = true;
                changed |= !result.tree.same_node(child);
                children.push(result.tree);
            }
            _ => changed = true,
        }
    }
    let tree = if changed {
        node.adopt(children)
    } else {
        node.clone()
    };
    Some(Filtered { tagged, tree })
}

fn has_tag(node: &Node, restrict: &BTreeSet<Tag>) -> bool {
    node.child_nodes()
        .iter()
        .filter(|child| child.is_one_of(TAG_KINDS))
        .filter_map(Tag::from_node)
        .any(|tag| restrict.contains(&tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folio::designator::tag::tag_set;
    use crate::folio::testing::{
        assert_child_kinds, assert_shared, level, novella, paragraph, title,
    };

    fn explicit(name: &str) -> Node {
        Node::leaf(NodeKind::ExplicitTag, name)
    }

    fn filtered(root: Node, tags: &[&str]) -> Node {
        filter(&Treepath::new(root), &tag_set(tags.iter().copied())).into_tree_at_end()
    }

    #[test]
    fn test_empty_restriction_keeps_everything() {
        let root = novella([paragraph("a")]);
        let kept = filtered(root.clone(), &[]);
        assert_shared(&kept, &root);
    }

    #[test]
    fn test_tagged_level_is_kept_whole() {
        let tagged = level([title("Kept"), explicit("keep"), paragraph("inside")]);
        let root = novella([tagged.clone(), level([title("Dropped"), paragraph("x")])]);
        let kept = filtered(root, &["keep"]);
        assert_eq!(kept.child_count(), 1);
        assert_shared(kept.child_at(0), &tagged);
    }

    #[test]
    fn test_untagged_level_keeps_tagged_paragraphs() {
        let root = novella([level([
            title("Mixed"),
            paragraph("kept").with_child(explicit("keep")),
            paragraph("dropped"),
        ])]);
        let kept = filtered(root, &["keep"]);
        let level = kept.child_at(0);
        assert_child_kinds(level, &[NodeKind::LevelTitle, NodeKind::ParagraphRegular]);
    }

    #[test]
    fn test_implicit_tags_count() {
        let root = novella([
            level([title("A"), Node::leaf(NodeKind::ImplicitTag, "A")]),
            level([title("B"), Node::leaf(NodeKind::ImplicitTag, "B")]),
        ]);
        let kept = filtered(root, &["B"]);
        assert_eq!(kept.child_count(), 1);
        assert_eq!(kept.child_at(0).child_at(0).kind(), NodeKind::LevelTitle);
    }

    #[test]
    fn test_nothing_tagged_leaves_empty_document() {
        let root = novella([paragraph("a"), level([title("b")])]);
        let kept = filtered(root, &["missing"]);
        assert_eq!(kept.kind(), NodeKind::Novella);
        assert_eq!(kept.child_count(), 0);
    }
}
