//! Writes resolved identifiers back into the tree
//!
//! Authored identifier tokens are stripped from bearing nodes, then every node addressed by
//! the pure map gains an `EXPLICIT_IDENTIFIER` first child, and every node addressed by the
//! derived map an `IMPLICIT_IDENTIFIER` first child. Markers hold the absolute
//! representation of the identifier (`\\A\B`).
//!
//! Tokens and markers are not identifier-bearing, so the robust paths of the resolution stay
//! valid through all of these edits.

use std::collections::BTreeMap;

use super::fragment::FragmentIdentifier;
use super::resolution::Resolution;
use crate::folio::ast::{is_identifier_bearing, Node, NodeKind};
use crate::folio::tree::edit;
use crate::folio::tree::error::TreeResult;
use crate::folio::tree::{MirroredPostorder, RobustPath, Traversal, Tree, Treepath};

/// Identifier maps resolved against the enriched tree.
#[derive(Debug, Clone)]
pub struct Enriched {
    pub tree: Node,
    pub pure: BTreeMap<FragmentIdentifier, Treepath<Node>>,
    pub derived: BTreeMap<FragmentIdentifier, Treepath<Node>>,
}

pub fn enrich(root: &Node, resolution: &Resolution) -> TreeResult<Enriched> {
    let stripped = remove_identifier_tokens(&Treepath::new(root.clone()))?;
    let tree = add_markers(
        stripped.tree_at_start().clone(),
        resolution.pure(),
        NodeKind::ExplicitIdentifier,
    )?;
    let tree = add_markers(tree, resolution.derived(), NodeKind::ImplicitIdentifier)?;
    let (pure, derived) = resolution.apply(&tree)?;
    Ok(Enriched {
        tree,
        pure,
        derived,
    })
}

/// Removes `ABSOLUTE_IDENTIFIER` and `RELATIVE_IDENTIFIER` children of bearing nodes.
/// Returns a path to the start of the rewritten tree.
pub fn remove_identifier_tokens(path: &Treepath<Node>) -> TreeResult<Treepath<Node>> {
    let traversal = MirroredPostorder::new(is_identifier_bearing);
    let mut last = path.start();
    let mut current = traversal.first(path);
    while let Some(mut position) = current {
        for index in (0..position.tree_at_end().child_count()).rev() {
            let child = position.tree_at_end().child_at(index);
            if child.is_one_of(&[NodeKind::AbsoluteIdentifier, NodeKind::RelativeIdentifier]) {
                position = edit::remove_end(&position.child(index))?;
            }
        }
        current = traversal.next(&position);
        last = position;
    }
    Ok(last.start())
}

fn add_markers(
    mut tree: Node,
    map: &BTreeMap<FragmentIdentifier, RobustPath<Node>>,
    kind: NodeKind,
) -> TreeResult<Node> {
    for (identifier, robust) in map {
        let target = robust.apply(&tree)?;
        let marker = Node::leaf(kind, identifier.absolute_representation());
        let added = edit::add_child_first(&target, marker);
        tree = added.tree_at_start().clone();
    }
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folio::designator::CanonicalRenderer;
    use crate::folio::testing::{absolute, level, novella, paragraph, relative, titled_level};

    fn id(text: &str) -> FragmentIdentifier {
        FragmentIdentifier::parse(text).unwrap()
    }

    #[test]
    fn test_tokens_are_removed_everywhere() {
        let root = novella([
            level([absolute("A"), level([relative("B"), paragraph("text")])]),
            paragraph("text"),
        ]);
        let stripped = remove_identifier_tokens(&Treepath::new(root)).unwrap();
        let tree = stripped.tree_at_end();
        let expected = novella([level([level([paragraph("text")])]), paragraph("text")]);
        assert_eq!(tree, &expected);
    }

    #[test]
    fn test_markers_are_first_children() {
        let root = novella([
            titled_level("Intro", []),
            level([absolute("Foo"), paragraph("body")]),
        ]);
        let resolution = Resolution::resolve(&Treepath::new(root.clone()), &CanonicalRenderer)
            .unwrap();
        let enriched = enrich(&root, &resolution).unwrap();

        let intro = enriched.derived[&id("Intro")].tree_at_end();
        assert_eq!(intro.child_at(0).kind(), NodeKind::ImplicitIdentifier);
        assert_eq!(intro.child_at(0).text(), Some("\\\\Intro"));

        let foo = enriched.pure[&id("Foo")].tree_at_end();
        assert_eq!(foo.child_at(0).kind(), NodeKind::ExplicitIdentifier);
        assert_eq!(foo.child_at(0).text(), Some("\\\\Foo"));
        assert!(foo.find_child(NodeKind::AbsoluteIdentifier).is_none());
        assert_eq!(foo.child_count(), 2);

        // the returned paths address the enriched tree itself
        assert!(enriched.pure[&id("Foo")]
            .tree_at_start()
            .same_node(&enriched.tree));
    }

    #[test]
    fn test_untouched_subtrees_are_shared() {
        let untouched = level([paragraph("unchanged")]);
        let root = novella([untouched.clone(), level([absolute("Foo")])]);
        let resolution = Resolution::resolve(&Treepath::new(root.clone()), &CanonicalRenderer)
            .unwrap();
        let enriched = enrich(&root, &resolution).unwrap();
        assert!(enriched.tree.child_at(0).same_node(&untouched));
    }
}
