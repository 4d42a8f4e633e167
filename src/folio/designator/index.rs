//! Link target lookup over identifier markers

use std::collections::BTreeMap;

use super::fragment::FragmentIdentifier;
use crate::folio::ast::{Node, NodeKind};
use crate::folio::tree::{Preorder, Traversal, Treepath};

/// Maps identifiers to the fragments carrying their marker.
///
/// Built from the marker nodes of an enriched (and possibly assembled) tree. Colliding
/// explicit markers are not link targets and are left out.
#[derive(Debug, Clone, Default)]
pub struct IdentifierIndex {
    explicit: BTreeMap<FragmentIdentifier, Treepath<Node>>,
    implicit: BTreeMap<FragmentIdentifier, Treepath<Node>>,
}

impl IdentifierIndex {
    pub fn scan(path: &Treepath<Node>) -> Self {
        let mut index = IdentifierIndex::default();
        let markers = Preorder::new(|node: &Node| {
            node.is_one_of(&[NodeKind::ExplicitIdentifier, NodeKind::ImplicitIdentifier])
        });
        for position in markers.walk(path) {
            let marker = position.tree_at_end();
            let (Some(text), Ok(fragment)) = (marker.text(), position.parent()) else {
                continue;
            };
            let Ok(identifier) = FragmentIdentifier::parse(text) else {
                continue;
            };
            let map = if marker.is(NodeKind::ExplicitIdentifier) {
                &mut index.explicit
            } else {
                &mut index.implicit
            };
            map.entry(identifier).or_insert(fragment);
        }
        index
    }

    /// Fragment designated by `identifier`: the explicit one first, then the implicit one.
    pub fn get(&self, identifier: &FragmentIdentifier) -> Option<&Treepath<Node>> {
        self.explicit
            .get(identifier)
            .or_else(|| self.implicit.get(identifier))
    }

    pub fn explicit(&self) -> &BTreeMap<FragmentIdentifier, Treepath<Node>> {
        &self.explicit
    }

    pub fn implicit(&self) -> &BTreeMap<FragmentIdentifier, Treepath<Node>> {
        &self.implicit
    }

    pub fn len(&self) -> usize {
        self.explicit.len() + self.implicit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.explicit.is_empty() && self.implicit.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folio::ast::Node;
    use crate::folio::testing::{explicit_marker, implicit_marker, level, novella};

    fn id(text: &str) -> FragmentIdentifier {
        FragmentIdentifier::parse(text).unwrap()
    }

    #[test]
    fn test_explicit_wins_over_implicit() {
        let root = novella([
            level([implicit_marker("Same")]),
            level([explicit_marker("Same")]),
            level([implicit_marker("Only")]),
        ]);
        let index = IdentifierIndex::scan(&Treepath::new(root));
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(&id("Same")).unwrap().indices_in_parent(), vec![1]);
        assert_eq!(index.get(&id("Only")).unwrap().indices_in_parent(), vec![2]);
        assert!(index.get(&id("Missing")).is_none());
    }

    #[test]
    fn test_colliding_markers_are_not_targets() {
        let colliding = Node::leaf(NodeKind::CollidingExplicitIdentifier, "\\\\Foo");
        let root = novella([level([colliding])]);
        let index = IdentifierIndex::scan(&Treepath::new(root));
        assert!(index.is_empty());
    }
}
