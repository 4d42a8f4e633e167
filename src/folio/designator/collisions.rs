//! Identifier collisions across documents
//!
//! Once several documents are assembled into one tree, markers written independently by
//! [enrichment](super::enrich) may clash. Colliding implicit markers are removed: a derived
//! identifier that is not unique designates nothing. Colliding explicit markers are kept but
//! retagged `COLLIDING_EXPLICIT_IDENTIFIER`, so renderers can still show the authored
//! identifier while refusing to link to it.

use std::collections::BTreeSet;

use crate::folio::ast::{is_identifier_bearing, Node, NodeKind};
use crate::folio::tree::edit;
use crate::folio::tree::error::TreeResult;
use crate::folio::tree::{MirroredPostorder, Preorder, Traversal, Tree, Treepath};

/// Marker texts seen more than once, per marker kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierCollisions {
    implicit: BTreeSet<String>,
    explicit: BTreeSet<String>,
}

impl IdentifierCollisions {
    /// Scans every marker of the tree `path` belongs to.
    pub fn find(path: &Treepath<Node>) -> Self {
        let mut implicit_seen = BTreeSet::new();
        let mut explicit_seen = BTreeSet::new();
        let mut collisions = IdentifierCollisions::default();

        let markers = Preorder::new(|node: &Node| {
            node.is_one_of(&[NodeKind::ImplicitIdentifier, NodeKind::ExplicitIdentifier])
        });
        for position in markers.walk(path) {
            let marker = position.tree_at_end();
            let text = marker.text().unwrap_or_default().to_string();
            let (seen, collided) = if marker.is(NodeKind::ImplicitIdentifier) {
                (&mut implicit_seen, &mut collisions.implicit)
            } else {
                (&mut explicit_seen, &mut collisions.explicit)
            };
            if !seen.insert(text.clone()) {
                collided.insert(text);
            }
        }
        collisions
    }

    pub fn is_empty(&self) -> bool {
        self.implicit.is_empty() && self.explicit.is_empty()
    }

    pub fn implicit(&self) -> &BTreeSet<String> {
        &self.implicit
    }

    pub fn explicit(&self) -> &BTreeSet<String> {
        &self.explicit
    }

    pub fn implicit_collides(&self, marker: &Node) -> bool {
        marker.is(NodeKind::ImplicitIdentifier)
            && marker
                .text()
                .is_some_and(|text| self.implicit.contains(text))
    }

    pub fn explicit_collides(&self, marker: &Node) -> bool {
        marker.is(NodeKind::ExplicitIdentifier)
            && marker
                .text()
                .is_some_and(|text| self.explicit.contains(text))
    }
}

/// Removes every colliding implicit marker. Returns a path to the start of the new tree.
pub fn remove_colliding_implicit_identifiers(
    collisions: &IdentifierCollisions,
    path: &Treepath<Node>,
) -> TreeResult<Treepath<Node>> {
    rewrite_marker_children(path, |position, index| {
        if collisions.implicit_collides(position.tree_at_end().child_at(index)) {
            Ok(Some(edit::remove_end(&position.child(index))?))
        } else {
            Ok(None)
        }
    })
}

/// Retags every colliding explicit marker. Returns a path to the start of the new tree.
pub fn flag_colliding_explicit_identifiers(
    collisions: &IdentifierCollisions,
    path: &Treepath<Node>,
) -> TreeResult<Treepath<Node>> {
    rewrite_marker_children(path, |position, index| {
        let child = position.tree_at_end().child_at(index);
        if collisions.explicit_collides(child) {
            let flagged = child.with_kind(NodeKind::CollidingExplicitIdentifier);
            let replaced = edit::replace_end(&position.child(index), flagged);
            Ok(Some(replaced.parent()?))
        } else {
            Ok(None)
        }
    })
}

/// Finds collisions, then removes and retags the colliding markers.
pub fn resolve_collisions(
    path: &Treepath<Node>,
) -> TreeResult<(Treepath<Node>, IdentifierCollisions)> {
    let collisions = IdentifierCollisions::find(path);
    if collisions.is_empty() {
        return Ok((path.start(), collisions));
    }
    let path = remove_colliding_implicit_identifiers(&collisions, path)?;
    let path = flag_colliding_explicit_identifiers(&collisions, &path)?;
    Ok((path, collisions))
}

/// Visits bearing nodes in mirrored post-order and offers each child index, last to first,
/// to `rewrite`. A rewrite returns the path to the (rebuilt) bearing node, or `None` when it
/// left the child alone.
fn rewrite_marker_children<F>(path: &Treepath<Node>, mut rewrite: F) -> TreeResult<Treepath<Node>>
where
    F: FnMut(&Treepath<Node>, usize) -> TreeResult<Option<Treepath<Node>>>,
{
    let traversal = MirroredPostorder::new(is_identifier_bearing);
    let mut last = path.start();
    let mut current = traversal.first(path);
    while let Some(mut position) = current {
        for index in (0..position.tree_at_end().child_count()).rev() {
            if let Some(rewritten) = rewrite(&position, index)? {
                position = rewritten;
            }
        }
        current = traversal.next(&position);
        last = position;
    }
    Ok(last.start())
}
