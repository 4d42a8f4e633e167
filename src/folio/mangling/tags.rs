//! Tag enhancement
//!
//!     Authored `TAG` nodes become `EXPLICIT_TAG`. Levels without any authored tag receive
//!     `IMPLICIT_TAG` children derived from their title, see
//!     [`implicit_tags`](crate::folio::designator::implicit::implicit_tags). An implicit tag
//!     whose name is also used explicitly somewhere in the document is then promoted to
//!     `PROMOTED_TAG`.

use std::collections::BTreeSet;

use crate::folio::ast::{is_identifier_bearing, Node, NodeKind, TagBehavior};
use crate::folio::designator::implicit::{implicit_tags, ImplicitRenderer};
use crate::folio::designator::Tag;
use crate::folio::tree::edit;
use crate::folio::tree::error::TreeResult;
use crate::folio::tree::{Preorder, Traversal, Tree, Treepath};

/// Explicit tags, then implicit ones. Returns a path to the start of the new tree.
pub fn enhance(
    path: &Treepath<Node>,
    renderer: &dyn ImplicitRenderer,
) -> TreeResult<Treepath<Node>> {
    let path = enhance_with_explicit_tags(path)?;
    enhance_with_implicit_tags(&path, renderer)
}

pub fn enhance_with_explicit_tags(path: &Treepath<Node>) -> TreeResult<Treepath<Node>> {
    let walk = Preorder::unfiltered();
    let mut last = path.start();
    let mut current = walk.first(path);
    while let Some(mut position) = current {
        current = match position.tree_at_end().tag_behavior() {
            TagBehavior::Scope | TagBehavior::Terminal => {
                position = retag_children(&position, NodeKind::Tag, NodeKind::ExplicitTag)?;
                walk.next(&position)
            }
            TagBehavior::Traversable => walk.next(&position),
            TagBehavior::NonTraversable => walk.next_up(&position),
        };
        last = position;
    }
    Ok(last.start())
}

pub fn enhance_with_implicit_tags(
    path: &Treepath<Node>,
    renderer: &dyn ImplicitRenderer,
) -> TreeResult<Treepath<Node>> {
    let walk = Preorder::unfiltered();
    let mut last = path.start();
    let mut current = walk.first(path);
    while let Some(mut position) = current {
        let node = position.tree_at_end();
        current = match node.tag_behavior() {
            TagBehavior::Scope if node.is(NodeKind::Level) => {
                let tags = implicit_tags_of_level(node, renderer);
                for tag in tags.iter().rev() {
                    position = edit::add_child_first(&position, tag.to_node(NodeKind::ImplicitTag))
                        .parent()?;
                }
                walk.next(&position)
            }
            TagBehavior::Scope | TagBehavior::Traversable => walk.next(&position),
            TagBehavior::Terminal | TagBehavior::NonTraversable => walk.next_up(&position),
        };
        last = position;
    }
    Ok(last.start())
}

/// Tags derived from the title of a level that has no authored tag.
fn implicit_tags_of_level(level: &Node, renderer: &dyn ImplicitRenderer) -> BTreeSet<Tag> {
    let authored = level.find_child(NodeKind::ExplicitTag).is_some()
        || level.find_child(NodeKind::Tag).is_some();
    match level.find_child(NodeKind::LevelTitle) {
        Some(title) if !authored => implicit_tags(renderer, title),
        _ => BTreeSet::new(),
    }
}

/// Names of all `EXPLICIT_TAG` nodes in the tree.
pub fn find_explicit_tags(node: &Node) -> BTreeSet<Tag> {
    let mut tags = BTreeSet::new();
    collect_explicit_tags(node, &mut tags);
    tags
}

fn collect_explicit_tags(node: &Node, tags: &mut BTreeSet<Tag>) {
    if node.is(NodeKind::ExplicitTag) {
        tags.extend(Tag::from_node(node));
    } else if node.tag_behavior() != TagBehavior::NonTraversable {
        for child in node.child_nodes() {
            collect_explicit_tags(child, tags);
        }
    }
}

/// Turns implicit tags named in `explicit` into promoted tags.
pub fn promote(path: &Treepath<Node>, explicit: &BTreeSet<Tag>) -> TreeResult<Treepath<Node>> {
    if explicit.is_empty() {
        return Ok(path.start());
    }
    let walk = Preorder::new(is_identifier_bearing);
    let mut last = path.start();
    let mut current = walk.first(path);
    while let Some(mut position) = current {
        for index in 0..position.tree_at_end().child_count() {
            let child = position.tree_at_end().child_at(index);
            let promoted = child.is(NodeKind::ImplicitTag)
                && Tag::from_node(child).is_some_and(|tag| explicit.contains(&tag));
            if promoted {
                let replacement = child.with_kind(NodeKind::PromotedTag);
                position = edit::replace_end(&position.child(index), replacement).parent()?;
            }
        }
        current = walk.next(&position);
        last = position;
    }
    Ok(last.start())
}

fn retag_children(
    position: &Treepath<Node>,
    from: NodeKind,
    to: NodeKind,
) -> TreeResult<Treepath<Node>> {
    let mut position = position.clone();
    for index in 0..position.tree_at_end().child_count() {
        let child = position.tree_at_end().child_at(index);
        if child.is(from) {
            let replacement = child.with_kind(to);
            position = edit::replace_end(&position.child(index), replacement).parent()?;
        }
    }
    Ok(position)
}
