//! Separator passes

use crate::folio::ast::{Node, NodeKind};
use crate::folio::tree::edit;
use crate::folio::tree::error::TreeResult;
use crate::folio::tree::{Tree, Treepath};

const SEPARATORS: &[NodeKind] = &[NodeKind::Whitespace, NodeKind::LineBreak];

/// Kinds whose content is never rewritten.
const OPAQUE: &[NodeKind] = &[
    NodeKind::Word,
    NodeKind::UrlLiteral,
    NodeKind::BlockOfLiteralInsideGraveAccents,
    NodeKind::LinesOfLiteral,
];

/// Removes every `WHITESPACE` and `LINE_BREAK` node under the end of `path`.
pub fn remove_separators(path: &Treepath<Node>) -> TreeResult<Treepath<Node>> {
    let mut path = path.clone();
    let mut index = 0;
    while index < path.tree_at_end().child_count() {
        let child = path.child(index);
        if child.tree_at_end().is_one_of(SEPARATORS) {
            path = edit::remove_end(&child)?;
        } else {
            path = remove_separators(&child)?.parent()?;
            index += 1;
        }
    }
    Ok(path)
}

/// Keeps the space between a word and an apostrophe wordmate that the author wrote with
/// whitespace: `PRESERVED_WHITESPACE` survives separator removal.
pub fn insert_mandatory_whitespace_near_apostrophe(
    path: &Treepath<Node>,
) -> TreeResult<Treepath<Node>> {
    let mut path = path.clone();
    let mut index = 0;
    while index < path.tree_at_end().child_count() {
        let parent = path.tree_at_end();
        let child = parent.child_at(index);
        if child.is(NodeKind::ApostropheWordmate) {
            let after = word_across_whitespace(parent, index, Direction::Forward);
            let before = word_across_whitespace(parent, index, Direction::Backward);
            if after {
                path = edit::add_child_at(&path, preserved_whitespace(), index + 1).parent()?;
            }
            if before {
                path = edit::add_child_at(&path, preserved_whitespace(), index).parent()?;
                index += 1;
            }
            index += 1 + usize::from(after);
        } else if child.is_one_of(OPAQUE) {
            index += 1;
        } else {
            path = insert_mandatory_whitespace_near_apostrophe(&path.child(index))?.parent()?;
            index += 1;
        }
    }
    Ok(path)
}

fn preserved_whitespace() -> Node {
    Node::leaf(NodeKind::PreservedWhitespace, " ")
}

#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

/// True when, looking from `index` in `direction`, one or more whitespace siblings are
/// followed by a word.
fn word_across_whitespace(parent: &Node, index: usize, direction: Direction) -> bool {
    let siblings = parent.child_nodes();
    let neighbours: Box<dyn Iterator<Item = &Node>> = match direction {
        Direction::Forward => Box::new(siblings[index + 1..].iter()),
        Direction::Backward => Box::new(siblings[..index].iter().rev()),
    };
    let mut crossed_whitespace = false;
    for sibling in neighbours {
        if sibling.is(NodeKind::Whitespace) {
            crossed_whitespace = true;
        } else {
            return crossed_whitespace && sibling.is(NodeKind::Word);
        }
    }
    false
}
