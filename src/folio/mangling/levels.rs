//! Level nesting
//!
//!     A level is introduced by a `LEVEL_INTRODUCER` whose indent is a run of `=`: `==`
//!     opens a level of depth 1, `===` one of depth 2, and so on. Everything up to the next
//!     introducer of the same or a shallower depth belongs to it. Deeper introducers open
//!     nested levels.
//!
//!     The first top level introducer sets the roof: a later top level introducer shallower
//!     than it is reported as a problem and still becomes a level, so the document keeps
//!     all of its content.

use crate::folio::ast::{Node, NodeKind};
use crate::folio::designator::Problem;
use crate::folio::tree::edit;
use crate::folio::tree::error::TreeResult;
use crate::folio::tree::{Tree, Treepath};

/// Nests the children of the end of `path` into `LEVEL` nodes.
pub fn rehierarchize_levels(
    path: &Treepath<Node>,
) -> TreeResult<(Treepath<Node>, Vec<Problem>)> {
    let node = path.tree_at_end();
    if node.position_of(NodeKind::LevelIntroducer).is_none() {
        return Ok((path.clone(), Vec::new()));
    }

    let children = node.child_nodes();
    let mut problems = Vec::new();
    let mut nested = Vec::with_capacity(children.len());
    let mut roof: Option<usize> = None;
    let mut cursor = 0;
    while let Some(child) = children.get(cursor) {
        if !child.is(NodeKind::LevelIntroducer) {
            nested.push(child.clone());
            cursor += 1;
            continue;
        }
        let depth = depth_or_default(child, &mut problems);
        match roof {
            None => roof = Some(depth),
            Some(roof) if depth < roof => problems.push(Problem::on(
                format!("Incorrect depth [{}] for level declaration", depth),
                child,
            )),
            Some(_) => {}
        }
        nested.push(build_level(children, &mut cursor, depth));
    }

    let rebuilt = node.adopt(nested);
    Ok((edit::replace_end(path, rebuilt), problems))
}

/// Depth declared by an introducer, `None` when its indent is missing or too short.
pub fn declared_depth(introducer: &Node) -> Option<usize> {
    let indent = introducer.find_child(NodeKind::LevelIntroducerIndent)?;
    let text = indent.text()?;
    let length = text.chars().count();
    if length < 2 || text.chars().any(|c| c != '=') {
        return None;
    }
    Some(length - 1)
}

fn depth_or_default(introducer: &Node, problems: &mut Vec<Problem>) -> usize {
    declared_depth(introducer).unwrap_or_else(|| {
        problems.push(Problem::on("Malformed level introducer", introducer));
        1
    })
}

/// Builds the level opened by the introducer at `cursor` and advances past its content.
fn build_level(children: &[Node], cursor: &mut usize, depth: usize) -> Node {
    let introducer = &children[*cursor];
    *cursor += 1;

    let mut content: Vec<Node> = introducer
        .child_nodes()
        .iter()
        .filter(|child| !child.is(NodeKind::LevelIntroducerIndent))
        .cloned()
        .collect();

    while let Some(next) = children.get(*cursor) {
        if next.is(NodeKind::LevelIntroducer) {
            // Malformed introducers count as depth 1 and always close the level.
            let next_depth = declared_depth(next).unwrap_or(1);
            if next_depth <= depth {
                break;
            }
            content.push(build_level(children, cursor, next_depth));
        } else {
            content.push(next.clone());
            *cursor += 1;
        }
    }

    Node::new(NodeKind::Level)
        .with_optional_location(introducer.location().cloned())
        .with_children(content)
}
