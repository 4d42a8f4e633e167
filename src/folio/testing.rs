//! Testing utilities
//!
//!     Tree factories and assertions shared by unit and integration tests.
//!
//!     Trees in tests are small and built by hand, so the factories stay close to the node
//!     model: one function per kind of node, children passed as arrays. Inline text is split
//!     the way the parser would: one `WORD` per whitespace separated token, trailing
//!     punctuation as sign nodes, apostrophes as `APOSTROPHE_WORDMATE`.
//!
//!     ```rust,ignore
//!     let doc = novella([
//!         titled_level("Introduction", [absolute("Intro"), paragraph("Hello, world.")]),
//!         titled_level("Details", [paragraph("More text")]),
//!     ]);
//!     ```
//!
//!     Raw trees (as handed over by the parser, before the mangling passes) are built with
//!     [`introducer`], [`whitespace`], [`line_break`], [`hyphen_item`] and
//!     [`triple_hyphen_item`].

use crate::folio::ast::{Node, NodeKind};
use crate::folio::tree::Tree;

/// Generic labeled node for tree primitive tests.
pub fn labeled(label: &str, children: impl IntoIterator<Item = Node>) -> Node {
    Node::leaf(NodeKind::Level, label).with_children(children)
}

/// Text of a node, empty when it has none.
pub fn label(node: &Node) -> &str {
    node.text().unwrap_or_default()
}

pub fn word(text: &str) -> Node {
    Node::leaf(NodeKind::Word, text)
}

fn sign_kind(c: char) -> NodeKind {
    match c {
        ',' => NodeKind::SignComma,
        '.' => NodeKind::SignFullstop,
        '?' => NodeKind::SignQuestionmark,
        '!' => NodeKind::SignExclamationmark,
        ';' => NodeKind::SignSemicolon,
        _ => NodeKind::SignColon,
    }
}

const SIGNS: &[char] = &[',', '.', '?', '!', ';', ':'];

/// Inline nodes of `text`.
pub fn inline(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    for token in text.split_whitespace() {
        let body = token.trim_end_matches(SIGNS);
        for (index, part) in body.split('\'').enumerate() {
            if index > 0 {
                nodes.push(Node::leaf(NodeKind::ApostropheWordmate, "'"));
            }
            if !part.is_empty() {
                nodes.push(word(part));
            }
        }
        for sign in token[body.len()..].chars() {
            let kind = sign_kind(sign);
            nodes.push(Node::leaf(kind, sign.to_string()));
        }
    }
    nodes
}

pub fn title(text: &str) -> Node {
    Node::new(NodeKind::LevelTitle).with_children(inline(text))
}

pub fn paragraph(text: &str) -> Node {
    Node::new(NodeKind::ParagraphRegular).with_children(inline(text))
}

pub fn level(children: impl IntoIterator<Item = Node>) -> Node {
    Node::new(NodeKind::Level).with_children(children)
}

/// Level whose first child is a title rendering `title_text`.
pub fn titled_level(title_text: &str, children: impl IntoIterator<Item = Node>) -> Node {
    Node::new(NodeKind::Level)
        .with_child(title(title_text))
        .with_children_appended(children)
}

pub fn novella(children: impl IntoIterator<Item = Node>) -> Node {
    Node::new(NodeKind::Novella).with_children(children)
}

pub fn opus(children: impl IntoIterator<Item = Node>) -> Node {
    Node::new(NodeKind::Opus).with_children(children)
}

pub fn absolute(identifier: &str) -> Node {
    Node::leaf(NodeKind::AbsoluteIdentifier, identifier)
}

pub fn relative(identifier: &str) -> Node {
    Node::leaf(NodeKind::RelativeIdentifier, identifier)
}

pub fn tag(name: &str) -> Node {
    Node::leaf(NodeKind::Tag, name)
}

/// `IMPLICIT_IDENTIFIER` marker for a single segment identifier.
pub fn implicit_marker(segment: &str) -> Node {
    Node::leaf(NodeKind::ImplicitIdentifier, format!("\\\\{}", segment))
}

/// `EXPLICIT_IDENTIFIER` marker for a single segment identifier.
pub fn explicit_marker(segment: &str) -> Node {
    Node::leaf(NodeKind::ExplicitIdentifier, format!("\\\\{}", segment))
}

/// Raw level introducer: `depth` 1 is written `==`.
pub fn introducer(depth: usize, title_text: &str, extra: impl IntoIterator<Item = Node>) -> Node {
    Node::new(NodeKind::LevelIntroducer)
        .with_child(Node::leaf(
            NodeKind::LevelIntroducerIndent,
            "=".repeat(depth + 1),
        ))
        .with_child(title(title_text))
        .with_children_appended(extra)
}

pub fn whitespace(width: usize) -> Node {
    Node::leaf(NodeKind::Whitespace, " ".repeat(width))
}

pub fn line_break() -> Node {
    Node::leaf(NodeKind::LineBreak, "\n")
}

/// Raw embedded list item (`- text`).
pub fn hyphen_item(text: &str) -> Node {
    Node::new(NodeKind::EmbeddedListItemWithHyphen).with_children(inline(text))
}

/// Raw triple hyphen list paragraph (`--- text`).
pub fn triple_hyphen_item(text: &str) -> Node {
    Node::new(NodeKind::ParagraphAsListItemWithTripleHyphen).with_children(inline(text))
}

/// Kinds of the children of `node`, in order.
pub fn child_kinds(node: &Node) -> Vec<NodeKind> {
    node.child_nodes().iter().map(Node::kind).collect()
}

/// Asserts that `node`'s children have exactly `expected` kinds.
#[track_caller]
pub fn assert_child_kinds(node: &Node, expected: &[NodeKind]) {
    assert_eq!(
        child_kinds(node),
        expected,
        "unexpected children under {}",
        node.kind()
    );
}

/// Asserts that `actual` is the very same allocation as `expected`, not just equal to it.
#[track_caller]
pub fn assert_shared(actual: &Node, expected: &Node) {
    assert!(
        actual.same_node(expected),
        "expected a shared subtree, got a copy of {}",
        expected.kind()
    );
}
