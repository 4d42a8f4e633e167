//! The concrete document node

use std::fmt;
use std::sync::Arc;

use super::kind::{NodeKind, TagBehavior};
use super::location::Location;
use crate::folio::tree::Tree;

/// Immutable document node.
///
/// Built with [`Node::new`] and the consuming `with_*` builder functions:
///
/// ```text
/// Node::new(NodeKind::Level)
///     .with_location(Location::new(1, 1))
///     .with_child(Node::new(NodeKind::LevelTitle).with_child(word))
/// ```
///
/// Equality is structural (kind, text, location and children).
#[derive(Clone)]
pub struct Node(Arc<NodeData>);

#[derive(Clone, PartialEq)]
struct NodeData {
    kind: NodeKind,
    text: Option<String>,
    location: Option<Location>,
    children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Node(Arc::new(NodeData {
            kind,
            text: None,
            location: None,
            children: Vec::new(),
        }))
    }

    /// Shorthand for a leaf holding `text`.
    pub fn leaf(kind: NodeKind, text: impl Into<String>) -> Self {
        Node::new(kind).with_text(text)
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.rebuild(|data| data.text = Some(text.into()))
    }

    pub fn with_location(self, location: Location) -> Self {
        self.rebuild(|data| data.location = Some(location))
    }

    pub fn with_optional_location(self, location: Option<Location>) -> Self {
        self.rebuild(|data| data.location = location)
    }

    pub fn with_children(self, children: impl IntoIterator<Item = Node>) -> Self {
        self.rebuild(|data| data.children = children.into_iter().collect())
    }

    pub fn with_child(self, child: Node) -> Self {
        self.rebuild(|data| data.children.push(child))
    }

    pub fn with_children_appended(self, children: impl IntoIterator<Item = Node>) -> Self {
        self.rebuild(|data| data.children.extend(children))
    }

    /// Same node with another kind, keeping text, location and children.
    pub fn with_kind(&self, kind: NodeKind) -> Self {
        let mut data = (*self.0).clone();
        data.kind = kind;
        Node(Arc::new(data))
    }

    fn rebuild(self, change: impl FnOnce(&mut NodeData)) -> Self {
        let mut data = Arc::try_unwrap(self.0).unwrap_or_else(|shared| (*shared).clone());
        change(&mut data);
        Node(Arc::new(data))
    }

    pub fn kind(&self) -> NodeKind {
        self.0.kind
    }

    pub fn text(&self) -> Option<&str> {
        self.0.text.as_deref()
    }

    pub fn location(&self) -> Option<&Location> {
        self.0.location.as_ref()
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.0.children
    }

    pub fn is(&self, kind: NodeKind) -> bool {
        self.0.kind == kind
    }

    pub fn is_one_of(&self, kinds: &[NodeKind]) -> bool {
        kinds.contains(&self.0.kind)
    }

    pub fn tag_behavior(&self) -> TagBehavior {
        self.0.kind.tag_behavior()
    }

    /// Index of the first child of `kind`.
    pub fn position_of(&self, kind: NodeKind) -> Option<usize> {
        self.0.children.iter().position(|child| child.is(kind))
    }

    pub fn find_child(&self, kind: NodeKind) -> Option<&Node> {
        self.0.children.iter().find(|child| child.is(kind))
    }

    /// Number of nodes in this subtree, this one included.
    pub fn node_count(&self) -> usize {
        1 + self
            .0
            .children
            .iter()
            .map(Node::node_count)
            .sum::<usize>()
    }
}

/// Nodes that may carry a fragment identifier: every kind that is not
/// [`TagBehavior::NonTraversable`]. Also the skeleton filter for robust paths.
pub fn is_identifier_bearing(node: &Node) -> bool {
    node.tag_behavior() != TagBehavior::NonTraversable
}

impl Tree for Node {
    fn child_count(&self) -> usize {
        self.0.children.len()
    }

    fn child_at(&self, index: usize) -> &Self {
        match self.0.children.get(index) {
            Some(child) => child,
            None => panic!(
                "Unsupported index: {} (child count: {})",
                index,
                self.0.children.len()
            ),
        }
    }

    fn adopt(&self, children: Vec<Self>) -> Self {
        Node(Arc::new(NodeData {
            kind: self.0.kind,
            text: self.0.text.clone(),
            location: self.0.location.clone(),
            children,
        }))
    }

    fn same_node(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::folio::formats::notation::write_notation(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Node {
        Node::leaf(NodeKind::Word, text)
    }

    #[test]
    fn test_builder() {
        let node = Node::new(NodeKind::ParagraphRegular)
            .with_location(Location::new(2, 1))
            .with_child(word("hello"))
            .with_child(word("world"));

        assert_eq!(node.kind(), NodeKind::ParagraphRegular);
        assert_eq!(node.text(), None);
        assert_eq!(node.location(), Some(&Location::new(2, 1)));
        assert_eq!(node.child_count(), 2);
        assert_eq!(node.child_at(1).text(), Some("world"));
        assert_eq!(node.node_count(), 3);
    }

    #[test]
    fn test_adopt_keeps_payload() {
        let node = Node::leaf(NodeKind::Level, "x").with_location(Location::new(1, 1));
        let adopted = node.adopt(vec![word("a")]);
        assert_eq!(adopted.kind(), NodeKind::Level);
        assert_eq!(adopted.text(), Some("x"));
        assert_eq!(adopted.location(), node.location());
        assert_eq!(adopted.child_count(), 1);
        assert_eq!(node.child_count(), 0);
    }

    #[test]
    fn test_structural_equality_and_identity() {
        let first = Node::new(NodeKind::Novella).with_child(word("a"));
        let second = Node::new(NodeKind::Novella).with_child(word("a"));
        assert_eq!(first, second);
        assert!(!first.same_node(&second));
        assert!(first.same_node(&first.clone()));
    }

    #[test]
    fn test_with_kind() {
        let tag = Node::leaf(NodeKind::ExplicitIdentifier, "\\\\Foo");
        let colliding = tag.with_kind(NodeKind::CollidingExplicitIdentifier);
        assert_eq!(colliding.kind(), NodeKind::CollidingExplicitIdentifier);
        assert_eq!(colliding.text(), Some("\\\\Foo"));
    }

    #[test]
    #[should_panic(expected = "Unsupported index: 1 (child count: 0)")]
    fn test_child_at_out_of_range() {
        word("lonely").child_at(1);
    }

    #[test]
    fn test_identifier_bearing() {
        assert!(is_identifier_bearing(&Node::new(NodeKind::Level)));
        assert!(is_identifier_bearing(&Node::new(NodeKind::ParagraphRegular)));
        assert!(!is_identifier_bearing(&word("a")));
        assert!(!is_identifier_bearing(&Node::new(
            NodeKind::ExplicitIdentifier
        )));
    }
}
