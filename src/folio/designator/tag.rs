//! Tags

use std::collections::BTreeSet;
use std::fmt;

use crate::folio::ast::{Node, NodeKind};

/// A non-empty tag name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    /// `None` for a blank name.
    pub fn new(name: impl Into<String>) -> Option<Tag> {
        let name = name.into();
        if name.trim().is_empty() {
            None
        } else {
            Some(Tag(name))
        }
    }

    /// Tag named by the text of a tag node.
    pub fn from_node(node: &Node) -> Option<Tag> {
        node.text().and_then(Tag::new)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn to_node(&self, kind: NodeKind) -> Node {
        Node::leaf(kind, self.0.clone())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag set from names, skipping blank ones.
pub fn tag_set<I, S>(names: I) -> BTreeSet<Tag>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().filter_map(Tag::new).collect()
}

/// Tag nodes of `kind`, in tag order.
pub fn to_nodes(kind: NodeKind, tags: &BTreeSet<Tag>) -> Vec<Node> {
    tags.iter().map(|tag| tag.to_node(kind)).collect()
}
