//! Document problems

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::folio::ast::{Location, Node};

/// Issue found in the document content. Problems are collected and returned, never raised:
/// compilation always continues and yields a best-effort tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Problem {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    pub fn at(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            location: Some(location),
        }
    }

    /// Problem located at `node`, when the node has a location.
    pub fn on(message: impl Into<String>, node: &Node) -> Self {
        Self {
            message: message.into(),
            location: node.location().cloned(),
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} @ {}", self.message, location),
            None => write!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folio::ast::NodeKind;

    #[test]
    fn test_display() {
        assert_eq!(Problem::new("oops").to_string(), "oops");
        assert_eq!(
            Problem::at("oops", Location::new(4, 2)).to_string(),
            "oops @ 4:2"
        );
    }

    #[test]
    fn test_on_node_takes_location() {
        let node = Node::new(NodeKind::Level).with_location(Location::new(9, 1));
        assert_eq!(Problem::on("x", &node).location, Some(Location::new(9, 1)));
        assert_eq!(Problem::on("x", &Node::new(NodeKind::Level)).location, None);
    }
}
