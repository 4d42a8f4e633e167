//! Tree snapshots
//!
//! A normalized, serializable copy of a tree. Serializers (JSON, YAML, treeviz) consume a
//! snapshot instead of walking nodes themselves.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::folio::ast::{Location, Node, NodeKind};
use crate::folio::designator::{FragmentIdentifier, Problem};
use crate::folio::pipeline::Compiled;
use crate::folio::tree::Treepath;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A snapshot of a node and all its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeSnapshot>,
}

impl TreeSnapshot {
    pub fn of(node: &Node) -> Self {
        TreeSnapshot {
            kind: node.kind(),
            text: node.text().map(str::to_string),
            location: node.location().cloned(),
            children: node.child_nodes().iter().map(TreeSnapshot::of).collect(),
        }
    }

    /// Rebuilds the node tree.
    pub fn to_node(&self) -> Node {
        let mut node = Node::new(self.kind)
            .with_optional_location(self.location.clone())
            .with_children(self.children.iter().map(TreeSnapshot::to_node));
        if let Some(text) = &self.text {
            node = node.with_text(text.clone());
        }
        node
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String, SnapshotError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_json(source: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_yaml(source: &str) -> Result<Self, SnapshotError> {
        Ok(serde_yaml::from_str(source)?)
    }
}

/// Report of a compiled document: its tree, where each identifier points (as child indices
/// from the root) and its problems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledSnapshot {
    pub tree: TreeSnapshot,
    pub pure: BTreeMap<String, Vec<usize>>,
    pub derived: BTreeMap<String, Vec<usize>>,
    pub problems: Vec<Problem>,
}

impl CompiledSnapshot {
    pub fn of(compiled: &Compiled) -> Self {
        CompiledSnapshot {
            tree: TreeSnapshot::of(&compiled.tree),
            pure: positions(&compiled.pure),
            derived: positions(&compiled.derived),
            problems: compiled.problems.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String, SnapshotError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn positions(
    map: &BTreeMap<FragmentIdentifier, Treepath<Node>>,
) -> BTreeMap<String, Vec<usize>> {
    map.iter()
        .map(|(identifier, path)| (identifier.to_string(), path.indices_in_parent()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folio::pipeline::Pipeline;
    use crate::folio::testing::{absolute, novella, paragraph, titled_level};

    #[test]
    fn test_json_shape() {
        let node = novella([paragraph("Hi").with_location(Location::new(1, 1))]);
        let json = TreeSnapshot::of(&node).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "NOVELLA");
        assert_eq!(value["children"][0]["kind"], "PARAGRAPH_REGULAR");
        assert_eq!(value["children"][0]["location"]["line"], 1);
        assert_eq!(value["children"][0]["children"][0]["text"], "Hi");
        assert!(value.get("text").is_none());
    }

    #[test]
    fn test_yaml_fixture_reads_back() {
        let yaml = "
kind: NOVELLA
children:
  - kind: LEVEL
    children:
      - kind: LEVEL_TITLE
        children:
          - kind: WORD
            text: Intro
";
        let node = TreeSnapshot::from_yaml(yaml).unwrap().to_node();
        assert_eq!(node, novella([titled_level("Intro", [])]));
    }

    #[test]
    fn test_compiled_report() {
        let compiled = Pipeline::new()
            .compile(novella([
                titled_level("First", [absolute("Foo")]),
                titled_level("Second", [absolute("Foo")]),
            ]))
            .unwrap();
        let report = CompiledSnapshot::of(&compiled);
        assert_eq!(report.pure["\\Foo"], vec![0]);
        assert_eq!(report.problems.len(), 1);

        let json = report.to_json().unwrap();
        assert!(json.contains("Already defined: 'Foo'"));
        assert!(report.to_yaml().unwrap().contains("derived:"));
    }
}
