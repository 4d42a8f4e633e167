//! Values flowing through the pipeline

use std::collections::BTreeMap;

use crate::folio::ast::Node;
use crate::folio::designator::{FragmentIdentifier, Problem, Resolution};
use crate::folio::tree::error::TreeResult;
use crate::folio::tree::Treepath;

/// A document between two mangling stages: the current tree revision and the problems
/// found so far.
#[derive(Debug, Clone)]
pub struct Manuscript {
    pub tree: Node,
    pub problems: Vec<Problem>,
}

impl Manuscript {
    pub fn new(tree: Node) -> Self {
        Manuscript {
            tree,
            problems: Vec::new(),
        }
    }

    pub fn root_path(&self) -> Treepath<Node> {
        Treepath::new(self.tree.clone())
    }

    /// Runs a path-level pass over the whole tree and keeps the rebuilt root.
    pub fn rewrite<F>(self, pass: F) -> TreeResult<Manuscript>
    where
        F: FnOnce(&Treepath<Node>) -> TreeResult<Treepath<Node>>,
    {
        let rewritten = pass(&self.root_path())?;
        Ok(Manuscript {
            tree: rewritten.tree_at_start().clone(),
            problems: self.problems,
        })
    }
}

/// A compiled document, handed over to renderers.
///
/// `pure` and `derived` address nodes of `tree`. `resolution` keeps the same maps as robust
/// paths, for callers that edit `tree` further and need to find the fragments again.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub tree: Node,
    pub resolution: Resolution,
    pub pure: BTreeMap<FragmentIdentifier, Treepath<Node>>,
    pub derived: BTreeMap<FragmentIdentifier, Treepath<Node>>,
    pub problems: Vec<Problem>,
}

impl Compiled {
    /// Fragment designated by `identifier`, pure identifiers first.
    pub fn fragment(&self, identifier: &FragmentIdentifier) -> Option<&Treepath<Node>> {
        self.pure
            .get(identifier)
            .or_else(|| self.derived.get(identifier))
    }

    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }
}

/// What stage logging reports about a stage value.
pub trait StageReport {
    fn node_count(&self) -> usize;
    fn problems(&self) -> &[Problem];
}

impl StageReport for Manuscript {
    fn node_count(&self) -> usize {
        self.tree.node_count()
    }

    fn problems(&self) -> &[Problem] {
        &self.problems
    }
}

impl StageReport for Compiled {
    fn node_count(&self) -> usize {
        self.tree.node_count()
    }

    fn problems(&self) -> &[Problem] {
        &self.problems
    }
}
