//! Books of several documents

use folio_config::FolioConfig;
use tracing::{debug, warn, Span};

use super::document::Compiled;
use crate::folio::ast::{Node, NodeKind};
use crate::folio::designator::collisions::resolve_collisions;
use crate::folio::designator::{IdentifierCollisions, IdentifierIndex, Problem};
use crate::folio::transforms::TransformError;
use crate::folio::tree::Treepath;

/// Compiled documents gathered under one `OPUS` root.
#[derive(Debug, Clone)]
pub struct Book {
    pub tree: Node,
    /// Link targets, read from the identifier markers of `tree`.
    pub index: IdentifierIndex,
    pub problems: Vec<Problem>,
    pub collisions: IdentifierCollisions,
}

pub struct Assembler {
    resolve_collisions: bool,
    span: Span,
}

impl Assembler {
    pub fn new() -> Self {
        Assembler {
            resolve_collisions: true,
            span: Span::none(),
        }
    }

    pub fn from_config(config: &FolioConfig) -> Self {
        Assembler {
            resolve_collisions: config.designators.resolve_collisions,
            ..Self::new()
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn assemble<I>(&self, documents: I) -> Result<Book, TransformError>
    where
        I: IntoIterator<Item = Compiled>,
    {
        let mut problems = Vec::new();
        let mut trees = Vec::new();
        for document in documents {
            problems.extend(document.problems);
            trees.push(document.tree);
        }
        let opus = Node::new(NodeKind::Opus).with_children(trees);
        debug!(
            parent: &self.span,
            documents = opus.child_nodes().len(),
            nodes = opus.node_count(),
            "assembling book"
        );

        let path = Treepath::new(opus);
        let (path, collisions) = if self.resolve_collisions {
            resolve_collisions(&path)
                .map_err(|e| TransformError::in_stage("ResolveCollisions", e))?
        } else {
            (path, IdentifierCollisions::default())
        };
        for identifier in collisions.explicit() {
            warn!(parent: &self.span, identifier = %identifier, "colliding explicit identifier");
        }
        for identifier in collisions.implicit() {
            debug!(parent: &self.span, identifier = %identifier, "dropped colliding implicit identifier");
        }

        let index = IdentifierIndex::scan(&path);
        Ok(Book {
            tree: path.tree_at_start().clone(),
            index,
            problems,
            collisions,
        })
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}
