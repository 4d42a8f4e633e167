//! Designator resolution
//!
//!     Depth-first, pre-order walk over identifier-bearing nodes. For each node the
//!     identifier definition is read from its immediate children:
//!
//!         - `ABSOLUTE_IDENTIFIER` child: pure identifier. The first occurrence is kept, every
//!           later one yields an "Already defined" problem at the later node.
//!         - `RELATIVE_IDENTIFIER` child: no entry, relative identifiers are composed later.
//!         - `LEVEL_TITLE` child rendering to something: derived identifier. A rendering
//!           produced more than once is dropped entirely, without a problem.
//!         - otherwise nothing.
//!
//!     The walk then recurses into every child of the node, whatever its outcome.
//!     Non-bearing children end the recursion right away, so identifiers are only found on
//!     nodes whose whole ancestry is bearing. Recorded positions are [`RobustPath`]s over the
//!     bearing skeleton so they survive later edits of inline content.

use std::collections::{BTreeMap, BTreeSet};

use super::fragment::FragmentIdentifier;
use super::implicit::ImplicitRenderer;
use super::problem::Problem;
use crate::folio::ast::{is_identifier_bearing, Node, NodeKind};
use crate::folio::tree::error::TreeResult;
use crate::folio::tree::{RobustPath, Tree, Treepath};

/// How a node defines its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierDefinition {
    None,
    Absolute(String),
    Relative(String),
    Implicit(String),
}

impl IdentifierDefinition {
    pub fn of(node: &Node, renderer: &dyn ImplicitRenderer) -> IdentifierDefinition {
        if let Some(token) = node.find_child(NodeKind::AbsoluteIdentifier) {
            return match segment_of(token) {
                Some(segment) => IdentifierDefinition::Absolute(segment),
                None => IdentifierDefinition::None,
            };
        }
        if let Some(token) = node.find_child(NodeKind::RelativeIdentifier) {
            return match segment_of(token) {
                Some(segment) => IdentifierDefinition::Relative(segment),
                None => IdentifierDefinition::None,
            };
        }
        match node.find_child(NodeKind::LevelTitle) {
            Some(title) => match renderer.render(title) {
                Some(rendered) if !rendered.trim().is_empty() => {
                    IdentifierDefinition::Implicit(rendered)
                }
                _ => IdentifierDefinition::None,
            },
            None => IdentifierDefinition::None,
        }
    }
}

/// Authored identifier tokens may carry their leading backslashes.
fn segment_of(token: &Node) -> Option<String> {
    let segment = token.text()?.trim().trim_start_matches('\\');
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}

/// Outcome of designator resolution over one document.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pure: BTreeMap<FragmentIdentifier, RobustPath<Node>>,
    derived: BTreeMap<FragmentIdentifier, RobustPath<Node>>,
    problems: Vec<Problem>,
}

#[derive(Default)]
struct Collector {
    pure: BTreeMap<FragmentIdentifier, RobustPath<Node>>,
    derived: BTreeMap<FragmentIdentifier, RobustPath<Node>>,
    duplicate_derived: BTreeSet<FragmentIdentifier>,
    problems: Vec<Problem>,
}

impl Resolution {
    /// Resolves the document `path` points into, starting at `path`'s end node.
    ///
    /// Errors only come from robust path construction, which cannot fail on a walk that
    /// stays on bearing nodes: an `Err` is a defect.
    pub fn resolve(path: &Treepath<Node>, renderer: &dyn ImplicitRenderer) -> TreeResult<Self> {
        let mut collector = Collector::default();
        process(&mut collector, path, renderer)?;

        let Collector {
            pure,
            mut derived,
            duplicate_derived,
            problems,
        } = collector;
        for duplicate in &duplicate_derived {
            derived.remove(duplicate);
        }
        Ok(Resolution {
            pure,
            derived,
            problems,
        })
    }

    pub fn pure(&self) -> &BTreeMap<FragmentIdentifier, RobustPath<Node>> {
        &self.pure
    }

    pub fn derived(&self) -> &BTreeMap<FragmentIdentifier, RobustPath<Node>> {
        &self.derived
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn has_problem(&self) -> bool {
        !self.problems.is_empty()
    }

    /// Applies both maps to `root`, a later revision with the same bearing skeleton.
    pub fn apply(
        &self,
        root: &Node,
    ) -> TreeResult<(
        BTreeMap<FragmentIdentifier, Treepath<Node>>,
        BTreeMap<FragmentIdentifier, Treepath<Node>>,
    )> {
        Ok((apply_all(&self.pure, root)?, apply_all(&self.derived, root)?))
    }
}

fn apply_all(
    map: &BTreeMap<FragmentIdentifier, RobustPath<Node>>,
    root: &Node,
) -> TreeResult<BTreeMap<FragmentIdentifier, Treepath<Node>>> {
    map.iter()
        .map(|(identifier, robust)| Ok((identifier.clone(), robust.apply(root)?)))
        .collect()
}

fn process(
    collector: &mut Collector,
    path: &Treepath<Node>,
    renderer: &dyn ImplicitRenderer,
) -> TreeResult<()> {
    let node = path.tree_at_end();
    if !is_identifier_bearing(node) {
        return Ok(());
    }

    match IdentifierDefinition::of(node, renderer) {
        IdentifierDefinition::Absolute(segment) => {
            if let Ok(identifier) = FragmentIdentifier::new(segment) {
                if collector.pure.contains_key(&identifier) {
                    collector.problems.push(Problem::on(
                        format!("Already defined: '{}'", identifier.path()),
                        node,
                    ));
                } else {
                    let robust = RobustPath::create_with_filter(path, is_identifier_bearing)?;
                    collector.pure.insert(identifier, robust);
                }
            }
        }
        IdentifierDefinition::Implicit(segment) => {
            if let Ok(identifier) = FragmentIdentifier::new(segment) {
                if collector.derived.contains_key(&identifier) {
                    collector.duplicate_derived.insert(identifier);
                } else {
                    let robust = RobustPath::create_with_filter(path, is_identifier_bearing)?;
                    collector.derived.insert(identifier, robust);
                }
            }
        }
        IdentifierDefinition::Relative(_) | IdentifierDefinition::None => {}
    }

    for index in 0..node.child_count() {
        process(collector, &path.child(index), renderer)?;
    }
    Ok(())
}
