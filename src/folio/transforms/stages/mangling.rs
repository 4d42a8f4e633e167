//! Mangling stages
//!
//! One stage per pass of [`crate::folio::mangling`], in pipeline order.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::logging::Named;
use crate::folio::designator::{CanonicalRenderer, ImplicitRenderer, Tag};
use crate::folio::mangling::{levels, lists, separators, tag_filter, tags};
use crate::folio::pipeline::Manuscript;
use crate::folio::transforms::{Runnable, TransformError};

/// Preserves whitespace written around apostrophes.
pub struct InsertMandatoryWhitespace;

impl InsertMandatoryWhitespace {
    pub fn new() -> Self {
        InsertMandatoryWhitespace
    }
}

impl Default for InsertMandatoryWhitespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Named for InsertMandatoryWhitespace {
    const NAME: &'static str = "InsertMandatoryWhitespace";
}

impl Runnable<Manuscript, Manuscript> for InsertMandatoryWhitespace {
    fn run(&self, input: Manuscript) -> Result<Manuscript, TransformError> {
        input
            .rewrite(separators::insert_mandatory_whitespace_near_apostrophe)
            .map_err(|e| TransformError::in_stage(Self::NAME, e))
    }
}

/// Nests raw hyphen items into embedded lists. Needs separators, so it runs before
/// [`RemoveSeparators`].
pub struct RehierarchizeEmbeddedLists;

impl RehierarchizeEmbeddedLists {
    pub fn new() -> Self {
        RehierarchizeEmbeddedLists
    }
}

impl Default for RehierarchizeEmbeddedLists {
    fn default() -> Self {
        Self::new()
    }
}

impl Named for RehierarchizeEmbeddedLists {
    const NAME: &'static str = "RehierarchizeEmbeddedLists";
}

impl Runnable<Manuscript, Manuscript> for RehierarchizeEmbeddedLists {
    fn run(&self, input: Manuscript) -> Result<Manuscript, TransformError> {
        input
            .rewrite(lists::rehierarchize_embedded_lists)
            .map_err(|e| TransformError::in_stage(Self::NAME, e))
    }
}

pub struct RemoveSeparators;

impl RemoveSeparators {
    pub fn new() -> Self {
        RemoveSeparators
    }
}

impl Default for RemoveSeparators {
    fn default() -> Self {
        Self::new()
    }
}

impl Named for RemoveSeparators {
    const NAME: &'static str = "RemoveSeparators";
}

impl Runnable<Manuscript, Manuscript> for RemoveSeparators {
    fn run(&self, input: Manuscript) -> Result<Manuscript, TransformError> {
        input
            .rewrite(separators::remove_separators)
            .map_err(|e| TransformError::in_stage(Self::NAME, e))
    }
}

/// Groups triple hyphen paragraphs into lists.
pub struct RehierarchizeLists;

impl RehierarchizeLists {
    pub fn new() -> Self {
        RehierarchizeLists
    }
}

impl Default for RehierarchizeLists {
    fn default() -> Self {
        Self::new()
    }
}

impl Named for RehierarchizeLists {
    const NAME: &'static str = "RehierarchizeLists";
}

impl Runnable<Manuscript, Manuscript> for RehierarchizeLists {
    fn run(&self, input: Manuscript) -> Result<Manuscript, TransformError> {
        input
            .rewrite(lists::rehierarchize_lists)
            .map_err(|e| TransformError::in_stage(Self::NAME, e))
    }
}

/// Nests levels by introducer depth. Depth violations become problems.
pub struct RehierarchizeLevels;

impl RehierarchizeLevels {
    pub fn new() -> Self {
        RehierarchizeLevels
    }
}

impl Default for RehierarchizeLevels {
    fn default() -> Self {
        Self::new()
    }
}

impl Named for RehierarchizeLevels {
    const NAME: &'static str = "RehierarchizeLevels";
}

impl Runnable<Manuscript, Manuscript> for RehierarchizeLevels {
    fn run(&self, input: Manuscript) -> Result<Manuscript, TransformError> {
        let (path, found) = levels::rehierarchize_levels(&input.root_path())
            .map_err(|e| TransformError::in_stage(Self::NAME, e))?;
        let mut problems = input.problems;
        problems.extend(found);
        Ok(Manuscript {
            tree: path.tree_at_start().clone(),
            problems,
        })
    }
}

/// Explicit and implicit tags.
pub struct EnhanceTags {
    renderer: Arc<dyn ImplicitRenderer>,
}

impl EnhanceTags {
    pub fn new() -> Self {
        Self::with_renderer(Arc::new(CanonicalRenderer))
    }

    pub fn with_renderer(renderer: Arc<dyn ImplicitRenderer>) -> Self {
        EnhanceTags { renderer }
    }
}

impl Default for EnhanceTags {
    fn default() -> Self {
        Self::new()
    }
}

impl Named for EnhanceTags {
    const NAME: &'static str = "EnhanceTags";
}

impl Runnable<Manuscript, Manuscript> for EnhanceTags {
    fn run(&self, input: Manuscript) -> Result<Manuscript, TransformError> {
        let renderer = self.renderer.as_ref();
        input
            .rewrite(|path| tags::enhance(path, renderer))
            .map_err(|e| TransformError::in_stage(Self::NAME, e))
    }
}

/// Keeps the fragments tagged with one of `restrict`, then promotes implicit tags that are
/// also used explicitly. Explicit tags are collected before filtering, so a tag used only
/// in a dropped fragment still promotes.
pub struct RestrictTags {
    restrict: BTreeSet<Tag>,
}

impl RestrictTags {
    pub fn new(restrict: BTreeSet<Tag>) -> Self {
        RestrictTags { restrict }
    }

    pub fn unrestricted() -> Self {
        Self::new(BTreeSet::new())
    }
}

impl Default for RestrictTags {
    fn default() -> Self {
        Self::unrestricted()
    }
}

impl Named for RestrictTags {
    const NAME: &'static str = "RestrictTags";
}

impl Runnable<Manuscript, Manuscript> for RestrictTags {
    fn run(&self, input: Manuscript) -> Result<Manuscript, TransformError> {
        let explicit = tags::find_explicit_tags(&input.tree);
        input
            .rewrite(|path| {
                let filtered = tag_filter::filter(path, &self.restrict);
                tags::promote(&filtered, &explicit)
            })
            .map_err(|e| TransformError::in_stage(Self::NAME, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folio::ast::{Node, NodeKind};
    use crate::folio::designator::tag::tag_set;
    use crate::folio::testing::{
        assert_child_kinds, introducer, line_break, novella, paragraph, tag, titled_level,
        whitespace, word,
    };
    use crate::folio::transforms::Transform;
    use crate::folio::tree::Tree;

    #[test]
    fn test_stages_chain() {
        let raw = novella([
            introducer(1, "Intro", []),
            line_break(),
            Node::new(NodeKind::ParagraphRegular).with_children([
                word("hello"),
                whitespace(1),
                word("world"),
            ]),
        ]);
        let transform = Transform::from_fn(Ok)
            .then(RemoveSeparators::new())
            .then(RehierarchizeLevels::new())
            .then(EnhanceTags::new());
        let output = transform.run(Manuscript::new(raw)).unwrap();

        let level = output.tree.child_at(0);
        assert_child_kinds(
            level,
            &[
                NodeKind::ImplicitTag,
                NodeKind::LevelTitle,
                NodeKind::ParagraphRegular,
            ],
        );
        assert!(output.problems.is_empty());
    }

    #[test]
    fn test_levels_stage_collects_problems() {
        let raw = novella([introducer(2, "Deep", []), introducer(1, "Shallow", [])]);
        let output = RehierarchizeLevels::new()
            .run(Manuscript::new(raw))
            .unwrap();
        assert_eq!(output.problems.len(), 1);
    }

    #[test]
    fn test_restrict_promotes_tags_of_dropped_fragments() {
        let manuscript = Manuscript::new(novella([
            titled_level("Alpha", [paragraph("kept").with_child(tag("keep"))]),
            titled_level("Beta", [tag("Alpha")]),
        ]));
        let manuscript = EnhanceTags::new().run(manuscript).unwrap();
        let output = RestrictTags::new(tag_set(["keep"])).run(manuscript).unwrap();

        assert_eq!(output.tree.child_count(), 1);
        let alpha = output.tree.child_at(0);
        assert_eq!(
            alpha.find_child(NodeKind::PromotedTag).and_then(Node::text),
            Some("Alpha")
        );
    }

    #[test]
    fn test_unrestricted_keeps_everything() {
        let manuscript = Manuscript::new(novella([paragraph("a"), paragraph("b")]));
        let output = RestrictTags::default().run(manuscript).unwrap();
        assert_eq!(output.tree.child_count(), 2);
    }
}
