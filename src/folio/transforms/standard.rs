//! Standard transform definitions
//!
//! Pre-built transforms for the default configuration, as `once_cell::sync::Lazy` statics.
//! They log nothing; use [`Pipeline`](crate::folio::pipeline::Pipeline) for configured,
//! logged compilation.

use once_cell::sync::Lazy;

use crate::folio::ast::Node;
use crate::folio::pipeline::{Compiled, Manuscript};
use crate::folio::transforms::stages::{
    EnhanceTags, InsertMandatoryWhitespace, RehierarchizeEmbeddedLists, RehierarchizeLevels,
    RehierarchizeLists, RemoveSeparators, ResolveDesignators, RestrictTags,
};
use crate::folio::transforms::Transform;

/// Type alias for the mangling transform
pub type ManglingTransform = Transform<Manuscript, Manuscript>;

/// Type alias for the full compilation transform
pub type CompileTransform = Transform<Node, Compiled>;

/// All mangling passes, in order, without tag restriction.
pub static MANGLING: Lazy<ManglingTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then(InsertMandatoryWhitespace::new())
        .then(RehierarchizeEmbeddedLists::new())
        .then(RemoveSeparators::new())
        .then(RehierarchizeLists::new())
        .then(RehierarchizeLevels::new())
        .then(EnhanceTags::new())
        .then(RestrictTags::unrestricted())
});

/// Raw parser tree to compiled document, with the canonical implicit renderer.
pub static COMPILE: Lazy<CompileTransform> = Lazy::new(|| {
    Transform::from_fn(|raw: Node| Ok(Manuscript::new(raw)))
        .then_transform(&MANGLING)
        .then(ResolveDesignators::new())
});
