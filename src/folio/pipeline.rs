//! Document compilation
//!
//!     [`Pipeline`] compiles one raw document, as handed over by the parser, into a
//!     [`Compiled`] document: the normalized tree, the pure and derived identifier maps and
//!     every problem found on the way. Which passes run is read from a
//!     [`FolioConfig`]; the default configuration runs all of them:
//!
//!     ```text
//!     raw tree
//!       -> InsertMandatoryWhitespace    mangling.separators
//!       -> RehierarchizeEmbeddedLists   mangling.embedded_lists
//!       -> RemoveSeparators             mangling.separators
//!       -> RehierarchizeLists           mangling.lists
//!       -> RehierarchizeLevels          mangling.levels
//!       -> EnhanceTags                  mangling.tags
//!       -> RestrictTags                 tags.restrict
//!       -> ResolveDesignators           designators.enrich
//!     compiled document
//!     ```
//!
//!     [`Assembler`] then gathers compiled documents into a [`Book`], arbitrating identifier
//!     markers that collide across documents.
//!
//!     Logging goes to the span given with [`Pipeline::with_span`]. The pipeline never
//!     installs a subscriber.

mod assembler;
mod document;

pub use assembler::{Assembler, Book};
pub use document::{Compiled, Manuscript, StageReport};

use std::sync::Arc;

use folio_config::FolioConfig;
use tracing::{debug, Span};

use crate::folio::ast::Node;
use crate::folio::designator::tag::tag_set;
use crate::folio::designator::{CanonicalRenderer, FragmentIdentifier, ImplicitRenderer};
use crate::folio::transforms::stages::{
    EnhanceTags, InsertMandatoryWhitespace, Logged, RehierarchizeEmbeddedLists,
    RehierarchizeLevels, RehierarchizeLists, RemoveSeparators, ResolveDesignators, RestrictTags,
};
use crate::folio::transforms::{Transform, TransformError};

/// Configured compilation of single documents. Stateless: one pipeline can compile any
/// number of documents.
pub struct Pipeline {
    config: FolioConfig,
    renderer: Arc<dyn ImplicitRenderer>,
    span: Span,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::from_config(&FolioConfig::default())
    }

    pub fn from_config(config: &FolioConfig) -> Self {
        Pipeline {
            config: config.clone(),
            renderer: Arc::new(CanonicalRenderer),
            span: Span::none(),
        }
    }

    /// Replaces the renderer deriving implicit identifiers and tags from titles.
    pub fn with_renderer(mut self, renderer: Arc<dyn ImplicitRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Span every stage logs into.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    /// The configured stages, as one transform.
    pub fn transform(&self) -> Transform<Node, Compiled> {
        let mangling = &self.config.mangling;
        let span = &self.span;

        let restrict = tag_set(self.config.tags.restrict.iter().cloned());
        let mut resolve = ResolveDesignators::with_renderer(self.renderer.clone());
        if !self.config.designators.enrich {
            resolve = resolve.without_enrichment();
        }

        Transform::from_fn(|raw: Node| Ok(Manuscript::new(raw)))
            .then_if(
                mangling.separators,
                Logged::new(InsertMandatoryWhitespace::new(), span.clone()),
            )
            .then_if(
                mangling.embedded_lists,
                Logged::new(RehierarchizeEmbeddedLists::new(), span.clone()),
            )
            .then_if(
                mangling.separators,
                Logged::new(RemoveSeparators::new(), span.clone()),
            )
            .then_if(
                mangling.lists,
                Logged::new(RehierarchizeLists::new(), span.clone()),
            )
            .then_if(
                mangling.levels,
                Logged::new(RehierarchizeLevels::new(), span.clone()),
            )
            .then_if(
                mangling.tags,
                Logged::new(EnhanceTags::with_renderer(self.renderer.clone()), span.clone()),
            )
            .then(Logged::new(RestrictTags::new(restrict), span.clone()))
            .then(Logged::new(resolve, span.clone()))
    }

    /// Compiles one raw document.
    ///
    /// Content issues end up in [`Compiled::problems`]; an `Err` means a stage is defective.
    pub fn compile(&self, raw: Node) -> Result<Compiled, TransformError> {
        let compiled = self.transform().run(raw)?;
        debug!(
            parent: &self.span,
            pure = ?compiled.pure.keys().map(FragmentIdentifier::path).collect::<Vec<_>>(),
            derived = ?compiled.derived.keys().map(FragmentIdentifier::path).collect::<Vec<_>>(),
            problems = compiled.problems.len(),
            "document compiled"
        );
        Ok(compiled)
    }

    /// Compiles every document and assembles them into a book.
    pub fn compile_book<I>(&self, documents: I) -> Result<Book, TransformError>
    where
        I: IntoIterator<Item = Node>,
    {
        let compiled = documents
            .into_iter()
            .map(|raw| self.compile(raw))
            .collect::<Result<Vec<_>, _>>()?;
        Assembler::from_config(&self.config)
            .with_span(self.span.clone())
            .assemble(compiled)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
