//! Designator resolution stage

use std::sync::Arc;

use super::logging::Named;
use crate::folio::designator::enrich::{enrich, Enriched};
use crate::folio::designator::{CanonicalRenderer, ImplicitRenderer, Resolution};
use crate::folio::pipeline::{Compiled, Manuscript};
use crate::folio::transforms::{Runnable, TransformError};

/// Resolves fragment identifiers over the final tree and, when enabled, writes them back
/// as marker nodes.
pub struct ResolveDesignators {
    renderer: Arc<dyn ImplicitRenderer>,
    enrich: bool,
}

impl ResolveDesignators {
    pub fn new() -> Self {
        Self::with_renderer(Arc::new(CanonicalRenderer))
    }

    pub fn with_renderer(renderer: Arc<dyn ImplicitRenderer>) -> Self {
        ResolveDesignators {
            renderer,
            enrich: true,
        }
    }

    /// Keeps authored identifier tokens instead of replacing them with markers.
    pub fn without_enrichment(mut self) -> Self {
        self.enrich = false;
        self
    }
}

impl Default for ResolveDesignators {
    fn default() -> Self {
        Self::new()
    }
}

impl Named for ResolveDesignators {
    const NAME: &'static str = "ResolveDesignators";
}

impl Runnable<Manuscript, Compiled> for ResolveDesignators {
    fn run(&self, input: Manuscript) -> Result<Compiled, TransformError> {
        let in_stage = |e| TransformError::in_stage(Self::NAME, e);

        let resolution =
            Resolution::resolve(&input.root_path(), self.renderer.as_ref()).map_err(in_stage)?;
        let Enriched {
            tree,
            pure,
            derived,
        } = if self.enrich {
            enrich(&input.tree, &resolution).map_err(in_stage)?
        } else {
            let (pure, derived) = resolution.apply(&input.tree).map_err(in_stage)?;
            Enriched {
                tree: input.tree,
                pure,
                derived,
            }
        };

        let mut problems = input.problems;
        problems.extend_from_slice(resolution.problems());
        Ok(Compiled {
            tree,
            resolution,
            pure,
            derived,
            problems,
        })
    }
}
