//! Individual transformation stages
//!
//! Each stage implements [`Runnable`](super::Runnable). Mangling stages go from
//! [`Manuscript`](crate::folio::pipeline::Manuscript) to `Manuscript`; designator
//! resolution ends the chain with a [`Compiled`](crate::folio::pipeline::Compiled)
//! document. [`Logged`] wraps any of them with tracing events.

pub mod designators;
pub mod logging;
pub mod mangling;

pub use designators::ResolveDesignators;
pub use logging::Logged;
pub use mangling::{
    EnhanceTags, InsertMandatoryWhitespace, RehierarchizeEmbeddedLists, RehierarchizeLevels,
    RehierarchizeLists, RemoveSeparators, RestrictTags,
};
