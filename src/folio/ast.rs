//! Document tree model
//!
//!     A document is a tree of [`Node`]s. Every node carries a [`NodeKind`] from a closed
//!     enumeration, an ordered list of children, an optional text payload and an optional
//!     source [`Location`]. Nodes are immutable and cheap to clone: a node is a reference
//!     counted handle, so subtrees are freely shared between revisions of a document.
//!
//! Raw and structured kinds
//!
//!     The parser hands over a flat, raw tree: level introducers followed by paragraphs,
//!     hyphen list items as siblings, whitespace and line breaks still present. The mangling
//!     passes (see [mangling](crate::folio::mangling)) rewrite it into its structured form.
//!     Kinds that only exist in the raw tree and the synthetic kinds that only the passes
//!     create live side by side in [`NodeKind`]:
//!
//!         - raw only: `LEVEL_INTRODUCER`, `PARAGRAPH_AS_LIST_ITEM_WITH_TRIPLE_HYPHEN`,
//!           `EMBEDDED_LIST_ITEM_WITH_HYPHEN`, `WHITESPACE`, `LINE_BREAK`, `TAG`.
//!         - synthetic: `LEVEL`, `LIST_WITH_TRIPLE_HYPHEN`, `EMBEDDED_LIST_WITH_HYPHEN`,
//!           identifier markers, tag markers, `PRESERVED_WHITESPACE`.
//!
//! Tag behavior
//!
//!     Each kind declares how it takes part in tagging and identification through its
//!     [`TagBehavior`]. Kinds that are not `NON_TRAVERSABLE` form the structural skeleton of
//!     the document: they are the nodes that may carry an identifier, and the skeleton
//!     robust paths are computed against. See [`is_identifier_bearing`].

mod kind;
mod location;
mod node;

pub use kind::{NodeKind, TagBehavior};
pub use location::Location;
pub use node::{is_identifier_bearing, Node};
