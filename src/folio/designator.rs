//! Fragment identifiers
//!
//!     Renderers link to fragments of a document (levels, paragraphs) through fragment
//!     identifiers. There are two sources of identifiers:
//!
//!         - pure identifiers, authored explicitly as an `ABSOLUTE_IDENTIFIER` token under
//!           the fragment (`\Foo`),
//!         - derived identifiers, rendered from the title of a level by an
//!           [`ImplicitRenderer`].
//!
//!     [Resolution](resolution) walks the structured tree and builds both maps. Pure
//!     identifiers are a promise made by the author: the first definition wins and every
//!     later one is reported as a [`Problem`]. Derived identifiers are a convenience: a
//!     rendered title that occurs twice cannot designate anything, so every copy is
//!     dropped, silently.
//!
//!     [Enrichment](enrich) then writes the outcome back into the tree as marker nodes, and
//!     for a book of several documents [collisions](collisions) arbitrates markers that
//!     clash across documents. [`IdentifierIndex`] reads the markers back for link
//!     resolution.

pub mod collisions;
pub mod enrich;
pub mod fragment;
pub mod implicit;
pub mod index;
pub mod problem;
pub mod resolution;
pub mod tag;

pub use collisions::IdentifierCollisions;
pub use fragment::{FragmentIdentifier, FragmentIdentifierError};
pub use implicit::{CanonicalRenderer, ImplicitRenderer};
pub use index::IdentifierIndex;
pub use problem::Problem;
pub use resolution::{IdentifierDefinition, Resolution};
pub use tag::Tag;
