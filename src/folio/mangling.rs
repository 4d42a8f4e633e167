//! Tree mangling
//!
//!     The parser produces a tree that mirrors the source text closely: separators are
//!     nodes, a level is a flat introducer followed by the paragraphs that belong to it, list
//!     items are plain siblings. Mangling passes rewrite that raw tree, one concern at a
//!     time, into the structured form renderers and designator resolution work on.
//!
//!     Pass order matters:
//!
//!         1. [separators::insert_mandatory_whitespace_near_apostrophe]
//!         2. [lists::rehierarchize_embedded_lists], needs whitespace for indentation
//!         3. [separators::remove_separators]
//!         4. [lists::rehierarchize_lists], needs list paragraphs to be adjacent
//!         5. [levels::rehierarchize_levels]
//!         6. [tags::enhance]
//!         7. [tag_filter::filter] and [tags::promote]
//!
//!     Every pass takes a [`Treepath`](crate::folio::tree::Treepath) and returns a treepath
//!     to the same logical position in the rewritten tree. Subtrees a pass leaves alone are
//!     shared with its input.

pub mod levels;
pub mod lists;
pub mod separators;
pub mod tag_filter;
pub mod tags;
