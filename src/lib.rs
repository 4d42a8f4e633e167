//! # folio
//!
//! Compiles the raw tree of a structured-text document into its normalized form and resolves
//! the fragment identifiers renderers use for cross references.
//!
//! Layout
//!
//! src/folio
//!   ├── tree         Persistent trees, treepaths, traversals and robust paths
//!   ├── ast          The concrete document node and its kinds
//!   ├── mangling     Rewrite passes turning the raw tree into its structured form
//!   ├── designator   Fragment identifiers: resolution, enrichment, collisions
//!   ├── transforms   Stage composition
//!   ├── pipeline     One document in, one compiled document out; book assembly
//!   ├── formats      Snapshots, treeviz and the tree notation
//!   └── testing      Factories and assertions for tests
//!
//! Errors come in two tiers. A malformed path operation is a defect in a pass: it panics
//! (out-of-range child index) or surfaces as an `Err`. Problems in the document content are
//! never errors: they are collected as [`Problem`](folio::designator::Problem) values and
//! returned alongside a best-effort tree.

pub mod folio;
