//! Output and fixture formats
//!
//!     - `snapshot`: a serializable copy of a tree (and of a compiled document), written as
//!       JSON or YAML. Snapshots read back into nodes, so they double as fixtures.
//!     - `treeviz`: one line per node with box drawing connectors, for eyeballing trees.
//!     - `notation`: a compact s-expression notation, `(KIND "text" @line:col child*)`,
//!       used by `Debug` for nodes and for hand-written test trees.

pub mod notation;
pub mod snapshot;
pub mod treeviz;

pub use notation::{read_notation, write_notation, NotationError};
pub use snapshot::{CompiledSnapshot, SnapshotError, TreeSnapshot};
pub use treeviz::to_treeviz_str;
