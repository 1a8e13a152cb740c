//! Snapshot loading, discovery and error reporting

pub mod diagnostics;
pub mod discovery;
pub mod parser;

pub use diagnostics::{SnapshotError, SnapshotSyntaxError};
pub use discovery::{find_snapshot, list_snapshots, SNAPSHOT_SUFFIXES};
pub use parser::{load_snapshot, parse_snapshot, SnapshotFormat};
