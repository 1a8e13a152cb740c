//! Core module - traversal, checks, configuration and report output

pub mod config;
pub mod flatten;
pub mod lint;
pub mod node;
pub mod writer;

pub use config::{Config, ConfigError, PropertyMap, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
pub use flatten::{flatten, flatten_with, FlattenError, FlattenOptions, Flattened, RecordField, RowGap};
pub use lint::{lint, Finding, Severity};
pub use node::{BomNode, RowPath};
pub use writer::{write_report, WriteError};
