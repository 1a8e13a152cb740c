//! Snapshot error types with source-annotated diagnostics

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

use crate::core::config::MAX_DEPTH_LIMIT;

const SNAPSHOT_HELP: &str =
    "a snapshot is a list of rows (or a mapping with `rows`); each row has item_number, quantity, component and child_rows";

/// A snapshot file that could not be parsed
#[derive(Debug, Error, Diagnostic)]
#[error("Invalid BOM snapshot {filename}: {message}")]
#[diagnostic(code(bomflat::snapshot::syntax))]
pub struct SnapshotSyntaxError {
    pub filename: String,
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: Option<String>,
}

impl SnapshotSyntaxError {
    /// Build from a JSON parse error
    pub fn from_json_error(err: &serde_json::Error, content: &str, filename: &str) -> Self {
        let span = offset_of(content, err.line(), err.column()).map(|o| SourceSpan::from((o, 1)));
        Self::new(err.to_string(), span, content, filename)
    }

    /// Build from a YAML parse error
    pub fn from_yaml_error(err: &serde_yml::Error, content: &str, filename: &str) -> Self {
        let span = err
            .location()
            .and_then(|loc| offset_of(content, loc.line(), loc.column()))
            .map(|o| SourceSpan::from((o, 1)));
        Self::new(err.to_string(), span, content, filename)
    }

    fn new(message: String, span: Option<SourceSpan>, content: &str, filename: &str) -> Self {
        let help = if message.contains("recursion limit exceeded") {
            format!(
                "rows are nested too deeply to read; snapshots may nest at most {} rows",
                MAX_DEPTH_LIMIT
            )
        } else {
            SNAPSHOT_HELP.to_string()
        };
        Self {
            filename: filename.to_string(),
            message,
            src: NamedSource::new(filename, content.to_string()),
            span,
            help: Some(help),
        }
    }
}

/// Byte offset of a 1-based line and column, clamped to the content
fn offset_of(content: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 || content.is_empty() {
        return None;
    }
    let mut offset = 0;
    for (i, text) in content.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            let col = column.saturating_sub(1).min(text.len().saturating_sub(1));
            return Some((offset + col).min(content.len().saturating_sub(1)));
        }
        offset += text.len();
    }
    Some(content.len().saturating_sub(1))
}

#[derive(Debug, Error, Diagnostic)]
pub enum SnapshotError {
    #[error("Failed to read BOM snapshot {path}: {source}")]
    #[diagnostic(code(bomflat::snapshot::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(SnapshotSyntaxError),

    #[error("No BOM snapshot named '{name}' found under {root}")]
    #[diagnostic(
        code(bomflat::snapshot::not_found),
        help("snapshot files are named <name>.bom.json, <name>.bom.yaml or <name>.bom.yml")
    )]
    NotFound { name: String, root: PathBuf },
}

impl From<SnapshotSyntaxError> for SnapshotError {
    fn from(err: SnapshotSyntaxError) -> Self {
        SnapshotError::Syntax(err)
    }
}
