//! Snapshot parsing from JSON or YAML

use std::path::Path;

use crate::entities::snapshot::BomSnapshot;
use crate::loader::diagnostics::{SnapshotError, SnapshotSyntaxError};

/// Encoding of a snapshot file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(SnapshotFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Some(SnapshotFormat::Yaml)
            }
            _ => None,
        }
    }
}

/// Parse snapshot text in a known format
pub fn parse_snapshot(
    content: &str,
    format: SnapshotFormat,
    filename: &str,
) -> Result<BomSnapshot, SnapshotSyntaxError> {
    match format {
        SnapshotFormat::Json => serde_json::from_str(content)
            .map_err(|e| SnapshotSyntaxError::from_json_error(&e, content, filename)),
        SnapshotFormat::Yaml => serde_yml::from_str(content)
            .map_err(|e| SnapshotSyntaxError::from_yaml_error(&e, content, filename)),
    }
}

/// Load a snapshot file
///
/// Files without a recognised extension are tried as JSON first, then YAML.
pub fn load_snapshot(path: &Path) -> Result<BomSnapshot, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let filename = path.display().to_string();

    let snapshot = match SnapshotFormat::from_path(path) {
        Some(format) => parse_snapshot(&content, format, &filename)?,
        None => parse_snapshot(&content, SnapshotFormat::Json, &filename)
            .or_else(|_| parse_snapshot(&content, SnapshotFormat::Yaml, &filename))?,
    };

    tracing::info!(
        path = %filename,
        assembly = snapshot.assembly.as_deref().unwrap_or("-"),
        view = %snapshot.view,
        rows = snapshot.row_count(),
        "loaded BOM snapshot"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::row::Quantity;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            SnapshotFormat::from_path(Path::new("a.bom.json")),
            Some(SnapshotFormat::Json)
        );
        assert_eq!(
            SnapshotFormat::from_path(Path::new("a.bom.YML")),
            Some(SnapshotFormat::Yaml)
        );
        assert_eq!(SnapshotFormat::from_path(Path::new("a.txt")), None);
    }

    #[test]
    fn test_parse_yaml_snapshot() {
        let yaml = r#"
rows:
  - item_number: 1
    quantity: 2.5
    component:
      property_sets:
        Design Tracking Properties:
          Part Number: T-100
"#;
        let snapshot = parse_snapshot(yaml, SnapshotFormat::Yaml, "t.bom.yaml").unwrap();
        assert_eq!(snapshot.rows[0].quantity, Quantity::Measure(2.5));
        assert!(snapshot.rows[0].component.is_some());
    }

    #[test]
    fn test_parse_invalid_json_returns_error() {
        let result = parse_snapshot("[{\"item_number\": \"x\"}]", SnapshotFormat::Json, "t.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_unknown_extension_falls_back_to_yaml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("export.txt");
        std::fs::write(&path, "- item_number: 1\n  quantity: 3\n").unwrap();

        let snapshot = load_snapshot(&path).unwrap();
        assert_eq!(snapshot.rows.len(), 1);
        assert_eq!(snapshot.rows[0].quantity, Quantity::Count(3));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_snapshot(&tmp.path().join("nope.bom.json"));
        assert!(matches!(result, Err(SnapshotError::Io { .. })));
    }
}
