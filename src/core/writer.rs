//! Report output - atomic JSON file writes

use miette::Diagnostic;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::entities::record::{BomReport, ReportError};

#[derive(Debug, Error, Diagnostic)]
pub enum WriteError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Report(#[from] ReportError),

    #[error("Failed to write report to {path}: {source}")]
    #[diagnostic(code(bomflat::write::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write a report as JSON
///
/// The report is encoded before the destination is touched, then written to
/// a temporary file beside it and renamed into place. A failed write leaves
/// no file at `path`.
pub fn write_report(report: &BomReport, path: &Path, pretty: bool) -> Result<PathBuf, WriteError> {
    let json = if pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let io_err = |source: std::io::Error| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(&dir).map_err(io_err)?;
    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(io_err)?;
    tmp.write_all(json.as_bytes()).map_err(io_err)?;
    tmp.flush().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    tracing::info!(path = %path.display(), records = report.len(), "wrote BOM report");
    log_directory(&dir);
    Ok(path.to_path_buf())
}

/// Debug listing of the directory a report was written to
fn log_directory(dir: &Path) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "could not list output directory");
            return;
        }
    };

    let mut names: Vec<(bool, String)> = entries
        .filter_map(|e| e.ok())
        .map(|e| {
            let is_dir = e.file_type().map(|t| t.is_dir()).unwrap_or(false);
            (is_dir, e.file_name().to_string_lossy().into_owned())
        })
        .collect();
    names.sort();

    for (is_dir, name) in names {
        let kind = if is_dir { "dir" } else { "file" };
        tracing::debug!(dir = %dir.display(), kind, name = %name, "output directory entry");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::record::BomRecord;
    use crate::entities::row::Quantity;
    use tempfile::TempDir;

    fn report_with(quantity: Quantity) -> BomReport {
        BomReport::from(vec![BomRecord {
            row_number: 1,
            part_number: "A1".to_string(),
            quantity,
            description: "Bolt".to_string(),
            material: "Steel".to_string(),
        }])
    }

    #[test]
    fn test_write_report_creates_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bomRows.json");

        write_report(&report_with(Quantity::Count(2)), &path, false).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            r#"[{"row_number":1,"part_number":"A1","quantity":2,"description":"Bolt","material":"Steel"}]"#
        );
    }

    #[test]
    fn test_write_report_creates_missing_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out/nested/bom.json");

        write_report(&report_with(Quantity::Count(1)), &path, true).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_non_finite_quantity_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bomRows.json");

        let result = write_report(&report_with(Quantity::Measure(f64::INFINITY)), &path, false);
        assert!(matches!(
            result,
            Err(WriteError::Report(ReportError::NonFiniteQuantity { .. }))
        ));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_existing_file_is_replaced() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bomRows.json");
        std::fs::write(&path, "stale").unwrap();

        write_report(&BomReport::new(), &path, false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
