//! Locate snapshot files by assembly name under a working directory

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::loader::diagnostics::SnapshotError;

/// File name suffixes recognised as BOM snapshots
pub const SNAPSHOT_SUFFIXES: &[&str] = &[".bom.json", ".bom.yaml", ".bom.yml"];

/// Find the snapshot for `name` anywhere below `root`
///
/// Directories are walked depth-first in file-name order, so the result is
/// stable when several copies exist.
pub fn find_snapshot(root: &Path, name: &str) -> Result<PathBuf, SnapshotError> {
    let wanted: Vec<String> = SNAPSHOT_SUFFIXES
        .iter()
        .map(|suffix| format!("{}{}", name, suffix))
        .collect();

    let found = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .find(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|f| wanted.iter().any(|w| w == f))
        })
        .map(|e| e.into_path());

    match found {
        Some(path) => {
            tracing::debug!(name, path = %path.display(), "found BOM snapshot");
            Ok(path)
        }
        None => Err(SnapshotError::NotFound {
            name: name.to_string(),
            root: root.to_path_buf(),
        }),
    }
}

/// All snapshot files below `root`, in walk order
pub fn list_snapshots(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|f| SNAPSHOT_SUFFIXES.iter().any(|s| f.ends_with(s)))
        })
        .map(|e| e.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_snapshot_in_subdirectory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("Workspace/Assemblies/Suspension");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Suspension.bom.yaml"), "[]").unwrap();
        fs::write(tmp.path().join("Suspension.iam"), "").unwrap();

        let path = find_snapshot(tmp.path(), "Suspension").unwrap();
        assert_eq!(path, dir.join("Suspension.bom.yaml"));
    }

    #[test]
    fn test_find_snapshot_requires_exact_name() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Suspension_copy.bom.json"), "[]").unwrap();

        let result = find_snapshot(tmp.path(), "Suspension");
        assert!(matches!(result, Err(SnapshotError::NotFound { .. })));
    }

    #[test]
    fn test_list_snapshots_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.bom.json"), "[]").unwrap();
        fs::write(tmp.path().join("a.bom.yml"), "[]").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();

        let names: Vec<String> = list_snapshots(tmp.path())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.bom.yml", "b.bom.json"]);
    }
}
