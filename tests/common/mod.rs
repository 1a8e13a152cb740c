//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Snapshot matching the worked example: a bolt, and a bracket with a screw
pub const SAMPLE_SNAPSHOT: &str = r#"
assembly: Suspension.iam
view: structured
rows:
  - item_number: 1
    quantity: 2
    component:
      property_sets:
        Design Tracking Properties:
          Part Number: A1
          Description: Bolt
          Material: Steel
  - item_number: 2
    quantity: 1
    component:
      property_sets:
        Design Tracking Properties:
          Part Number: B1
          Description: Bracket
          Material: Aluminum
    child_rows:
      - item_number: 1
        quantity: 4
        component:
          property_sets:
            Design Tracking Properties:
              Part Number: C1
              Description: Screw
              Material: Steel
"#;

/// Expected compact report for SAMPLE_SNAPSHOT
pub const SAMPLE_REPORT: &str = r#"[{"row_number":1,"part_number":"A1","quantity":2,"description":"Bolt","material":"Steel"},{"row_number":2,"part_number":"B1","quantity":1,"description":"Bracket","material":"Aluminum"},{"row_number":1,"part_number":"C1","quantity":4,"description":"Screw","material":"Steel"}]"#;

/// JSON snapshot holding a single chain of rows `depth` levels deep
pub fn nested_snapshot(depth: usize) -> String {
    let mut row = String::from(r#"{"item_number":1,"quantity":1}"#);
    for _ in 1..depth {
        row = format!(r#"{{"item_number":1,"quantity":1,"child_rows":[{}]}}"#, row);
    }
    format!("[{}]", row)
}

/// Helper to get a bomflat command that ignores the caller's environment
pub fn bomflat() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("bomflat"));
    cmd.env_remove("BOMFLAT_WORK_DIR").env_remove("BOMFLAT_LOG");
    cmd
}

/// Helper to create an empty working directory
pub fn setup_work_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Helper to write a snapshot file relative to the working directory
pub fn write_snapshot(tmp: &TempDir, rel_path: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Helper to read the default report from a working directory
pub fn read_report(tmp: &TempDir) -> String {
    fs::read_to_string(tmp.path().join("bomRows.json")).unwrap()
}
