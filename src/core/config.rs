//! Configuration loading
//!
//! Settings come from an optional `bomflat.yaml` in the working directory (or
//! a file given with `--config`). Missing keys fall back to defaults; command
//! line flags are applied on top by the commands themselves.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::entities::component::DESIGN_TRACKING;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "bomflat.yaml";

/// Report file name written when no output path is given
pub const DEFAULT_REPORT_FILE: &str = "bomRows.json";

/// Nesting limit applied when the config does not set one
pub const DEFAULT_MAX_DEPTH: usize = 48;

/// Largest accepted `max_depth`
///
/// Each row level is two levels of JSON/YAML nesting (the row and its
/// `child_rows` list), and the snapshot parsers stop at 128, so deeper
/// trees never reach the flattener.
pub const MAX_DEPTH_LIMIT: usize = 60;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    #[diagnostic(code(bomflat::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {message}")]
    #[diagnostic(
        code(bomflat::config::parse),
        help("expected top-level sections: properties, output, traversal")
    )]
    Parse { path: PathBuf, message: String },
}

/// Where part metadata lives on a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyMap {
    pub property_set: String,
    pub part_number: String,
    pub description: String,
    pub material: String,
}

impl Default for PropertyMap {
    fn default() -> Self {
        Self {
            property_set: DESIGN_TRACKING.to_string(),
            part_number: "Part Number".to_string(),
            description: "Description".to_string(),
            material: "Material".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report file name, relative to the working directory
    pub file_name: String,

    /// Indent the JSON report
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_REPORT_FILE.to_string(),
            pretty: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Deepest nesting level accepted before the tree is rejected
    pub max_depth: usize,

    /// Emit top-level rows only
    pub first_level_only: bool,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            first_level_only: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub properties: PropertyMap,
    pub output: OutputConfig,
    pub traversal: TraversalConfig,
}

impl Config {
    /// Load configuration for a working directory
    ///
    /// An explicit path must exist. Without one, `bomflat.yaml` in `work_dir`
    /// is used when present, otherwise defaults.
    pub fn load(work_dir: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => work_dir.join(p),
            None => {
                let candidate = work_dir.join(CONFIG_FILE);
                if !candidate.is_file() {
                    tracing::debug!(dir = %work_dir.display(), "no config file, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_yaml(&content, &path)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if !(1..=MAX_DEPTH_LIMIT).contains(&config.traversal.max_depth) {
            return Err(ConfigError::Parse {
                path: path.to_path_buf(),
                message: format!(
                    "traversal.max_depth must be between 1 and {}, got {}",
                    MAX_DEPTH_LIMIT, config.traversal.max_depth
                ),
            });
        }
        Ok(config)
    }
}
