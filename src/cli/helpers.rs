//! Shared helper functions for CLI commands
//!
//! Working directory and config resolution, snapshot selection and small
//! formatting utilities used by more than one command.

use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

use crate::cli::args::{GlobalOpts, InputArgs, TraversalArgs};
use crate::core::config::{Config, MAX_DEPTH_LIMIT};
use crate::core::flatten::FlattenOptions;
use crate::entities::snapshot::BomSnapshot;
use crate::loader::{find_snapshot, load_snapshot};

/// Working directory plus the configuration loaded for it
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: Config,
}

impl Workspace {
    /// Resolve the working directory and load its config
    pub fn open(global: &GlobalOpts) -> Result<Self> {
        let root = match &global.work_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().into_diagnostic()?,
        };
        if !root.is_dir() {
            return Err(miette::miette!(
                "Working directory does not exist: {}",
                root.display()
            ));
        }

        let config = Config::load(&root, global.config.as_deref())?;
        Ok(Self { root, config })
    }

    /// Interpret `path` relative to the working directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Path of the snapshot selected by the command line
    pub fn snapshot_path(&self, input: &InputArgs) -> Result<PathBuf> {
        match (&input.input, &input.name) {
            (Some(path), _) => Ok(self.resolve(path)),
            (None, Some(name)) => Ok(find_snapshot(&self.root, name)?),
            (None, None) => Err(miette::miette!(
                help = "pass a snapshot file, or --name to search the working directory",
                "No BOM snapshot given"
            )),
        }
    }

    /// Load the snapshot selected by the command line
    pub fn load(&self, input: &InputArgs) -> Result<BomSnapshot> {
        let path = self.snapshot_path(input)?;
        Ok(load_snapshot(&path)?)
    }

    /// Config traversal settings with command-line overrides applied
    pub fn flatten_options(&self, overrides: &TraversalArgs) -> Result<FlattenOptions> {
        let mut options = FlattenOptions::from(&self.config);
        if let Some(depth) = overrides.max_depth {
            if !(1..=MAX_DEPTH_LIMIT).contains(&depth) {
                return Err(miette::miette!(
                    "--max-depth must be between 1 and {}, got {}",
                    MAX_DEPTH_LIMIT,
                    depth
                ));
            }
            options.max_depth = depth;
        }
        if overrides.first_level_only {
            options.first_level_only = true;
        }
        Ok(options)
    }

    /// Default report location
    pub fn report_path(&self) -> PathBuf {
        self.root.join(&self.config.output.file_name)
    }
}

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// "s" when a count needs a plural noun
pub fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
