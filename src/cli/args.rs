//! Command-line argument definitions

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::check::CheckArgs;
use crate::cli::commands::flatten::FlattenArgs;
use crate::cli::commands::show::ShowArgs;

/// bomflat - flatten CAD Bill-of-Materials snapshots into JSON row reports
#[derive(Parser, Debug)]
#[command(name = "bomflat", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Working directory for snapshots, config and reports
    #[arg(long, short = 'C', global = true, env = "BOMFLAT_WORK_DIR")]
    pub work_dir: Option<PathBuf>,

    /// Config file (default: bomflat.yaml in the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for printed records
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl GlobalOpts {
    /// Log level used when BOMFLAT_LOG is not set
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flatten a BOM snapshot and write the JSON report
    Flatten(FlattenArgs),

    /// Print the flattened records
    Show(ShowArgs),

    /// Check a BOM snapshot for structural and data problems
    Check(CheckArgs),

    /// List BOM snapshots under the working directory
    List,
}

/// How records are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Table on a terminal
    #[default]
    Auto,
    /// Aligned, styled columns
    Table,
    /// Tab-separated values
    Tsv,
    /// Comma-separated values
    Csv,
    /// JSON array (same shape as the report file)
    Json,
    /// YAML list
    Yaml,
}

/// Snapshot selection shared by the commands that read one
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Snapshot file (.bom.json, .bom.yaml or .bom.yml)
    #[arg(conflicts_with = "name")]
    pub input: Option<PathBuf>,

    /// Find <NAME>.bom.{json,yaml,yml} under the working directory
    #[arg(long, short = 'n')]
    pub name: Option<String>,
}

/// Traversal overrides shared by the commands that flatten
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TraversalArgs {
    /// Reject trees nested deeper than this many levels (1 to 60)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Only emit top-level rows
    #[arg(long)]
    pub first_level_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_level_from_flags() {
        let cli = Cli::parse_from(["bomflat", "-vv", "list"]);
        assert_eq!(cli.global.log_level(), "debug");

        let cli = Cli::parse_from(["bomflat", "list", "--quiet"]);
        assert_eq!(cli.global.log_level(), "error");
    }

    #[test]
    fn test_input_and_name_conflict() {
        let result = Cli::try_parse_from(["bomflat", "show", "a.bom.json", "--name", "A"]);
        assert!(result.is_err());
    }
}
