//! `bomflat flatten` command - write the JSON report

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{plural, Workspace};
use crate::cli::{GlobalOpts, InputArgs, TraversalArgs};
use crate::core::flatten::flatten_with;
use crate::core::writer::write_report;

#[derive(clap::Args, Debug)]
pub struct FlattenArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Report path (default: bomRows.json in the working directory)
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// Indent the JSON report
    #[arg(long)]
    pub pretty: bool,

    #[command(flatten)]
    pub traversal: TraversalArgs,
}

pub fn run(args: FlattenArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global)?;
    let snapshot = ws.load(&args.input)?;
    let options = ws.flatten_options(&args.traversal)?;

    let flattened = flatten_with(&snapshot.rows, &options)?;

    let out = match &args.out {
        Some(path) => ws.resolve(path),
        None => ws.report_path(),
    };
    let pretty = args.pretty || ws.config.output.pretty;
    write_report(&flattened.report, &out, pretty)?;

    if !global.quiet {
        let count = flattened.report.len();
        println!(
            "{} Wrote {} record{} to {}",
            style("✓").green(),
            count,
            plural(count),
            style(out.display()).cyan()
        );
        if flattened.is_degraded() {
            let gaps = flattened.gaps.len();
            println!(
                "   {} {} field{} left blank (run 'bomflat check' for details)",
                style("!").yellow(),
                gaps,
                plural(gaps)
            );
        }
    }

    Ok(())
}
