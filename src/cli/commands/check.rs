//! `bomflat check` command - report structural and data problems

use console::style;
use miette::Result;

use crate::cli::helpers::{plural, Workspace};
use crate::cli::{GlobalOpts, InputArgs, TraversalArgs};
use crate::core::lint::{lint, Severity};

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub traversal: TraversalArgs,

    /// Strict mode - warnings become errors
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global)?;
    let snapshot = ws.load(&args.input)?;
    let options = ws.flatten_options(&args.traversal)?;

    let findings = lint(&snapshot.rows, &options)?;

    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();
    let warnings = findings.len() - errors;

    for finding in &findings {
        let marker = match finding.severity {
            Severity::Error => style("✗").red(),
            Severity::Warning => style("!").yellow(),
        };
        println!(
            "{} {} row {}: {}",
            marker,
            finding.severity,
            style(&finding.path).cyan(),
            finding.message
        );
    }

    let rows = snapshot.row_count();
    let failed = errors > 0 || (args.strict && warnings > 0);

    if !global.quiet {
        if !findings.is_empty() {
            println!();
        }
        let marker = if failed {
            style("✗").red()
        } else {
            style("✓").green()
        };
        println!(
            "{} Checked {} row{}: {} error{}, {} warning{}",
            marker,
            rows,
            plural(rows),
            errors,
            plural(errors),
            warnings,
            plural(warnings)
        );
    }

    if failed {
        return Err(miette::miette!(
            "Check failed: {} error{}, {} warning{}{}",
            errors,
            plural(errors),
            warnings,
            plural(warnings),
            if args.strict { " (strict)" } else { "" }
        ));
    }

    Ok(())
}
