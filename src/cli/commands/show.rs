//! `bomflat show` command - print flattened records

use console::style;
use miette::{IntoDiagnostic, Result};
use std::io::IsTerminal;

use crate::cli::helpers::{plural, truncate_str, Workspace};
use crate::cli::output::effective_format;
use crate::cli::{GlobalOpts, InputArgs, OutputFormat, TraversalArgs};
use crate::core::flatten::flatten_with;
use crate::entities::record::BomReport;

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub traversal: TraversalArgs,

    /// Show only the record count
    #[arg(long)]
    pub count: bool,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global)?;
    let snapshot = ws.load(&args.input)?;
    let options = ws.flatten_options(&args.traversal)?;

    let report = flatten_with(&snapshot.rows, &options)?.report;

    if args.count {
        println!("{}", report.len());
        return Ok(());
    }
    report.validate()?;

    match effective_format(global.format, std::io::stdout().is_terminal()) {
        OutputFormat::Json => {
            println!("{}", report.to_json_pretty()?);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&report.records()).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for record in &report {
                wtr.serialize(record).into_diagnostic()?;
            }
            wtr.flush().into_diagnostic()?;
        }
        OutputFormat::Tsv => {
            println!("row_number\tpart_number\tquantity\tdescription\tmaterial");
            for r in &report {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    r.row_number,
                    tsv_field(&r.part_number),
                    r.quantity,
                    tsv_field(&r.description),
                    tsv_field(&r.material)
                );
            }
        }
        OutputFormat::Table | OutputFormat::Auto => print_table(&report, snapshot.assembly.as_deref()),
    }

    Ok(())
}

fn print_table(report: &BomReport, assembly: Option<&str>) {
    if let Some(name) = assembly {
        println!();
        println!("{} BOM for {}", style("Assembly").bold(), style(name).yellow());
    }
    println!();

    if report.is_empty() {
        println!("No BOM rows found.");
        return;
    }

    println!(
        "{:<6} {:<8} {:<18} {:<30} {:<16}",
        style("ROW").bold(),
        style("QTY").bold(),
        style("PART #").bold(),
        style("DESCRIPTION").bold(),
        style("MATERIAL").bold()
    );
    println!("{}", "-".repeat(82));

    for r in report {
        println!(
            "{:<6} {:<8} {:<18} {:<30} {:<16}",
            r.row_number,
            r.quantity.to_string(),
            truncate_str(&r.part_number, 18),
            truncate_str(&r.description, 30),
            truncate_str(&r.material, 16)
        );
    }

    println!();
    println!(
        "{} {} record{}",
        style("Total:").bold(),
        report.len(),
        plural(report.len())
    );
}

/// Replace characters that would break a TSV line
fn tsv_field(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tsv_field_strips_separators() {
        assert_eq!(tsv_field("a\tb\nc"), "a b c");
        assert_eq!(tsv_field("plain"), "plain");
    }
}
