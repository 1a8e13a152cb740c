//! `bomflat list` command - show snapshot files in the working directory

use console::style;
use miette::Result;

use crate::cli::helpers::{plural, Workspace};
use crate::cli::GlobalOpts;
use crate::loader::list_snapshots;

pub fn run(global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global)?;
    let snapshots = list_snapshots(&ws.root);

    if snapshots.is_empty() {
        println!("No BOM snapshots found.");
        return Ok(());
    }

    for path in &snapshots {
        let shown = path.strip_prefix(&ws.root).unwrap_or(path);
        println!("{}", shown.display());
    }

    if !global.quiet {
        println!();
        println!(
            "{} snapshot{} found",
            style(snapshots.len()).cyan(),
            plural(snapshots.len())
        );
    }
    Ok(())
}
