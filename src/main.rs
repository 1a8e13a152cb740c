use clap::Parser;
use miette::Result;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use bomflat::cli::{Cli, Commands, GlobalOpts};

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "BOMFLAT_LOG";

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    init_logging(&cli.global);

    match cli.command {
        Commands::Flatten(args) => bomflat::cli::commands::flatten::run(args, &cli.global),
        Commands::Show(args) => bomflat::cli::commands::show::run(args, &cli.global),
        Commands::Check(args) => bomflat::cli::commands::check::run(args, &cli.global),
        Commands::List => bomflat::cli::commands::list::run(&cli.global),
    }
}

fn init_logging(global: &GlobalOpts) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(global.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
