mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod pdb;
mod ui;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\nError: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("FoldGroup CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    match cli.command {
        Commands::Group(args) => commands::group::run(args),
        Commands::Detect(args) => commands::detect::run(args),
        Commands::Search(args) => commands::search::run(args),
        Commands::Contacts(args) => commands::contacts::run(args),
    }
}
