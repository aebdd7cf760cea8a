mod cli;
mod commands;
mod config;
mod error;
mod logging;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        error!("❌ Command failed: {}", e);
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("🚀 molecules CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let config = config::load(&cli)?;
    debug!("Resolved configuration: {:?}", &config);

    match cli.command {
        Commands::Mass(args) => {
            info!("Dispatching to 'mass' command.");
            commands::mass::run(args, &config)
        }
        Commands::Residue(args) => {
            info!("Dispatching to 'residue' command.");
            commands::residue::run(args, &config)
        }
        Commands::List(args) => {
            info!("Dispatching to 'list' command.");
            commands::list::run(args, &config)
        }
        Commands::Peptide(args) => {
            info!("Dispatching to 'peptide' command.");
            commands::peptide::run(args, &config)
        }
    }
}
