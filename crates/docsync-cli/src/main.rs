//! docsync CLI
//!
//! Mirrors help-center articles into a vector store.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Before parsing, so `.env` can supply clap's env-backed arguments
    let env_file = match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(e) if e.not_found() => None,
        Err(e) => return Err(error::CliError::user(format!("Failed to read .env: {}", e))),
    };

    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: logging disabled: {}", "warning".yellow().bold(), e);
    }
    if let Some(path) = env_file {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    match cli.command {
        Some(cmd) => execute_command(&cli.config, cmd),
        None => {
            println!("{} Help-center to vector-store sync", "docsync".green().bold());
            println!();
            println!("Run {} for available commands.", "docsync --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(config: &std::path::Path, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sync { dry_run, json } => commands::run_sync(config, dry_run, json),
        Commands::Status { fetch, json } => commands::run_status(config, fetch, json),
    }
}
