//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// docsync - Mirror help-center articles into a vector store
#[derive(Parser, Debug)]
#[command(name = "docsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file (TOML or JSON); defaults apply if it is absent
    #[arg(short, long, global = true, env = "DOCSYNC_CONFIG", default_value = "docsync.toml")]
    pub config: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Fetch articles, upload new and changed ones, and record the result
    ///
    /// Examples:
    ///   docsync sync              # Full run
    ///   docsync sync --dry-run    # Show what would be uploaded
    ///   docsync sync --json       # Machine-readable report
    Sync {
        /// Fetch and compare only; write and upload nothing
        #[arg(long)]
        dry_run: bool,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what the sync state records
    Status {
        /// Also fetch the help center and list pending changes
        #[arg(long)]
        fetch: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
