//! Status command implementation

use std::path::Path;

use colored::Colorize;

use docsync_core::StatusReport;
use docsync_source::HelpCenterSource;

use crate::error::Result;

/// Run the status command
///
/// Without `--fetch` only the local state file is read.
pub fn run_status(config_path: &Path, fetch: bool, json: bool) -> Result<()> {
    let (config, engine) = super::load(config_path)?;

    let report = if fetch {
        let mut source = HelpCenterSource::from_config(&config.source)?;
        engine.status_against(&mut source)?
    } else {
        engine.status()?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Sync Status".bold());
    println!();
    println!("   {}: {}", "State file".dimmed(), engine.store().path().display());
    println!("   {}: {}", "Tracked".dimmed(), report.tracked);
    print_details(&report);

    Ok(())
}

fn print_details(report: &StatusReport) {
    if !report.pending.is_empty() {
        println!();
        println!(
            "{} Records without a remote reference (will be re-uploaded):",
            "PENDING".yellow().bold()
        );
        for identifier in &report.pending {
            println!("   {} {}", "-".yellow(), identifier);
        }
    }

    if let Some(changes) = &report.changes {
        println!("   {}: {}", "Unchanged".dimmed(), changes.unchanged);
        for identifier in &changes.to_add {
            println!("   {} {}", "+".green(), identifier);
        }
        for identifier in &changes.to_update {
            println!("   {} {}", "~".yellow(), identifier);
        }
        if !changes.stale.is_empty() {
            println!();
            println!("{} No longer returned by the source:", "STALE".dimmed().bold());
            for identifier in &changes.stale {
                println!("   {} {}", "-".dimmed(), identifier);
            }
        }
    }

    println!();
    if report.changes.is_none() && report.pending.is_empty() {
        println!("Run {} to compare against the help center.", "docsync status --fetch".cyan());
    } else if report.is_clean() {
        println!("{} Nothing to sync.", "OK".green().bold());
    } else {
        println!("Run {} to upload changes.", "docsync sync".cyan());
    }
}
