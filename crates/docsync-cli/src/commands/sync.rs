//! Sync command implementation

use std::path::Path;

use colored::Colorize;

use docsync_core::{ChangeKind, OpOutcome, SyncOptions, SyncReport};
use docsync_index::{OpenAiClient, OpenAiIndex};
use docsync_source::HelpCenterSource;

use crate::error::{CliError, Result};

/// Run the sync command
///
/// Fails (non-zero exit) when the run aborts or any upload failed.
pub fn run_sync(config_path: &Path, dry_run: bool, json: bool) -> Result<()> {
    let (config, engine) = super::load(config_path)?;

    if !json {
        let action = if dry_run { "Planning" } else { "Synchronizing" };
        println!(
            "{} {} articles from {}...",
            "=>".blue().bold(),
            action,
            config.source.base_url.cyan()
        );
    }

    let mut source = HelpCenterSource::from_config(&config.source)?;
    let report = if dry_run {
        engine.preview(&mut source)?
    } else {
        // Credentials are checked before anything is fetched
        let mut index = OpenAiIndex::new(OpenAiClient::from_env(&config.index)?);
        engine.run(&mut source, &mut index, &SyncOptions::default())?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.success() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} of {} uploads failed; they will be retried on the next run",
            report.failed,
            report.ops.len()
        )))
    }
}

fn print_report(report: &SyncReport) {
    for op in &report.ops {
        let (marker, verb) = match op.kind {
            ChangeKind::Added => ("+".green(), "add"),
            ChangeKind::Updated => ("~".yellow(), "update"),
        };
        match &op.outcome {
            None => println!("   {} {} ({})", marker, op.identifier, verb.dimmed()),
            Some(OpOutcome::Uploaded { reference, orphaned }) => {
                println!("   {} {} -> {}", marker, op.identifier, reference.dimmed());
                if let Some(orphan) = orphaned {
                    println!("     {} old object {} was not deleted", "!".yellow(), orphan.cyan());
                }
            }
            Some(OpOutcome::Failed { reason }) => {
                println!("   {} {}: {}", "!".red(), op.identifier, reason);
            }
        }
    }

    if !report.stale.is_empty() {
        println!(
            "   {} {} tracked article(s) no longer returned by the source",
            "-".dimmed(),
            report.stale.len()
        );
    }

    println!();
    let status = if !report.success() {
        "ERROR".red().bold()
    } else if report.dry_run {
        "DRY RUN".yellow().bold()
    } else {
        "OK".green().bold()
    };
    println!("{} {}", status, summary_line(report));
}

fn summary_line(report: &SyncReport) -> String {
    format!(
        "added={} updated={} skipped={} failed={}",
        report.added, report.updated, report.skipped, report.failed
    )
}
