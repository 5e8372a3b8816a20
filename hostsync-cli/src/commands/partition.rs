//! `hostsync partition` — route validated changes into the ADD/REMOVE host
//! logs for a downstream consumer, then publish.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use hostsync_core::{journal, ChangeStatus};

use super::common;

/// Arguments for `hostsync partition`.
#[derive(Args, Debug)]
pub struct PartitionArgs {
    /// Report what would happen without writing the host logs or publishing.
    #[arg(long)]
    pub dry_run: bool,
}

impl PartitionArgs {
    pub fn run(self, env_file: &Path) -> Result<()> {
        let ctx = common::load_context(env_file)?;
        let csv = ctx
            .config
            .require_csv()
            .context("partition needs AWS_CSV in the environment file")?;
        let (add_log, remove_log) = ctx
            .config
            .require_partition_logs()
            .context("partition needs AWS_HADD_LOG and AWS_HREM_LOG in the environment file")?;

        let Some(validation) = common::capture_and_validate(&ctx, csv, self.dry_run)? else {
            return Ok(());
        };

        let mut added = 0usize;
        let mut removed = 0usize;
        for entry in &validation.accepted {
            let target = match entry.status {
                ChangeStatus::Add => {
                    added += 1;
                    add_log
                }
                ChangeStatus::Remove => {
                    removed += 1;
                    remove_log
                }
            };
            if self.dry_run {
                println!(
                    "[dry-run] would append '{}' to {}",
                    entry.hostname,
                    target.display()
                );
                continue;
            }
            if let Err(err) = journal::append_line(target, &entry.hostname.0) {
                common::journal_error(
                    &ctx.journal,
                    &format!("Failed to record {} in {}: {err}", entry.hostname, target.display()),
                );
            }
        }

        let prefix = if self.dry_run { "[dry-run] " } else { "" };
        println!(
            "{prefix}{} {} add, {} remove, {} rejected",
            "✓".green(),
            added,
            removed,
            validation.rejected.len(),
        );

        common::publish_changes(&ctx, self.dry_run)
    }
}
