//! `hostsync run` — the full pipeline: diff → validate → slot → state apply
//! → publish.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use hostsync_apply::StateRunner;
use hostsync_core::ChangeStatus;
use hostsync_inventory::{ensure_host, SlotOutcome};

use super::common::{self, RunContext};

/// Arguments for `hostsync run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Report what would happen without touching the database, applying
    /// state, or publishing.
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    pub fn run(self, env_file: &Path) -> Result<()> {
        let ctx = common::load_context(env_file)?;
        let (csv, database) = ctx
            .config
            .require_inventory()
            .context("run needs AWS_CSV and AWS_DATABASE in the environment file")?;

        let Some(validation) = common::capture_and_validate(&ctx, csv, self.dry_run)? else {
            // No diff: nothing moved since the previous HEAD position.
            return Ok(());
        };

        let runner = StateRunner::salt_default();
        let mut applied = 0usize;
        let mut failed = 0usize;

        for entry in &validation.accepted {
            match entry.status {
                ChangeStatus::Add => {
                    if self.dry_run {
                        println!(
                            "[dry-run] would ensure a slot and apply state for '{}'",
                            entry.hostname
                        );
                        continue;
                    }
                    if process_add(&ctx, database, &runner, &entry.hostname) {
                        applied += 1;
                    } else {
                        failed += 1;
                    }
                }
                ChangeStatus::Remove => {
                    // REMOVE is recorded by validation but frees no slot and
                    // triggers no state run.
                    log::debug!("{} marked REMOVE; slot retained", entry.hostname);
                }
            }
        }

        let prefix = if self.dry_run { "[dry-run] " } else { "" };
        println!(
            "{prefix}{} {} accepted, {} applied, {} failed, {} rejected",
            "✓".green(),
            validation.accepted.len(),
            applied,
            failed,
            validation.rejected.len(),
        );

        common::publish_changes(&ctx, self.dry_run)
    }
}

/// Slot + state apply for one ADD host. Returns `true` on full success;
/// every failure path lands in the journal and leaves the other hosts
/// unaffected.
fn process_add(
    ctx: &RunContext,
    database: &Path,
    runner: &StateRunner,
    hostname: &hostsync_core::Hostname,
) -> bool {
    match ensure_host(database, hostname) {
        Ok(SlotOutcome::AlreadyPresent) => {
            log::debug!("{hostname} already holds a slot");
        }
        Ok(SlotOutcome::Allocated { row }) => {
            log::debug!("{hostname} allocated slot row {row}");
        }
        Err(err) => {
            common::journal_error(&ctx.journal, &err.to_string());
            return false;
        }
    }

    match runner.apply(hostname) {
        Ok(outcome) if outcome.is_success() => {
            common::journal_access(
                &ctx.journal,
                &format!("{hostname} conf files updated successfully."),
            );
            true
        }
        Ok(_) => {
            common::journal_error(&ctx.journal, &format!("{hostname} state apply failed."));
            false
        }
        Err(err) => {
            common::journal_error(&ctx.journal, &format!("Salt apply error for {hostname}: {err}"));
            false
        }
    }
}
