//! Shared front end for `run` and `partition`: config + journal loading,
//! diff capture, validation, and the closing publish step.

use std::path::Path;

use anyhow::{Context, Result};

use hostsync_core::{EnvConfig, Journal};
use hostsync_diff::{parse_diff, validate_entries, Validation};
use hostsync_publish::publish;

/// Per-run state every pipeline subcommand needs.
pub struct RunContext {
    pub config: EnvConfig,
    pub journal: Journal,
}

pub fn load_context(env_file: &Path) -> Result<RunContext> {
    let config = EnvConfig::load_at(env_file)
        .with_context(|| format!("failed to load environment file {}", env_file.display()))?;
    let journal = Journal::from_config(&config);
    Ok(RunContext { config, journal })
}

/// Capture the inventory diff, parse it, validate it, and journal every
/// rejection (printed instead when `dry_run` — a dry run leaves the working
/// tree untouched, journals included).
///
/// `Ok(None)` means no diff was produced: the run ends immediately with a
/// success status and performs no further action.
pub fn capture_and_validate(
    ctx: &RunContext,
    csv: &Path,
    dry_run: bool,
) -> Result<Option<Validation>> {
    let lines = match hostsync_publish::capture_diff(&ctx.config.repo_dir, csv) {
        Ok(lines) => lines,
        Err(err) => {
            journal_error(&ctx.journal, &format!("Git diff error: {err}"));
            return Err(err).context("diff capture failed");
        }
    };
    if lines.is_empty() {
        return Ok(None);
    }

    let validation = validate_entries(parse_diff(lines.iter().map(String::as_str)));
    for rejection in &validation.rejected {
        if dry_run {
            println!("[dry-run] would journal rejection: {}", rejection.journal_message());
        } else {
            journal_error(&ctx.journal, &rejection.journal_message());
        }
    }
    Ok(Some(validation))
}

/// Stage/commit/push the working tree, journaling the outcome. A publish
/// failure is journaled and then propagated; it is the one failure class
/// that fails the process (per-host failures only reach the journal).
pub fn publish_changes(ctx: &RunContext, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("[dry-run] would commit and push to origin/{}", ctx.config.branch);
        return Ok(());
    }
    match publish(&ctx.config.repo_dir, &ctx.config.branch) {
        Ok(_) => {
            journal_access(&ctx.journal, "Changes committed and pushed successfully.");
            Ok(())
        }
        Err(err) => {
            journal_error(&ctx.journal, &format!("Git commit/push failed: {err}"));
            Err(err).context("publish failed")
        }
    }
}

/// Journal appends must never kill a run; failures degrade to the logger.
pub fn journal_error(journal: &Journal, message: &str) {
    if let Err(err) = journal.error(message) {
        log::warn!("error journal unavailable: {err}");
    }
}

pub fn journal_access(journal: &Journal, message: &str) {
    if let Err(err) = journal.access(message) {
        log::warn!("access journal unavailable: {err}");
    }
}
