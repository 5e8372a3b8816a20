//! # hostsync-publish
//!
//! Git subprocess plumbing for the watch/publish cycle:
//! - [`capture_diff`] — `git diff HEAD@{1} -- <file>`, the change feed that
//!   drives the whole run (the reflog's previous position is what the
//!   webhook-triggered pull moved away from).
//! - [`publish`] — stage everything, commit with a timestamped message,
//!   push to the configured branch.
//!
//! Stage and push must succeed; an empty commit is tolerated because many
//! runs produce no new journal content.

use std::path::Path;
use std::process::{Command, Output};

use chrono::Local;
use thiserror::Error;

use hostsync_core::journal::TIMESTAMP_FORMAT;

/// Errors from git invocations.
#[derive(Debug, Error)]
pub enum PublishError {
    /// git itself could not be spawned.
    #[error("failed to invoke git {action}: {source}")]
    Invoke {
        action: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// git ran but exited unsuccessfully on a step that must succeed.
    #[error("git {action} failed (status {status}): {detail}")]
    Command { action: &'static str, status: String, detail: String },
}

/// Result of one publish cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    /// Whether the commit step actually created a commit. `false` means
    /// there was nothing to commit — not a failure.
    pub committed: bool,
}

// ---------------------------------------------------------------------------
// Diff capture
// ---------------------------------------------------------------------------

/// Capture the diff of `file` between the previous and current HEAD
/// positions, as lines. An empty vec means no change — callers end the run
/// successfully without further action.
pub fn capture_diff(repo_dir: &Path, file: &Path) -> Result<Vec<String>, PublishError> {
    let file_arg = file.to_string_lossy();
    let output = run_git(repo_dir, "diff", &["diff", "HEAD@{1}", "--", &*file_arg])?;
    expect_success("diff", &output)?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().map(str::to_string).collect())
}

// ---------------------------------------------------------------------------
// Publish
// ---------------------------------------------------------------------------

/// `Auto-commit: <YYYY-MM-DD HH:MM:SS>`, same clock format as the journals.
pub fn commit_message(now: chrono::DateTime<Local>) -> String {
    format!("Auto-commit: {}", now.format(TIMESTAMP_FORMAT))
}

/// Stage all working-tree changes, commit, and push `origin <branch>`.
///
/// A failing stage or push aborts the remaining steps and returns the
/// error; a failing commit is treated as "nothing to commit".
pub fn publish(repo_dir: &Path, branch: &str) -> Result<PublishReport, PublishError> {
    let staged = run_git(repo_dir, "add", &["add", "-A"])?;
    expect_success("add", &staged)?;

    let message = commit_message(Local::now());
    let commit = run_git(repo_dir, "commit", &["commit", "-m", &message])?;
    let committed = commit.status.success();
    if !committed {
        tracing::info!("git commit created no commit (likely nothing to commit)");
    }

    let pushed = run_git(repo_dir, "push", &["push", "origin", branch])?;
    expect_success("push", &pushed)?;

    tracing::info!("pushed to origin/{branch} (committed: {committed})");
    Ok(PublishReport { committed })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn run_git(repo_dir: &Path, action: &'static str, args: &[&str]) -> Result<Output, PublishError> {
    Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .map_err(|source| PublishError::Invoke { action, source })
}

fn expect_success(action: &'static str, output: &Output) -> Result<(), PublishError> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let detail = if stderr.is_empty() { stdout } else { stderr };
    Err(PublishError::Command { action, status: output.status.to_string(), detail })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn commit_message_uses_journal_clock_format() {
        let when = Local.with_ymd_and_hms(2026, 8, 7, 9, 30, 5).unwrap();
        assert_eq!(commit_message(when), "Auto-commit: 2026-08-07 09:30:05");
    }

    #[test]
    fn capture_diff_outside_a_repo_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = capture_diff(dir.path(), Path::new("hosts.csv")).unwrap_err();
        assert!(matches!(err, PublishError::Command { action: "diff", .. }), "got: {err}");
    }
}
