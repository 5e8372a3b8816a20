//! # hostsync-apply
//!
//! Triggers the external state-application run for one host and classifies
//! the result. The default command is the Salt highstate the legacy tooling
//! used (`sudo salt <host> state.apply check_confs`); program and argument
//! shape are injectable so tests substitute a stub.
//!
//! Success requires the process to exit successfully AND its stdout to carry
//! both the `Succeeded:` marker and the zero-failure marker — Salt exits 0
//! on partial failures, so the exit code alone is not trustworthy, and the
//! tool offers no machine-readable summary to parse instead.

use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

use hostsync_core::Hostname;

/// Marker that at least one state succeeded.
pub const SUCCEEDED_MARKER: &str = "Succeeded:";
/// Marker that zero states failed. The column padding is part of Salt's
/// summary format.
pub const ZERO_FAILURES_MARKER: &str = "Failed:    0";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Classification of one state-application run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Exit success plus both markers present.
    Succeeded,
    /// Everything else: nonzero failures, missing markers, bad exit status.
    Failed { detail: String },
}

impl ApplyOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ApplyOutcome::Succeeded)
    }
}

/// Errors from invoking the external command. Classification failures are
/// not errors — they come back as [`ApplyOutcome::Failed`].
#[derive(Debug, Error)]
pub enum ApplyError {
    /// The command could not be spawned at all (missing binary, permissions).
    #[error("failed to invoke {program}: {source}")]
    Invoke {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// External state-application command: `program pre_args… <host> post_args…`.
#[derive(Debug, Clone)]
pub struct StateRunner {
    program: PathBuf,
    pre_args: Vec<String>,
    post_args: Vec<String>,
}

impl StateRunner {
    /// The legacy Salt invocation: `sudo salt <host> state.apply check_confs`.
    pub fn salt_default() -> StateRunner {
        StateRunner {
            program: PathBuf::from("sudo"),
            pre_args: vec!["salt".to_string()],
            post_args: vec!["state.apply".to_string(), "check_confs".to_string()],
        }
    }

    /// Arbitrary command shape, mainly for tests and alternate tooling.
    pub fn with_command(
        program: impl Into<PathBuf>,
        pre_args: Vec<String>,
        post_args: Vec<String>,
    ) -> StateRunner {
        StateRunner { program: program.into(), pre_args, post_args }
    }

    /// Run the command for `host` and classify its output. No retry, no
    /// timeout — a hang in the external tool blocks the run, per contract.
    pub fn apply(&self, host: &Hostname) -> Result<ApplyOutcome, ApplyError> {
        let output = Command::new(&self.program)
            .args(&self.pre_args)
            .arg(&host.0)
            .args(&self.post_args)
            .output()
            .map_err(|source| ApplyError::Invoke { program: self.program.clone(), source })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let outcome = classify(output.status.success(), &stdout);
        match &outcome {
            ApplyOutcome::Succeeded => tracing::info!("state apply succeeded for {host}"),
            ApplyOutcome::Failed { detail } => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                tracing::warn!("state apply failed for {host}: {detail}; stderr: {}", stderr.trim());
            }
        }
        Ok(outcome)
    }
}

/// Pure classification of an exit status + captured stdout.
pub fn classify(exit_success: bool, stdout: &str) -> ApplyOutcome {
    if !exit_success {
        return ApplyOutcome::Failed { detail: "command exited with failure status".to_string() };
    }
    if !stdout.contains(SUCCEEDED_MARKER) {
        return ApplyOutcome::Failed { detail: "output missing success summary".to_string() };
    }
    if !stdout.contains(ZERO_FAILURES_MARKER) {
        return ApplyOutcome::Failed { detail: "output reports failed states".to_string() };
    }
    ApplyOutcome::Succeeded
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const HAPPY_SUMMARY: &str = "Summary for web01\n------------\nSucceeded: 3 (changed=1)\nFailed:    0\n------------\nTotal states run:     3\n";

    #[test]
    fn classify_requires_exit_success() {
        let outcome = classify(false, HAPPY_SUMMARY);
        assert!(matches!(outcome, ApplyOutcome::Failed { .. }));
    }

    #[test]
    fn classify_requires_both_markers() {
        assert!(classify(true, HAPPY_SUMMARY).is_success());
        assert!(!classify(true, "Succeeded: 3\nFailed:    1\n").is_success());
        assert!(!classify(true, "Failed:    0\n").is_success());
        assert!(!classify(true, "").is_success());
    }

    #[test]
    fn failed_count_padding_matters() {
        // "Failed: 0" without Salt's column padding is a different summary
        // shape and is not trusted.
        assert!(!classify(true, "Succeeded: 1\nFailed: 0\n").is_success());
    }

    #[cfg(unix)]
    mod subprocess {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        /// Stub that prints a canned summary and exits with a given code.
        fn stub_runner(dir: &TempDir, stdout: &str, exit_code: i32) -> StateRunner {
            let script = dir.path().join("salt-stub.sh");
            fs::write(&script, format!("#!/bin/sh\nprintf '%s' \"{stdout}\"\nexit {exit_code}\n"))
                .expect("write stub");
            fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod");
            StateRunner::with_command(&script, vec![], vec![])
        }

        #[test]
        fn happy_output_classifies_as_success() {
            let dir = TempDir::new().unwrap();
            let runner = stub_runner(&dir, "Succeeded: 1 (changed=1)\\nFailed:    0\\n", 0);
            let outcome = runner.apply(&Hostname::from("web01")).expect("apply");
            assert!(outcome.is_success());
        }

        #[test]
        fn nonzero_exit_classifies_as_failure() {
            let dir = TempDir::new().unwrap();
            let runner = stub_runner(&dir, "Succeeded: 1\\nFailed:    0\\n", 2);
            let outcome = runner.apply(&Hostname::from("web01")).expect("apply");
            assert!(!outcome.is_success());
        }

        #[test]
        fn missing_binary_is_an_invoke_error() {
            let dir = TempDir::new().unwrap();
            let runner =
                StateRunner::with_command(dir.path().join("no-such-binary"), vec![], vec![]);
            let err = runner.apply(&Hostname::from("web01")).unwrap_err();
            assert!(matches!(err, ApplyError::Invoke { .. }), "got: {err}");
        }
    }
}
