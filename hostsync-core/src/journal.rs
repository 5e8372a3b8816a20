//! Timestamped append-only journals (error + access logs).
//!
//! Every line is `TIMESTAMP - MESSAGE`; error lines are
//! `TIMESTAMP - Error - MESSAGE`. Files are created empty when absent, and
//! rotate when they exceed 10 MiB using the scheme:
//!   error_log.txt → error_log.txt.1 → … → error_log.txt.5

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::EnvConfig;
use crate::error::JournalError;

/// Maximum journal file size before rotation (10 MiB).
pub const MAX_JOURNAL_BYTES: u64 = 10 * 1024 * 1024;

/// Maximum number of rotated backup files to keep.
pub const MAX_ROTATED_FILES: usize = 5;

/// Timestamp format shared by journal lines and commit messages.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Journal
// ---------------------------------------------------------------------------

/// Paired error/access journals for one run.
#[derive(Debug, Clone)]
pub struct Journal {
    error_log: PathBuf,
    access_log: PathBuf,
}

impl Journal {
    pub fn new(error_log: impl Into<PathBuf>, access_log: impl Into<PathBuf>) -> Self {
        Journal { error_log: error_log.into(), access_log: access_log.into() }
    }

    pub fn from_config(config: &EnvConfig) -> Self {
        Self::new(&config.error_log, &config.access_log)
    }

    /// Append `TIMESTAMP - Error - MESSAGE` to the error journal.
    pub fn error(&self, message: &str) -> Result<(), JournalError> {
        append_line(&self.error_log, &format!("Error - {message}"))
    }

    /// Append `TIMESTAMP - MESSAGE` to the access journal.
    pub fn access(&self, message: &str) -> Result<(), JournalError> {
        append_line(&self.access_log, message)
    }

    pub fn error_log(&self) -> &Path {
        &self.error_log
    }

    pub fn access_log(&self) -> &Path {
        &self.access_log
    }
}

/// Append one timestamped line to the journal at `path`.
///
/// Rotates first when the file is over [`MAX_JOURNAL_BYTES`], then creates
/// the file if absent and appends. Also used directly by the partition
/// subcommand for the ADD/REMOVE host logs.
pub fn append_line(path: &Path, message: &str) -> Result<(), JournalError> {
    rotate_if_needed(path, MAX_JOURNAL_BYTES, MAX_ROTATED_FILES)
        .map_err(|e| JournalError::io(path, e))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| JournalError::io(parent, e))?;
        }
    }

    let timestamp = Local::now().format(TIMESTAMP_FORMAT);
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| JournalError::io(path, e))?;
    writeln!(file, "{timestamp} - {message}").map_err(|e| JournalError::io(path, e))
}

// ---------------------------------------------------------------------------
// Rotation
// ---------------------------------------------------------------------------

/// Rotate `path` if its size exceeds `max_bytes`.
///
/// Rotation sequence (oldest first):
///   `<name>.<max_files>` deleted
///   `<name>.<n>` → `<name>.<n+1>` for n = max_files-1 … 1
///   `<name>` → `<name>.1`
///
/// Returns `true` if rotation occurred, `false` if the file was under the
/// threshold (or did not exist yet).
pub fn rotate_if_needed(path: &Path, max_bytes: u64, max_files: usize) -> io::Result<bool> {
    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };

    if size < max_bytes {
        return Ok(false);
    }

    let oldest = numbered_path(path, max_files);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }

    for n in (1..max_files).rev() {
        let src = numbered_path(path, n);
        let dst = numbered_path(path, n + 1);
        if src.exists() {
            fs::rename(&src, &dst)?;
        }
    }

    fs::rename(path, numbered_path(path, 1))?;
    Ok(true)
}

/// Build the path for the `n`-th rotated copy of `base`
/// (e.g. `error_log.txt.2`).
fn numbered_path(base: &Path, n: usize) -> PathBuf {
    let name = base
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("journal.txt");
    base.with_file_name(format!("{name}.{n}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
