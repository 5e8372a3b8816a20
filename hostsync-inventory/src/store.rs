//! Locked, atomic read-modify-write of the database CSV.
//!
//! ## `ensure_host` protocol
//!
//! 1. Acquire `<db>.lock` via exclusive create — a second concurrent run
//!    fails loudly instead of racing on the first empty slot.
//! 2. Read and parse the table.
//! 3. Hostname already present → done, no write.
//! 4. Allocate the first empty slot; full table → `Exhausted`, no write.
//! 5. Write to `<db>.tmp`, rename over `<db>` (atomic on POSIX).
//! 6. Drop the guard, removing the lock file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hostsync_core::Hostname;

use crate::error::{io_err, InventoryError};
use crate::table::SlotTable;

/// Outcome of [`ensure_host`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome {
    /// The hostname already held a slot; the file was not touched.
    AlreadyPresent,
    /// The hostname was written into the data row at `row` (0 = header).
    Allocated { row: usize },
}

/// Look up `hostname` in the database at `db_path`, allocating a slot if
/// needed. Exactly one row mutates per allocating call.
pub fn ensure_host(db_path: &Path, hostname: &Hostname) -> Result<SlotOutcome, InventoryError> {
    let _guard = LockGuard::acquire(db_path)?;

    let contents = fs::read_to_string(db_path).map_err(|e| io_err(db_path, e))?;
    let mut table = SlotTable::parse(&contents);

    if table.contains_host(hostname) {
        tracing::debug!("{hostname} already present in {}", db_path.display());
        return Ok(SlotOutcome::AlreadyPresent);
    }

    let Some(row) = table.allocate(hostname) else {
        return Err(InventoryError::Exhausted { hostname: hostname.clone() });
    };

    write_atomic(db_path, &table.to_csv())?;
    tracing::info!("{hostname} assigned slot row {row} in {}", db_path.display());
    Ok(SlotOutcome::Allocated { row })
}

fn write_atomic(db_path: &Path, contents: &str) -> Result<(), InventoryError> {
    let tmp = sibling(db_path, "tmp");
    fs::write(&tmp, contents).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, db_path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(db_path, e));
    }
    Ok(())
}

/// `<db>.lock` / `<db>.tmp` sibling paths — same directory, same filesystem.
fn sibling(db_path: &Path, suffix: &str) -> PathBuf {
    let name = db_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("database.csv");
    db_path.with_file_name(format!("{name}.{suffix}"))
}

// ---------------------------------------------------------------------------
// Lock guard
// ---------------------------------------------------------------------------

struct LockGuard {
    path: PathBuf,
}

impl LockGuard {
    fn acquire(db_path: &Path) -> Result<LockGuard, InventoryError> {
        let path = sibling(db_path, "lock");
        match fs::OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => Ok(LockGuard { path }),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                Err(InventoryError::Locked { path })
            }
            Err(err) => Err(io_err(&path, err)),
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            tracing::warn!("failed to remove lock file {}: {err}", self.path.display());
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
