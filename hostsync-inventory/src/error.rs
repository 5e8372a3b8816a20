//! Error types for hostsync-inventory.

use std::path::PathBuf;

use thiserror::Error;

use hostsync_core::Hostname;

/// All errors that can arise from slot-table operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Another run holds the database lock (or a crashed run left it
    /// behind). The lock is never stolen; the error surfaces instead.
    #[error("database is locked by another run (lock file {path} exists)")]
    Locked { path: PathBuf },

    /// Every data row's slot is already occupied. A hard capacity limit,
    /// not recoverable by retry; wording kept for the legacy error log.
    #[error("{hostname}, no more conf files available.")]
    Exhausted { hostname: Hostname },
}

/// Convenience constructor for [`InventoryError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> InventoryError {
    InventoryError::Io { path: path.into(), source }
}
