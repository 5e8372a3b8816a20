//! Error types for hostsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from loading the environment file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A key the current subcommand needs was absent from the environment
    /// file and has no default.
    #[error("missing required key {key} in environment file")]
    MissingKey { key: &'static str },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io { path: path.into(), source }
    }
}

/// All errors that can arise from journal appends and rotation.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Underlying I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl JournalError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        JournalError::Io { path: path.into(), source }
    }
}
