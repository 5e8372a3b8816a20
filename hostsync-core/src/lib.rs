//! Hostsync core library — domain types, environment config, journals, errors.
//!
//! Public API surface:
//! - [`types`] — hostname/status newtypes and change entries
//! - [`config`] — `env_dynamic` loader ([`EnvConfig`])
//! - [`journal`] — timestamped append-only error/access logs
//! - [`error`] — [`ConfigError`], [`JournalError`]

pub mod config;
pub mod error;
pub mod journal;
pub mod types;

pub use config::EnvConfig;
pub use error::{ConfigError, JournalError};
pub use journal::Journal;
pub use types::{ChangeEntry, ChangeStatus, Hostname, RejectReason, Rejection};
