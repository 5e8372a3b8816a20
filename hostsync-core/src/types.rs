//! Domain types for hostsync change processing.
//!
//! `ChangeEntry` values are transient: they are produced from one diff pass
//! and discarded after journaling/dispatch. Nothing here touches the
//! filesystem.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed hostname taken from the inventory CSV.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hostname(pub String);

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Hostname {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Hostname {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The requested lifecycle change for a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeStatus {
    Add,
    Remove,
}

impl ChangeStatus {
    /// Parse an already upper-cased status field. Only the exact tokens
    /// `ADD` and `REMOVE` are valid.
    pub fn from_status_text(text: &str) -> Option<Self> {
        match text {
            "ADD" => Some(ChangeStatus::Add),
            "REMOVE" => Some(ChangeStatus::Remove),
            _ => None,
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeStatus::Add => write!(f, "ADD"),
            ChangeStatus::Remove => write!(f, "REMOVE"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A validated change extracted from one diff of the inventory CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    pub hostname: Hostname,
    pub status: ChangeStatus,
}

/// Why a raw entry was rejected during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The hostname already appeared earlier in the same diff.
    DuplicateHostname,
    /// The status field was not exactly `ADD` or `REMOVE` after
    /// normalisation.
    InvalidStatus { status_text: String },
}

/// A rejected raw entry, destined for the error journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub hostname: Hostname,
    pub reason: RejectReason,
}

impl Rejection {
    /// The message journaled for this rejection. Wording for invalid status
    /// is kept byte-compatible with the historical log consumers.
    pub fn journal_message(&self) -> String {
        match &self.reason {
            RejectReason::DuplicateHostname => {
                format!("{} #Duplicate hostname in this change set, entry dropped", self.hostname)
            }
            RejectReason::InvalidStatus { status_text } => format!(
                "{},{} #Please correct STATUS, it can be either ADD or REMOVE",
                self.hostname, status_text
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
