//! # hostsync-diff
//!
//! Pure change-extraction pipeline: unified-diff lines in, validated
//! [`ChangeEntry`](hostsync_core::ChangeEntry) values (plus rejections) out.
//! No subprocess or git knowledge lives here; the publisher captures the
//! diff text and hands it over.

pub mod parse;
pub mod validate;

pub use parse::{parse_diff, RawEntry};
pub use validate::{validate_entries, Validation};
