//! Entry validation: duplicate and status rules.
//!
//! Rules run per entry, in order:
//! 1. hostname already encountered in this batch → `DuplicateHostname`
//! 2. status text not exactly `ADD`/`REMOVE` → `InvalidStatus`
//! 3. otherwise accepted
//!
//! The seen-set lives inside the call — one batch, one accumulator, no
//! process-wide state.

use std::collections::HashSet;

use hostsync_core::{ChangeEntry, ChangeStatus, Hostname, RejectReason, Rejection};

use crate::parse::RawEntry;

/// Outcome of validating one batch of raw entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Validation {
    pub accepted: Vec<ChangeEntry>,
    pub rejected: Vec<Rejection>,
}

impl Validation {
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty() && self.rejected.is_empty()
    }
}

/// Validate raw entries in batch order.
///
/// A hostname counts as "seen" from its first occurrence onward, whether or
/// not that occurrence was accepted — a host that appears twice in one diff
/// is suspicious regardless of what its first status field said.
pub fn validate_entries<I>(raw: I) -> Validation
where
    I: IntoIterator<Item = RawEntry>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut validation = Validation::default();

    for entry in raw {
        if !seen.insert(entry.hostname.clone()) {
            validation.rejected.push(Rejection {
                hostname: Hostname::from(entry.hostname),
                reason: RejectReason::DuplicateHostname,
            });
            continue;
        }

        match ChangeStatus::from_status_text(&entry.status_text) {
            Some(status) => validation.accepted.push(ChangeEntry {
                hostname: Hostname::from(entry.hostname),
                status,
            }),
            None => validation.rejected.push(Rejection {
                hostname: Hostname::from(entry.hostname),
                reason: RejectReason::InvalidStatus { status_text: entry.status_text },
            }),
        }
    }

    validation
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_diff;

    fn raw(hostname: &str, status_text: &str) -> RawEntry {
        RawEntry { hostname: hostname.to_string(), status_text: status_text.to_string() }
    }

    #[test]
    fn valid_entries_are_accepted_in_order() {
        let validation = validate_entries(vec![raw("a", "ADD"), raw("b", "REMOVE")]);
        assert!(validation.rejected.is_empty());
        assert_eq!(validation.accepted.len(), 2);
        assert_eq!(validation.accepted[0].hostname, Hostname::from("a"));
        assert_eq!(validation.accepted[0].status, ChangeStatus::Add);
        assert_eq!(validation.accepted[1].status, ChangeStatus::Remove);
    }

    #[test]
    fn duplicate_hostname_rejected_per_repeat() {
        let validation =
            validate_entries(vec![raw("h1", "ADD"), raw("h1", "REMOVE"), raw("h1", "ADD")]);
        assert_eq!(validation.accepted.len(), 1);
        assert_eq!(validation.rejected.len(), 2);
        assert!(validation
            .rejected
            .iter()
            .all(|r| r.reason == RejectReason::DuplicateHostname));
    }

    #[test]
    fn duplicate_check_runs_before_status_check() {
        // Second h1 line has a bad status, but it's rejected as a duplicate.
        let validation = validate_entries(vec![raw("h1", "ADD"), raw("h1", "BOGUS")]);
        assert_eq!(validation.rejected.len(), 1);
        assert_eq!(validation.rejected[0].reason, RejectReason::DuplicateHostname);
    }

    #[test]
    fn invalid_status_host_still_blocks_reuse() {
        let validation = validate_entries(vec![raw("h1", "BOGUS"), raw("h1", "ADD")]);
        assert!(validation.accepted.is_empty());
        assert_eq!(validation.rejected[0].reason, RejectReason::InvalidStatus {
            status_text: "BOGUS".to_string(),
        });
        assert_eq!(validation.rejected[1].reason, RejectReason::DuplicateHostname);
    }

    #[test]
    fn mixed_case_batch_with_duplicate() {
        // "+h1,ADD", "+h1,REMOVE", "+h2,add" → accept (h1, ADD), reject dup,
        // accept (h2, ADD) via case normalisation in the parser.
        let raw = parse_diff(["+h1,ADD", "+h1,REMOVE", "+h2,add"]);
        let validation = validate_entries(raw);

        assert_eq!(validation.accepted.len(), 2);
        assert_eq!(validation.accepted[0].hostname, Hostname::from("h1"));
        assert_eq!(validation.accepted[0].status, ChangeStatus::Add);
        assert_eq!(validation.accepted[1].hostname, Hostname::from("h2"));
        assert_eq!(validation.accepted[1].status, ChangeStatus::Add);

        assert_eq!(validation.rejected.len(), 1);
        assert_eq!(validation.rejected[0].hostname, Hostname::from("h1"));
        assert_eq!(validation.rejected[0].reason, RejectReason::DuplicateHostname);
    }
}
