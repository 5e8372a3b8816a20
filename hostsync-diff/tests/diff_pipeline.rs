//! End-to-end parser/validator tests against real unified-diff text.
//!
//! Diffs are synthesized with `similar` from before/after CSV snapshots so
//! the parser sees the same hunk headers, context lines, and `+++` metadata
//! that `git diff` produces.

use hostsync_core::{ChangeStatus, Hostname};
use hostsync_diff::{parse_diff, validate_entries, RawEntry};
use rstest::rstest;
use similar::TextDiff;

fn unified(before: &str, after: &str) -> String {
    TextDiff::from_lines(before, after)
        .unified_diff()
        .header("a/hosts.csv", "b/hosts.csv")
        .context_radius(3)
        .to_string()
}

fn parse(text: &str) -> Vec<RawEntry> {
    parse_diff(text.lines())
}

// ---------------------------------------------------------------------------
// 1. Parser over synthesized diffs
// ---------------------------------------------------------------------------

#[test]
fn appended_rows_come_back_as_entries() {
    let before = "hostname,status\nweb00,ADD\n";
    let after = "hostname,status\nweb00,ADD\nweb01,ADD\ndb01,remove\n";
    let diff = unified(before, after);

    let entries = parse(&diff);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].hostname, "web01");
    assert_eq!(entries[0].status_text, "ADD");
    assert_eq!(entries[1].hostname, "db01");
    assert_eq!(entries[1].status_text, "REMOVE");
}

#[test]
fn removed_rows_and_header_metadata_are_ignored() {
    let before = "hostname,status\nweb00,ADD\nweb01,ADD\n";
    let after = "hostname,status\nweb00,ADD\n";
    let diff = unified(before, after);

    assert!(diff.contains("+++ b/hosts.csv"), "fixture sanity: {diff}");
    assert!(parse(&diff).is_empty(), "deletions must not produce entries");
}

#[test]
fn unchanged_snapshots_produce_no_entries() {
    let snapshot = "hostname,status\nweb00,ADD\n";
    assert!(parse(&unified(snapshot, snapshot)).is_empty());
}

#[rstest]
#[case("web02,ADD,eu-west\n", 0)] // three fields: skipped
#[case("web02\n", 0)] // one field: skipped
#[case("web02,ADD\n", 1)]
fn field_count_policy(#[case] added_row: &str, #[case] expected: usize) {
    let before = "hostname,status\n";
    let after = format!("hostname,status\n{added_row}");
    assert_eq!(parse(&unified(before, &after)).len(), expected);
}

// ---------------------------------------------------------------------------
// 2. Full pipeline
// ---------------------------------------------------------------------------

#[test]
fn pipeline_accepts_and_rejects_from_one_diff() {
    let before = "hostname,status\n";
    let after = "hostname,status\nweb01,ADD\nweb01,REMOVE\ndb01,DROP\ncache01, remove \n";
    let validation = validate_entries(parse(&unified(before, after)));

    let accepted: Vec<_> = validation
        .accepted
        .iter()
        .map(|e| (e.hostname.clone(), e.status))
        .collect();
    assert_eq!(
        accepted,
        vec![
            (Hostname::from("web01"), ChangeStatus::Add),
            (Hostname::from("cache01"), ChangeStatus::Remove),
        ]
    );

    assert_eq!(validation.rejected.len(), 2);
    let messages: Vec<_> = validation.rejected.iter().map(|r| r.journal_message()).collect();
    assert!(messages[0].contains("Duplicate hostname"), "got: {}", messages[0]);
    assert_eq!(
        messages[1],
        "db01,DROP #Please correct STATUS, it can be either ADD or REMOVE"
    );
}
