//! Addition-line extraction from unified-diff text.
//!
//! A line qualifies only when it starts with a single `+`; `++` prefixes are
//! diff metadata (`+++ b/...`) and are skipped. The payload after the marker
//! must split into exactly two comma-separated fields: hostname and status.
//! Anything else is silently skipped — malformed inventory edits are not
//! worth aborting the batch over, they surface when the validator rejects
//! what did parse.

/// One raw `(hostname, status-text)` pair lifted from an addition line.
///
/// `status_text` is already trimmed and upper-cased; the validator decides
/// whether it names a real status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub hostname: String,
    pub status_text: String,
}

/// Extract raw entries from the lines of a unified diff restricted to the
/// inventory CSV.
pub fn parse_diff<'a, I>(lines: I) -> Vec<RawEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut entries = Vec::new();
    for line in lines {
        if !line.starts_with('+') || line.starts_with("++") {
            continue;
        }
        let payload = &line[1..];

        let mut fields = payload.split(',');
        let (Some(first), Some(second), None) = (fields.next(), fields.next(), fields.next())
        else {
            tracing::debug!("skipping malformed addition line: {line:?}");
            continue;
        };

        let hostname = first.trim();
        if hostname.is_empty() {
            tracing::debug!("skipping addition line with empty hostname: {line:?}");
            continue;
        }

        entries.push(RawEntry {
            hostname: hostname.to_string(),
            status_text: second.trim().to_uppercase(),
        });
    }
    entries
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
