//! `hostsync check` — offline diff inspection: parse + validate, print a
//! table or JSON. No journals, no git, no database.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use hostsync_core::ChangeEntry;
use hostsync_diff::{parse_diff, validate_entries, Validation};

/// Arguments for `hostsync check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Diff file to inspect; reads stdin when omitted.
    pub diff_file: Option<PathBuf>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let text = match &self.diff_file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            None => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read diff from stdin")?;
                buf
            }
        };

        let validation = validate_entries(parse_diff(text.lines()));
        if self.json {
            print_json(&validation)?;
        } else {
            print_table(&validation);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct CheckReportJson<'a> {
    summary: CheckSummaryJson,
    accepted: &'a [ChangeEntry],
    rejected: Vec<RejectedJson>,
}

#[derive(Serialize)]
struct CheckSummaryJson {
    accepted: usize,
    rejected: usize,
}

#[derive(Serialize)]
struct RejectedJson {
    hostname: String,
    message: String,
}

fn print_json(validation: &Validation) -> Result<()> {
    let payload = CheckReportJson {
        summary: CheckSummaryJson {
            accepted: validation.accepted.len(),
            rejected: validation.rejected.len(),
        },
        accepted: &validation.accepted,
        rejected: validation
            .rejected
            .iter()
            .map(|r| RejectedJson {
                hostname: r.hostname.to_string(),
                message: r.journal_message(),
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize check JSON")?
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Table output
// ---------------------------------------------------------------------------

#[derive(Tabled)]
struct CheckTableRow {
    #[tabled(rename = "hostname")]
    hostname: String,
    #[tabled(rename = "verdict")]
    verdict: String,
    #[tabled(rename = "detail")]
    detail: String,
}

fn print_table(validation: &Validation) {
    if validation.is_empty() {
        println!("No change entries found in diff.");
        return;
    }

    println!(
        "{} accepted | {} rejected",
        validation.accepted.len().to_string().green(),
        validation.rejected.len().to_string().red(),
    );

    let rows: Vec<CheckTableRow> = validation
        .accepted
        .iter()
        .map(|entry| CheckTableRow {
            hostname: entry.hostname.to_string(),
            verdict: "ACCEPTED".to_string(),
            detail: entry.status.to_string(),
        })
        .chain(validation.rejected.iter().map(|rejection| CheckTableRow {
            hostname: rejection.hostname.to_string(),
            verdict: "REJECTED".to_string(),
            detail: rejection.journal_message(),
        }))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
