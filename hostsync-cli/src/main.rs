//! Hostsync — host inventory change watcher CLI.
//!
//! # Usage
//!
//! ```text
//! hostsync [--env-file env_dynamic] run [--dry-run]
//! hostsync [--env-file env_dynamic] partition [--dry-run]
//! hostsync check [diff-file] [--json]
//! ```
//!
//! `run` processes the inventory diff end to end (slot allocation + state
//! apply + publish); `partition` only routes validated entries into the
//! ADD/REMOVE host logs for a downstream consumer; `check` inspects diff
//! text offline with no side effects.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{check::CheckArgs, partition::PartitionArgs, run::RunArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "hostsync",
    version,
    about = "Watch a version-controlled host inventory and act on its changes",
    long_about = None,
)]
struct Cli {
    /// Path to the KEY=VALUE environment file.
    #[arg(long, global = true, default_value = "env_dynamic")]
    env_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Process inventory changes: allocate slots and apply state per new host.
    Run(RunArgs),

    /// Route validated changes into the ADD/REMOVE host logs.
    Partition(PartitionArgs),

    /// Parse and validate diff text offline; no side effects.
    Check(CheckArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => args.run(&cli.env_file),
        Commands::Partition(args) => args.run(&cli.env_file),
        Commands::Check(args) => args.run(),
    }
}
