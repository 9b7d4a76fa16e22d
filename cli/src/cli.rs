//! # CLI Interface
//!
//! Command-line argument structure for the `epistemo` sandbox binary,
//! defined with `clap` derive. Two subcommands: `run` replays a scenario
//! file against a fresh in-memory ledger, `demo` replays a built-in
//! issuance/collateral lifecycle.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Epistemo ledger sandbox.
///
/// Replays scripted sequences of ledger operations (issue, revoke,
/// collateral grant/burn/return) against an in-memory ledger and prints the
/// resulting state as JSON.
#[derive(Parser, Debug)]
#[command(
    name = "epistemo",
    about = "Epistemo non-transferable token ledger sandbox",
    version,
    propagate_version = true
)]
pub struct EpistemoCli {
    /// Default log level when `RUST_LOG` is not set.
    #[arg(long, env = "EPISTEMO_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Log output format: "pretty" or "json".
    #[arg(long, env = "EPISTEMO_LOG_FORMAT", default_value = "pretty", global = true)]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the sandbox binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a scenario file against a fresh ledger.
    Run(RunArgs),
    /// Replay the built-in demo scenario.
    Demo,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the scenario file (JSON).
    pub script: PathBuf,

    /// Keep applying operations after a rejection instead of stopping at
    /// the first one. Rejections are logged either way.
    #[arg(long)]
    pub keep_going: bool,
}
