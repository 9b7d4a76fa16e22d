//! # Epistemo Sandbox
//!
//! Entry point for the `epistemo` binary. Parses CLI arguments, initializes
//! logging, replays a scenario (from a file or the built-in demo) against a
//! fresh in-memory ledger, and prints the final ledger state as JSON on
//! stdout.

mod cli;
mod logging;
mod script;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Commands, EpistemoCli, RunArgs};
use logging::LogFormat;
use script::Scenario;

fn main() -> Result<()> {
    let args = EpistemoCli::parse();
    logging::init_logging(&args.log_level, LogFormat::from_str_lossy(&args.log_format));

    match args.command {
        Commands::Run(run) => run_script(run),
        Commands::Demo => run_demo(),
    }
}

/// Replays a scenario file and prints the resulting ledger state.
fn run_script(args: RunArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read scenario file: {}", args.script.display()))?;
    let scenario = Scenario::from_json(&text)?;

    tracing::info!(
        script = %args.script.display(),
        ops = scenario.ops.len(),
        keep_going = args.keep_going,
        "replaying scenario"
    );

    let ledger = scenario.run(args.keep_going)?;
    print_state(&ledger)
}

/// Replays the built-in demo scenario.
fn run_demo() -> Result<()> {
    tracing::info!("replaying built-in demo scenario");
    let ledger = script::demo_scenario().run(false)?;
    print_state(&ledger)
}

fn print_state(ledger: &epistemo_ledger::Ledger) -> Result<()> {
    let json = serde_json::to_string_pretty(ledger).context("failed to serialize ledger state")?;
    println!("{json}");
    Ok(())
}
