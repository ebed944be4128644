use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Timed step-sequencer for narrating multi-step pipelines
///
/// Cadence walks an ordered list of steps one tick at a time, moving each
/// step from pending to running to done. Without a subcommand it starts an
/// interactive session where the run is controlled with play, pause and
/// reset commands typed on stdin.
#[derive(Parser)]
#[command(version, about, name = "cad")]
pub struct Args {
    /// JSON file with the step sequence. Defaults to
    /// $XDG_CONFIG_HOME/cadence/steps.json, then the built-in workflow
    #[arg(long, global = true)]
    pub steps_file: Option<PathBuf>,

    /// Delay between two ticks, in milliseconds
    #[arg(
        long,
        global = true,
        default_value_t = 1500,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_ms: u64,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print snapshots as JSON lines instead of markdown
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Cadence CLI
#[derive(Subcommand)]
pub enum Commands {
    /// List the configured steps
    #[command(aliases = ["ls", "l"])]
    Steps,
    /// Play the sequence unattended until it finishes
    #[command(alias = "r")]
    Run,
    /// Control the sequence interactively from stdin
    #[command(alias = "d")]
    Demo,
    /// Start the MCP server
    Serve,
}
