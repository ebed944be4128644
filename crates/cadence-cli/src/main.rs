//! Cadence CLI Application
//!
//! Command-line front end for the cadence step sequencer.

mod args;
mod cli;
mod mcp;
mod renderer;

use std::time::Duration;

use anyhow::{Context, Result};
use args::{Args, Commands};
use cadence_core::SequencerBuilder;
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, CadenceMcpServer};
use renderer::{OutputMode, TerminalRenderer};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        steps_file,
        interval_ms,
        no_color,
        json,
        command,
    } = Args::parse();

    let controller = SequencerBuilder::new()
        .with_steps_file(steps_file)
        .with_interval(Duration::from_millis(interval_ms))
        .build()
        .await
        .context("Failed to initialize sequencer")?;

    let renderer = TerminalRenderer::new(OutputMode::from_flags(no_color, json));

    info!("Cadence started");

    match command {
        Some(Steps) => Cli::new(controller, renderer).list_steps().await,
        Some(Run) => Cli::new(controller, renderer).run_to_completion().await,
        Some(Serve) => {
            info!("Starting Cadence MCP server");
            run_stdio_server(CadenceMcpServer::new(controller))
                .await
                .context("MCP server failed")
        }
        Some(Demo) | None => Cli::new(controller, renderer).interactive().await,
    }
}
