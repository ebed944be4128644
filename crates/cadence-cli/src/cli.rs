//! Command handlers for the terminal front end
//!
//! The handlers never touch the run directly: they apply control actions to
//! the [`SequencerController`] and render the snapshots it emits.

use std::sync::Arc;

use anyhow::{Context, Result};
use cadence_core::{
    display::{ApproxDuration, Steps},
    Action, Snapshot, SequencerController, Transition,
};
use jiff::Timestamp;
use log::{info, warn};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::{error::RecvError, Receiver},
    task::JoinHandle,
};

use crate::renderer::TerminalRenderer;

const HELP: &str = "\
## Commands

- `play` / `p`: start or resume the run
- `pause`: stop at the current step
- `toggle` / `t` / empty line: play or pause (ignored once finished)
- `reset` / `r`: back to the first step
- `status` / `s`: show every step
- `quit` / `q`: leave

";

/// What the interactive loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Cli {
    controller: SequencerController,
    renderer: Arc<TerminalRenderer>,
}

impl Cli {
    pub fn new(controller: SequencerController, renderer: TerminalRenderer) -> Self {
        Self {
            controller,
            renderer: Arc::new(renderer),
        }
    }

    /// Lists the configured sequence without playing it.
    pub async fn list_steps(&self) -> Result<()> {
        let snapshot = self.controller.snapshot().await;
        if self.renderer.is_json() {
            return self.renderer.render_json(&snapshot.steps);
        }

        self.renderer.render(&format!(
            "# Steps ({} steps, one every {})\n\n{}",
            snapshot.len(),
            ApproxDuration(snapshot.interval_ms),
            Steps(&snapshot.steps)
        ))
    }

    /// Plays the sequence and renders every transition until it finishes.
    pub async fn run_to_completion(&self) -> Result<()> {
        let mut events = self.controller.subscribe();
        self.controller.play().await;

        loop {
            match events.recv().await {
                Ok(snapshot) => {
                    render_transition(&self.renderer, &snapshot)?;
                    if snapshot.is_finished() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Renderer fell behind by {skipped} snapshots");
                }
                Err(RecvError::Closed) => break,
            }
        }

        info!("Run finished");
        let snapshot = self.controller.snapshot().await;
        self.renderer.render(&format!("\n{snapshot}"))
    }

    /// Reads commands from stdin until `quit`, end of input or Ctrl-C.
    pub async fn interactive(&self) -> Result<()> {
        self.renderer.render(HELP)?;
        self.render_snapshot(&self.controller.snapshot().await)?;

        let printer = spawn_printer(Arc::clone(&self.renderer), self.controller.subscribe());
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read command")? else {
                        info!("End of input");
                        break;
                    };
                    if self.handle_command(&line).await? == Flow::Quit {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received Ctrl-C, leaving");
                    break;
                }
            }
        }

        printer.abort();
        Ok(())
    }

    async fn handle_command(&self, line: &str) -> Result<Flow> {
        let command = line.trim().to_lowercase();
        match command.as_str() {
            "quit" | "q" | "exit" => return Ok(Flow::Quit),
            "status" | "s" => {
                let snapshot = self.controller.snapshot().await;
                self.render_snapshot(&snapshot)?;
            }
            "help" | "h" | "?" => self.renderer.render(HELP)?,
            other => match other.parse::<Action>() {
                Ok(action) => {
                    info!("Applying {action}");
                    self.controller.apply(action).await;
                }
                Err(_) => self.renderer.render(&format!(
                    "Unknown command: `{other}`. Type `help` for the list of commands.\n"
                ))?,
            },
        }
        Ok(Flow::Continue)
    }

    fn render_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        if self.renderer.is_json() {
            return self.renderer.render_json(snapshot);
        }
        self.renderer.render(&snapshot.to_string())
    }
}

/// Renders one emitted snapshot as an event log line, or as JSON.
fn render_transition(renderer: &TerminalRenderer, snapshot: &Snapshot) -> Result<()> {
    if renderer.is_json() {
        return renderer.render_json(snapshot);
    }
    let now = Timestamp::now();
    renderer.render(&Transition::new(&now, snapshot).to_string())
}

fn spawn_printer(renderer: Arc<TerminalRenderer>, mut events: Receiver<Snapshot>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(snapshot) => {
                    if let Err(e) = render_transition(&renderer, &snapshot) {
                        warn!("Failed to render snapshot: {e:#}");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Renderer fell behind by {skipped} snapshots");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
