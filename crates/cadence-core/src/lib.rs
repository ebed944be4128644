//! Core library for the Cadence step sequencer.
//!
//! This crate provides a timed step-sequencer: an ordered list of steps that
//! is "executed" one step per fixed tick, under caller control through
//! `play`, `pause` and `reset`. Nothing is actually run; the sequencer
//! narrates a pipeline by moving each step from pending to active to
//! completed.
//!
//! # Architecture
//!
//! - **Controller** ([`sequencer`]): Owns the live run and its single tick
//!   timer, applies control actions and emits a [`Snapshot`] after every
//!   transition
//! - **Domain Models** ([`models`]): Steps, statuses and snapshots, with the
//!   pure status derivation shared by the controller and invariant checks
//! - **Display** ([`display`]): Markdown formatting for terminals and MCP
//!   clients
//!
//! # Quick Start
//!
//! ```rust
//! use cadence_core::SequencerBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Uses the built-in workflow at the default 1.5s interval
//! let controller = SequencerBuilder::new().build().await?;
//!
//! controller.play().await;
//! let snapshot = controller.snapshot().await;
//! println!("{}", snapshot);
//!
//! controller.pause().await;
//! controller.reset().await;
//! # Ok(())
//! # }
//! ```

pub mod display;
pub mod error;
pub mod models;
pub mod sequencer;
pub mod workflow;

// Re-export commonly used types
pub use display::{Acknowledgement, Steps, Transition};
pub use error::{InvariantViolation, Result, SequencerError};
pub use models::{Action, RunState, Snapshot, Step, StepDefinition, StepStatus};
pub use sequencer::{SequencerBuilder, SequencerController, DEFAULT_INTERVAL};
pub use workflow::default_workflow;
