//! Display formatting functions and wrapper types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrappers in this module add context such as timestamps or the action
//! that produced a snapshot.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Snapshot     │    │    Wrappers     │    │    Markdown     │
//! │  (Step, State)  │───▶│  (Transition,   │───▶│ (Terminal/MCP)  │
//! │                 │    │ Acknowledgement)│    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Step list wrapper ([`Steps`])
//! - [`ack`]: Confirmation of applied control actions
//! - [`event`]: Timestamped one-line transitions for event logs
//! - [`datetime`]: Time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use cadence_core::{
//!     display::Acknowledgement,
//!     models::{Action, RunState, Snapshot},
//! };
//!
//! let snapshot = Snapshot {
//!     steps: vec![],
//!     cursor: 0,
//!     is_playing: true,
//!     state: RunState::Running,
//!     interval_ms: 1500,
//! };
//! let ack = Acknowledgement::new(Action::Play, &snapshot);
//! assert!(ack.to_string().contains("Sequence is running"));
//! ```

pub mod ack;
pub mod collections;
pub mod datetime;
pub mod event;
pub mod models;

pub use ack::Acknowledgement;
pub use collections::Steps;
pub use datetime::{ApproxDuration, LocalTime};
pub use event::Transition;
