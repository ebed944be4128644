//! Data models for step sequences and runs.
//!
//! This module contains the domain models handed between the sequencer and
//! its consumers. Display implementations for these models live in
//! [`crate::display::models`] so that data structures stay free of
//! presentation logic.
//!
//! # Status Derivation
//!
//! A step's status is never stored independently of the run's cursor: it is
//! always recomputed by [`StepStatus::derive`] from the step's index, the
//! number of ticks fired and the length of the sequence. This keeps every
//! [`Snapshot`] in the prefix-completed / single-active / suffix-pending shape
//! that [`Snapshot::check_invariant`] verifies.
//!
//! # Examples
//!
//! ```rust
//! use cadence_core::models::{RunState, Step, StepStatus, Snapshot};
//!
//! let snapshot = Snapshot {
//!     steps: vec![Step {
//!         id: 1,
//!         title: "Task Dispatched".to_string(),
//!         description: "User requests web search".to_string(),
//!         status: StepStatus::Active,
//!     }],
//!     cursor: 1,
//!     is_playing: true,
//!     state: RunState::Running,
//!     interval_ms: 1500,
//! };
//! assert!(snapshot.check_invariant().is_err());
//! ```

pub mod action;
pub mod snapshot;
pub mod status;
pub mod step;


pub use action::Action;
pub use snapshot::Snapshot;
pub use status::{RunState, StepStatus};
pub use step::{Step, StepDefinition};
