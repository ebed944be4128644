//! Read-only views of a run handed out to consumers.

use serde::{Deserialize, Serialize};

use super::{RunState, Step, StepStatus};
use crate::error::InvariantViolation;

/// Immutable point-in-time view of a run.
///
/// Every transition of the controller produces a fresh snapshot; consumers
/// own their copy and can never reach back into the controller's state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    /// Every step of the sequence, in order
    pub steps: Vec<Step>,

    /// Number of ticks fired in this run, in `[0, steps.len()]`
    pub cursor: usize,

    /// Whether a tick is currently scheduled
    pub is_playing: bool,

    /// Lifecycle state of the run
    pub state: RunState,

    /// Fixed delay between ticks, in milliseconds
    pub interval_ms: u64,
}

impl Snapshot {
    /// Number of steps in the sequence.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the sequence has no steps. Never true for a built sequencer.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.state == RunState::Finished
    }

    /// Whether the play control is enabled.
    ///
    /// A finished run keeps the play control disabled until it is reset,
    /// even though `play` itself would restart it.
    pub fn can_play(&self) -> bool {
        !self.is_playing && !self.is_finished()
    }

    /// The step currently marked active, if any.
    pub fn active_step(&self) -> Option<&Step> {
        self.steps
            .iter()
            .find(|step| step.status == StepStatus::Active)
    }

    pub fn completed_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.status == StepStatus::Completed)
            .count()
    }

    /// Total simulated run time for the whole sequence.
    pub fn total_duration_ms(&self) -> u64 {
        self.interval_ms.saturating_mul(self.steps.len() as u64)
    }

    /// Checks the prefix-completed / single-active / suffix-pending shape
    /// and the consistency of cursor, state and play flag.
    ///
    /// Returns the first violation found.
    pub fn check_invariant(&self) -> Result<(), InvariantViolation> {
        let len = self.steps.len();
        if self.cursor > len {
            return Err(InvariantViolation::CursorOutOfRange {
                cursor: self.cursor,
                len,
            });
        }

        for (index, step) in self.steps.iter().enumerate() {
            let expected = StepStatus::derive(index, self.cursor, len);
            if step.status != expected {
                return Err(InvariantViolation::UnexpectedStatus {
                    index,
                    expected,
                    found: step.status,
                });
            }
        }

        let consistent = match self.state {
            RunState::Idle => self.cursor == 0 && !self.is_playing,
            RunState::Running => self.cursor < len && self.is_playing,
            RunState::Paused => self.cursor < len && !self.is_playing,
            RunState::Finished => self.cursor == len && !self.is_playing,
        };
        if !consistent {
            return Err(InvariantViolation::StateMismatch {
                state: self.state,
                cursor: self.cursor,
                is_playing: self.is_playing,
            });
        }

        Ok(())
    }
}
