//! The mutable run state owned by a controller.

use log::debug;

use crate::models::{RunState, Snapshot, Step, StepDefinition, StepStatus};

/// Steps, cursor and lifecycle state of one run.
///
/// Only [`super::SequencerController`] holds one of these; a reset replaces
/// the whole value instead of patching it.
#[derive(Debug, Clone)]
pub(crate) struct SequenceRun {
    steps: Vec<Step>,
    cursor: usize,
    state: RunState,
}

impl SequenceRun {
    pub(crate) fn new(definitions: &[StepDefinition]) -> Self {
        Self {
            steps: definitions
                .iter()
                .enumerate()
                .map(|(index, definition)| Step::pending(index, definition))
                .collect(),
            cursor: 0,
            state: RunState::Idle,
        }
    }

    pub(crate) fn state(&self) -> RunState {
        self.state
    }

    pub(crate) fn start(&mut self) {
        self.state = RunState::Running;
    }

    pub(crate) fn stop(&mut self) {
        self.state = RunState::Paused;
    }

    /// Fires one tick. Returns `true` while further ticks remain.
    pub(crate) fn advance(&mut self) -> bool {
        if self.state != RunState::Running {
            return false;
        }

        let len = self.steps.len();
        if self.cursor < len {
            self.cursor += 1;
        }
        for (index, step) in self.steps.iter_mut().enumerate() {
            step.status = StepStatus::derive(index, self.cursor, len);
        }
        debug!("tick advanced cursor to {}/{len}", self.cursor);

        if self.cursor == len {
            self.state = RunState::Finished;
            false
        } else {
            true
        }
    }

    pub(crate) fn snapshot(&self, interval_ms: u64) -> Snapshot {
        Snapshot {
            steps: self.steps.clone(),
            cursor: self.cursor,
            is_playing: self.state.is_playing(),
            state: self.state,
            interval_ms,
        }
    }
}
