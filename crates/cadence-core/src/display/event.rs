//! One-line rendering of a transition for event logs.

use std::fmt;

use jiff::Timestamp;

use super::datetime::LocalTime;
use crate::models::{RunState, Snapshot};

/// A snapshot stamped with the time it was observed.
pub struct Transition<'a> {
    pub at: &'a Timestamp,
    pub snapshot: &'a Snapshot,
}

impl<'a> Transition<'a> {
    pub fn new(at: &'a Timestamp, snapshot: &'a Snapshot) -> Self {
        Self { at, snapshot }
    }
}

impl<'a> fmt::Display for Transition<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot;
        write!(
            f,
            "- `{}` **{}** {}/{}",
            LocalTime(self.at),
            snapshot.state,
            snapshot.cursor,
            snapshot.len()
        )?;

        match (snapshot.state, snapshot.active_step()) {
            (RunState::Finished, _) => writeln!(f, " all steps done"),
            (_, Some(step)) => writeln!(f, " {} {}", step.status.with_icon(), step.title),
            (_, None) => writeln!(f),
        }
    }
}
