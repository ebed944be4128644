//! Acknowledgement messages for applied control actions.

use std::fmt;

use crate::models::{Action, Snapshot};

/// Confirms that a control action was applied and reports where the run
/// stands afterwards.
///
/// Actions never fail; an action that was a no-op (for example `pause` while
/// idle) is still acknowledged with the unchanged state.
pub struct Acknowledgement<'a> {
    pub action: Action,
    pub snapshot: &'a Snapshot,
}

impl<'a> Acknowledgement<'a> {
    pub fn new(action: Action, snapshot: &'a Snapshot) -> Self {
        Self { action, snapshot }
    }
}

impl<'a> fmt::Display for Acknowledgement<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Acknowledged: {}. Sequence is {} ({}/{}).",
            self.action,
            self.snapshot.state,
            self.snapshot.cursor,
            self.snapshot.len()
        )
    }
}
