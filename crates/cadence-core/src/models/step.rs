//! Step model definition and related functionality.

use serde::{Deserialize, Serialize};

use super::StepStatus;

/// Static description of one step, as supplied by configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepDefinition {
    /// Brief title/summary of the step
    pub title: String,

    /// One-line description of what happens during the step
    #[serde(default)]
    pub description: String,
}

impl StepDefinition {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Represents one unit of simulated work within a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Step {
    /// Stable identifier, 1-based by position in the sequence
    pub id: u64,

    /// Brief title/summary of the step
    pub title: String,

    /// One-line description of what happens during the step
    pub description: String,

    /// Current status of the step
    pub status: StepStatus,
}

impl Step {
    /// Builds the pending step at `index` from its definition.
    pub(crate) fn pending(index: usize, definition: &StepDefinition) -> Self {
        Self {
            id: index as u64 + 1,
            title: definition.title.clone(),
            description: definition.description.clone(),
            status: StepStatus::Pending,
        }
    }
}
