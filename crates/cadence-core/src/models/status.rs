//! Status enumerations for steps and runs.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of step statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Step has not been reached yet
    #[default]
    Pending,

    /// Step is being executed
    Active,

    /// Step has been executed
    Completed,
}

impl FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(StepStatus::Pending),
            "active" | "running" => Ok(StepStatus::Active),
            "completed" | "done" => Ok(StepStatus::Completed),
            _ => Err(format!("Invalid step status: {s}")),
        }
    }
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::Active => "active",
            StepStatus::Completed => "completed",
        }
    }

    /// Derives the status of the step at `index` once `cursor` ticks have
    /// fired in a sequence of `len` steps.
    ///
    /// The step at `cursor - 1` is active, everything before it is completed
    /// and everything after it is pending. A finished run (`cursor >= len`)
    /// has every step completed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cadence_core::models::StepStatus;
    ///
    /// assert_eq!(StepStatus::derive(0, 0, 3), StepStatus::Pending);
    /// assert_eq!(StepStatus::derive(0, 1, 3), StepStatus::Active);
    /// assert_eq!(StepStatus::derive(0, 2, 3), StepStatus::Completed);
    /// assert_eq!(StepStatus::derive(2, 3, 3), StepStatus::Completed);
    /// ```
    pub fn derive(index: usize, cursor: usize, len: usize) -> Self {
        if cursor >= len || index + 1 < cursor {
            StepStatus::Completed
        } else if index + 1 == cursor {
            StepStatus::Active
        } else {
            StepStatus::Pending
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Icons Used
    /// - `✓ Done` - Checkmark for completed steps
    /// - `⟳ Running` - Spinner for the active step
    /// - `○ Pending` - Circle for pending steps
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cadence_core::models::StepStatus;
    ///
    /// assert_eq!(StepStatus::Completed.with_icon(), "✓ Done");
    /// assert_eq!(StepStatus::Active.with_icon(), "⟳ Running");
    /// assert_eq!(StepStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            StepStatus::Completed => "✓ Done",
            StepStatus::Active => "⟳ Running",
            StepStatus::Pending => "○ Pending",
        }
    }
}

/// Lifecycle state of a whole run, as opposed to a single step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// Fresh run, nothing has been played since construction or reset
    #[default]
    Idle,

    /// A tick is scheduled
    Running,

    /// Stopped by `pause` before reaching the end
    Paused,

    /// Every tick has fired
    Finished,
}

impl FromStr for RunState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(RunState::Idle),
            "running" => Ok(RunState::Running),
            "paused" => Ok(RunState::Paused),
            "finished" => Ok(RunState::Finished),
            _ => Err(format!("Invalid run state: {s}")),
        }
    }
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Finished => "finished",
        }
    }

    /// Whether a tick is currently scheduled in this state.
    pub fn is_playing(&self) -> bool {
        matches!(self, RunState::Running)
    }
}
