//! Display implementations for domain models.
//!
//! All implementations produce markdown so the same text works in the
//! terminal renderer and in MCP tool results.

use std::fmt;

use super::{collections::Steps, datetime::ApproxDuration};
use crate::models::{Action, RunState, Snapshot, Step, StepStatus};

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.id,
            self.title,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "# Sequence: {} ({}/{})",
            self.state,
            self.cursor,
            self.len()
        )?;
        writeln!(f)?;
        write!(f, "{}", Steps(&self.steps))?;

        if self.is_finished() {
            writeln!(
                f,
                "**Workflow complete!** Executed in ~{}",
                ApproxDuration(self.total_duration_ms())
            )?;
        }

        Ok(())
    }
}
