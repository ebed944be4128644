//! Collection wrapper types for displaying groups of steps.

use std::fmt;

use crate::models::Step;

/// Newtype wrapper for displaying a list of steps.
///
/// Handles empty lists gracefully.
///
/// # Examples
///
/// ```rust
/// use cadence_core::{
///     display::Steps,
///     models::{Step, StepStatus},
/// };
///
/// let steps = vec![Step {
///     id: 1,
///     title: "Task Dispatched".to_string(),
///     description: "User requests web search".to_string(),
///     status: StepStatus::Pending,
/// }];
///
/// let output = format!("{}", Steps(&steps));
/// assert!(output.contains("### 1. Task Dispatched (○ Pending)"));
/// ```
pub struct Steps<'a>(pub &'a [Step]);

impl<'a> Steps<'a> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a> fmt::Display for Steps<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No steps configured.");
        }

        for step in self.0 {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}
