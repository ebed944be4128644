//! Control actions a caller can apply to a sequencer.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the caller-facing controls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Play,
    Pause,
    Reset,
    /// Pause while running, play otherwise
    Toggle,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "play" | "p" => Ok(Action::Play),
            "pause" => Ok(Action::Pause),
            "reset" | "r" => Ok(Action::Reset),
            "toggle" | "t" | "" => Ok(Action::Toggle),
            _ => Err(format!("Invalid action: {s}")),
        }
    }
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Play => "play",
            Action::Pause => "pause",
            Action::Reset => "reset",
            Action::Toggle => "toggle",
        }
    }
}
