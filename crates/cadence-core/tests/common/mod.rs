use std::{path::PathBuf, time::Duration};

use cadence_core::{SequencerBuilder, SequencerController, StepDefinition};
use tempfile::TempDir;

/// Helper function to create a test sequencer with `len` numbered steps
pub async fn create_test_sequencer(len: usize, interval: Duration) -> SequencerController {
    let steps = (1..=len)
        .map(|i| StepDefinition::new(format!("Step {i}"), format!("Description {i}")))
        .collect();
    SequencerBuilder::new()
        .with_steps(steps)
        .with_interval(interval)
        .build()
        .await
        .expect("Failed to create sequencer")
}

/// Helper function to write a steps file into a fresh temporary directory
pub fn write_steps_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("steps.json");
    std::fs::write(&path, contents).expect("Failed to write steps file");
    (temp_dir, path)
}
