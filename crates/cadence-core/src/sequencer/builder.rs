//! Builder for creating and configuring SequencerController instances.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use log::{debug, info};

use super::{SequencerController, DEFAULT_INTERVAL};
use crate::{
    error::{Result, SequencerError},
    models::StepDefinition,
    workflow::default_workflow,
};

/// Builder for creating and configuring SequencerController instances.
#[derive(Debug, Clone, Default)]
pub struct SequencerBuilder {
    steps: Option<Vec<StepDefinition>>,
    steps_file: Option<PathBuf>,
    interval: Option<Duration>,
}

impl SequencerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the given steps, ignoring any steps file.
    pub fn with_steps(mut self, steps: Vec<StepDefinition>) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Sets a JSON steps file to load the sequence from.
    ///
    /// If neither steps nor a steps file are given, the builder looks for
    /// `$XDG_CONFIG_HOME/cadence/steps.json` and falls back to the built-in
    /// workflow when that file does not exist.
    pub fn with_steps_file<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.steps_file = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the fixed delay between two ticks.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Builds an idle controller.
    ///
    /// # Errors
    ///
    /// Returns `SequencerError::InvalidInput` for an empty sequence or a zero
    /// interval, `SequencerError::FileSystem` if a steps file cannot be read
    /// and `SequencerError::Serialization` if it is not a valid JSON array of
    /// steps.
    pub async fn build(self) -> Result<SequencerController> {
        let interval = self.interval.unwrap_or(DEFAULT_INTERVAL);
        if interval.is_zero() {
            return Err(SequencerError::invalid_input("interval")
                .with_reason("tick interval must be greater than zero"));
        }

        let definitions = self.resolve_steps().await?;
        if definitions.is_empty() {
            return Err(SequencerError::invalid_input("steps")
                .with_reason("sequence must contain at least one step"));
        }

        info!(
            "sequencer ready with {} steps every {}ms",
            definitions.len(),
            interval.as_millis()
        );
        Ok(SequencerController::new(definitions, interval))
    }

    async fn resolve_steps(self) -> Result<Vec<StepDefinition>> {
        if let Some(steps) = self.steps {
            return Ok(steps);
        }
        if let Some(path) = self.steps_file {
            return load_steps_file(&path).await;
        }
        if let Some(path) = Self::default_steps_path() {
            debug!("loading steps from {}", path.display());
            return load_steps_file(&path).await;
        }
        Ok(default_workflow())
    }

    /// Returns the XDG steps file if one exists.
    fn default_steps_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("cadence").find_config_file("steps.json")
    }
}

/// Reads a JSON array of `{ "title": .., "description": .. }` objects.
pub async fn load_steps_file(path: &Path) -> Result<Vec<StepDefinition>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SequencerError::file_system(path, e))?;
    Ok(serde_json::from_str(&contents)?)
}
