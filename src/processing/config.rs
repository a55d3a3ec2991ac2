use std::path::Path;
use std::time::Duration;
use serde::{Serialize, Deserialize};
use crate::utils::{PlaceholderError, PlaceholderResult};

/// Tunables for the sequential processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Pause before publishing each completed placeholder, in milliseconds
    pub completion_delay_ms: u64,
    /// Report a progress record for every task transition, not just batch start/end
    pub emit_task_events: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            completion_delay_ms: 0,
            emit_task_events: true,
        }
    }
}

impl ProcessorConfig {
    pub fn with_completion_delay(mut self, delay: Duration) -> Self {
        self.completion_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    /// Loads a config from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> PlaceholderResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PlaceholderError::io(format!("Cannot read config {}: {}", path.display(), e)))?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> PlaceholderResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| PlaceholderError::io(format!("Invalid processor config: {}", e)))
    }
}
