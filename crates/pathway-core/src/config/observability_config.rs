use serde::{Deserialize, Serialize};

use super::defaults;

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub log_level: Option<String>,
    /// Emit JSON lines instead of human-readable output.
    pub json_logs: Option<bool>,
}

impl ObservabilityConfig {
    pub fn effective_log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(defaults::DEFAULT_LOG_LEVEL)
    }

    pub fn effective_json_logs(&self) -> bool {
        self.json_logs.unwrap_or(defaults::DEFAULT_JSON_LOGS)
    }
}
