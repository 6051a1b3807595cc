//! Model artifact configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Where to look for the model artifact and how to decode it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ModelConfig {
    /// Explicit model directory. When unset the directory is discovered
    /// relative to the running executable.
    pub dir: Option<String>,
    /// Native artifact file name. Default: "dropout_model_improved.pwm".
    pub native_file: Option<String>,
    /// Legacy artifact file name. Default: "dropout_model_improved.json".
    pub legacy_file: Option<String>,
    /// Legacy decode strategies in priority order.
    /// Default: latin1, bytes, default, compat.
    #[serde(default)]
    pub strategies: Vec<String>,
}

impl ModelConfig {
    pub fn effective_native_file(&self) -> &str {
        self.native_file
            .as_deref()
            .unwrap_or(defaults::DEFAULT_NATIVE_FILE)
    }

    pub fn effective_legacy_file(&self) -> &str {
        self.legacy_file
            .as_deref()
            .unwrap_or(defaults::DEFAULT_LEGACY_FILE)
    }

    pub fn effective_strategies(&self) -> Vec<String> {
        if self.strategies.is_empty() {
            defaults::DEFAULT_LEGACY_STRATEGIES
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            self.strategies.clone()
        }
    }
}
