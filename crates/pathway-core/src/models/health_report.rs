use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Always "healthy": the process is up even in degraded mode.
    pub status: String,
    pub model_loaded: bool,
    pub model_features: Option<usize>,
    pub model_source: Option<String>,
    pub load_attempts: usize,
    pub version: String,
}
