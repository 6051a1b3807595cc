use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// On-disk artifact flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// Checksummed, compressed container written by the model library.
    Native,
    /// Plain JSON model document from older exports.
    Legacy,
}

impl std::fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::Legacy => f.write_str("legacy"),
        }
    }
}

/// Where a loaded classifier came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSource {
    pub path: PathBuf,
    pub format: ArtifactFormat,
    pub strategy: String,
}

impl std::fmt::Display for ArtifactSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.path.display(), self.format, self.strategy)
    }
}

/// One decode attempt made by the artifact loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadAttempt {
    pub path: PathBuf,
    pub format: ArtifactFormat,
    pub strategy: String,
    pub succeeded: bool,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl LoadAttempt {
    pub fn success(path: PathBuf, format: ArtifactFormat, strategy: &str) -> Self {
        Self {
            path,
            format,
            strategy: strategy.to_string(),
            succeeded: true,
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failure(
        path: PathBuf,
        format: ArtifactFormat,
        strategy: &str,
        error: impl std::fmt::Display,
    ) -> Self {
        Self {
            path,
            format,
            strategy: strategy.to_string(),
            succeeded: false,
            error: Some(error.to_string()),
            timestamp: Utc::now(),
        }
    }
}
