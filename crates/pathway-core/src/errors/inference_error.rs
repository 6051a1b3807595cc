//! Failures between vectorization and response building.

use super::error_code::{self, PathwayErrorCode};

/// Errors raised while running or interpreting the classifier.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("feature count mismatch: model expects {expected}, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error("probability index {index} out of range for {len} classes")]
    ProbabilityIndexOutOfRange { index: i64, len: usize },

    #[error("confidence {value} is outside [0, 1]")]
    ConfidenceOutOfRange { value: f64 },

    #[error("classifier does not support {capability}")]
    UnsupportedCapability { capability: String },

    #[error("{reason}")]
    ClassifierFailed { reason: String },
}

impl PathwayErrorCode for InferenceError {
    fn error_code(&self) -> &'static str {
        error_code::INFERENCE_ERROR
    }
}
