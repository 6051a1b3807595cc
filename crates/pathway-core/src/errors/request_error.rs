//! Client input errors. Always surfaced as HTTP 400.

use super::error_code::{self, PathwayErrorCode};

/// Rejections produced by request validation, before the classifier runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("No data provided. Please send JSON data in the request body.")]
    NoData,

    #[error("Missing required features: {}", .0.join(", "))]
    MissingFeatures(Vec<String>),

    #[error("Feature '{feature}' must be a number. Got: {got}")]
    WrongType { feature: String, got: String },
}

impl PathwayErrorCode for RequestError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoData => error_code::NO_DATA,
            Self::MissingFeatures(_) => error_code::MISSING_FEATURES,
            Self::WrongType { .. } => error_code::INVALID_FEATURE_TYPE,
        }
    }
}
