//! Top-level error aggregating every subsystem via `From` conversions.

use super::error_code::{self, PathwayErrorCode};
use super::{ConfigError, InferenceError, ModelError, RequestError};

/// Errors that can cross crate boundaries in Pathway.
#[derive(Debug, thiserror::Error)]
pub enum PathwayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("Model not loaded. The model file may be missing or incompatible. Check server logs for details.")]
    ModelUnavailable,
}

impl PathwayErrorCode for PathwayError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Model(e) => e.error_code(),
            Self::Request(e) => e.error_code(),
            Self::Inference(e) => e.error_code(),
            Self::ModelUnavailable => error_code::MODEL_UNAVAILABLE,
        }
    }
}

pub type PathwayResult<T> = Result<T, PathwayError>;
