//! Artifact loading errors.
//!
//! These never reach a client. The loader records them per attempt and the
//! service starts in degraded mode instead.

use super::error_code::{self, PathwayErrorCode};

/// Errors raised while locating, decoding, or validating a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model directory not found: {path}")]
    ModelDirMissing { path: String },

    #[error("no model artifact found in {dir}")]
    ArtifactNotFound { dir: String },

    #[error("failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("not a native model container (bad magic bytes)")]
    BadMagic,

    #[error("unsupported native format version {found} (supported: {supported})")]
    UnsupportedVersion { found: u16, supported: u16 },

    #[error("checksum mismatch: expected {expected}, computed {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("truncated native container: {len} bytes")]
    Truncated { len: usize },

    #[error("decompression failed: {reason}")]
    Decompress { reason: String },

    #[error("{strategy} decoding failed: {reason}")]
    Decode { strategy: String, reason: String },

    #[error("invalid model: {reason}")]
    InvalidModel { reason: String },

    #[error("all {attempts} load strategies failed")]
    AllStrategiesFailed { attempts: usize },
}

impl ModelError {
    pub fn decode(strategy: &str, reason: impl std::fmt::Display) -> Self {
        Self::Decode {
            strategy: strategy.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidModel {
            reason: reason.into(),
        }
    }
}

impl PathwayErrorCode for ModelError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ModelDirMissing { .. } | Self::ArtifactNotFound { .. } => {
                error_code::ARTIFACT_NOT_FOUND
            }
            Self::Io { .. } => error_code::ARTIFACT_IO,
            Self::BadMagic
            | Self::ChecksumMismatch { .. }
            | Self::Truncated { .. }
            | Self::Decompress { .. } => error_code::ARTIFACT_CORRUPT,
            Self::UnsupportedVersion { .. } => error_code::ARTIFACT_VERSION,
            Self::Decode { .. } => error_code::DECODE_FAILED,
            Self::InvalidModel { .. } => error_code::INVALID_MODEL,
            Self::AllStrategiesFailed { .. } => error_code::MODEL_UNAVAILABLE,
        }
    }
}

pub type ModelResult<T> = Result<T, ModelError>;
