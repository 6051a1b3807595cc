//! PathwayErrorCode trait for structured log fields.

/// Every error enum implements this to expose a stable, machine-readable
/// code alongside its human-readable message.
pub trait PathwayErrorCode {
    /// Returns the error code string (e.g., "MODEL_UNAVAILABLE").
    fn error_code(&self) -> &'static str;

    /// Returns the tagged string form: `[ERROR_CODE] message`.
    fn tagged_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const ARTIFACT_NOT_FOUND: &str = "ARTIFACT_NOT_FOUND";
pub const ARTIFACT_IO: &str = "ARTIFACT_IO";
pub const ARTIFACT_CORRUPT: &str = "ARTIFACT_CORRUPT";
pub const ARTIFACT_VERSION: &str = "ARTIFACT_VERSION";
pub const DECODE_FAILED: &str = "DECODE_FAILED";
pub const INVALID_MODEL: &str = "INVALID_MODEL";
pub const MODEL_UNAVAILABLE: &str = "MODEL_UNAVAILABLE";
pub const NO_DATA: &str = "NO_DATA";
pub const MISSING_FEATURES: &str = "MISSING_FEATURES";
pub const INVALID_FEATURE_TYPE: &str = "INVALID_FEATURE_TYPE";
pub const INFERENCE_ERROR: &str = "INFERENCE_ERROR";
