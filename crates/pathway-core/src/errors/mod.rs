//! Error handling for Pathway.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod inference_error;
pub mod model_error;
pub mod pathway_error;
pub mod request_error;

pub use config_error::ConfigError;
pub use error_code::PathwayErrorCode;
pub use inference_error::InferenceError;
pub use model_error::{ModelError, ModelResult};
pub use pathway_error::{PathwayError, PathwayResult};
pub use request_error::RequestError;
