//! # pathway-core
//!
//! Foundation crate for the Pathway prediction service.
//! Defines the feature schema, prediction types, the classifier capability
//! trait, the predictor handle, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PathwayConfig;
pub use errors::{PathwayError, PathwayResult};
pub use models::{ClassId, FeatureVector, Outcome, PredictionResult, PredictorHandle, RawLabel};
pub use traits::IClassifier;
