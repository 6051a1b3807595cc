//! # pathway-server
//!
//! HTTP prediction service over a [`PredictorHandle`] built once at startup,
//! plus the `pathway` command-line entry point.
//!
//! ```text
//! request ─► validation ─► PredictionService ─► IClassifier
//!                                 │
//!                                 └─► {success, outcome, prediction, confidence}
//! ```
//!
//! [`PredictorHandle`]: pathway_core::PredictorHandle

pub mod cli;
pub mod http;
pub mod preflight;
pub mod service;
pub mod tracing_setup;
pub mod validation;

pub use http::{create_router, AppState};
pub use service::PredictionService;
