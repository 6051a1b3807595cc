//! # pathway-model
//!
//! The model library behind the prediction service: serde-serializable
//! tabular classifiers, the two artifact formats they are stored in, and the
//! loader that turns whatever is on disk into a [`PredictorHandle`].
//!
//! ## Artifact formats
//!
//! | Format | File | Decoding |
//! |--------|------|----------|
//! | Native | `*.pwm` | magic + version + blake3 digest + zstd JSON body |
//! | Legacy | `*.json` | plain model document, four fallback strategies |
//!
//! ## Legacy strategies (tried in order)
//!
//! `latin1` → `bytes` → `default` → `compat`. The first success wins; a
//! failure is logged and recorded, never propagated.
//!
//! [`PredictorHandle`]: pathway_core::PredictorHandle

pub mod artifact;
pub mod document;
pub mod estimators;
pub mod loader;
pub mod trained_model;

pub use artifact::ArtifactLocator;
pub use document::ModelDocument;
pub use estimators::Estimator;
pub use loader::{load_file, ArtifactLoader, DecodeStrategy, LoadedArtifact};
pub use trained_model::TrainedModel;
