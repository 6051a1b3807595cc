pub mod features;
pub mod health_report;
pub mod load_attempt;
pub mod outcome;
pub mod prediction_result;
pub mod predictor_handle;

pub use features::FeatureVector;
pub use health_report::HealthReport;
pub use load_attempt::{ArtifactFormat, ArtifactSource, LoadAttempt};
pub use outcome::{ClassId, Outcome, RawLabel};
pub use prediction_result::{round_confidence, PredictionResult};
pub use predictor_handle::{LoadState, PredictorHandle};
