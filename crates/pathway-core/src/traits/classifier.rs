use crate::errors::{InferenceError, PathwayResult};
use crate::models::RawLabel;

/// A trained classifier consumed as a black box.
///
/// `predict` is mandatory. Probability output is an optional capability:
/// implementors that provide it override both `supports_proba` and
/// `predict_proba`. Callers check `supports_proba` once at load time.
pub trait IClassifier: Send + Sync {
    /// Predict the raw class label for one feature vector.
    fn predict(&self, features: &[f64]) -> PathwayResult<RawLabel>;

    /// Probability distribution over classes, indexed by class position.
    fn predict_proba(&self, _features: &[f64]) -> PathwayResult<Vec<f64>> {
        Err(InferenceError::UnsupportedCapability {
            capability: "predict_proba".to_string(),
        }
        .into())
    }

    /// Whether `predict_proba` is implemented.
    fn supports_proba(&self) -> bool {
        false
    }

    /// Number of input features the model was trained on.
    fn n_features_in(&self) -> usize;

    /// Human-readable identifier for logs.
    fn name(&self) -> &str;
}
