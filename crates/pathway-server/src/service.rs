//! Prediction service: validate, vectorize, infer, normalize.

use std::sync::Arc;

use pathway_core::errors::{InferenceError, PathwayErrorCode};
use pathway_core::{
    FeatureVector, IClassifier, PathwayError, PathwayResult, PredictionResult, PredictorHandle,
};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::validation::validate_payload;

/// Stateless request handler over an injected, immutable predictor handle.
#[derive(Clone)]
pub struct PredictionService {
    handle: Arc<PredictorHandle>,
}

impl PredictionService {
    pub fn new(handle: Arc<PredictorHandle>) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &PredictorHandle {
        &self.handle
    }

    /// Run one prediction. `payload` is `None` when the body was absent or
    /// not JSON.
    ///
    /// Client errors come back as `PathwayError::Request`; everything after
    /// validation is logged here at error level before returning.
    pub fn predict(&self, payload: Option<&Value>) -> PathwayResult<PredictionResult> {
        let classifier = match self.handle.classifier() {
            Some(c) if self.handle.is_loaded() => c,
            _ => {
                warn!(state = ?self.handle.state(), "prediction requested without a model");
                return Err(PathwayError::ModelUnavailable);
            }
        };

        let features = validate_payload(payload).map_err(|e| {
            debug!(code = e.error_code(), error = %e, "request rejected");
            PathwayError::from(e)
        })?;

        self.infer(classifier.as_ref(), &features).map_err(|e| {
            error!(code = e.error_code(), error = %e, error_debug = ?e, "prediction failed");
            e
        })
    }

    fn infer(
        &self,
        classifier: &dyn IClassifier,
        features: &FeatureVector,
    ) -> PathwayResult<PredictionResult> {
        if let Some(expected) = self.handle.expected_feature_count() {
            if expected != features.len() {
                return Err(InferenceError::FeatureCountMismatch {
                    expected,
                    actual: features.len(),
                }
                .into());
            }
        }

        let raw = classifier.predict(features.as_slice())?;
        if !raw.is_recognized() {
            warn!(label = %raw, "unrecognized class label, defaulting to Drop Out");
        }
        let class = raw.class_id();

        let confidence = if self.handle.supports_proba() {
            let proba = classifier.predict_proba(features.as_slice())?;
            usize::try_from(class.value())
                .ok()
                .and_then(|i| proba.get(i).copied())
                .ok_or(InferenceError::ProbabilityIndexOutOfRange {
                    index: class.value(),
                    len: proba.len(),
                })?
        } else {
            1.0
        };
        if !(0.0..=1.0).contains(&confidence) {
            return Err(InferenceError::ConfidenceOutOfRange { value: confidence }.into());
        }

        let result = PredictionResult::new(class, confidence);
        info!(
            outcome = result.outcome.label(),
            prediction = result.prediction,
            confidence = result.confidence,
            "prediction served"
        );
        Ok(result)
    }
}
