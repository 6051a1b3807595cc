use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{ArtifactSource, HealthReport, LoadAttempt};
use crate::constants::PATHWAY_VERSION;
use crate::traits::IClassifier;

/// Lifecycle of the process-wide predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loaded,
    Failed,
}

/// The loaded classifier plus everything learned while loading it.
///
/// Built once before the server starts and shared read-only behind an
/// `Arc`; nothing mutates it afterwards, so reads need no lock.
#[derive(Clone)]
pub struct PredictorHandle {
    state: LoadState,
    classifier: Option<Arc<dyn IClassifier>>,
    expected_feature_count: Option<usize>,
    supports_proba: bool,
    source: Option<ArtifactSource>,
    attempts: Vec<LoadAttempt>,
    loaded_at: Option<DateTime<Utc>>,
}

impl PredictorHandle {
    /// A handle before any load has run.
    pub fn unloaded() -> Self {
        Self {
            state: LoadState::Unloaded,
            classifier: None,
            expected_feature_count: None,
            supports_proba: false,
            source: None,
            attempts: Vec::new(),
            loaded_at: None,
        }
    }

    /// A loaded handle. Probes the classifier's capabilities once.
    pub fn loaded(
        classifier: Arc<dyn IClassifier>,
        source: Option<ArtifactSource>,
        attempts: Vec<LoadAttempt>,
    ) -> Self {
        Self {
            state: LoadState::Loaded,
            expected_feature_count: Some(classifier.n_features_in()),
            supports_proba: classifier.supports_proba(),
            classifier: Some(classifier),
            source,
            attempts,
            loaded_at: Some(Utc::now()),
        }
    }

    /// Wrap an in-memory classifier with no artifact behind it.
    pub fn from_classifier(classifier: Arc<dyn IClassifier>) -> Self {
        Self::loaded(classifier, None, Vec::new())
    }

    /// Degraded mode: every strategy failed or no artifact existed.
    pub fn failed(attempts: Vec<LoadAttempt>) -> Self {
        Self {
            state: LoadState::Failed,
            attempts,
            ..Self::unloaded()
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded && self.classifier.is_some()
    }

    pub fn classifier(&self) -> Option<&Arc<dyn IClassifier>> {
        self.classifier.as_ref()
    }

    pub fn expected_feature_count(&self) -> Option<usize> {
        self.expected_feature_count
    }

    pub fn supports_proba(&self) -> bool {
        self.supports_proba
    }

    pub fn source(&self) -> Option<&ArtifactSource> {
        self.source.as_ref()
    }

    pub fn attempts(&self) -> &[LoadAttempt] {
        &self.attempts
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn health_report(&self) -> HealthReport {
        HealthReport {
            status: "healthy".to_string(),
            model_loaded: self.is_loaded(),
            model_features: self.expected_feature_count,
            model_source: self.source.as_ref().map(|s| s.to_string()),
            load_attempts: self.attempts.len(),
            version: PATHWAY_VERSION.to_string(),
        }
    }
}

impl Default for PredictorHandle {
    fn default() -> Self {
        Self::unloaded()
    }
}

impl std::fmt::Debug for PredictorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictorHandle")
            .field("state", &self.state)
            .field("classifier", &self.classifier.as_ref().map(|c| c.name().to_string()))
            .field("expected_feature_count", &self.expected_feature_count)
            .field("supports_proba", &self.supports_proba)
            .field("source", &self.source)
            .field("attempts", &self.attempts.len())
            .finish()
    }
}
