//! The JSON model document shared by both artifact formats.

use pathway_core::errors::{ModelError, ModelResult};
use pathway_core::RawLabel;
use serde::{Deserialize, Serialize};

pub const LOGISTIC_REGRESSION: &str = "LogisticRegression";
pub const DECISION_TREE: &str = "DecisionTreeClassifier";
pub const RANDOM_FOREST: &str = "RandomForestClassifier";

/// Estimator type names this library can rebuild.
pub const KNOWN_ESTIMATORS: [&str; 3] = [LOGISTIC_REGRESSION, DECISION_TREE, RANDOM_FOREST];

/// Serialized form of a trained classifier.
///
/// The schema is strict: unknown fields are rejected. Older documents that
/// use toolkit-specific names go through the `compat` upgrade first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDocument {
    /// Estimator type name, one of [`KNOWN_ESTIMATORS`].
    pub estimator: String,
    /// Version of the toolkit that produced the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_version: Option<String>,
    pub n_features_in: usize,
    /// Class labels, indexed by position in the probability output.
    pub classes: Vec<RawLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    /// Estimator-specific parameters; shape depends on `estimator`.
    pub params: serde_json::Value,
}

impl ModelDocument {
    /// Parse a document from UTF-8 text under the strict schema.
    pub fn from_json_str(text: &str, strategy: &str) -> ModelResult<Self> {
        serde_json::from_str(text).map_err(|e| ModelError::decode(strategy, e))
    }

    pub fn to_json_vec(&self) -> ModelResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| ModelError::invalid(format!("serialize: {e}")))
    }

    pub fn is_known_estimator(name: &str) -> bool {
        KNOWN_ESTIMATORS.contains(&name)
    }
}
