//! Tabular classifiers rebuilt from serialized parameters.
//!
//! Every estimator produces a probability distribution over class
//! positions; the predicted label is the arg-max (lowest index on ties).

pub mod forest;
pub mod linear;
pub mod tree;

use pathway_core::errors::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

use crate::document::{DECISION_TREE, LOGISTIC_REGRESSION, RANDOM_FOREST};

pub use forest::ForestParams;
pub use linear::LogisticParams;
pub use tree::TreeParams;

/// A rebuilt estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Estimator {
    Logistic(LogisticParams),
    Tree(TreeParams),
    Forest(ForestParams),
}

impl Estimator {
    /// Deserialize `params` for the named estimator type.
    pub fn from_params(name: &str, params: serde_json::Value) -> ModelResult<Self> {
        let parsed = match name {
            LOGISTIC_REGRESSION => serde_json::from_value(params).map(Self::Logistic),
            DECISION_TREE => serde_json::from_value(params).map(Self::Tree),
            RANDOM_FOREST => serde_json::from_value(params).map(Self::Forest),
            other => {
                return Err(ModelError::invalid(format!(
                    "unknown estimator type '{other}'"
                )))
            }
        };
        parsed.map_err(|e| ModelError::invalid(format!("{name} params: {e}")))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Logistic(_) => LOGISTIC_REGRESSION,
            Self::Tree(_) => DECISION_TREE,
            Self::Forest(_) => RANDOM_FOREST,
        }
    }

    pub fn to_params(&self) -> ModelResult<serde_json::Value> {
        let value = match self {
            Self::Logistic(p) => serde_json::to_value(p),
            Self::Tree(p) => serde_json::to_value(p),
            Self::Forest(p) => serde_json::to_value(p),
        };
        value.map_err(|e| ModelError::invalid(format!("serialize params: {e}")))
    }

    /// Check parameter shapes against the declared feature and class counts.
    pub fn validate(&self, n_features: usize, n_classes: usize) -> ModelResult<()> {
        match self {
            Self::Logistic(p) => p.validate(n_features, n_classes),
            Self::Tree(p) => p.validate(n_features, n_classes),
            Self::Forest(p) => p.validate(n_features, n_classes),
        }
    }

    /// Class probabilities for one sample. Assumes `validate` passed and
    /// `features` has the declared length.
    pub fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        match self {
            Self::Logistic(p) => p.predict_proba(features),
            Self::Tree(p) => p.predict_proba(features),
            Self::Forest(p) => p.predict_proba(features),
        }
    }
}

/// Index of the largest value; the first one wins ties.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
