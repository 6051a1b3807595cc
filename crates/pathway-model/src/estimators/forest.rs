//! Random forest: the mean of per-tree leaf distributions.

use pathway_core::errors::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

use super::TreeParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForestParams {
    pub estimators: Vec<TreeParams>,
}

impl ForestParams {
    pub fn validate(&self, n_features: usize, n_classes: usize) -> ModelResult<()> {
        if self.estimators.is_empty() {
            return Err(ModelError::invalid("forest has no trees"));
        }
        for (i, tree) in self.estimators.iter().enumerate() {
            tree.validate(n_features, n_classes)
                .map_err(|e| ModelError::invalid(format!("tree {i}: {e}")))?;
        }
        Ok(())
    }

    pub fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let mut acc: Vec<f64> = Vec::new();
        for tree in &self.estimators {
            let p = tree.predict_proba(features);
            if acc.is_empty() {
                acc = p;
            } else {
                for (a, v) in acc.iter_mut().zip(p) {
                    *a += v;
                }
            }
        }
        let n = self.estimators.len() as f64;
        acc.into_iter().map(|a| a / n).collect()
    }
}
