//! CART decision tree stored as parallel node arrays.
//!
//! Node `i` is a leaf when `children_left[i] == -1`. Internal nodes send a
//! sample left when `x[feature[i]] <= threshold[i]`.

use pathway_core::errors::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

pub const LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeParams {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights (training sample counts or fractions).
    pub value: Vec<Vec<f64>>,
}

impl TreeParams {
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    pub fn validate(&self, n_features: usize, n_classes: usize) -> ModelResult<()> {
        let n = self.node_count();
        if n == 0 {
            return Err(ModelError::invalid("tree has no nodes"));
        }
        let lengths = [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(ModelError::invalid(format!(
                "tree arrays disagree on node count: {n} vs {lengths:?}"
            )));
        }

        for i in 0..n {
            let (left, right) = (self.children_left[i], self.children_right[i]);
            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(ModelError::invalid(format!(
                        "node {i} has exactly one child"
                    )));
                }
            } else {
                // Children always come after their parent, which also rules out cycles.
                for child in [left, right] {
                    if child <= i as i64 || child >= n as i64 {
                        return Err(ModelError::invalid(format!(
                            "node {i} has out-of-order child {child}"
                        )));
                    }
                }
                let f = self.feature[i];
                if f < 0 || f >= n_features as i64 {
                    return Err(ModelError::invalid(format!(
                        "node {i} splits on feature {f}, model has {n_features}"
                    )));
                }
            }
            if self.value[i].len() != n_classes {
                return Err(ModelError::invalid(format!(
                    "node {i} value has {} classes, expected {n_classes}",
                    self.value[i].len()
                )));
            }
            if let Some(w) = self.value[i].iter().find(|w| !(w.is_finite() && **w >= 0.0)) {
                return Err(ModelError::invalid(format!(
                    "node {i} has class weight {w}, weights must be non-negative"
                )));
            }
        }
        Ok(())
    }

    /// Index of the leaf that `features` lands in.
    pub fn apply(&self, features: &[f64]) -> usize {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let f = self.feature[node] as usize;
            node = if features[f] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        node
    }

    pub fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        normalize(&self.value[self.apply(features)])
    }
}

/// Scale leaf weights to a distribution; an all-zero leaf becomes uniform.
fn normalize(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        weights.iter().map(|w| w / total).collect()
    } else {
        vec![1.0 / weights.len() as f64; weights.len()]
    }
}
