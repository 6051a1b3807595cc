//! Logistic regression (multinomial, or sigmoid for the binary layout).

use pathway_core::errors::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Coefficients in the `(n_classes, n_features)` layout, or a single row
/// for a binary model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogisticParams {
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

impl LogisticParams {
    pub fn validate(&self, n_features: usize, n_classes: usize) -> ModelResult<()> {
        let rows = self.coef.len();
        let binary = rows == 1 && n_classes == 2;
        if !binary && rows != n_classes {
            return Err(ModelError::invalid(format!(
                "coef has {rows} rows for {n_classes} classes"
            )));
        }
        if self.intercept.len() != rows {
            return Err(ModelError::invalid(format!(
                "intercept has {} entries for {rows} coef rows",
                self.intercept.len()
            )));
        }
        if let Some((i, row)) = self
            .coef
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != n_features)
        {
            return Err(ModelError::invalid(format!(
                "coef row {i} has {} weights, expected {n_features}",
                row.len()
            )));
        }
        Ok(())
    }

    pub fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let scores: Vec<f64> = self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect();

        if scores.len() == 1 {
            let p = sigmoid(scores[0]);
            return vec![1.0 - p, p];
        }
        softmax(&scores)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max.is_infinite() {
        // Overflowed scores: the mass goes to the scores tied at the extreme.
        let ties = scores.iter().filter(|&&s| s == max).count() as f64;
        return scores
            .iter()
            .map(|&s| if s == max { 1.0 / ties } else { 0.0 })
            .collect();
    }
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
