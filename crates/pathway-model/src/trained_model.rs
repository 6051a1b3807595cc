//! TrainedModel: a validated estimator plus its class vocabulary.
//!
//! Implements `IClassifier` from pathway-core.

use pathway_core::errors::{InferenceError, ModelError, ModelResult, PathwayResult};
use pathway_core::{IClassifier, RawLabel};

use crate::document::ModelDocument;
use crate::estimators::{self, Estimator};

/// A classifier rebuilt from a model document.
///
/// Immutable after construction, so it can be shared across request
/// handlers without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    estimator: Estimator,
    classes: Vec<RawLabel>,
    n_features_in: usize,
    library_version: Option<String>,
    feature_names: Option<Vec<String>>,
}

impl TrainedModel {
    /// Build and validate a model from its parts.
    pub fn new(
        estimator: Estimator,
        classes: Vec<RawLabel>,
        n_features_in: usize,
    ) -> ModelResult<Self> {
        let model = Self {
            estimator,
            classes,
            n_features_in,
            library_version: None,
            feature_names: None,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> ModelResult<Self> {
        if names.len() != self.n_features_in {
            return Err(ModelError::invalid(format!(
                "{} feature names for {} features",
                names.len(),
                self.n_features_in
            )));
        }
        self.feature_names = Some(names);
        Ok(self)
    }

    pub fn with_library_version(mut self, version: impl Into<String>) -> Self {
        self.library_version = Some(version.into());
        self
    }

    /// Rebuild from a parsed document.
    pub fn from_document(doc: ModelDocument) -> ModelResult<Self> {
        let estimator = Estimator::from_params(&doc.estimator, doc.params)?;
        let model = Self {
            estimator,
            classes: doc.classes,
            n_features_in: doc.n_features_in,
            library_version: doc.library_version,
            feature_names: doc.feature_names,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn to_document(&self) -> ModelResult<ModelDocument> {
        Ok(ModelDocument {
            estimator: self.estimator.type_name().to_string(),
            library_version: self.library_version.clone(),
            n_features_in: self.n_features_in,
            classes: self.classes.clone(),
            feature_names: self.feature_names.clone(),
            params: self.estimator.to_params()?,
        })
    }

    fn validate(&self) -> ModelResult<()> {
        if self.classes.is_empty() {
            return Err(ModelError::invalid("model has no classes"));
        }
        if self.n_features_in == 0 {
            return Err(ModelError::invalid("model has no input features"));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.n_features_in {
                return Err(ModelError::invalid(format!(
                    "{} feature names for {} features",
                    names.len(),
                    self.n_features_in
                )));
            }
        }
        self.estimator.validate(self.n_features_in, self.classes.len())
    }

    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }

    pub fn classes(&self) -> &[RawLabel] {
        &self.classes
    }

    pub fn library_version(&self) -> Option<&str> {
        self.library_version.as_deref()
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn check_input(&self, features: &[f64]) -> PathwayResult<()> {
        if features.len() != self.n_features_in {
            return Err(InferenceError::FeatureCountMismatch {
                expected: self.n_features_in,
                actual: features.len(),
            }
            .into());
        }
        Ok(())
    }
}

impl IClassifier for TrainedModel {
    fn predict(&self, features: &[f64]) -> PathwayResult<RawLabel> {
        let proba = self.predict_proba(features)?;
        let idx = estimators::argmax(&proba).ok_or_else(|| InferenceError::ClassifierFailed {
            reason: "empty probability output".to_string(),
        })?;
        self.classes
            .get(idx)
            .cloned()
            .ok_or_else(|| {
                InferenceError::ClassifierFailed {
                    reason: format!("class index {idx} outside {} classes", self.classes.len()),
                }
                .into()
            })
    }

    fn predict_proba(&self, features: &[f64]) -> PathwayResult<Vec<f64>> {
        self.check_input(features)?;
        let proba = self.estimator.predict_proba(features);
        if proba.iter().any(|p| !p.is_finite()) {
            return Err(InferenceError::ClassifierFailed {
                reason: format!("{} produced non-finite probabilities", self.name()),
            }
            .into());
        }
        Ok(proba)
    }

    fn supports_proba(&self) -> bool {
        true
    }

    fn n_features_in(&self) -> usize {
        self.n_features_in
    }

    fn name(&self) -> &str {
        self.estimator.type_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::{LogisticParams, TreeParams};

    fn labelled_tree() -> TrainedModel {
        let tree = TreeParams {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![1, -2, -2],
            threshold: vec![0.5, -2.0, -2.0],
            value: vec![vec![3.0, 3.0, 3.0], vec![6.0, 2.0, 1.0], vec![0.0, 1.0, 8.0]],
        };
        TrainedModel::new(
            Estimator::Tree(tree),
            vec![
                RawLabel::Text("Dropout".into()),
                RawLabel::Text("Enrolled".into()),
                RawLabel::Text("Graduate".into()),
            ],
            2,
        )
        .unwrap()
    }

    #[test]
    fn predicts_string_labels() {
        let model = labelled_tree();
        assert_eq!(
            model.predict(&[0.0, 0.0]).unwrap(),
            RawLabel::Text("Dropout".into())
        );
        assert_eq!(
            model.predict(&[0.0, 1.0]).unwrap(),
            RawLabel::Text("Graduate".into())
        );
    }

    #[test]
    fn wrong_input_length_is_inference_error() {
        let err = labelled_tree().predict(&[1.0]).unwrap_err();
        assert!(err.to_string().contains("expects 2, got 1"));
    }

    #[test]
    fn non_finite_probabilities_are_rejected() {
        let model = TrainedModel::new(
            Estimator::Logistic(LogisticParams {
                coef: vec![vec![2.0, 2.0]],
                intercept: vec![0.0],
            }),
            vec![RawLabel::Int(0), RawLabel::Int(1)],
            2,
        )
        .unwrap();
        let err = model.predict(&[f64::MAX, -f64::MAX]).unwrap_err();
        assert!(err.to_string().contains("non-finite probabilities"));
    }

    #[test]
    fn document_round_trip_preserves_model() {
        let model = labelled_tree().with_library_version("1.3.2");
        let doc = model.to_document().unwrap();
        assert_eq!(doc.estimator, "DecisionTreeClassifier");
        let back = TrainedModel::from_document(doc).unwrap();
        assert_eq!(back, model);
    }

    #[test]
    fn class_count_must_match_params() {
        let params = LogisticParams {
            coef: vec![vec![1.0], vec![1.0], vec![1.0]],
            intercept: vec![0.0; 3],
        };
        let err = TrainedModel::new(
            Estimator::Logistic(params),
            vec![RawLabel::Int(0), RawLabel::Int(1)],
            1,
        )
        .unwrap_err();
        assert!(err.to_string().contains("3 rows for 2 classes"));
    }

    #[test]
    fn feature_names_must_match_count() {
        assert!(labelled_tree()
            .with_feature_names(vec!["only_one".into()])
            .is_err());
    }
}
