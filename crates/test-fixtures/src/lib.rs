//! Shared fixtures for Pathway tests: request payloads, fake classifiers,
//! sample estimators, and the on-disk artifacts under `test-fixtures/`.
//!
//! Only use this crate from integration tests (`tests/`). Unit tests inside
//! `pathway-model` would see a second copy of its types.

use std::path::{Path, PathBuf};

use pathway_core::constants::{FEATURE_COUNT, FEATURE_NAMES};
use pathway_core::errors::{InferenceError, PathwayResult};
use pathway_core::{FeatureVector, IClassifier, RawLabel};
use pathway_model::estimators::{Estimator, ForestParams, LogisticParams, TreeParams};
use pathway_model::TrainedModel;
use serde_json::{json, Value};

/// Root directory of the fixture folder at the workspace root.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../test-fixtures"))
}

/// Absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Raw bytes of a fixture file.
///
/// # Panics
/// Panics if the file can't be read.
pub fn fixture_bytes(relative_path: &str) -> Vec<u8> {
    let path = fixture_path(relative_path);
    std::fs::read(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// A fixture file parsed as JSON.
pub fn fixture_value(relative_path: &str) -> Value {
    let bytes = fixture_bytes(relative_path);
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {relative_path}: {e}"))
}

// --- Payloads ---

/// The reference student record, all 15 fields.
pub fn reference_payload() -> Value {
    json!({
        "gender": 1,
        "nationality_group": 0,
        "parent_occupation_group": 2,
        "marital_status": 0,
        "student_type": 0,
        "previous_qualification_group": 1,
        "age_at_enrollment": 19,
        "tuition_up_to_date": 1,
        "displaced": 0,
        "special_needs": 0,
        "first_semester_grade": 13.5,
        "second_semester_grade": 14.0,
        "second_semester_approved": 7,
        "first_semester_approved": 6,
        "admission_grade": 15.0
    })
}

/// A record that lands on the drop-out leaves of [`sample_forest`].
pub fn struggling_payload() -> Value {
    let mut payload = reference_payload();
    payload["first_semester_grade"] = json!(8.0);
    payload["second_semester_grade"] = json!(7.5);
    payload["second_semester_approved"] = json!(1);
    payload["first_semester_approved"] = json!(2);
    payload["admission_grade"] = json!(10.0);
    payload
}

/// [`reference_payload`] with the named fields removed.
pub fn payload_without(names: &[&str]) -> Value {
    let mut payload = reference_payload();
    if let Some(map) = payload.as_object_mut() {
        for name in names {
            map.remove(*name);
        }
    }
    payload
}

/// [`reference_payload`] with one field replaced.
pub fn payload_with(name: &str, value: Value) -> Value {
    let mut payload = reference_payload();
    payload[name] = value;
    payload
}

/// The reference payload as an ordered feature vector.
pub fn reference_features() -> FeatureVector {
    let payload = reference_payload();
    let mut values = [0.0; FEATURE_COUNT];
    for (slot, name) in values.iter_mut().zip(FEATURE_NAMES) {
        *slot = payload[name].as_f64().unwrap_or_default();
    }
    FeatureVector::from_ordered(values)
}

// --- Fake classifiers ---

/// Returns a fixed label (and optional distribution) for every input.
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    label: RawLabel,
    proba: Option<Vec<f64>>,
    n_features: usize,
}

impl FixedClassifier {
    pub fn new(label: RawLabel) -> Self {
        Self {
            label,
            proba: None,
            n_features: FEATURE_COUNT,
        }
    }

    pub fn with_proba(mut self, proba: Vec<f64>) -> Self {
        self.proba = Some(proba);
        self
    }

    pub fn with_n_features(mut self, n: usize) -> Self {
        self.n_features = n;
        self
    }
}

impl IClassifier for FixedClassifier {
    fn predict(&self, _features: &[f64]) -> PathwayResult<RawLabel> {
        Ok(self.label.clone())
    }

    fn predict_proba(&self, _features: &[f64]) -> PathwayResult<Vec<f64>> {
        match &self.proba {
            Some(p) => Ok(p.clone()),
            None => Err(InferenceError::UnsupportedCapability {
                capability: "predict_proba".to_string(),
            }
            .into()),
        }
    }

    fn supports_proba(&self) -> bool {
        self.proba.is_some()
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Fails every prediction.
#[derive(Debug, Clone, Default)]
pub struct FailingClassifier;

impl IClassifier for FailingClassifier {
    fn predict(&self, _features: &[f64]) -> PathwayResult<RawLabel> {
        Err(InferenceError::ClassifierFailed {
            reason: "model exploded".to_string(),
        }
        .into())
    }

    fn n_features_in(&self) -> usize {
        FEATURE_COUNT
    }

    fn name(&self) -> &str {
        "failing"
    }
}

// --- Sample estimators ---

fn feature_index(name: &str) -> i64 {
    FEATURE_NAMES
        .iter()
        .position(|n| *n == name)
        .map(|i| i as i64)
        .unwrap_or_else(|| panic!("unknown feature {name}"))
}

fn integer_classes() -> Vec<RawLabel> {
    vec![RawLabel::Int(0), RawLabel::Int(1), RawLabel::Int(2)]
}

/// Approved units, then second-semester grade.
pub fn approvals_tree() -> TreeParams {
    TreeParams {
        children_left: vec![1, -1, 3, -1, -1],
        children_right: vec![2, -1, 4, -1, -1],
        feature: vec![
            feature_index("second_semester_approved"),
            -2,
            feature_index("second_semester_grade"),
            -2,
            -2,
        ],
        threshold: vec![3.5, -2.0, 12.0, -2.0, -2.0],
        value: vec![
            vec![9.0, 9.0, 12.0],
            vec![8.0, 2.0, 1.0],
            vec![1.0, 7.0, 11.0],
            vec![1.0, 5.0, 2.0],
            vec![0.0, 1.0, 9.0],
        ],
    }
}

/// Admission grade, then first-semester grade.
pub fn grades_tree() -> TreeParams {
    TreeParams {
        children_left: vec![1, -1, 3, -1, -1],
        children_right: vec![2, -1, 4, -1, -1],
        feature: vec![
            feature_index("admission_grade"),
            -2,
            feature_index("first_semester_grade"),
            -2,
            -2,
        ],
        threshold: vec![11.0, -2.0, 12.5, -2.0, -2.0],
        value: vec![
            vec![9.0, 11.0, 10.0],
            vec![6.0, 3.0, 1.0],
            vec![3.0, 8.0, 9.0],
            vec![2.0, 6.0, 2.0],
            vec![1.0, 2.0, 7.0],
        ],
    }
}

/// Two-tree forest over the 15-feature schema with classes `[0, 1, 2]`.
///
/// The reference payload scores `[0.05, 0.15, 0.80]`.
pub fn sample_forest() -> TrainedModel {
    TrainedModel::new(
        Estimator::Forest(ForestParams {
            estimators: vec![approvals_tree(), grades_tree()],
        }),
        integer_classes(),
        FEATURE_COUNT,
    )
    .expect("sample forest is valid")
    .with_feature_names(FEATURE_NAMES.iter().map(|s| s.to_string()).collect())
    .expect("feature names match")
}

/// Single tree with string class labels, as older exports stored them.
pub fn labelled_tree() -> TrainedModel {
    TrainedModel::new(
        Estimator::Tree(approvals_tree()),
        vec![
            RawLabel::Text("Dropout".into()),
            RawLabel::Text("Enrolled".into()),
            RawLabel::Text("Graduate".into()),
        ],
        FEATURE_COUNT,
    )
    .expect("labelled tree is valid")
}

/// Multinomial logistic regression weighting grades and approvals.
pub fn sample_logistic() -> TrainedModel {
    let mut graduate = vec![0.0; FEATURE_COUNT];
    let mut dropout = vec![0.0; FEATURE_COUNT];
    for (name, w) in [
        ("first_semester_grade", 0.3),
        ("second_semester_grade", 0.4),
        ("second_semester_approved", 0.5),
        ("tuition_up_to_date", 1.0),
    ] {
        let i = feature_index(name) as usize;
        graduate[i] = w;
        dropout[i] = -w;
    }
    TrainedModel::new(
        Estimator::Logistic(LogisticParams {
            coef: vec![dropout, vec![0.0; FEATURE_COUNT], graduate],
            intercept: vec![2.0, 0.5, -6.0],
        }),
        integer_classes(),
        FEATURE_COUNT,
    )
    .expect("sample logistic is valid")
}

/// Legacy JSON bytes for a model, in the current document schema.
pub fn legacy_json(model: &TrainedModel) -> Vec<u8> {
    model
        .to_document()
        .and_then(|doc| doc.to_json_vec())
        .expect("model serializes")
}

/// Write `bytes` as `file_name` inside `dir`.
pub fn write_artifact(dir: &Path, file_name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, bytes)
        .unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
    path
}
