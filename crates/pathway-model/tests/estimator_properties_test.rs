//! Property tests over the bundled estimators.

use pathway_core::constants::FEATURE_COUNT;
use pathway_core::IClassifier;
use pathway_model::artifact::native;
use pathway_model::TrainedModel;
use proptest::prelude::*;
use test_fixtures::{labelled_tree, sample_forest, sample_logistic};

fn arb_features() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-50.0f64..50.0, FEATURE_COUNT)
}

fn models() -> Vec<TrainedModel> {
    vec![sample_forest(), sample_logistic(), labelled_tree()]
}

proptest! {
    #[test]
    fn probabilities_form_a_distribution(features in arb_features()) {
        for model in models() {
            let proba = model.predict_proba(&features).unwrap();
            prop_assert_eq!(proba.len(), model.classes().len());
            prop_assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));
            let total: f64 = proba.iter().sum();
            prop_assert!((total - 1.0).abs() < 1e-9, "sum was {}", total);
        }
    }

    #[test]
    fn extreme_magnitudes_never_leak_invalid_probabilities(
        features in prop::collection::vec(prop::num::f64::NORMAL, FEATURE_COUNT)
    ) {
        for model in models() {
            if let Ok(proba) = model.predict_proba(&features) {
                prop_assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)), "{:?}", proba);
            }
        }
    }

    #[test]
    fn prediction_is_a_known_class(features in arb_features()) {
        for model in models() {
            let label = model.predict(&features).unwrap();
            prop_assert!(model.classes().contains(&label));
        }
    }

    #[test]
    fn predicted_class_has_the_highest_probability(features in arb_features()) {
        for model in models() {
            let label = model.predict(&features).unwrap();
            let proba = model.predict_proba(&features).unwrap();
            let idx = model.classes().iter().position(|c| *c == label).unwrap();
            prop_assert!(proba.iter().all(|p| *p <= proba[idx]));
        }
    }

    #[test]
    fn native_round_trip_preserves_predictions(features in arb_features()) {
        for model in models() {
            let decoded = native::decode(&native::encode(&model).unwrap()).unwrap();
            prop_assert_eq!(
                decoded.predict_proba(&features).unwrap(),
                model.predict_proba(&features).unwrap()
            );
        }
    }
}

#[test]
fn wrong_feature_count_is_rejected() {
    for model in models() {
        assert!(model.predict(&[1.0; 3]).is_err());
    }
}
