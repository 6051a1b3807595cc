//! Property tests for request validation.

use pathway_core::constants::{FEATURE_COUNT, FEATURE_NAMES};
use pathway_core::errors::RequestError;
use pathway_server::validation::validate_payload;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn payload_from(values: &[f64]) -> Value {
    let map: Map<String, Value> = FEATURE_NAMES
        .iter()
        .zip(values)
        .map(|(name, v)| (name.to_string(), json!(v)))
        .collect();
    Value::Object(map)
}

fn arb_non_number() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<String>().prop_map(Value::String),
        any::<bool>().prop_map(Value::Bool),
        Just(Value::Null),
        Just(json!([1, 2])),
        Just(json!({"value": 1})),
    ]
}

proptest! {
    #[test]
    fn numeric_payloads_vectorize_in_order(values in prop::collection::vec(-1e6f64..1e6, FEATURE_COUNT)) {
        let vector = validate_payload(Some(&payload_from(&values))).unwrap();
        prop_assert_eq!(vector.as_slice(), values.as_slice());
    }

    #[test]
    fn any_removed_subset_is_reported_in_schema_order(mask in prop::collection::vec(any::<bool>(), FEATURE_COUNT)) {
        prop_assume!(mask.iter().any(|m| *m) && !mask.iter().all(|m| *m));
        let mut payload = payload_from(&[1.0; FEATURE_COUNT]);
        let expected: Vec<String> = FEATURE_NAMES
            .iter()
            .zip(&mask)
            .filter(|(_, removed)| **removed)
            .map(|(name, _)| name.to_string())
            .collect();
        for name in &expected {
            payload.as_object_mut().unwrap().remove(name);
        }
        prop_assert_eq!(
            validate_payload(Some(&payload)),
            Err(RequestError::MissingFeatures(expected))
        );
    }

    #[test]
    fn any_non_number_is_rejected_by_name(index in 0..FEATURE_COUNT, bad in arb_non_number()) {
        let mut payload = payload_from(&[2.0; FEATURE_COUNT]);
        payload[FEATURE_NAMES[index]] = bad;
        match validate_payload(Some(&payload)) {
            Err(RequestError::WrongType { feature, .. }) => prop_assert_eq!(feature, FEATURE_NAMES[index]),
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }
}
