//! Request payload validation and vectorization.
//!
//! Order of checks: payload presence, then every missing field (reported
//! together), then the first wrongly typed field in schema order.

use pathway_core::constants::{FEATURE_COUNT, FEATURE_NAMES};
use pathway_core::errors::RequestError;
use pathway_core::FeatureVector;
use serde_json::{Map, Value};

/// Validate a decoded request body and build the ordered feature vector.
///
/// `None` stands for an absent, empty, or non-JSON body.
pub fn validate_payload(payload: Option<&Value>) -> Result<FeatureVector, RequestError> {
    let fields = match payload {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => return Err(RequestError::NoData),
    };

    let missing = missing_features(fields);
    if !missing.is_empty() {
        return Err(RequestError::MissingFeatures(missing));
    }

    let mut values = [0.0; FEATURE_COUNT];
    for (slot, name) in values.iter_mut().zip(FEATURE_NAMES) {
        *slot = numeric_value(name, &fields[name])?;
    }
    Ok(FeatureVector::from_ordered(values))
}

/// Required fields absent from `fields`, in schema order.
pub fn missing_features(fields: &Map<String, Value>) -> Vec<String> {
    FEATURE_NAMES
        .iter()
        .filter(|name| !fields.contains_key(**name))
        .map(|name| name.to_string())
        .collect()
}

fn numeric_value(name: &str, value: &Value) -> Result<f64, RequestError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    number.ok_or_else(|| RequestError::WrongType {
        feature: name.to_string(),
        got: json_type_name(value).to_string(),
    })
}

/// Type names as reported to clients.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
