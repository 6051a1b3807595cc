//! Relaxed resolution for documents written by older toolkit versions.
//!
//! Rewrites a raw JSON value into the current strict schema:
//! - estimator type paths are reduced to their final segment
//!   (`sklearn.ensemble.forest.RandomForestClassifier` → `RandomForestClassifier`)
//! - trailing-underscore attribute names are mapped to current field names
//! - tree arrays nested under `tree_` are hoisted into the tree block
//! - per-node values shaped `[n_nodes][1][n_classes]` are flattened
//! - unknown fields are dropped

use pathway_core::errors::{ModelError, ModelResult};
use serde_json::{Map, Value};

use crate::document::{ModelDocument, DECISION_TREE, LOGISTIC_REGRESSION, RANDOM_FOREST};

pub const STRATEGY_NAME: &str = "compat";

const DOCUMENT_ALIASES: &[(&str, &str)] = &[
    ("n_features", "n_features_in"),
    ("n_features_in_", "n_features_in"),
    ("classes_", "classes"),
    ("feature_names_in_", "feature_names"),
    ("sklearn_version", "library_version"),
    ("_sklearn_version", "library_version"),
    ("estimator_type", "estimator"),
    ("class", "estimator"),
];
const DOCUMENT_FIELDS: &[&str] = &[
    "estimator",
    "library_version",
    "n_features_in",
    "classes",
    "feature_names",
    "params",
];

const PARAM_ALIASES: &[(&str, &str)] = &[
    ("coef_", "coef"),
    ("intercept_", "intercept"),
    ("estimators_", "estimators"),
];
const LOGISTIC_FIELDS: &[&str] = &["coef", "intercept"];
const FOREST_FIELDS: &[&str] = &["estimators"];
const TREE_FIELDS: &[&str] = &[
    "children_left",
    "children_right",
    "feature",
    "threshold",
    "value",
];

/// Upgrade a raw document value and parse it under the strict schema.
pub fn parse(value: Value) -> ModelResult<ModelDocument> {
    let upgraded = upgrade(value)?;
    serde_json::from_value(upgraded).map_err(|e| ModelError::decode(STRATEGY_NAME, e))
}

/// Rewrite a legacy document value into the current schema.
pub fn upgrade(value: Value) -> ModelResult<Value> {
    let Value::Object(mut doc) = value else {
        return Err(ModelError::decode(STRATEGY_NAME, "document is not a JSON object"));
    };
    rename_keys(&mut doc, DOCUMENT_ALIASES);

    let estimator = doc
        .get("estimator")
        .and_then(Value::as_str)
        .map(resolve_estimator_name)
        .ok_or_else(|| ModelError::decode(STRATEGY_NAME, "missing estimator type"))?;
    if !ModelDocument::is_known_estimator(&estimator) {
        return Err(ModelError::decode(
            STRATEGY_NAME,
            format!("unsupported estimator '{estimator}'"),
        ));
    }
    doc.insert("estimator".to_string(), Value::String(estimator.clone()));

    let params = match doc.remove("params") {
        Some(Value::Object(params)) => params,
        Some(_) => return Err(ModelError::decode(STRATEGY_NAME, "params is not an object")),
        None => Map::new(),
    };
    let params = match estimator.as_str() {
        LOGISTIC_REGRESSION => upgrade_block(params, LOGISTIC_FIELDS),
        DECISION_TREE => upgrade_tree(params),
        RANDOM_FOREST => upgrade_forest(params)?,
        _ => params,
    };
    doc.insert("params".to_string(), Value::Object(params));

    doc.retain(|key, _| DOCUMENT_FIELDS.contains(&key.as_str()));
    Ok(Value::Object(doc))
}

/// `a.b.c.RandomForestClassifier` → `RandomForestClassifier`.
pub fn resolve_estimator_name(path: &str) -> String {
    path.rsplit('.').next().unwrap_or(path).trim().to_string()
}

fn rename_keys(map: &mut Map<String, Value>, aliases: &[(&str, &str)]) {
    for (old, new) in aliases {
        if map.contains_key(*new) {
            continue;
        }
        if let Some(v) = map.remove(*old) {
            map.insert((*new).to_string(), v);
        }
    }
}

fn upgrade_block(mut block: Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    rename_keys(&mut block, PARAM_ALIASES);
    block.retain(|key, _| fields.contains(&key.as_str()));
    block
}

fn upgrade_tree(mut block: Map<String, Value>) -> Map<String, Value> {
    if let Some(Value::Object(inner)) = block.remove("tree_") {
        for (k, v) in inner {
            block.entry(k).or_insert(v);
        }
    }
    if let Some(value) = block.get_mut("value") {
        flatten_single_output(value);
    }
    upgrade_block(block, TREE_FIELDS)
}

fn upgrade_forest(block: Map<String, Value>) -> ModelResult<Map<String, Value>> {
    let mut block = upgrade_block(block, FOREST_FIELDS);
    if let Some(Value::Array(trees)) = block.remove("estimators") {
        let mut upgraded = Vec::with_capacity(trees.len());
        for tree in trees {
            let Value::Object(tree) = tree else {
                return Err(ModelError::decode(STRATEGY_NAME, "forest member is not an object"));
            };
            // Older exports wrap each member as a full estimator document.
            let tree = match tree.get("params") {
                Some(Value::Object(inner)) => inner.clone(),
                _ => tree,
            };
            upgraded.push(Value::Object(upgrade_tree(tree)));
        }
        block.insert("estimators".to_string(), Value::Array(upgraded));
    }
    Ok(block)
}

/// `[[[a, b]], [[c, d]]]` → `[[a, b], [c, d]]`; other shapes are untouched.
fn flatten_single_output(value: &mut Value) {
    let Value::Array(nodes) = value else {
        return;
    };
    let single_output = !nodes.is_empty()
        && nodes.iter().all(|node| {
            matches!(node, Value::Array(outputs)
                if outputs.len() == 1 && outputs[0].is_array())
        });
    if !single_output {
        return;
    }
    for node in nodes.iter_mut() {
        if let Value::Array(outputs) = node {
            if let Some(inner) = outputs.pop() {
                *node = inner;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_dotted_estimator_paths() {
        assert_eq!(
            resolve_estimator_name("sklearn.ensemble.forest.RandomForestClassifier"),
            "RandomForestClassifier"
        );
        assert_eq!(resolve_estimator_name("LogisticRegression"), "LogisticRegression");
    }

    #[test]
    fn upgrades_logistic_aliases_and_drops_unknown_fields() {
        let raw = json!({
            "class": "sklearn.linear_model.logistic.LogisticRegression",
            "n_features_in_": 1,
            "classes_": [0, 1],
            "_sklearn_version": "0.22.1",
            "pickle_protocol": 2,
            "params": { "coef_": [[0.5]], "intercept_": [0.0], "solver": "lbfgs" }
        });
        let doc = parse(raw).unwrap();
        assert_eq!(doc.estimator, "LogisticRegression");
        assert_eq!(doc.n_features_in, 1);
        assert_eq!(doc.library_version.as_deref(), Some("0.22.1"));
        assert_eq!(doc.params, json!({ "coef": [[0.5]], "intercept": [0.0] }));
    }

    #[test]
    fn hoists_nested_tree_and_flattens_values() {
        let raw = json!({
            "estimator": "sklearn.tree.tree.DecisionTreeClassifier",
            "n_features": 1,
            "classes": [0, 1],
            "params": {
                "max_depth": 1,
                "tree_": {
                    "children_left": [1, -1, -1],
                    "children_right": [2, -1, -1],
                    "feature": [0, -2, -2],
                    "threshold": [0.5, -2.0, -2.0],
                    "value": [[[2.0, 2.0]], [[2.0, 0.0]], [[0.0, 2.0]]]
                }
            }
        });
        let doc = parse(raw).unwrap();
        assert_eq!(doc.params["value"], json!([[2.0, 2.0], [2.0, 0.0], [0.0, 2.0]]));
        assert!(doc.params.get("max_depth").is_none());
    }

    #[test]
    fn upgrades_wrapped_forest_members() {
        let member = json!({
            "estimator": "sklearn.tree.tree.DecisionTreeClassifier",
            "params": { "tree_": {
                "children_left": [-1], "children_right": [-1],
                "feature": [-2], "threshold": [-2.0], "value": [[[1.0, 3.0]]]
            }}
        });
        let raw = json!({
            "estimator": "sklearn.ensemble.forest.RandomForestClassifier",
            "n_features": 2,
            "classes": ["Dropout", "Graduate"],
            "params": { "estimators_": [member.clone(), member], "n_estimators": 2 }
        });
        let doc = parse(raw).unwrap();
        let trees = doc.params["estimators"].as_array().unwrap();
        assert_eq!(trees.len(), 2);
        assert_eq!(trees[0]["value"], json!([[1.0, 3.0]]));
    }

    #[test]
    fn non_object_document_fails() {
        assert!(parse(json!([1, 2, 3])).is_err());
        assert!(parse(json!({ "n_features": 3 })).is_err());
    }
}
