//! Legacy JSON artifact decoding.
//!
//! Legacy documents were written by a range of tooling versions, some of
//! them in Latin-1, some with stray bytes, some with pre-rename field names.
//! Each strategy below is one interpretation of the same bytes; the loader
//! tries them in order.

use pathway_core::errors::{ModelError, ModelResult};
use serde_json::Value;

use super::compat;
use crate::document::ModelDocument;
use crate::trained_model::TrainedModel;

pub const LATIN1: &str = "latin1";
pub const BYTES: &str = "bytes";
pub const DEFAULT: &str = "default";
pub const COMPAT: &str = compat::STRATEGY_NAME;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Every byte maps to the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> ModelResult<TrainedModel> {
    let text: String = bytes.iter().map(|&b| char::from(b)).collect();
    let doc = ModelDocument::from_json_str(&text, LATIN1)?;
    TrainedModel::from_document(doc)
}

/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn decode_bytes(bytes: &[u8]) -> ModelResult<TrainedModel> {
    let text = String::from_utf8_lossy(bytes);
    let doc = ModelDocument::from_json_str(&text, BYTES)?;
    TrainedModel::from_document(doc)
}

/// Strict UTF-8, strict schema.
pub fn decode_default(bytes: &[u8]) -> ModelResult<TrainedModel> {
    let doc: ModelDocument =
        serde_json::from_slice(bytes).map_err(|e| ModelError::decode(DEFAULT, e))?;
    TrainedModel::from_document(doc)
}

/// Strict UTF-8; old estimator paths and field names are resolved before
/// the strict parse.
pub fn decode_compat(bytes: &[u8]) -> ModelResult<TrainedModel> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = std::str::from_utf8(bytes).map_err(|e| ModelError::decode(COMPAT, e))?;
    let value: Value = serde_json::from_str(text).map_err(|e| ModelError::decode(COMPAT, e))?;
    let doc = compat::parse(value)?;
    TrainedModel::from_document(doc)
}
