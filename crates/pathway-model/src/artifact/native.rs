//! Native artifact container.
//!
//! Layout (all integers little-endian):
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 4 | magic `PWMF` |
//! | 4 | 2 | format version |
//! | 6 | 32 | blake3 digest of the body |
//! | 38 | .. | zstd-compressed JSON model document |

use pathway_core::errors::{ModelError, ModelResult};
use tracing::debug;

use crate::document::ModelDocument;
use crate::estimators::{Estimator, TreeParams};
use crate::trained_model::TrainedModel;

pub const MAGIC: [u8; 4] = *b"PWMF";
pub const FORMAT_VERSION: u16 = 1;
pub const HEADER_LEN: usize = 4 + 2 + 32;
pub const STRATEGY_NAME: &str = "native";

const ZSTD_LEVEL: i32 = 3;

/// Serialize a model into the native container.
pub fn encode(model: &TrainedModel) -> ModelResult<Vec<u8>> {
    let json = model.to_document()?.to_json_vec()?;
    let body = zstd::encode_all(json.as_slice(), ZSTD_LEVEL).map_err(|e| ModelError::Io {
        path: "<memory>".to_string(),
        reason: format!("zstd compression failed: {e}"),
    })?;
    let digest = blake3::hash(&body);

    let mut out = Vec::with_capacity(HEADER_LEN + body.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(digest.as_bytes());
    out.extend_from_slice(&body);
    Ok(out)
}

/// Verify and decode a native container.
pub fn decode(bytes: &[u8]) -> ModelResult<TrainedModel> {
    if bytes.len() < HEADER_LEN {
        if bytes.len() >= MAGIC.len() && bytes[..MAGIC.len()] != MAGIC {
            return Err(ModelError::BadMagic);
        }
        return Err(ModelError::Truncated { len: bytes.len() });
    }
    if bytes[..4] != MAGIC {
        return Err(ModelError::BadMagic);
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != FORMAT_VERSION {
        return Err(ModelError::UnsupportedVersion {
            found: version,
            supported: FORMAT_VERSION,
        });
    }

    let mut stored = [0u8; 32];
    stored.copy_from_slice(&bytes[6..HEADER_LEN]);
    let expected = blake3::Hash::from(stored);
    let body = &bytes[HEADER_LEN..];
    let actual = blake3::hash(body);
    if actual != expected {
        return Err(ModelError::ChecksumMismatch {
            expected: expected.to_hex().to_string(),
            actual: actual.to_hex().to_string(),
        });
    }

    let json = zstd::decode_all(body).map_err(|e| ModelError::Decompress {
        reason: e.to_string(),
    })?;
    let doc: ModelDocument =
        serde_json::from_slice(&json).map_err(|e| ModelError::decode(STRATEGY_NAME, e))?;
    debug!(estimator = %doc.estimator, bytes = bytes.len(), "native container decoded");
    TrainedModel::from_document(doc)
}

/// Whether `bytes` start with the native magic.
pub fn looks_native(bytes: &[u8]) -> bool {
    bytes.len() >= MAGIC.len() && bytes[..MAGIC.len()] == MAGIC
}

/// Round-trip a probe model through compression, hashing, and parsing.
///
/// Run once before the server starts; a failure means the codec stack
/// itself is broken and no artifact could ever load.
pub fn self_check() -> ModelResult<()> {
    let probe = TrainedModel::new(
        Estimator::Tree(TreeParams {
            children_left: vec![-1],
            children_right: vec![-1],
            feature: vec![-2],
            threshold: vec![-2.0],
            value: vec![vec![1.0]],
        }),
        vec![pathway_core::RawLabel::Int(0)],
        1,
    )?;
    let decoded = decode(&encode(&probe)?)?;
    if decoded != probe {
        return Err(ModelError::invalid("codec self-check produced a different model"));
    }
    Ok(())
}
