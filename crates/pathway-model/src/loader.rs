//! Artifact loader: locate, decode, and wrap the model in a handle.
//!
//! Chain: native container → legacy strategies in configured order →
//! degraded handle. Each failed attempt is logged and recorded on the
//! handle; nothing here aborts the process.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pathway_core::config::{defaults, ModelConfig};
use pathway_core::constants::FEATURE_COUNT;
use pathway_core::errors::{ModelError, ModelResult, PathwayErrorCode};
use pathway_core::models::{ArtifactFormat, ArtifactSource, LoadAttempt};
use pathway_core::{IClassifier, PredictorHandle};
use tracing::{debug, error, info, warn};

use crate::artifact::{legacy, native, ArtifactLocator};
use crate::trained_model::TrainedModel;

/// One named way of turning artifact bytes into a model.
#[derive(Clone, Copy)]
pub struct DecodeStrategy {
    pub name: &'static str,
    pub format: ArtifactFormat,
    pub decode: fn(&[u8]) -> ModelResult<TrainedModel>,
}

impl std::fmt::Debug for DecodeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodeStrategy")
            .field("name", &self.name)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl DecodeStrategy {
    pub const NATIVE: Self = Self {
        name: native::STRATEGY_NAME,
        format: ArtifactFormat::Native,
        decode: native::decode,
    };

    /// Look up a legacy strategy by its configured name.
    pub fn legacy(name: &str) -> Option<Self> {
        let (name, decode): (&'static str, fn(&[u8]) -> ModelResult<TrainedModel>) = match name {
            legacy::LATIN1 => (legacy::LATIN1, legacy::decode_latin1),
            legacy::BYTES => (legacy::BYTES, legacy::decode_bytes),
            legacy::DEFAULT => (legacy::DEFAULT, legacy::decode_default),
            legacy::COMPAT => (legacy::COMPAT, legacy::decode_compat),
            _ => return None,
        };
        Some(Self {
            name,
            format: ArtifactFormat::Legacy,
            decode,
        })
    }

    /// Build a legacy chain from names, skipping unknown ones.
    pub fn legacy_chain<S: AsRef<str>>(names: &[S]) -> Vec<Self> {
        names
            .iter()
            .filter_map(|n| {
                let found = Self::legacy(n.as_ref());
                if found.is_none() {
                    warn!(strategy = n.as_ref(), "unknown legacy strategy ignored");
                }
                found
            })
            .collect()
    }

    /// latin1 → bytes → default → compat.
    pub fn default_legacy_chain() -> Vec<Self> {
        Self::legacy_chain(&defaults::DEFAULT_LEGACY_STRATEGIES[..])
    }
}

/// A successfully decoded artifact and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedArtifact {
    pub model: TrainedModel,
    pub source: ArtifactSource,
}

/// Produces the process-wide [`PredictorHandle`] at startup.
#[derive(Debug, Clone)]
pub struct ArtifactLoader {
    locator: ArtifactLocator,
    legacy_chain: Vec<DecodeStrategy>,
}

impl ArtifactLoader {
    pub fn new(locator: ArtifactLocator) -> Self {
        Self {
            locator,
            legacy_chain: DecodeStrategy::default_legacy_chain(),
        }
    }

    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            locator: ArtifactLocator::from_config(config),
            legacy_chain: DecodeStrategy::legacy_chain(config.effective_strategies().as_slice()),
        }
    }

    /// Replace the legacy strategy order.
    pub fn with_strategies(mut self, chain: Vec<DecodeStrategy>) -> Self {
        self.legacy_chain = chain;
        self
    }

    pub fn locator(&self) -> &ArtifactLocator {
        &self.locator
    }

    pub fn legacy_chain(&self) -> &[DecodeStrategy] {
        &self.legacy_chain
    }

    /// Load the model, falling back to a degraded handle on any failure.
    pub fn load(&self) -> PredictorHandle {
        let mut attempts = Vec::new();
        match self.try_load(&mut attempts) {
            Ok(LoadedArtifact { model, source }) => {
                info!(
                    source = %source,
                    estimator = model.name(),
                    features = model.n_features_in(),
                    attempts = attempts.len(),
                    "model loaded"
                );
                let classifier: Arc<dyn IClassifier> = Arc::new(model);
                PredictorHandle::loaded(classifier, Some(source), attempts)
            }
            Err(e) => {
                error!(
                    code = e.error_code(),
                    error = %e,
                    attempts = attempts.len(),
                    "model unavailable, serving in degraded mode"
                );
                self.log_remediation(&e);
                PredictorHandle::failed(attempts)
            }
        }
    }

    /// Run the chain, recording every attempt into `attempts`.
    pub fn try_load(&self, attempts: &mut Vec<LoadAttempt>) -> ModelResult<LoadedArtifact> {
        let dir = self.locator.model_dir();
        if !dir.is_dir() {
            return Err(ModelError::ModelDirMissing {
                path: dir.display().to_string(),
            });
        }

        let native_path = self.locator.native_path();
        let legacy_path = self.locator.legacy_path();
        let has_native = native_path.is_file();
        let has_legacy = legacy_path.is_file();
        debug!(
            native = %native_path.display(),
            has_native,
            legacy = %legacy_path.display(),
            has_legacy,
            "artifact candidates"
        );
        if !has_native && !has_legacy {
            return Err(ModelError::ArtifactNotFound {
                dir: dir.display().to_string(),
            });
        }

        if has_native {
            if let Some(found) = run_chain(&native_path, &[DecodeStrategy::NATIVE], attempts) {
                return Ok(found);
            }
        }
        if has_legacy {
            if let Some(found) = run_chain(&legacy_path, &self.legacy_chain, attempts) {
                return Ok(found);
            }
        }

        Err(ModelError::AllStrategiesFailed {
            attempts: attempts.len(),
        })
    }

    fn log_remediation(&self, err: &ModelError) {
        match err {
            ModelError::ModelDirMissing { .. } | ModelError::ArtifactNotFound { .. } => {
                warn!(
                    dir = %self.locator.model_dir().display(),
                    native = %self.locator.native_path().display(),
                    legacy = %self.locator.legacy_path().display(),
                    "place a model artifact at one of the candidate paths, or point model.dir / --model-dir at it"
                );
            }
            _ => {
                warn!(
                    legacy = %self.locator.legacy_path().display(),
                    native = %self.locator.native_path().display(),
                    "convert the legacy artifact with `pathway convert <legacy> <native>`"
                );
                warn!("or re-export the model with the current training toolkit");
            }
        }
    }
}

/// Load a single artifact file, picking the chain from its leading bytes.
///
/// Used by the `convert` and `inspect` commands.
pub fn load_file(
    path: &Path,
    legacy_chain: &[DecodeStrategy],
    attempts: &mut Vec<LoadAttempt>,
) -> ModelResult<LoadedArtifact> {
    let bytes = std::fs::read(path).map_err(|e| ModelError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let native_chain = [DecodeStrategy::NATIVE];
    let chain: &[DecodeStrategy] = if native::looks_native(&bytes) {
        &native_chain
    } else {
        legacy_chain
    };
    decode_with(path, &bytes, chain, attempts).ok_or(ModelError::AllStrategiesFailed {
        attempts: attempts.len(),
    })
}

fn run_chain(
    path: &Path,
    chain: &[DecodeStrategy],
    attempts: &mut Vec<LoadAttempt>,
) -> Option<LoadedArtifact> {
    let format = chain.first()?.format;
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            let err = ModelError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            };
            warn!(path = %path.display(), code = err.error_code(), error = %err, "artifact unreadable");
            attempts.push(LoadAttempt::failure(path.to_path_buf(), format, "read", &err));
            return None;
        }
    };
    decode_with(path, &bytes, chain, attempts)
}

fn decode_with(
    path: &Path,
    bytes: &[u8],
    chain: &[DecodeStrategy],
    attempts: &mut Vec<LoadAttempt>,
) -> Option<LoadedArtifact> {
    for strategy in chain {
        match (strategy.decode)(bytes) {
            Ok(model) => {
                info!(strategy = strategy.name, path = %path.display(), "artifact decoded");
                if model.n_features_in() != FEATURE_COUNT {
                    warn!(
                        expected = FEATURE_COUNT,
                        actual = model.n_features_in(),
                        "model feature count differs from the request schema; predictions will fail"
                    );
                }
                attempts.push(LoadAttempt::success(
                    path.to_path_buf(),
                    strategy.format,
                    strategy.name,
                ));
                return Some(LoadedArtifact {
                    model,
                    source: ArtifactSource {
                        path: PathBuf::from(path),
                        format: strategy.format,
                        strategy: strategy.name.to_string(),
                    },
                });
            }
            Err(e) => {
                warn!(
                    strategy = strategy.name,
                    path = %path.display(),
                    code = e.error_code(),
                    error = %e,
                    "decode strategy failed, trying next"
                );
                attempts.push(LoadAttempt::failure(
                    path.to_path_buf(),
                    strategy.format,
                    strategy.name,
                    &e,
                ));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_lookup_by_name() {
        assert_eq!(DecodeStrategy::legacy("compat").map(|s| s.name), Some("compat"));
        assert!(DecodeStrategy::legacy("pickle").is_none());
    }

    #[test]
    fn default_chain_order() {
        let names: Vec<_> = DecodeStrategy::default_legacy_chain()
            .iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["latin1", "bytes", "default", "compat"]);
    }

    #[test]
    fn unknown_names_are_skipped() {
        let chain = DecodeStrategy::legacy_chain(&["compat", "nope", "default"][..]);
        let names: Vec<_> = chain.iter().map(|s| s.name).collect();
        assert_eq!(names, ["compat", "default"]);
    }

    #[test]
    fn missing_dir_is_distinct_from_decode_failure() {
        let loader = ArtifactLoader::new(ArtifactLocator::new(
            "/definitely/not/here",
            "m.pwm",
            "m.json",
        ));
        let mut attempts = Vec::new();
        assert!(matches!(
            loader.try_load(&mut attempts),
            Err(ModelError::ModelDirMissing { .. })
        ));
        assert!(attempts.is_empty());
        assert!(!loader.load().is_loaded());
    }
}
