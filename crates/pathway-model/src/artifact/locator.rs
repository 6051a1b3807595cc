//! Resolves where the model artifacts live.
//!
//! Discovery is anchored at the running executable, not the working
//! directory, so the service finds its models however it was launched.

use std::path::{Path, PathBuf};

use pathway_core::config::ModelConfig;
use pathway_core::constants::{MODEL_DIR_NAME, MODEL_DIR_SEARCH_DEPTH};
use tracing::{debug, warn};

/// The model directory and the two candidate artifact paths inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocator {
    model_dir: PathBuf,
    native_file: String,
    legacy_file: String,
}

impl ArtifactLocator {
    pub fn new(
        model_dir: impl Into<PathBuf>,
        native_file: impl Into<String>,
        legacy_file: impl Into<String>,
    ) -> Self {
        Self {
            model_dir: model_dir.into(),
            native_file: native_file.into(),
            legacy_file: legacy_file.into(),
        }
    }

    /// Use `model.dir` when configured, otherwise discover it next to the
    /// executable.
    pub fn from_config(config: &ModelConfig) -> Self {
        let model_dir = match &config.dir {
            Some(dir) => PathBuf::from(dir),
            None => resolve_exe_relative(MODEL_DIR_NAME, MODEL_DIR_SEARCH_DEPTH),
        };
        Self::new(
            model_dir,
            config.effective_native_file(),
            config.effective_legacy_file(),
        )
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    pub fn native_path(&self) -> PathBuf {
        self.model_dir.join(&self.native_file)
    }

    pub fn legacy_path(&self) -> PathBuf {
        self.model_dir.join(&self.legacy_file)
    }
}

/// Find `name` in the executable's directory or up to `depth` of its
/// ancestors. Falls back to `<exe dir>/<name>` when nothing exists yet.
pub fn resolve_exe_relative(name: &str, depth: usize) -> PathBuf {
    let exe_dir = match std::env::current_exe() {
        Ok(exe) => exe.parent().map(Path::to_path_buf).unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "cannot resolve executable path, using working directory");
            return PathBuf::from(name);
        }
    };
    search_upwards(&exe_dir, name, depth).unwrap_or_else(|| exe_dir.join(name))
}

/// First existing `<ancestor>/<name>` among `start` and `depth` ancestors.
pub fn search_upwards(start: &Path, name: &str, depth: usize) -> Option<PathBuf> {
    start.ancestors().take(depth + 1).find_map(|dir| {
        let candidate = dir.join(name);
        debug!(path = %candidate.display(), "probing");
        candidate.exists().then_some(candidate)
    })
}
