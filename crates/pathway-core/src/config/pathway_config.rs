//! Top-level Pathway configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{defaults, ModelConfig, ObservabilityConfig, ServerConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`PATHWAY_*`)
/// 3. Config file (`--config`, or `pathway.toml` in the working directory)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PathwayConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub observability: ObservabilityConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model_dir: Option<String>,
    pub static_dir: Option<String>,
    pub log_level: Option<String>,
}

impl PathwayConfig {
    /// Load configuration with layered resolution.
    ///
    /// An explicit `config_path` must exist. Without one, `pathway.toml` in
    /// the working directory is merged when present.
    pub fn load(
        config_path: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3: config file
        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Self::merge_toml_file(&mut config, path)?;
            }
            None => {
                let default_path = Path::new(defaults::DEFAULT_CONFIG_FILENAME);
                if default_path.exists() {
                    Self::merge_toml_file(&mut config, default_path)?;
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &PathwayConfig) -> Result<(), ConfigError> {
        if config.server.port == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "server.port".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.server.effective_host().trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "server.host".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if config.model.effective_native_file().trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "model.native_file".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if config.model.effective_legacy_file().trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "model.legacy_file".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        for name in &config.model.strategies {
            if !defaults::DEFAULT_LEGACY_STRATEGIES.contains(&name.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "model.strategies".to_string(),
                    message: format!(
                        "unknown strategy '{name}' (known: {})",
                        defaults::DEFAULT_LEGACY_STRATEGIES.join(", ")
                    ),
                });
            }
        }
        let log_level = config.observability.effective_log_level();
        if !is_valid_log_filter(log_level) {
            return Err(ConfigError::ValidationFailed {
                field: "observability.log_level".to_string(),
                message: format!(
                    "invalid level or filter '{log_level}' (levels: {})",
                    defaults::LOG_LEVELS.join(", ")
                ),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut PathwayConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: PathwayConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a value set.
    pub fn merge(base: &mut PathwayConfig, other: &PathwayConfig) {
        // Server
        if other.server.host.is_some() {
            base.server.host = other.server.host.clone();
        }
        if other.server.port.is_some() {
            base.server.port = other.server.port;
        }
        if other.server.static_dir.is_some() {
            base.server.static_dir = other.server.static_dir.clone();
        }

        // Model
        if other.model.dir.is_some() {
            base.model.dir = other.model.dir.clone();
        }
        if other.model.native_file.is_some() {
            base.model.native_file = other.model.native_file.clone();
        }
        if other.model.legacy_file.is_some() {
            base.model.legacy_file = other.model.legacy_file.clone();
        }
        if !other.model.strategies.is_empty() {
            base.model.strategies = other.model.strategies.clone();
        }

        // Observability
        if other.observability.log_level.is_some() {
            base.observability.log_level = other.observability.log_level.clone();
        }
        if other.observability.json_logs.is_some() {
            base.observability.json_logs = other.observability.json_logs;
        }
    }

    /// Apply environment variable overrides from the process environment.
    /// Pattern: `PATHWAY_PORT`, `PATHWAY_MODEL_DIR`, etc.
    fn apply_env_overrides(config: &mut PathwayConfig) {
        Self::apply_env_overrides_from(config, |key| std::env::var(key).ok());
    }

    /// Apply environment overrides using an arbitrary lookup.
    /// Unparseable values are ignored.
    pub fn apply_env_overrides_from<F>(config: &mut PathwayConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("PATHWAY_HOST") {
            config.server.host = Some(val);
        }
        if let Some(val) = lookup("PATHWAY_PORT") {
            if let Ok(v) = val.parse::<u16>() {
                config.server.port = Some(v);
            }
        }
        if let Some(val) = lookup("PATHWAY_STATIC_DIR") {
            config.server.static_dir = Some(val);
        }
        if let Some(val) = lookup("PATHWAY_MODEL_DIR") {
            config.model.dir = Some(val);
        }
        if let Some(val) = lookup("PATHWAY_LOG_LEVEL") {
            config.observability.log_level = Some(val);
        }
        if let Some(val) = lookup("PATHWAY_JSON_LOGS") {
            if let Ok(v) = val.parse::<bool>() {
                config.observability.json_logs = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    pub fn apply_cli_overrides(config: &mut PathwayConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.host {
            config.server.host = Some(v.clone());
        }
        if let Some(v) = cli.port {
            config.server.port = Some(v);
        }
        if let Some(ref v) = cli.static_dir {
            config.server.static_dir = Some(v.clone());
        }
        if let Some(ref v) = cli.model_dir {
            config.model.dir = Some(v.clone());
        }
        if let Some(ref v) = cli.log_level {
            config.observability.log_level = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// `info`, or comma-separated `target=level` directives with a bare level
/// allowed among them.
fn is_valid_log_filter(filter: &str) -> bool {
    let mut directives = filter.split(',').map(str::trim).filter(|d| !d.is_empty()).peekable();
    directives.peek().is_some()
        && directives.all(|directive| {
            let (target, level) = match directive.rsplit_once('=') {
                Some((target, level)) => (Some(target.trim()), level.trim()),
                None => (None, directive),
            };
            target.map_or(true, |t| !t.is_empty())
                && defaults::LOG_LEVELS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(level))
        })
}
