use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use pathway_core::errors::PathwayErrorCode;
use pathway_core::PathwayConfig;
use pathway_model::artifact::native;
use pathway_model::{load_file, DecodeStrategy};
use tracing::info;

use super::exit_code;
use crate::tracing_setup;

#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// Legacy JSON artifact to read
    pub input: PathBuf,

    /// Native artifact to write
    pub output: PathBuf,
}

pub fn run(args: ConvertArgs, config_path: Option<&Path>) -> i32 {
    let config = match PathwayConfig::load(config_path, None) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("pathway: configuration error [{}]: {e}", e.error_code());
            return exit_code::CONFIG_FAILURE;
        }
    };
    tracing_setup::init_tracing("warn", config.observability.effective_json_logs());

    let chain = DecodeStrategy::legacy_chain(config.model.effective_strategies().as_slice());
    match convert(&args.input, &args.output, &chain) {
        Ok(strategy) => {
            println!(
                "converted {} -> {} (decoded with {strategy})",
                args.input.display(),
                args.output.display()
            );
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("pathway: convert failed: {e:#}");
            exit_code::RUNTIME_FAILURE
        }
    }
}

/// Decode `input` with the legacy chain and write it natively to `output`.
/// Returns the name of the strategy that decoded it.
pub fn convert(input: &Path, output: &Path, chain: &[DecodeStrategy]) -> anyhow::Result<String> {
    let mut attempts = Vec::new();
    let loaded = load_file(input, chain, &mut attempts)
        .with_context(|| format!("cannot decode {}", input.display()))?;
    let bytes = native::encode(&loaded.model).context("cannot encode native artifact")?;
    std::fs::write(output, &bytes)
        .with_context(|| format!("cannot write {}", output.display()))?;

    // Read back what was written before reporting success.
    native::decode(&std::fs::read(output)?).context("written artifact does not verify")?;
    info!(
        input = %input.display(),
        output = %output.display(),
        strategy = %loaded.source.strategy,
        bytes = bytes.len(),
        "artifact converted"
    );
    Ok(loaded.source.strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathway_core::models::ArtifactFormat;
    use pathway_core::IClassifier;
    use pathway_model::{ArtifactLoader, ArtifactLocator};
    use test_fixtures::{fixture_path, reference_features};

    #[test]
    fn old_toolkit_artifact_converts_through_compat() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("model.pwm");
        let strategy = convert(
            &fixture_path("models/forest_sklearn_022.json"),
            &output,
            &DecodeStrategy::default_legacy_chain(),
        )
        .unwrap();
        assert_eq!(strategy, "compat");

        let model = native::decode(&std::fs::read(&output).unwrap()).unwrap();
        assert_eq!(model.n_features_in(), 15);
        assert_eq!(model.library_version(), Some("0.22.1"));

        let handle = ArtifactLoader::new(ArtifactLocator::new(
            dir.path(),
            "model.pwm",
            "model.json",
        ))
        .load();
        assert!(handle.is_loaded());
        let source = handle.source().unwrap();
        assert_eq!(source.format, ArtifactFormat::Native);
        assert_eq!(source.strategy, "native");

        let features = reference_features();
        let before = {
            let mut attempts = Vec::new();
            load_file(
                &fixture_path("models/forest_sklearn_022.json"),
                &DecodeStrategy::default_legacy_chain(),
                &mut attempts,
            )
            .unwrap()
            .model
            .predict_proba(features.as_slice())
            .unwrap()
        };
        assert_eq!(model.predict_proba(features.as_slice()).unwrap(), before);
    }

    #[test]
    fn corrupt_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.pwm");
        assert!(convert(
            &fixture_path("models/corrupt.json"),
            &output,
            &DecodeStrategy::default_legacy_chain(),
        )
        .is_err());
        assert!(!output.exists());
    }

    #[test]
    fn missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert(
            &dir.path().join("nope.json"),
            &dir.path().join("out.pwm"),
            &DecodeStrategy::default_legacy_chain(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("cannot decode"));
    }
}
