use std::path::{Path, PathBuf};

use clap::Args;
use pathway_core::errors::PathwayErrorCode;
use pathway_core::{IClassifier, PathwayConfig};
use pathway_model::{load_file, DecodeStrategy, LoadedArtifact};

use super::exit_code;
use crate::tracing_setup;

#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Artifact to inspect (native or legacy)
    pub path: PathBuf,
}

pub fn run(args: InspectArgs, config_path: Option<&Path>) -> i32 {
    let config = match PathwayConfig::load(config_path, None) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("pathway: configuration error [{}]: {e}", e.error_code());
            return exit_code::CONFIG_FAILURE;
        }
    };
    tracing_setup::init_tracing("warn", config.observability.effective_json_logs());

    let chain = DecodeStrategy::legacy_chain(config.model.effective_strategies().as_slice());
    let mut attempts = Vec::new();
    match load_file(&args.path, &chain, &mut attempts) {
        Ok(loaded) => {
            print!("{}", describe(&loaded));
            println!("attempts:    {}", attempts.len());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("pathway: cannot load {}: {e}", args.path.display());
            for attempt in &attempts {
                eprintln!(
                    "  {:<8} {}",
                    attempt.strategy,
                    attempt.error.as_deref().unwrap_or("ok")
                );
            }
            exit_code::RUNTIME_FAILURE
        }
    }
}

/// Human-readable summary of a decoded artifact.
pub fn describe(loaded: &LoadedArtifact) -> String {
    let model = &loaded.model;
    let classes: Vec<String> = model.classes().iter().map(|c| c.to_string()).collect();
    let mut out = String::new();
    out.push_str(&format!("path:        {}\n", loaded.source.path.display()));
    out.push_str(&format!("format:      {}\n", loaded.source.format));
    out.push_str(&format!("strategy:    {}\n", loaded.source.strategy));
    out.push_str(&format!("estimator:   {}\n", model.name()));
    out.push_str(&format!(
        "version:     {}\n",
        model.library_version().unwrap_or("unknown")
    ));
    out.push_str(&format!("features:    {}\n", model.n_features_in()));
    out.push_str(&format!("classes:     [{}]\n", classes.join(", ")));
    out
}
