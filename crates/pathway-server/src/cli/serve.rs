use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use pathway_core::config::{CliOverrides, ServerConfig};
use pathway_core::constants::{MODEL_DIR_SEARCH_DEPTH, PATHWAY_VERSION};
use pathway_core::errors::PathwayErrorCode;
use pathway_core::{PathwayConfig, PredictorHandle};
use pathway_model::artifact::resolve_exe_relative;
use pathway_model::ArtifactLoader;
use tracing::{error, info, warn};

use super::exit_code;
use crate::http::{create_router, AppState};
use crate::service::PredictionService;
use crate::{preflight, tracing_setup};

#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory holding the model artifacts
    #[arg(long)]
    pub model_dir: Option<String>,

    /// Directory holding index.html and other frontend assets
    #[arg(long)]
    pub static_dir: Option<String>,

    /// Log level or filter directive (overridden by PATHWAY_LOG)
    #[arg(long = "log")]
    pub log_level: Option<String>,
}

impl ServeArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            host: self.host.clone(),
            port: self.port,
            model_dir: self.model_dir.clone(),
            static_dir: self.static_dir.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

pub async fn run(args: ServeArgs, config_path: Option<&Path>) -> i32 {
    let config = match PathwayConfig::load(config_path, Some(&args.overrides())) {
        Ok(config) => config,
        Err(e) => {
            // Tracing is configured from this config, so report directly.
            eprintln!("pathway: configuration error [{}]: {e}", e.error_code());
            return exit_code::CONFIG_FAILURE;
        }
    };
    tracing_setup::init_tracing(
        config.observability.effective_log_level(),
        config.observability.effective_json_logs(),
    );

    if preflight::run().is_err() {
        error!("preflight failed, refusing to start");
        return exit_code::CONFIG_FAILURE;
    }

    let loader = ArtifactLoader::from_config(&config.model);
    let handle = Arc::new(loader.load());
    let static_dir = resolve_static_dir(&config.server);
    if !static_dir.is_dir() {
        warn!(path = %static_dir.display(), "static directory not found, / will return 404");
    }
    print_banner(&config, &handle, loader.locator().model_dir(), &static_dir);

    let state = AppState::new(PredictionService::new(handle), static_dir);
    match serve(&config.server, state).await {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            error!(error = ?e, "server stopped with an error");
            exit_code::RUNTIME_FAILURE
        }
    }
}

async fn serve(server: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let addr = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => warn!(error = %e, "could not listen for Ctrl-C, shutting down"),
    }
}

/// Absolute paths are used as given. Relative ones, including the default,
/// are found next to the executable like the model directory.
pub fn resolve_static_dir(server: &ServerConfig) -> PathBuf {
    let dir = server.effective_static_dir();
    if Path::new(dir).is_absolute() {
        PathBuf::from(dir)
    } else {
        resolve_exe_relative(dir, MODEL_DIR_SEARCH_DEPTH)
    }
}

fn print_banner(
    config: &PathwayConfig,
    handle: &PredictorHandle,
    model_dir: &Path,
    static_dir: &Path,
) {
    let port = config.server.effective_port();
    let status = if handle.is_loaded() {
        "loaded"
    } else {
        "NOT LOADED (degraded mode)"
    };

    println!("Pathway {PATHWAY_VERSION}");
    println!("  model dir:   {}", model_dir.display());
    println!("  model:       {status}");
    if let Some(source) = handle.source() {
        println!("  source:      {source}");
    }
    if let Some(n) = handle.expected_feature_count() {
        println!("  features:    {n}");
    }
    println!("  static dir:  {}", static_dir.display());
    println!("  frontend:    http://localhost:{port}/");
    println!("  predict:     POST http://localhost:{port}/predict");
    println!("  health:      http://localhost:{port}/health");
}
