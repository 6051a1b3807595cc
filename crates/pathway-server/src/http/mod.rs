//! HTTP surface.
//!
//! ## Endpoints
//!
//! - `GET /` - the frontend's `index.html`
//! - `GET /health` - health report, always 200
//! - `POST /predict` - run a prediction
//! - `GET /<path>` - other static assets

pub mod handlers;
pub mod response;
pub mod static_files;

use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::service::PredictionService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: PredictionService,
    pub static_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(service: PredictionService, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            service,
            static_dir: Arc::new(static_dir.into()),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .route("/*path", get(handlers::static_asset))
        .with_state(state)
}
