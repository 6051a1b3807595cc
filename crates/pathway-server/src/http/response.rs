//! JSON response bodies and the error-to-response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pathway_core::{PathwayError, PredictionResult};
use serde::{Deserialize, Serialize};

/// `{success: true, outcome, prediction, confidence}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: PredictionResult,
}

impl From<PredictionResult> for PredictResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

/// `{success: false, error}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// A service error on its way to the client.
#[derive(Debug)]
pub struct ApiError(pub PathwayError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            PathwayError::Request(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message the client sees. Runtime failures are prefixed; the
    /// full error chain stays in the server log.
    pub fn client_message(&self) -> String {
        match &self.0 {
            PathwayError::Request(e) => e.to_string(),
            PathwayError::ModelUnavailable => self.0.to_string(),
            other => format!("An error occurred during prediction: {other}"),
        }
    }
}

impl From<PathwayError> for ApiError {
    fn from(e: PathwayError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::new(self.client_message()))).into_response()
    }
}
