use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use pathway_core::config::defaults::DEFAULT_INDEX_FILE as INDEX_FILE;
use pathway_core::models::HealthReport;
use serde_json::Value;
use tracing::{debug, info_span};
use uuid::Uuid;

use super::response::{ApiError, PredictResponse};
use super::static_files;
use super::AppState;

/// `POST /predict`.
///
/// The body is taken raw so a malformed or non-JSON body becomes "no data"
/// instead of an extractor rejection.
pub async fn predict(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let payload = decode_body(&headers, &body);
    let span = info_span!("predict", request_id = %Uuid::new_v4());
    let outcome = span.in_scope(|| state.service.predict(payload.as_ref()));

    match outcome {
        Ok(result) => (StatusCode::OK, Json(PredictResponse::from(result))).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// `GET /health`. Always 200; `model_loaded` tells degraded mode apart.
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.service.handle().health_report())
}

/// `GET /`.
pub async fn index(State(state): State<AppState>) -> Response {
    let path = state.static_dir.join(INDEX_FILE);
    match tokio::fs::read(&path).await {
        Ok(bytes) => Html(bytes).into_response(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "index page unavailable");
            (
                StatusCode::NOT_FOUND,
                format!(
                    "{INDEX_FILE} not found in {}. Put the frontend in the static directory or pass --static-dir.",
                    state.static_dir.display()
                ),
            )
                .into_response()
        }
    }
}

/// `GET /<path>`.
pub async fn static_asset(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    let not_found = || (StatusCode::NOT_FOUND, format!("File not found: {path}")).into_response();

    let Some(file) = static_files::resolve(&state.static_dir, &path) else {
        debug!(path = %path, "rejected static path");
        return not_found();
    };
    match tokio::fs::read(&file).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, static_files::content_type(&file))],
            bytes,
        )
            .into_response(),
        Err(_) => not_found(),
    }
}

/// Parse the body as JSON when it is declared as JSON and non-empty.
fn decode_body(headers: &HeaderMap, body: &[u8]) -> Option<Value> {
    if body.is_empty() || !is_json_content_type(headers) {
        return None;
    }
    match serde_json::from_slice(body) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "request body is not valid JSON");
            None
        }
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        h
    }

    #[test]
    fn json_content_types() {
        assert!(is_json_content_type(&headers("application/json")));
        assert!(is_json_content_type(&headers("Application/JSON; charset=utf-8")));
        assert!(is_json_content_type(&headers("application/vnd.api+json")));
        assert!(!is_json_content_type(&headers("text/plain")));
        assert!(!is_json_content_type(&HeaderMap::new()));
    }

    #[test]
    fn body_decoding() {
        let json = headers("application/json");
        assert_eq!(decode_body(&json, b"{\"a\": 1}"), Some(serde_json::json!({"a": 1})));
        assert_eq!(decode_body(&json, b"{not json"), None);
        assert_eq!(decode_body(&json, b""), None);
        assert_eq!(decode_body(&headers("text/plain"), b"{\"a\": 1}"), None);
    }
}
