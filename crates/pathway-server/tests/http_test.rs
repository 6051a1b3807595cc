//! End-to-end tests of the HTTP surface, driven through the router.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pathway_core::{IClassifier, PredictorHandle, RawLabel};
use pathway_server::{create_router, AppState, PredictionService};
use serde_json::{json, Value};
use tower::ServiceExt;

use test_fixtures::{
    fixture_value, payload_with, payload_without, reference_payload, sample_forest,
    sample_logistic, struggling_payload, FailingClassifier, FixedClassifier,
};

fn router_with(handle: PredictorHandle, static_dir: &std::path::Path) -> Router {
    let service = PredictionService::new(Arc::new(handle));
    create_router(AppState::new(service, static_dir))
}

fn router_for(classifier: impl IClassifier + 'static) -> Router {
    router_with(
        PredictorHandle::from_classifier(Arc::new(classifier)),
        std::path::Path::new("/nonexistent-static"),
    )
}

fn graduate_router() -> Router {
    router_for(FixedClassifier::new(RawLabel::Int(2)).with_proba(vec![0.05, 0.10, 0.85]))
}

async fn post_json(router: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    send(router, request).await
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get_text(router: Router, uri: &str) -> (StatusCode, String, Option<String>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned(), content_type)
}

#[tokio::test]
async fn reference_payload_predicts_graduate() {
    let (status, body) = post_json(graduate_router(), reference_payload().to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "outcome": "Graduate",
            "prediction": 2,
            "confidence": 0.85
        })
    );
}

#[tokio::test]
async fn missing_admission_grade_is_bad_request() {
    let payload = payload_without(&["admission_grade"]);
    let (status, body) = post_json(graduate_router(), payload.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["error"],
        json!("Missing required features: admission_grade")
    );
}

#[tokio::test]
async fn every_missing_field_is_listed() {
    let payload = payload_without(&["gender", "displaced", "admission_grade"]);
    let (_, body) = post_json(graduate_router(), payload.to_string()).await;
    assert_eq!(
        body["error"],
        json!("Missing required features: gender, displaced, admission_grade")
    );
}

#[tokio::test]
async fn non_numeric_fields_are_rejected_by_name() {
    let cases = [
        (json!("19"), "str"),
        (json!(true), "bool"),
        (json!(null), "NoneType"),
        (json!([19]), "list"),
        (json!({"years": 19}), "dict"),
    ];
    for (value, type_name) in cases {
        let payload = payload_with("age_at_enrollment", value);
        let (status, body) = post_json(graduate_router(), payload.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            json!(format!(
                "Feature 'age_at_enrollment' must be a number. Got: {type_name}"
            ))
        );
    }
}

#[tokio::test]
async fn empty_and_malformed_bodies_are_no_data() {
    let no_data = json!("No data provided. Please send JSON data in the request body.");
    for body in ["", "{}", "{not json", "[1, 2, 3]", "null"] {
        let (status, value) = post_json(graduate_router(), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(value["error"], no_data);
    }

    let request = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(reference_payload().to_string()))
        .unwrap();
    let (status, value) = send(graduate_router(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], no_data);
}

#[tokio::test]
async fn degraded_service_answers_500_for_any_payload() {
    let router = router_with(
        PredictorHandle::failed(Vec::new()),
        std::path::Path::new("/nonexistent-static"),
    );
    for body in [reference_payload().to_string(), String::new()] {
        let (status, value) = post_json(router.clone(), body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            value["error"],
            json!("Model not loaded. The model file may be missing or incompatible. Check server logs for details.")
        );
    }
}

#[tokio::test]
async fn dropout_label_is_normalized() {
    let router = router_for(FixedClassifier::new(RawLabel::Text("Dropout".into())));
    let (status, body) = post_json(router, reference_payload().to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], json!(0));
    assert_eq!(body["outcome"], json!("Drop Out"));
    assert_eq!(body["confidence"], json!(1.0));
}

#[tokio::test]
async fn classifier_failure_is_500_with_prefix() {
    let (status, body) = post_json(router_for(FailingClassifier), reference_payload().to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        json!("An error occurred during prediction: model exploded")
    );
}

#[tokio::test]
async fn real_forest_is_idempotent_and_bounded() {
    let router = router_for(sample_forest());
    let mut seen = Vec::new();
    for payload in [reference_payload(), reference_payload(), struggling_payload()] {
        let (status, body) = post_json(router.clone(), payload.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        let confidence = body["confidence"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&confidence));
        assert!([0, 1, 2].contains(&body["prediction"].as_i64().unwrap()));
        seen.push(body);
    }
    assert_eq!(seen[0], seen[1]);
    assert_eq!(seen[0]["outcome"], json!("Graduate"));
    assert_eq!(seen[0]["confidence"], json!(0.8));
    assert_eq!(seen[2]["outcome"], json!("Drop Out"));
}

#[tokio::test]
async fn overflowing_inputs_keep_confidence_in_range() {
    let mut payload = reference_payload();
    for name in [
        "first_semester_grade",
        "second_semester_grade",
        "second_semester_approved",
    ] {
        payload[name] = json!(1.7e308);
    }
    let (status, body) = post_json(router_for(sample_logistic()), payload.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], json!("Graduate"));
    assert_eq!(body["confidence"], json!(1.0));
}

#[tokio::test]
async fn out_of_range_confidence_is_500() {
    let router = router_for(FixedClassifier::new(RawLabel::Int(2)).with_proba(vec![-3.0, 0.5, 3.5]));
    let (status, body) = post_json(router, reference_payload().to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        json!("An error occurred during prediction: confidence 3.5 is outside [0, 1]")
    );
}

#[tokio::test]
async fn fixture_payload_matches_builder() {
    assert_eq!(fixture_value("payloads/reference.json"), reference_payload());
}

#[tokio::test]
async fn health_reports_model_state() {
    let (status, body) = send(
        graduate_router(),
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["model_loaded"], json!(true));
    assert_eq!(body["model_features"], json!(15));

    let degraded = router_with(
        PredictorHandle::failed(Vec::new()),
        std::path::Path::new("/nonexistent-static"),
    );
    let (status, body) = send(
        degraded,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_loaded"], json!(false));
}

#[tokio::test]
async fn static_files_are_served_with_content_types() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Pathway</h1>").unwrap();
    std::fs::create_dir(dir.path().join("css")).unwrap();
    std::fs::write(dir.path().join("css").join("site.css"), "body {}").unwrap();
    let router = router_with(
        PredictorHandle::from_classifier(Arc::new(FixedClassifier::new(RawLabel::Int(1)))),
        dir.path(),
    );

    let (status, body, content_type) = get_text(router.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<h1>Pathway</h1>");
    assert!(content_type.unwrap().starts_with("text/html"));

    let (status, body, content_type) = get_text(router.clone(), "/css/site.css").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "body {}");
    assert!(content_type.unwrap().starts_with("text/css"));

    let (status, body, _) = get_text(router.clone(), "/missing.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "File not found: missing.js");

    let (status, _, _) = get_text(router, "/css/..%2F..%2Fetc%2Fpasswd").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_index_is_404_with_hint() {
    let (status, body, _) = get_text(graduate_router(), "/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("index.html not found"));
}
