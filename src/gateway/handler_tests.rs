//! Router-level tests for the gateway using mock adapters.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use crate::config::Limits;
use crate::gateway::{AppState, ESTIMATE_PATH, create_router_with_state};
use crate::lookup::{MockProductLookup, ProductRecord};
use crate::pipeline::{Estimator, EstimationResult};
use crate::vision::MockVisionModel;

fn record(code: &str, name: &str) -> ProductRecord {
    let mut record = ProductRecord::synthetic(code);
    record.item_name = Some(name.to_string());
    record
}

fn test_router(vision: MockVisionModel, lookup: MockProductLookup) -> Router {
    let estimator = Estimator::new(
        Arc::new(vision),
        Arc::new(lookup),
        Limits::default(),
        Duration::from_secs(1),
    );
    create_router_with_state(AppState::new(estimator))
}

fn estimate_request(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(ESTIMATE_PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_healthz_returns_ok() {
    let router = test_router(MockVisionModel::new(), MockProductLookup::new());

    let response = router
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_root_describes_service() {
    let router = test_router(MockVisionModel::new(), MockProductLookup::new());

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "JAN Code Estimation API");
    assert_eq!(body["api_prefix"], "/api/v1");
}

#[tokio::test]
async fn test_estimate_success_round_trip() {
    let vision = MockVisionModel::new()
        .with_keywords(&["asahi beer"])
        .with_verdict(&["4901234567894"], 0.9);
    let lookup = MockProductLookup::new().with_keyword(
        "asahi beer",
        vec![record("4901234567894", "Asahi Super Dry 350ml")],
    );
    let router = test_router(vision, lookup);

    let response = router
        .oneshot(estimate_request(&serde_json::json!({
            "product_name": "Asahi Super Dry",
            "product_image_url": "https://example.com/beer.jpg"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let result: EstimationResult = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(result.jancode.as_deref(), Some("4901234567894"));
    assert_eq!(result.candidates.len(), 1);
    assert_eq!(
        result.product_name.as_deref(),
        Some("Asahi Super Dry 350ml")
    );
    assert!((result.confidence - 0.9).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_estimate_response_uses_wire_field_names() {
    let vision = MockVisionModel::new()
        .with_keywords(&["asahi beer"])
        .with_verdict(&["4901234567894"], 0.9);
    let lookup = MockProductLookup::new().with_keyword(
        "asahi beer",
        vec![record("4901234567894", "Asahi Super Dry 350ml")],
    );
    let router = test_router(vision, lookup);

    let response = router
        .oneshot(estimate_request(&serde_json::json!({
            "product_name": "Asahi Super Dry",
            "product_image_url": "https://example.com/beer.jpg"
        })))
        .await
        .unwrap();

    let body = body_json(response).await;

    assert!(body["usedKeywords"].is_array());
    assert!(body["keywordHits"].is_object());
    assert_eq!(body["candidates"][0]["codeNumber"], "4901234567894");
    assert_eq!(body["candidates"][0]["itemName"], "Asahi Super Dry 350ml");
    assert_eq!(body["candidates"][0]["searchKeyword"], "asahi beer");
}

#[tokio::test]
async fn test_empty_product_name_is_rejected() {
    let router = test_router(MockVisionModel::new(), MockProductLookup::new());

    let response = router
        .oneshot(estimate_request(&serde_json::json!({
            "product_name": "  ",
            "product_image_url": "https://example.com/beer.jpg"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("product_name"));
}

#[tokio::test]
async fn test_empty_image_url_is_rejected() {
    let router = test_router(MockVisionModel::new(), MockProductLookup::new());

    let response = router
        .oneshot(estimate_request(&serde_json::json!({
            "product_name": "Asahi Super Dry",
            "product_image_url": ""
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_a_client_error() {
    let router = test_router(MockVisionModel::new(), MockProductLookup::new());

    let response = router
        .oneshot(estimate_request(&serde_json::json!({
            "product_name": "Asahi Super Dry"
        })))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_degraded_pipeline_still_returns_200() {
    // No keywords, no estimates: zero-candidate outcome, still a success
    // at the transport level.
    let router = test_router(MockVisionModel::new(), MockProductLookup::new());

    let response = router
        .oneshot(estimate_request(&serde_json::json!({
            "product_name": "Mystery Gadget",
            "product_image_url": "https://example.com/gadget.jpg"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["jancode"].is_null());
    assert_eq!(body["candidates"].as_array().unwrap().len(), 0);
    assert_eq!(body["confidence"], 0.0);
}
