//! Integration Tests for the Cache Admin API
//!
//! Tests the full request/response cycle for each endpoint.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use vconnector::{api::create_router, AppState, Inventory};

// == Helper Functions ==

fn create_test_state(max_size: i64) -> AppState {
    AppState::new(Inventory::new(max_size, 0).unwrap(), Duration::from_secs(300))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

fn put_object(body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri("/cache")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// == PUT /cache ==

#[tokio::test]
async fn test_add_endpoint_success() {
    let app = create_router(create_test_state(0));

    let (status, json) = send(
        &app,
        put_object(json!({"name": "VirtualMachine:web-01", "value": {"moref": "vm-101"}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "VirtualMachine:web-01");
    assert_eq!(json["ttl"], 300);
    assert!(json["message"].as_str().unwrap().contains("VirtualMachine:web-01"));
}

#[tokio::test]
async fn test_add_endpoint_empty_name() {
    let app = create_router(create_test_state(0));

    let (status, json) = send(&app, put_object(json!({"name": "", "value": 1}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_add_endpoint_malformed_body() {
    let app = create_router(create_test_state(0));

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/cache")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"value": 1}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == GET /cache/:name ==

#[tokio::test]
async fn test_get_endpoint_roundtrip() {
    let app = create_router(create_test_state(0));

    send(
        &app,
        put_object(json!({"name": "HostSystem:esx-a", "value": {"moref": "host-7"}})),
    )
    .await;
    let (status, json) = send(&app, get("/cache/HostSystem:esx-a")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"]["moref"], "host-7");
}

#[tokio::test]
async fn test_get_endpoint_zero_ttl_is_miss() {
    let app = create_router(create_test_state(0));

    send(&app, put_object(json!({"name": "x", "value": 42, "ttl": 0}))).await;
    let (status, _) = send(&app, get("/cache/x")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == GET /cache/:name/info ==

#[tokio::test]
async fn test_info_endpoint_reports_hits() {
    let app = create_router(create_test_state(0));

    send(&app, put_object(json!({"name": "a", "value": 1, "ttl": 100}))).await;
    for _ in 0..3 {
        send(&app, get("/cache/a")).await;
    }
    let (status, json) = send(&app, get("/cache/a/info")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "a");
    assert_eq!(json["hits"], 3);
    assert_eq!(json["ttl"], 100);
    assert!(json["created_at"].is_string());
}

#[tokio::test]
async fn test_info_endpoint_unknown() {
    let app = create_router(create_test_state(0));

    let (status, _) = send(&app, get("/cache/missing/info")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Eviction through the API ==

#[tokio::test]
async fn test_capacity_eviction() {
    let app = create_router(create_test_state(2));

    for (name, value) in [("a", 1), ("b", 2), ("c", 3)] {
        send(&app, put_object(json!({"name": name, "value": value}))).await;
    }

    assert_eq!(send(&app, get("/cache/a")).await.0, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, get("/cache/b")).await.0, StatusCode::OK);
    assert_eq!(send(&app, get("/cache/c")).await.0, StatusCode::OK);

    let (_, stats) = send(&app, get("/stats")).await;
    assert_eq!(stats["evictions"], 1);
    assert_eq!(stats["total_entries"], 2);
    assert_eq!(stats["max_size"], 2);
}

// == DELETE /cache ==

#[tokio::test]
async fn test_clear_endpoint() {
    let app = create_router(create_test_state(0));

    for i in 0..5 {
        send(&app, put_object(json!({"name": format!("obj-{}", i), "value": i}))).await;
    }

    let (status, json) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/cache")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cleared"], 5);
    assert_eq!(send(&app, get("/cache/obj-0")).await.0, StatusCode::NOT_FOUND);
}

// == GET /stats ==

#[tokio::test]
async fn test_stats_endpoint_counts() {
    let app = create_router(create_test_state(0));

    send(&app, put_object(json!({"name": "a", "value": 1}))).await;
    send(&app, get("/cache/a")).await;
    send(&app, get("/cache/nope")).await;

    let (status, json) = send(&app, get("/stats")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["hit_rate"], 0.5);
}

// == GET /health ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(create_test_state(0));

    let (status, json) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["housekeeping"], false);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = create_router(create_test_state(0));

    let response = app.oneshot(get("/nonexistent")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
