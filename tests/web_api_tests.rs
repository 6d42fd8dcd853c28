//! Integration tests for the Centerline Web API.
//!
//! These tests require the `web` feature to be enabled:
//! ```bash
//! cargo test --features web web_api
//! ```

#![cfg(feature = "web")]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use centerline::config::Config;
use centerline::models::{Point, Status};
use centerline::web::{create_router, AppState};

mod fixtures;
use fixtures::{test_points_small, write_points};

/// Creates a router over an empty temporary data directory.
fn create_test_app() -> (axum::Router, TempDir) {
    create_test_app_with(Config::default())
}

fn create_test_app_with(config: Config) -> (axum::Router, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let state = AppState::new(config, temp_dir.path().to_path_buf());
    (create_router(state), temp_dir)
}

/// Sends a request and returns the status and raw body.
async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Vec<u8>, Option<String>) {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status, body.to_vec(), content_type)
}

/// Helper to make a GET request and get the response body as JSON.
async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::HOST, "localhost:3001")
        .body(Body::empty())
        .unwrap();
    let (status, body, _) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

/// Helper to make a GET request and get the response body as text.
async fn get_text(app: &axum::Router, uri: &str) -> (StatusCode, String, Option<String>) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let (status, body, content_type) = send(app, request).await;
    (status, String::from_utf8(body).unwrap(), content_type)
}

/// Helper to send a JSON body with the given method.
async fn send_json(app: &axum::Router, method: &str, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    let (status, body, _) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (app, _temp) = create_test_app();
    let (status, body) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_settings_reflect_config() {
    let mut config = Config::default();
    config.display.sidebar_collapsed = true;
    config.qr.public_base_url = Some("https://line3.example.com".to_string());
    let (app, _temp) = create_test_app_with(config);

    let (status, body) = get_json(&app, "/api/v1/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sidebarCollapsed"], true);
    assert!(body["mapBackground"].is_null());
    assert_eq!(body["publicBaseUrl"], "https://line3.example.com");
    assert_eq!(body["qrSize"], 200);
}

// ============================================================================
// Point Collection Tests
// ============================================================================

#[tokio::test]
async fn test_get_points_empty() {
    let (app, _temp) = create_test_app();
    let (status, body) = get_json(&app, "/api/v1/points").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_save_then_get_points_round_trip() {
    let (app, temp) = create_test_app();
    let points = serde_json::to_value(test_points_small()).unwrap();

    let (status, _) = send_json(&app, "POST", "/api/v1/points", &points).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(temp.path().join("points.json").exists());

    let (status, body) = get_json(&app, "/api/v1/points").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, points);
}

#[tokio::test]
async fn test_save_points_rejects_malformed_body() {
    let (app, temp) = create_test_app();
    let (status, _) = send_json(&app, "POST", "/api/v1/points", &json!([{"id": "P-01"}])).await;

    assert!(status.is_client_error());
    assert!(!temp.path().join("points.json").exists());
}

// ============================================================================
// Patch Tests
// ============================================================================

#[tokio::test]
async fn test_patch_point_merges_fields() {
    let (app, temp) = create_test_app();
    write_points(temp.path(), &test_points_small());

    let (status, body) = send_json(
        &app,
        "PATCH",
        "/api/v1/points/P-01",
        &json!({"status": "TaggedYellow", "lastChecked": "2026-03-01T08:00:00Z"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "TaggedYellow");
    assert_eq!(body["name"], "Check 1");

    let stored: Vec<Point> =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("points.json")).unwrap())
            .unwrap();
    assert_eq!(stored[0].status, Status::TaggedYellow);
    assert!(stored[0].last_checked.is_some());
    assert_eq!(stored[1], test_points_small()[1]);
}

#[tokio::test]
async fn test_patch_unknown_point() {
    let (app, temp) = create_test_app();
    write_points(temp.path(), &test_points_small());

    let (status, body) =
        send_json(&app, "PATCH", "/api/v1/points/P-99", &json!({"status": "TaggedRed"})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("P-99"));
}

#[tokio::test]
async fn test_patch_without_stored_points_is_not_found() {
    let (app, _temp) = create_test_app();
    let (status, _) =
        send_json(&app, "PATCH", "/api/v1/points/P-01", &json!({"status": "TaggedRed"})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_invalid_merge_is_rejected() {
    let (app, temp) = create_test_app();
    write_points(temp.path(), &test_points_small());
    let before = std::fs::read_to_string(temp.path().join("points.json")).unwrap();

    let (status, body) =
        send_json(&app, "PATCH", "/api/v1/points/P-01", &json!({"zone": "Basement"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid point");
    let after = std::fs::read_to_string(temp.path().join("points.json")).unwrap();
    assert_eq!(before, after);
}

// ============================================================================
// Layout Tests
// ============================================================================

#[tokio::test]
async fn test_layout_round_trip() {
    let (app, _temp) = create_test_app();
    let (status, body) = get_json(&app, "/api/v1/layout").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let modules = json!([{
        "id": "mod-a",
        "label": "Buffer",
        "x": 10.0,
        "y": 10.0,
        "width": 20.0,
        "height": 30.0,
        "hasFill": true,
        "wrapText": false,
        "fontSize": 2.0,
        "color": "blue"
    }]);
    let (status, _) = send_json(&app, "POST", "/api/v1/layout", &modules).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = get_json(&app, "/api/v1/layout").await;
    assert_eq!(body, modules);
}

#[tokio::test]
async fn test_layout_svg_escapes_module_color() {
    let (app, _temp) = create_test_app();
    let modules = json!([{
        "id": "mod-a",
        "label": "Buffer",
        "x": 10.0,
        "y": 10.0,
        "width": 20.0,
        "height": 30.0,
        "hasFill": true,
        "wrapText": false,
        "fontSize": 2.0,
        "color": "red\" onmouseover=\"alert(1)"
    }]);
    let (status, _) = send_json(&app, "POST", "/api/v1/layout", &modules).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, svg, _) = get_text(&app, "/api/v1/layout.svg").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!svg.contains("onmouseover=\""));
    assert!(svg.contains("red&quot; onmouseover=&quot;alert(1)"));
}

#[tokio::test]
async fn test_layout_svg_uses_defaults() {
    let (app, _temp) = create_test_app();
    let (status, svg, content_type) = get_text(&app, "/api/v1/layout.svg").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
    assert_eq!(svg.matches("data-module-id=").count(), 7);
}

// ============================================================================
// Projection Tests
// ============================================================================

#[tokio::test]
async fn test_map_svg() {
    let (app, temp) = create_test_app();
    write_points(temp.path(), &test_points_small());

    let (status, svg, content_type) = get_text(&app, "/api/v1/map.svg?selected=P-02").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
    assert_eq!(svg.matches("data-point-id=").count(), 2);
    assert!(svg.contains("marker-selected"));

    let (status, svg, _) = get_text(&app, "/api/v1/map.svg?print=true").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!svg.contains("data-point-id"));
}

#[tokio::test]
async fn test_map_svg_unknown_selection() {
    let (app, _temp) = create_test_app();
    let (status, _, _) = get_text(&app, "/api/v1/map.svg?selected=P-99").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_phasing_report() {
    let (app, temp) = create_test_app();
    write_points(temp.path(), &test_points_small());

    let (status, body) = get_json(&app, "/api/v1/phasing?angle=275").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["simulatedAngle"], 275.0);
    assert_eq!(body["near"], json!(["P-02"]));
    assert_eq!(body["markers"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_phasing_svg_defaults() {
    let (app, _temp) = create_test_app();
    let (status, svg, content_type) = get_text(&app, "/api/v1/phasing.svg?angle=272").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
    // Built-in data: P-09 at 270 and P-10 at 275
    assert_eq!(svg.matches("dial-marker hoverable near").count(), 2);
}

// ============================================================================
// QR Tests
// ============================================================================

#[tokio::test]
async fn test_qr_uses_host_header() {
    let (app, _temp) = create_test_app();
    let (status, body) = get_json(&app, "/api/v1/points/P-07/qr").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["link"], "http://localhost:3001/?p=P-07");
    assert!(body["qrImageUrl"]
        .as_str()
        .unwrap()
        .starts_with("https://api.qrserver.com/v1/create-qr-code/?size=200x200&data="));
}

#[tokio::test]
async fn test_qr_link_follows_forwarded_scheme() {
    let (app, _temp) = create_test_app();
    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/points/P-07/qr")
        .header(header::HOST, "centerline.example.com")
        .header("x-forwarded-proto", "https")
        .body(Body::empty())
        .unwrap();

    let (status, body, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["link"], "https://centerline.example.com/?p=P-07");
    assert!(body["qrImageUrl"]
        .as_str()
        .unwrap()
        .contains("data=https%3A%2F%2Fcenterline.example.com"));
}

#[tokio::test]
async fn test_qr_prefers_public_base_url_for_local_host() {
    let mut config = Config::default();
    config.qr.public_base_url = Some("https://line3.example.com".to_string());
    let (app, _temp) = create_test_app_with(config);

    let (status, body) = get_json(&app, "/api/v1/points/P-07/qr?size=120").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["link"], "https://line3.example.com/?p=P-07");
    assert!(body["qrImageUrl"].as_str().unwrap().contains("size=120x120"));
}

#[tokio::test]
async fn test_qr_errors() {
    let (app, _temp) = create_test_app();

    let (status, _) = get_json(&app, "/api/v1/points/P-99/qr").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_json(&app, "/api/v1/points/P-07/qr?size=4000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
