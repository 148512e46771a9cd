mod common;

use axum::http::{Method, StatusCode};
use storefront_api::routes::health::health_check;

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
}

#[tokio::test]
async fn unknown_path_gets_the_not_found_envelope() {
    let state = common::test_state();
    let app = common::test_app(&state);

    let (status, body) = common::send(&app, Method::GET, "/nowhere", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not Found");
    assert_eq!(body["data"]["error"], "Not Found");
    assert!(body.get("meta").is_some());
}
