#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use storefront_api::{
    config::{AppConfig, JwtConfig, PasswordConfig},
    models::User,
    routes,
    state::AppState,
};
use tower::ServiceExt;

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: None,
        host: "127.0.0.1".into(),
        port: 0,
        jwt: JwtConfig {
            secret: "test-secret".into(),
            ttl_hours: 1,
        },
        password: PasswordConfig {
            pepper: "test-pepper".into(),
            rounds: 1,
        },
    }
}

pub fn test_state() -> AppState {
    AppState::in_memory(&test_config()).expect("in-memory state")
}

pub fn test_app(state: &AppState) -> Router {
    routes::app(state.clone())
}

/// A token for a caller that need not exist in the store.
pub fn test_token(state: &AppState) -> String {
    let caller = User {
        id: 1,
        firstname: "Test".into(),
        lastname: "Caller".into(),
        username: "test-caller".into(),
        password_hash: String::new(),
        created_at: Utc::now(),
    };
    state.tokens.issue(&caller).expect("issue token")
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
