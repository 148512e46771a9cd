mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn signup_returns_a_usable_token_and_hides_the_hash() {
    let state = common::test_state();
    let app = common::test_app(&state);

    let (status, body) = common::send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({
            "firstname": "Mo",
            "lastname": "Hassan",
            "username": "mo",
            "password": "Password123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "mo");
    assert!(body["data"]["user"].get("passwordHash").is_none());
    assert!(!body.to_string().contains("Password123"));
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = common::send(&app, Method::GET, "/users/mo", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["firstname"], "Mo");

    let stored = state.users.read("mo").await.unwrap();
    assert_ne!(stored.password_hash, "Password123");
    assert!(state.hasher.verify("Password123", &stored.password_hash));
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let state = common::test_state();
    let app = common::test_app(&state);
    let body = json!({
        "firstname": "Mo",
        "lastname": "Hassan",
        "username": "mo",
        "password": "Password123"
    });

    let (status, _) = common::send(&app, Method::POST, "/users", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = common::send(&app, Method::POST, "/users", None, Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn authenticate_checks_the_password() {
    let state = common::test_state();
    let app = common::test_app(&state);
    common::send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({
            "firstname": "Mo",
            "lastname": "Hassan",
            "username": "mo",
            "password": "Password123"
        })),
    )
    .await;

    let (status, body) = common::send(
        &app,
        Method::POST,
        "/users/authenticate",
        None,
        Some(json!({ "username": "mo", "password": "Password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, _) = common::send(&app, Method::GET, "/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = common::send(
        &app,
        Method::POST,
        "/users/authenticate",
        None,
        Some(json!({ "username": "mo", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::send(
        &app,
        Method::POST,
        "/users/authenticate",
        None,
        Some(json!({ "username": "nobody", "password": "Password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_reads_require_a_token() {
    let state = common::test_state();
    let app = common::test_app(&state);

    let (status, _) = common::send(&app, Method::GET, "/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = common::test_token(&state);
    let (status, _) = common::send(&app, Method::GET, "/users/ghost", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_create_list_and_delete() {
    let state = common::test_state();
    let app = common::test_app(&state);
    let token = common::test_token(&state);

    let (status, _) = common::send(
        &app,
        Method::POST,
        "/products",
        None,
        Some(json!({ "name": "banana", "price": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = common::send(
        &app,
        Method::POST,
        "/products",
        Some(&token),
        Some(json!({ "name": "banana", "price": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 1);

    let (status, _) = common::send(
        &app,
        Method::POST,
        "/products",
        Some(&token),
        Some(json!({ "name": "banana", "price": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = common::send(
        &app,
        Method::POST,
        "/products",
        Some(&token),
        Some(json!({ "name": "debt", "price": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = common::send(&app, Method::GET, "/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = common::send(&app, Method::GET, "/products/1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], 4);

    let (status, _) = common::send(
        &app,
        Method::DELETE,
        "/products",
        Some(&token),
        Some(json!({ "name": "banana" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = common::send(
        &app,
        Method::DELETE,
        "/products",
        Some(&token),
        Some(json!({ "name": "banana" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn referenced_rows_cannot_be_deleted() {
    let state = common::test_state();
    let app = common::test_app(&state);
    let token = common::test_token(&state);

    common::send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({
            "firstname": "Mo",
            "lastname": "Hassan",
            "username": "mo",
            "password": "Password123"
        })),
    )
    .await;
    common::send(
        &app,
        Method::POST,
        "/products",
        Some(&token),
        Some(json!({ "name": "banana", "price": 4 })),
    )
    .await;
    common::send(
        &app,
        Method::POST,
        "/orders",
        Some(&token),
        Some(json!({ "status": "active", "userId": 1 })),
    )
    .await;
    let (status, _) = common::send(
        &app,
        Method::POST,
        "/orders/products",
        Some(&token),
        Some(json!({ "quantity": 1, "orderId": 1, "productId": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = common::send(
        &app,
        Method::DELETE,
        "/products",
        Some(&token),
        Some(json!({ "name": "banana" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = common::send(
        &app,
        Method::DELETE,
        "/users",
        Some(&token),
        Some(json!({ "username": "mo" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn signup_rejects_empty_or_missing_fields() {
    let state = common::test_state();
    let app = common::test_app(&state);

    for field in ["firstname", "lastname", "username", "password"] {
        let mut body = json!({
            "firstname": "Mo",
            "lastname": "Hassan",
            "username": "mo",
            "password": "Password123"
        });
        body[field] = json!("  ");

        let (status, resp) = common::send(&app, Method::POST, "/users", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "blank {field}");
        let error = resp["data"]["error"].as_str().unwrap();
        assert!(error.contains(field));
    }

    let (status, resp) = common::send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "username": "mo", "password": "Password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(resp["data"]["error"].is_string());

    assert!(state.users.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn prices_are_whole_units() {
    let state = common::test_state();
    let app = common::test_app(&state);
    let token = common::test_token(&state);

    let (status, body) = common::send(
        &app,
        Method::POST,
        "/products",
        Some(&token),
        Some(json!({ "name": "banana", "price": 4.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["error"].is_string());
    assert!(state.products.list().await.unwrap().is_empty());
}
