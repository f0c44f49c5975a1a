#![allow(dead_code)]

//! Test infrastructure for fw-server API tests

use fw_auth::{JwtValidator, PasswordHasher, TokenIssuer};
use fw_server::AppState;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect(":memory:")
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("../crates/fw-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing (minimum bcrypt cost for speed)
pub async fn create_test_app_state() -> AppState {
    AppState {
        pool: create_test_pool().await,
        token_issuer: Arc::new(TokenIssuer::with_hs256(TEST_SECRET)),
        jwt_validator: Arc::new(JwtValidator::with_hs256(TEST_SECRET)),
        password_hasher: PasswordHasher::new(4),
        access_token_ttl: Duration::from_secs(3600),
    }
}

/// Build a JSON request
pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a JSON request with a bearer token
pub fn authed_json_request(
    method: &str,
    uri: &str,
    token: &str,
    body: &serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a bodyless request with a bearer token
pub fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body as JSON
pub async fn response_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Register a user through the API, returning the response JSON
pub async fn register_user(app: &Router, full_name: &str, email: &str, password: &str) -> serde_json::Value {
    let request = json_request(
        "POST",
        "/api/v1/register",
        &serde_json::json!({
            "full_name": full_name,
            "email": email,
            "password": password,
        }),
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);

    response_json(response).await
}

/// Log a user in through the API, returning the session token
pub async fn login_user(app: &Router, email: &str, password: &str) -> String {
    let request = json_request(
        "POST",
        "/api/v1/login",
        &serde_json::json!({
            "email": email,
            "password": password,
        }),
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    let json = response_json(response).await;
    json["token"].as_str().unwrap().to_string()
}
