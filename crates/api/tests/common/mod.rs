//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the real application router (same middleware stack as
//! production) through `tower::ServiceExt::oneshot` against a per-test
//! database provided by `#[sqlx::test]`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use peliculas_api::auth::jwt::{generate_access_token, JwtConfig};
use peliculas_api::auth::password::hash_password;
use peliculas_api::config::ServerConfig;
use peliculas_api::router::build_app_router;
use peliculas_api::state::AppState;
use peliculas_core::types::DbId;
use peliculas_db::models::user::{CreateUser, User};
use peliculas_db::repositories::{RoleRepo, UserRepo};

/// Plaintext password used for all test accounts.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults and a known JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            issuer: "peliculas-api".to_string(),
            audience: "peliculas-api".to_string(),
            expiry_hours: 3,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors `main.rs` exactly via [`build_app_router`].
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };
    app.oneshot(request).await.expect("request should not fail")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, Some(token)).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Create a test user directly in the database with [`TEST_PASSWORD`].
pub async fn create_test_user(pool: &PgPool, username: &str) -> User {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hashed,
        security_stamp: uuid::Uuid::new_v4().to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Create a test user and grant it the seeded `admin` role.
pub async fn create_admin_user(pool: &PgPool, username: &str) -> User {
    let user = create_test_user(pool, username).await;
    let role = RoleRepo::find_by_name(pool, "admin")
        .await
        .expect("role lookup should succeed")
        .expect("admin role is seeded by migration");
    RoleRepo::assign(pool, user.id, role.id)
        .await
        .expect("role assignment should succeed");
    user
}

/// Mint a token for a user without going through the login endpoint.
///
/// Uses the same secret as [`test_config`], so the router accepts it.
pub fn token_for(user_id: DbId, username: &str, roles: &[&str]) -> String {
    let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
    let (token, _) = generate_access_token(user_id, username, &roles, &test_config().jwt)
        .expect("token generation should succeed");
    token
}

/// Log in a user via the API and return the token from the JSON response.
pub async fn login_user(app: Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/account/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["token"]
        .as_str()
        .expect("login response must contain a token")
        .to_string()
}
