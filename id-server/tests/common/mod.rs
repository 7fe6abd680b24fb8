#![allow(dead_code)]

//! Test infrastructure for id-server API tests

use id_auth::{
    Argon2Hasher, Hasher, LoginRateLimiter, OAuthManager, RateLimitConfig, TokenConfig,
    TokenService,
};
use id_core::{AuthAccount, Role, UserProfile};
use id_db::{AccountRepository, ProfileRepository};
use id_server::{AppState, Metrics};

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower_cookies::Key;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-session-secret-0123456789abcdef";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("../crates/id-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing
pub async fn create_test_app_state() -> AppState {
    let pool = create_test_pool().await;

    AppState {
        pool,
        tokens: Arc::new(TokenService::new(TokenConfig::new(TEST_SECRET.to_string()))),
        hasher: Arc::new(Argon2Hasher::new()),
        oauth: OAuthManager::new(),
        login_limiter: Arc::new(LoginRateLimiter::new(RateLimitConfig {
            max_requests: 1000,
            window_secs: 60,
        })),
        metrics: Metrics::new(),
        cookie_key: Key::derive_from(TEST_SECRET.as_bytes()),
        auth: id_config::AuthConfig::default(),
        post_login_redirect: "/".to_string(),
    }
}

/// Create an account plus profile with the given role, returning the uid
pub async fn create_user_with_role(
    state: &AppState,
    email: &str,
    password: &str,
    role: Role,
) -> Uuid {
    let hash = state.hasher.hash(password).expect("hash password");
    let account = AuthAccount::new(email.to_string(), hash, None);

    AccountRepository::new(state.pool.clone())
        .create(&account)
        .await
        .expect("create account");

    let mut profile = UserProfile::for_account(&account);
    profile.role = role;
    ProfileRepository::new(state.pool.clone())
        .upsert(&profile)
        .await
        .expect("create profile");

    account.uid
}

/// Mint a session cookie header value for an existing account
pub fn session_cookie_for(state: &AppState, uid: Uuid, email: &str, role: Role) -> String {
    let token = state
        .tokens
        .mint_session_for(uid, Some(email.to_string()), true, role)
        .expect("mint session token");

    format!("session={}", token)
}

/// Build a JSON request
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a JSON request carrying a session cookie
pub fn json_request_with_cookie(
    method: &str,
    uri: &str,
    cookie: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a bodyless request carrying a session cookie
pub fn request_with_cookie(method: &str, uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).expect("response body is JSON")
}

/// Pull the session cookie pair ("session=...") out of Set-Cookie headers
pub fn extract_session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session="))
        .map(|v| v.split(';').next().unwrap_or(v).to_string())
}
