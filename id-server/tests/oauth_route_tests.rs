//! Integration tests for the federated sign-in routes (no provider
//! network traffic: redirect construction and state validation only).
mod common;

use crate::common::{body_json, create_test_app_state};

use id_auth::oauth::GoogleOAuthProvider;
use id_core::Provider;
use id_server::build_router;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

fn google_provider() -> Arc<GoogleOAuthProvider> {
    Arc::new(
        GoogleOAuthProvider::new(
            "client_id".to_string(),
            "client_secret".to_string(),
            "https://example.com/callback".to_string(),
        )
        .unwrap(),
    )
}

#[tokio::test]
async fn test_authorize_unknown_provider_not_found() {
    let state = create_test_app_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/auth/oauth/github")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_authorize_unconfigured_provider_not_found() {
    let state = create_test_app_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/auth/oauth/google")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_authorize_redirects_with_state_cookie() {
    let mut state = create_test_app_state().await;
    state.oauth.add_provider(Provider::Google, google_provider());
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/auth/oauth/google")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(location.starts_with("https://accounts.google.com/o/oauth2/v2/auth"));
    assert!(location.contains("code_challenge_method=S256"));

    let state_cookie = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("oauth_state="))
        .expect("oauth state cookie set");
    assert!(state_cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_callback_without_state_cookie_forbidden() {
    let mut state = create_test_app_state().await;
    state.oauth.add_provider(Provider::Google, google_provider());
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/auth/oauth/google/callback?code=abc&state=xyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_callback_provider_error_forbidden() {
    let mut state = create_test_app_state().await;
    state.oauth.add_provider(Provider::Google, google_provider());
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/auth/oauth/google/callback?error=access_denied")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("access_denied")
    );
}
