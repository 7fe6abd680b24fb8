//! Integration tests for the session cookie lifecycle: exchange, verify,
//! revocation, logout.
mod common;

use crate::common::{
    body_json, create_test_app_state, create_user_with_role, extract_session_cookie, json_request,
    request_with_cookie, session_cookie_for,
};

use id_core::Role;
use id_db::AccountRepository;
use id_server::build_router;

use axum::http::{StatusCode, header};
use serde_json::json;
use tower::ServiceExt;

async fn signup_and_get_id_token(app: &axum::Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/signup",
            json!({"email": email, "password": "hunter22"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["id_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_session_requires_id_token() {
    let state = create_test_app_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(json_request("POST", "/api/v1/auth/session", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_create_session_rejects_garbage_token() {
    let state = create_test_app_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/session",
            json!({"id_token": "not-a-jwt"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_exchange_and_verify_flow() {
    let state = create_test_app_state().await;
    let app = build_router(state);

    let id_token = signup_and_get_id_token(&app, "alice@example.com").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/session",
            json!({"id_token": id_token}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Session cookie set, httpOnly
    let set_cookie = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session="))
        .expect("session cookie set")
        .to_string();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));

    let cookie = extract_session_cookie(&response).unwrap();

    // Cookie verifies and reports the embedded claims
    let verify = app
        .oneshot(request_with_cookie("GET", "/api/v1/auth/session", &cookie))
        .await
        .unwrap();
    assert_eq!(verify.status(), StatusCode::OK);
    let body = body_json(verify).await;
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["role"], "user");
    assert_eq!(body["email_verified"], false);
}

#[tokio::test]
async fn test_verify_session_without_cookie_unauthorized() {
    let state = create_test_app_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("GET")
                .uri("/api/v1/auth/session")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_identity_token_does_not_pass_as_session_cookie() {
    let state = create_test_app_state().await;
    let app = build_router(state);

    let id_token = signup_and_get_id_token(&app, "bob@example.com").await;
    let forged = format!("session={}", id_token);

    let response = app
        .oneshot(request_with_cookie("GET", "/api/v1/auth/session", &forged))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_session_rejects_unverified_email_when_required() {
    let mut state = create_test_app_state().await;
    state.auth.require_verified_email = true;
    let app = build_router(state);

    let id_token = signup_and_get_id_token(&app, "carol@example.com").await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/session",
            json!({"id_token": id_token}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("not verified")
    );
}

#[tokio::test]
async fn test_disable_cuts_off_existing_session() {
    let state = create_test_app_state().await;
    let uid = create_user_with_role(&state, "dave@example.com", "hunter22", Role::User).await;
    let cookie = session_cookie_for(&state, uid, "dave@example.com", Role::User);
    let app = build_router(state.clone());

    // Session works...
    let ok = app
        .clone()
        .oneshot(request_with_cookie("GET", "/api/v1/auth/session", &cookie))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);

    // ...until the account is disabled
    AccountRepository::new(state.pool.clone())
        .set_disabled(uid, true)
        .await
        .unwrap();

    let rejected = app
        .oneshot(request_with_cookie("GET", "/api/v1/auth/session", &cookie))
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_of_deleted_account_rejected() {
    let state = create_test_app_state().await;
    let uid = create_user_with_role(&state, "erin@example.com", "hunter22", Role::User).await;
    let cookie = session_cookie_for(&state, uid, "erin@example.com", Role::User);

    AccountRepository::new(state.pool.clone())
        .delete(uid)
        .await
        .unwrap();

    let app = build_router(state);
    let response = app
        .oneshot(request_with_cookie("GET", "/api/v1/auth/session", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let state = create_test_app_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(json_request("POST", "/api/v1/auth/logout", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session="))
        .expect("removal cookie set")
        .to_string();
    // Removal cookie: empty value, immediate expiry
    assert!(set_cookie.starts_with("session=;") || set_cookie.contains("Max-Age=0"));
}
