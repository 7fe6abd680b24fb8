//! Integration tests for the admin console endpoints: role gating, user
//! listing/creation, role changes, disable/enable, deletion, status.
mod common;

use crate::common::{
    body_json, create_test_app_state, create_user_with_role, json_request_with_cookie,
    request_with_cookie, session_cookie_for,
};

use id_core::{AuthAccount, Provider, Role};
use id_db::{AccountRepository, FederatedIdentityRepository, ProfileRepository};
use id_server::{AppState, build_router};

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

async fn admin_cookie(state: &AppState) -> String {
    let uid = create_user_with_role(state, "admin@example.com", "hunter22", Role::Admin).await;
    session_cookie_for(state, uid, "admin@example.com", Role::Admin)
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let state = create_test_app_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("GET")
                .uri("/api/v1/admin/users")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_reject_plain_user() {
    let state = create_test_app_state().await;
    let uid = create_user_with_role(&state, "user@example.com", "hunter22", Role::User).await;
    let cookie = session_cookie_for(&state, uid, "user@example.com", Role::User);
    let app = build_router(state);

    let response = app
        .oneshot(request_with_cookie("GET", "/api/v1/admin/users", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_admin_routes_reject_customer() {
    let state = create_test_app_state().await;
    let uid = create_user_with_role(&state, "customer@example.com", "hunter22", Role::Customer).await;
    let cookie = session_cookie_for(&state, uid, "customer@example.com", Role::Customer);
    let app = build_router(state);

    let response = app
        .oneshot(request_with_cookie("GET", "/api/v1/admin/users", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_super_admin_passes_gate() {
    let state = create_test_app_state().await;
    let uid = create_user_with_role(&state, "root@example.com", "hunter22", Role::SuperAdmin).await;
    let cookie = session_cookie_for(&state, uid, "root@example.com", Role::SuperAdmin);
    let app = build_router(state);

    let response = app
        .oneshot(request_with_cookie("GET", "/api/v1/admin/users", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_users_merges_profiles() {
    let state = create_test_app_state().await;
    let cookie = admin_cookie(&state).await;

    // One account with a profile, one drifted without
    create_user_with_role(&state, "paired@example.com", "hunter22", Role::Customer).await;
    let hash = state.hasher.hash("hunter22").unwrap();
    let drifted = AuthAccount::new("drifted@example.com".to_string(), hash, None);
    AccountRepository::new(state.pool.clone())
        .create(&drifted)
        .await
        .unwrap();

    let app = build_router(state);
    let response = app
        .oneshot(request_with_cookie("GET", "/api/v1/admin/users", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 3);

    let paired = users
        .iter()
        .find(|u| u["email"] == "paired@example.com")
        .unwrap();
    assert_eq!(paired["profile"]["role"], "customer");

    let drifted = users
        .iter()
        .find(|u| u["email"] == "drifted@example.com")
        .unwrap();
    assert!(drifted["profile"].is_null());
}

#[tokio::test]
async fn test_list_users_pagination_walks_all() {
    let state = create_test_app_state().await;
    let cookie = admin_cookie(&state).await;

    for i in 0..4 {
        create_user_with_role(
            &state,
            &format!("user{}@example.com", i),
            "hunter22",
            Role::User,
        )
        .await;
    }

    // 5 accounts total (4 + admin); page size 3
    let app = build_router(state);
    let first = app
        .clone()
        .oneshot(request_with_cookie(
            "GET",
            "/api/v1/admin/users?limit=3",
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first_body = body_json(first).await;
    assert_eq!(first_body["users"].as_array().unwrap().len(), 3);
    let token = first_body["page_token"].as_str().unwrap().to_string();

    let second = app
        .oneshot(request_with_cookie(
            "GET",
            &format!("/api/v1/admin/users?limit=3&page_token={}", token),
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let second_body = body_json(second).await;
    assert_eq!(second_body["users"].as_array().unwrap().len(), 2);
    assert!(second_body["page_token"].is_null());
}

#[tokio::test]
async fn test_admin_creates_user() {
    let state = create_test_app_state().await;
    let cookie = admin_cookie(&state).await;
    let app = build_router(state.clone());

    let response = app
        .oneshot(json_request_with_cookie(
            "POST",
            "/api/v1/admin/users",
            &cookie,
            json!({
                "email": "made@example.com",
                "password": "hunter22",
                "display_name": "Made By Admin"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "user");
    assert_eq!(body["user"]["display_name"], "Made By Admin");

    let account = AccountRepository::new(state.pool.clone())
        .find_by_email("made@example.com")
        .await
        .unwrap();
    assert!(account.is_some());
}

#[tokio::test]
async fn test_update_role_persists_and_requires_next_mint() {
    let state = create_test_app_state().await;
    let cookie = admin_cookie(&state).await;
    let target = create_user_with_role(&state, "target@example.com", "hunter22", Role::User).await;
    let app = build_router(state.clone());

    let response = app
        .oneshot(json_request_with_cookie(
            "PUT",
            &format!("/api/v1/admin/users/{}/role", target),
            &cookie,
            json!({"role": "admin"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let profile = ProfileRepository::new(state.pool.clone())
        .find_by_uid(target)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.role, Role::Admin);
}

#[tokio::test]
async fn test_update_role_rejects_unknown_role() {
    let state = create_test_app_state().await;
    let cookie = admin_cookie(&state).await;
    let target = create_user_with_role(&state, "target@example.com", "hunter22", Role::User).await;
    let app = build_router(state);

    let response = app
        .oneshot(json_request_with_cookie(
            "PUT",
            &format!("/api/v1/admin/users/{}/role", target),
            &cookie,
            json!({"role": "emperor"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["field"], "role");
}

#[tokio::test]
async fn test_update_role_unknown_user_not_found() {
    let state = create_test_app_state().await;
    let cookie = admin_cookie(&state).await;
    let app = build_router(state);

    let response = app
        .oneshot(json_request_with_cookie(
            "PUT",
            &format!("/api/v1/admin/users/{}/role", Uuid::new_v4()),
            &cookie,
            json!({"role": "admin"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_role_on_drifted_account_creates_profile() {
    let state = create_test_app_state().await;
    let cookie = admin_cookie(&state).await;

    let hash = state.hasher.hash("hunter22").unwrap();
    let drifted = AuthAccount::new("drifted@example.com".to_string(), hash, None);
    AccountRepository::new(state.pool.clone())
        .create(&drifted)
        .await
        .unwrap();

    let app = build_router(state.clone());
    let response = app
        .oneshot(json_request_with_cookie(
            "PUT",
            &format!("/api/v1/admin/users/{}/role", drifted.uid),
            &cookie,
            json!({"role": "customer"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let profile = ProfileRepository::new(state.pool.clone())
        .find_by_uid(drifted.uid)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.role, Role::Customer);
}

#[tokio::test]
async fn test_set_disabled_updates_both_records() {
    let state = create_test_app_state().await;
    let cookie = admin_cookie(&state).await;
    let target = create_user_with_role(&state, "target@example.com", "hunter22", Role::User).await;
    let app = build_router(state.clone());

    let response = app
        .oneshot(json_request_with_cookie(
            "PUT",
            &format!("/api/v1/admin/users/{}/disabled", target),
            &cookie,
            json!({"disabled": true}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let account = AccountRepository::new(state.pool.clone())
        .find_by_uid(target)
        .await
        .unwrap()
        .unwrap();
    assert!(account.disabled);

    let profile = ProfileRepository::new(state.pool.clone())
        .find_by_uid(target)
        .await
        .unwrap()
        .unwrap();
    assert!(profile.disabled);
}

#[tokio::test]
async fn test_delete_user_removes_all_records() {
    let state = create_test_app_state().await;
    let cookie = admin_cookie(&state).await;
    let target = create_user_with_role(&state, "target@example.com", "hunter22", Role::User).await;
    FederatedIdentityRepository::new(state.pool.clone())
        .link(&id_core::FederatedIdentity::new(
            Provider::Google,
            "g-123".to_string(),
            target,
        ))
        .await
        .unwrap();

    let app = build_router(state.clone());
    let response = app
        .clone()
        .oneshot(request_with_cookie(
            "DELETE",
            &format!("/api/v1/admin/users/{}", target),
            &cookie,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    assert!(
        AccountRepository::new(state.pool.clone())
            .find_by_uid(target)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        ProfileRepository::new(state.pool.clone())
            .find_by_uid(target)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        FederatedIdentityRepository::new(state.pool.clone())
            .find(Provider::Google, "g-123")
            .await
            .unwrap()
            .is_none()
    );

    // Second delete reports not found
    let again = app
        .oneshot(request_with_cookie(
            "DELETE",
            &format!("/api/v1/admin/users/{}", target),
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_status_reports_ok() {
    let state = create_test_app_state().await;
    let cookie = admin_cookie(&state).await;
    let app = build_router(state);

    let response = app
        .oneshot(request_with_cookie("GET", "/api/v1/admin/status", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
