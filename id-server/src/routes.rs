use crate::api::admin::status::admin_status;
use crate::api::admin::users::{create_user, delete_user, list_users, set_disabled, update_role};
use crate::api::auth::auth::{
    create_session, login, logout, password_reset, password_reset_confirm, signup, verify_session,
};
use crate::api::me::me::get_me;
use crate::api::oauth::oauth::{oauth_authorize, oauth_callback};
use crate::health;
use crate::state::AppState;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_cookies::CookieManagerLayer;
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/api/v1/auth/signup", post(signup))
        .route("/api/v1/auth/login", post(login))
        .route(
            "/api/v1/auth/session",
            post(create_session).get(verify_session),
        )
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/auth/password-reset", post(password_reset))
        .route(
            "/api/v1/auth/password-reset/confirm",
            post(password_reset_confirm),
        )
        // Federated sign-in
        .route("/api/v1/auth/oauth/{provider}", get(oauth_authorize))
        .route(
            "/api/v1/auth/oauth/{provider}/callback",
            get(oauth_callback),
        )
        // Current user
        .route("/api/v1/me", get(get_me))
        // Admin console
        .route("/api/v1/admin/users", get(list_users).post(create_user))
        .route("/api/v1/admin/users/{uid}", delete(delete_user))
        .route("/api/v1/admin/users/{uid}/role", put(update_role))
        .route("/api/v1/admin/users/{uid}/disabled", put(set_disabled))
        .route("/api/v1/admin/status", get(admin_status))
        // Add shared state
        .with_state(state)
        // Cookie handling for session + OAuth state cookies
        .layer(CookieManagerLayer::new())
        // CORS middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
