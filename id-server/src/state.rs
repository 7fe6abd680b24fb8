use crate::Metrics;

use id_auth::{Hasher, LoginRateLimiter, OAuthManager, TokenService};

use std::sync::Arc;

use sqlx::SqlitePool;
use tower_cookies::Key;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";
/// Short-lived private cookie holding OAuth CSRF + PKCE state
pub const OAUTH_STATE_COOKIE: &str = "oauth_state";

/// Shared application state for all HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub tokens: Arc<TokenService>,
    pub hasher: Arc<dyn Hasher>,
    pub oauth: OAuthManager,
    pub login_limiter: Arc<LoginRateLimiter>,
    pub metrics: Metrics,
    /// Key for private (encrypted) cookies; derived from the session secret
    pub cookie_key: Key,
    pub auth: id_config::AuthConfig,
    /// Where the OAuth callback sends the browser after sign-in
    pub post_login_redirect: String,
}
