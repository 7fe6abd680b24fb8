//! Axum extractors for session-cookie authentication and role gating.

use crate::ApiError;
use crate::state::{AppState, SESSION_COOKIE};

use id_auth::Claims;
use id_core::AuthAccount;
use id_db::AccountRepository;

use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use error_location::ErrorLocation;
use tower_cookies::Cookies;

/// A verified session: the decoded cookie claims plus the identity record
/// they refer to.
///
/// Verification includes a revocation check: after the signature and
/// expiry check, the identity record is re-read and the request is
/// rejected when the account is gone or disabled. The role used for
/// gating is the one embedded in the claims at mint time.
pub struct SessionUser {
    pub claims: Claims,
    pub account: AuthAccount,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|(_, message)| ApiError::Internal {
                message: message.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let Some(cookie) = cookies.get(SESSION_COOKIE) else {
            state.metrics.session_rejected("missing_cookie");
            return Err(ApiError::Unauthorized {
                message: "No session cookie found".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let claims = state
            .tokens
            .verify_session_token(cookie.value())
            .map_err(|e| {
                state.metrics.session_rejected("invalid_token");
                ApiError::from(e)
            })?;
        let uid = claims.uid()?;

        let account = AccountRepository::new(state.pool.clone())
            .find_by_uid(uid)
            .await?
            .ok_or_else(|| {
                state.metrics.session_rejected("unknown_account");
                ApiError::Unauthorized {
                    message: "Session account no longer exists".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        if account.disabled {
            state.metrics.session_rejected("disabled");
            return Err(ApiError::Unauthorized {
                message: "Account is disabled".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(SessionUser { claims, account })
    }
}

/// A session whose embedded role grants admin console access
pub struct AdminUser(pub SessionUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = SessionUser::from_request_parts(parts, state).await?;

        if !session.claims.role().is_admin() {
            return Err(ApiError::Forbidden {
                message: "Admin role required".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(AdminUser(session))
    }
}
