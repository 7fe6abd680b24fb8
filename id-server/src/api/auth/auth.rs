//! Authentication handlers: signup, login, session cookie exchange,
//! verification, logout, password reset.
//!
//! Sign-in and session issuance are separate steps: login/signup hand
//! back a short-lived identity token, and `POST /api/v1/auth/session`
//! exchanges it for the long-lived httpOnly session cookie.

use crate::api::auth::auth_response::AuthResponse;
use crate::api::auth::create_session_request::CreateSessionRequest;
use crate::api::auth::login_request::LoginRequest;
use crate::api::auth::password_reset_confirm_request::PasswordResetConfirmRequest;
use crate::api::auth::password_reset_request::PasswordResetRequest;
use crate::api::auth::session_info_response::SessionInfoResponse;
use crate::api::auth::signup_request::SignupRequest;
use crate::api::extractors::session_user::SessionUser;
use crate::api::success_response::SuccessResponse;
use crate::{ApiError, ApiResult};

use crate::state::{AppState, SESSION_COOKIE};

use id_core::AuthAccount;
use id_db::{AccountRepository, ProfileRepository};

use std::panic::Location;

use axum::{Json, extract::State, http::StatusCode};
use error_location::ErrorLocation;
use log::info;
use tower_cookies::cookie::{SameSite, time};
use tower_cookies::{Cookie, Cookies};

const MIN_PASSWORD_LENGTH: usize = 6;

/// Build the session cookie: httpOnly, path /, Max-Age = session
/// lifetime, Secure per config.
pub(crate) fn build_session_cookie(
    token: String,
    max_age_secs: i64,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .path("/")
        .max_age(time::Duration::seconds(max_age_secs))
        .same_site(SameSite::Lax)
        .build()
}

#[track_caller]
fn validate_credentials(email: &str, password: &str) -> ApiResult<()> {
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation {
            message: "Email and password are required".to_string(),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(())
}

/// POST /api/v1/auth/signup
///
/// Create the identity account and its profile record (role `user`),
/// returning both the profile and an identity token.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<Json<AuthResponse>> {
    validate_credentials(&req.email, &req.password)?;

    if req.password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::Validation {
            message: format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ),
            field: Some("password".to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let password_hash = state.hasher.hash(&req.password)?;
    let account = AuthAccount::new(req.email, password_hash, req.display_name);

    AccountRepository::new(state.pool.clone())
        .create(&account)
        .await?;

    let profile = ProfileRepository::new(state.pool.clone())
        .ensure_exists(&account)
        .await?;

    let id_token = state.tokens.mint_identity_token(
        account.uid,
        Some(account.email.clone()),
        account.email_verified,
        profile.role,
    )?;

    state.metrics.signup_completed();
    info!("Created account {} ({})", account.uid, account.email);

    Ok(Json(AuthResponse {
        user: profile.into(),
        id_token,
    }))
}

/// POST /api/v1/auth/login
///
/// Verify credentials and return the profile record (created lazily when
/// missing) plus an identity token.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    validate_credentials(&req.email, &req.password)?;

    let email = req.email.to_lowercase();
    state.login_limiter.check(&email)?;

    let account = AccountRepository::new(state.pool.clone())
        .find_by_email(&email)
        .await?;

    // One rejection path for unknown email, federated-only account, and
    // wrong password, so responses don't reveal which one it was.
    let Some(account) = account else {
        state.metrics.login_failed("unknown_email");
        return Err(invalid_credentials());
    };

    let Some(ref password_hash) = account.password_hash else {
        state.metrics.login_failed("no_password");
        return Err(invalid_credentials());
    };

    if !state.hasher.verify(&req.password, password_hash)? {
        state.metrics.login_failed("bad_password");
        return Err(invalid_credentials());
    }

    if account.disabled {
        state.metrics.login_failed("disabled");
        return Err(ApiError::Forbidden {
            message: "Account is disabled".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    // Reconcile: the profile record may be missing for this account
    let profile = ProfileRepository::new(state.pool.clone())
        .ensure_exists(&account)
        .await?;

    let id_token = state.tokens.mint_identity_token(
        account.uid,
        Some(account.email.clone()),
        account.email_verified,
        profile.role,
    )?;

    state.metrics.login_succeeded();

    Ok(Json(AuthResponse {
        user: profile.into(),
        id_token,
    }))
}

#[track_caller]
fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized {
        message: "Invalid email or password".to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// POST /api/v1/auth/session
///
/// Exchange a valid identity token for the session cookie.
pub async fn create_session(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(req): Json<CreateSessionRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let Some(id_token) = req.id_token.filter(|t| !t.is_empty()) else {
        return Err(ApiError::BadRequest {
            message: "ID token is required".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    };

    let claims = state.tokens.verify_identity_token(&id_token).map_err(|e| {
        state.metrics.session_rejected("invalid_id_token");
        ApiError::from(e)
    })?;
    let uid = claims.uid()?;

    // Revocation check against the identity record before minting
    let account = AccountRepository::new(state.pool.clone())
        .find_by_uid(uid)
        .await?
        .ok_or_else(|| ApiError::Unauthorized {
            message: "Account no longer exists".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    if account.disabled {
        state.metrics.session_rejected("disabled");
        return Err(ApiError::Unauthorized {
            message: "Account is disabled".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if state.auth.require_verified_email && !account.email_verified {
        state.metrics.session_rejected("email_unverified");
        return Err(ApiError::Unauthorized {
            message: "Email not verified".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let session_token = state.tokens.mint_session_token(&claims)?;
    cookies.add(build_session_cookie(
        session_token,
        state.tokens.session_ttl_secs(),
        state.auth.cookie_secure,
    ));

    state.metrics.session_issued();

    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/v1/auth/session
///
/// Verify the session cookie and return the embedded identity summary.
pub async fn verify_session(session: SessionUser) -> ApiResult<Json<SessionInfoResponse>> {
    Ok(Json(SessionInfoResponse {
        uid: session.claims.sub.clone(),
        email: session.claims.email.clone(),
        role: session.claims.role().as_str().to_string(),
        email_verified: session.claims.email_verified,
    }))
}

/// POST /api/v1/auth/logout
///
/// Clear the session cookie.
pub async fn logout(cookies: Cookies) -> ApiResult<Json<SuccessResponse>> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookies.remove(cookie);

    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/v1/auth/password-reset
///
/// Mint a reset token for the account. Always answers 202 so responses
/// don't reveal whether the email is registered.
pub async fn password_reset(
    State(state): State<AppState>,
    Json(req): Json<PasswordResetRequest>,
) -> ApiResult<(StatusCode, Json<SuccessResponse>)> {
    if req.email.is_empty() {
        return Err(ApiError::Validation {
            message: "Email is required".to_string(),
            field: Some("email".to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let account = AccountRepository::new(state.pool.clone())
        .find_by_email(&req.email)
        .await?;

    if let Some(account) = account {
        let token = state.tokens.mint_reset_token(account.uid)?;
        // No mail delivery here; the token is surfaced through the logs
        // for the operator to relay.
        info!("Password reset token for {}: {}", account.email, token);
    }

    Ok((StatusCode::ACCEPTED, Json(SuccessResponse::ok())))
}

/// POST /api/v1/auth/password-reset/confirm
///
/// Exchange a valid reset token for a password change.
pub async fn password_reset_confirm(
    State(state): State<AppState>,
    Json(req): Json<PasswordResetConfirmRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    if req.new_password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::Validation {
            message: format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ),
            field: Some("new_password".to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let claims = state.tokens.verify_reset_token(&req.token)?;
    let uid = claims.uid()?;

    let password_hash = state.hasher.hash(&req.new_password)?;
    let updated = AccountRepository::new(state.pool.clone())
        .set_password_hash(uid, &password_hash)
        .await?;

    if !updated {
        return Err(ApiError::NotFound {
            message: "Account no longer exists".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    info!("Password reset completed for account {}", uid);

    Ok(Json(SuccessResponse::ok()))
}
