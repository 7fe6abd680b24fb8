//! Federated sign-in handlers: provider redirect and callback.
//!
//! CSRF token and PKCE verifier travel in a short-lived private cookie
//! between the two requests; the callback checks the echoed state before
//! exchanging the code.

use crate::api::auth::auth::build_session_cookie;
use crate::api::oauth::callback_query::OAuthCallbackQuery;
use crate::state::{AppState, OAUTH_STATE_COOKIE};
use crate::{ApiError, ApiResult};

use id_core::{AuthAccount, FederatedIdentity, Provider};
use id_db::{AccountRepository, FederatedIdentityRepository, ProfileRepository};

use std::panic::Location;
use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
};
use error_location::ErrorLocation;
use log::info;
use serde_json::json;
use tower_cookies::cookie::{SameSite, time};
use tower_cookies::{Cookie, Cookies};

const KEY_OAUTH_STATE_CSRF: &str = "csrf_token";
const KEY_OAUTH_STATE_PKCE: &str = "pkce_verifier";
const OAUTH_STATE_MAX_AGE_MINS: i64 = 5;

/// GET /api/v1/auth/oauth/{provider}
///
/// Redirect the browser to the provider's consent screen.
pub async fn oauth_authorize(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(provider): Path<String>,
) -> ApiResult<Redirect> {
    let provider = Provider::from_str(&provider)?;
    let details = state.oauth.get_provider(provider)?.authorization_details();

    let oauth_state = json!({
        KEY_OAUTH_STATE_CSRF: details.csrf_token.secret(),
        KEY_OAUTH_STATE_PKCE: details.pkce_verifier.secret(),
    });
    let value = oauth_state.to_string();

    let cookie = Cookie::build((OAUTH_STATE_COOKIE, value))
        .http_only(true)
        .secure(state.auth.cookie_secure)
        .path("/")
        .max_age(time::Duration::minutes(OAUTH_STATE_MAX_AGE_MINS))
        .same_site(SameSite::Lax)
        .build();

    cookies.private(&state.cookie_key).add(cookie);

    Ok(Redirect::to(&details.url))
}

/// GET /api/v1/auth/oauth/{provider}/callback
///
/// Complete the flow: validate state, exchange the code, provision the
/// account/profile pair, mint the session cookie, redirect.
pub async fn oauth_callback(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(provider): Path<String>,
    Query(query): Query<OAuthCallbackQuery>,
) -> ApiResult<Redirect> {
    let provider = Provider::from_str(&provider)?;

    if let Some(err) = query.error {
        return Err(forbidden(format!("OAuth authentication failed: {}", err)));
    }

    let code = query
        .code
        .ok_or_else(|| forbidden("Missing authorization code".to_string()))?;

    let state_cookie = cookies
        .private(&state.cookie_key)
        .get(OAUTH_STATE_COOKIE)
        .ok_or_else(|| forbidden("OAuth session expired or invalid".to_string()))?;

    cookies
        .private(&state.cookie_key)
        .remove(Cookie::new(OAUTH_STATE_COOKIE, ""));

    let oauth_state: serde_json::Value = serde_json::from_str(state_cookie.value())
        .map_err(|_| forbidden("Invalid OAuth state format".to_string()))?;

    let stored_csrf = oauth_state
        .get(KEY_OAUTH_STATE_CSRF)
        .and_then(|v| v.as_str())
        .ok_or_else(|| forbidden("Invalid OAuth state structure".to_string()))?;

    if query.state.as_deref() != Some(stored_csrf) {
        return Err(forbidden("Invalid OAuth state token".to_string()));
    }

    let pkce_verifier = oauth_state
        .get(KEY_OAUTH_STATE_PKCE)
        .and_then(|v| v.as_str())
        .ok_or_else(|| forbidden("Invalid OAuth state structure".to_string()))?
        .to_string();

    let oauth_provider = state.oauth.get_provider(provider)?;
    let access_token = oauth_provider.exchange_code(code, pkce_verifier).await?;
    let federated = oauth_provider.fetch_profile(&access_token).await?;

    let accounts = AccountRepository::new(state.pool.clone());
    let identities = FederatedIdentityRepository::new(state.pool.clone());

    // Resolve the external identity to a local account: existing link,
    // existing account with the same email, or a fresh account.
    let account = match identities.find(provider, &federated.provider_uid).await? {
        Some(link) => accounts
            .find_by_uid(link.account_uid)
            .await?
            .ok_or_else(|| ApiError::Internal {
                message: "Federated link points at a missing account".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?,
        None => {
            let email = federated.require_email()?;

            let account = match accounts.find_by_email(email).await? {
                Some(existing) => existing,
                None => {
                    let account = AuthAccount::new_federated(
                        email.to_string(),
                        federated.display_name.clone(),
                    );
                    accounts.create(&account).await?;
                    info!(
                        "Provisioned account {} from {} sign-in",
                        account.uid, provider
                    );
                    account
                }
            };

            identities
                .link(&FederatedIdentity::new(
                    provider,
                    federated.provider_uid.clone(),
                    account.uid,
                ))
                .await?;

            account
        }
    };

    if account.disabled {
        return Err(forbidden("Account is disabled".to_string()));
    }

    // Reconcile: federated sign-ins also lazily create the profile record
    let profile = ProfileRepository::new(state.pool.clone())
        .ensure_exists(&account)
        .await?;

    let session_token = state.tokens.mint_session_for(
        account.uid,
        Some(account.email.clone()),
        account.email_verified,
        profile.role,
    )?;

    cookies.add(build_session_cookie(
        session_token,
        state.tokens.session_ttl_secs(),
        state.auth.cookie_secure,
    ));

    state.metrics.session_issued();

    Ok(Redirect::to(&state.post_login_redirect))
}

#[track_caller]
fn forbidden(message: String) -> ApiError {
    ApiError::Forbidden {
        message,
        location: ErrorLocation::from(Location::caller()),
    }
}
