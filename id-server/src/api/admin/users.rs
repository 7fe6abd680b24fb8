//! Admin console handlers for user management.
//!
//! Every handler takes [`AdminUser`], so the role gate runs before any
//! work. Mutations touch both parallel records (identity account and
//! profile document) to keep them from drifting further.

use crate::api::admin::admin_user_dto::AdminUserDto;
use crate::api::admin::create_user_request::CreateUserRequest;
use crate::api::admin::list_users_query::ListUsersQuery;
use crate::api::admin::update_disabled_request::UpdateDisabledRequest;
use crate::api::admin::update_role_request::UpdateRoleRequest;
use crate::api::admin::user_list_response::UserListResponse;
use crate::api::extractors::session_user::AdminUser;
use crate::api::success_response::SuccessResponse;
use crate::api::user_response::UserResponse;
use crate::state::AppState;
use crate::{ApiError, ApiResult};

use id_core::{AuthAccount, Role};
use id_db::{AccountRepository, FederatedIdentityRepository, ProfileRepository};

use std::panic::Location;
use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use error_location::ErrorLocation;
use log::info;
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 1000;

/// GET /api/v1/admin/users
///
/// List identity accounts merged with their profile records.
pub async fn list_users(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Json<UserListResponse>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let accounts = AccountRepository::new(state.pool.clone())
        .list_page(limit, query.page_token.as_deref())
        .await?;

    let page_token = if accounts.len() as i64 == limit {
        accounts.last().map(|a| a.uid.to_string())
    } else {
        None
    };

    let profiles = ProfileRepository::new(state.pool.clone());
    let mut users = Vec::with_capacity(accounts.len());
    for account in accounts {
        let profile = profiles.find_by_uid(account.uid).await?;
        users.push(AdminUserDto::from_records(account, profile));
    }

    Ok(Json(UserListResponse { users, page_token }))
}

/// POST /api/v1/admin/users
///
/// Create a user on someone's behalf: identity account plus profile
/// record with the default role.
pub async fn create_user(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation {
            message: "Email and password are required".to_string(),
            field: None,
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

    state.metrics.signup_completed();
    state.metrics.admin_mutation("create_user");
    info!("Admin created account {} ({})", account.uid, account.email);

    Ok(Json(UserResponse {
        user: profile.into(),
    }))
}

/// PUT /api/v1/admin/users/{uid}/role
///
/// Change the profile role. Existing session cookies keep their old role
/// claim until re-minted.
pub async fn update_role(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(req): Json<UpdateRoleRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let uid = Uuid::parse_str(&uid)?;
    let role = Role::from_str(&req.role)?;

    let account = find_account(&state, uid).await?;

    // The profile may be missing for this account; create it first so the
    // role change has a record to land on.
    let profiles = ProfileRepository::new(state.pool.clone());
    profiles.ensure_exists(&account).await?;
    profiles.update_role(uid, role).await?;

    state.metrics.admin_mutation("update_role");
    info!("Role of account {} set to {}", uid, role);

    Ok(Json(SuccessResponse::ok()))
}

/// PUT /api/v1/admin/users/{uid}/disabled
///
/// Disable or enable both records. Disabling cuts off existing sessions
/// through the revocation check.
pub async fn set_disabled(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(req): Json<UpdateDisabledRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let uid = Uuid::parse_str(&uid)?;

    let account = find_account(&state, uid).await?;
    AccountRepository::new(state.pool.clone())
        .set_disabled(uid, req.disabled)
        .await?;

    let profiles = ProfileRepository::new(state.pool.clone());
    profiles.ensure_exists(&account).await?;
    profiles.set_disabled(uid, req.disabled).await?;

    state.metrics.admin_mutation("set_disabled");
    info!(
        "Account {} {}",
        uid,
        if req.disabled { "disabled" } else { "enabled" }
    );

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/v1/admin/users/{uid}
///
/// Remove the identity account, its federated links, and the profile
/// record together.
pub async fn delete_user(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    let uid = Uuid::parse_str(&uid)?;

    let deleted = AccountRepository::new(state.pool.clone())
        .delete(uid)
        .await?;

    if !deleted {
        return Err(not_found(uid));
    }

    FederatedIdentityRepository::new(state.pool.clone())
        .delete_for_account(uid)
        .await?;
    ProfileRepository::new(state.pool.clone()).delete(uid).await?;

    state.metrics.admin_mutation("delete_user");
    info!("Deleted account {}", uid);

    Ok(Json(SuccessResponse::ok()))
}

async fn find_account(state: &AppState, uid: Uuid) -> ApiResult<AuthAccount> {
    AccountRepository::new(state.pool.clone())
        .find_by_uid(uid)
        .await?
        .ok_or_else(|| not_found(uid))
}

#[track_caller]
fn not_found(uid: Uuid) -> ApiError {
    ApiError::NotFound {
        message: format!("User {} not found", uid),
        location: ErrorLocation::from(Location::caller()),
    }
}
