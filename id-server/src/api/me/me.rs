//! Current-user handler.

use crate::ApiResult;
use crate::api::extractors::session_user::SessionUser;
use crate::api::user_response::UserResponse;
use crate::state::AppState;

use id_db::ProfileRepository;

use axum::{Json, extract::State};

/// GET /api/v1/me
///
/// Return the caller's profile record, creating it from the identity
/// record when it is missing.
pub async fn get_me(
    session: SessionUser,
    State(state): State<AppState>,
) -> ApiResult<Json<UserResponse>> {
    let profile = ProfileRepository::new(state.pool.clone())
        .ensure_exists(&session.account)
        .await?;

    Ok(Json(UserResponse {
        user: profile.into(),
    }))
}
