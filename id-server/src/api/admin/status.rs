//! Admin console health probe: can we reach the identity store at all?

use crate::ApiResult;
use crate::api::extractors::session_user::AdminUser;
use crate::state::AppState;

use id_db::AccountRepository;

use axum::{Json, extract::State};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AdminStatusResponse {
    pub status: String,
}

/// GET /api/v1/admin/status
///
/// Probe the identity store by listing a single account.
pub async fn admin_status(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> ApiResult<Json<AdminStatusResponse>> {
    AccountRepository::new(state.pool.clone())
        .list_page(1, None)
        .await?;

    Ok(Json(AdminStatusResponse {
        status: "ok".to_string(),
    }))
}
