use crate::api::admin::admin_user_dto::AdminUserDto;

use serde::Serialize;

/// One page of users plus the cursor for the next page
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<AdminUserDto>,
    /// Pass back as page_token to continue; absent on the last page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}
