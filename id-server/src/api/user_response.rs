use crate::api::auth::user_dto::UserDto;

use serde::Serialize;

/// Single user response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserDto,
}
