use crate::api::auth::user_dto::UserDto;

use serde::Serialize;

/// Login/signup result: the profile record plus a short-lived identity
/// token to exchange for a session cookie.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserDto,
    pub id_token: String,
}
