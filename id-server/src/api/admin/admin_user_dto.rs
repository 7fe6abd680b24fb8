use crate::api::auth::user_dto::UserDto;

use id_core::{AuthAccount, UserProfile};

use serde::Serialize;

/// Admin console view of a user: the identity record merged with its
/// profile record. `profile` is null when the two have drifted and no
/// profile exists yet.
#[derive(Debug, Serialize)]
pub struct AdminUserDto {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub email_verified: bool,
    pub disabled: bool,
    pub created_at: i64,
    pub profile: Option<UserDto>,
}

impl AdminUserDto {
    pub fn from_records(account: AuthAccount, profile: Option<UserProfile>) -> Self {
        Self {
            uid: account.uid.to_string(),
            email: account.email,
            display_name: account.display_name,
            email_verified: account.email_verified,
            disabled: account.disabled,
            created_at: account.created_at.timestamp(),
            profile: profile.map(UserDto::from),
        }
    }
}
