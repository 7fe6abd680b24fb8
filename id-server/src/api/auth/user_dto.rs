use id_core::UserProfile;

use serde::Serialize;

/// Profile record DTO for JSON serialization
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: String,
    pub disabled: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<UserProfile> for UserDto {
    fn from(p: UserProfile) -> Self {
        Self {
            uid: p.uid.to_string(),
            email: p.email,
            display_name: p.display_name,
            role: p.role.as_str().to_string(),
            disabled: p.disabled,
            created_at: p.created_at.timestamp(),
            updated_at: p.updated_at.timestamp(),
        }
    }
}
