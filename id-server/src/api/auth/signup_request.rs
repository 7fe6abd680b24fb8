use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    /// Email address (required)
    pub email: String,

    /// Password (required, minimum 6 characters)
    pub password: String,

    /// Optional display name
    #[serde(default)]
    pub display_name: Option<String>,
}
