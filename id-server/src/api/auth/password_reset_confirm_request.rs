use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PasswordResetConfirmRequest {
    /// Reset token minted by the password-reset endpoint
    pub token: String,
    pub new_password: String,
}
