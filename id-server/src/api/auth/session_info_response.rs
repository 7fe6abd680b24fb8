use serde::Serialize;

/// Verified session summary, straight from the cookie claims
#[derive(Debug, Serialize)]
pub struct SessionInfoResponse {
    pub uid: String,
    pub email: Option<String>,
    pub role: String,
    pub email_verified: bool,
}
