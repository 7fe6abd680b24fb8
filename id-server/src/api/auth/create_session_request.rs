use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// Identity token from login/signup, exchanged for a session cookie
    #[serde(default)]
    pub id_token: Option<String>,
}
