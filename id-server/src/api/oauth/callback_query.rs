use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    /// Authorization code; absent when the provider reports an error
    #[serde(default)]
    pub code: Option<String>,

    /// CSRF state token echoed back by the provider
    #[serde(default)]
    pub state: Option<String>,

    /// Provider-reported error (user denied consent etc.)
    #[serde(default)]
    pub error: Option<String>,
}
