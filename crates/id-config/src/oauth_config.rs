use crate::{ConfigError, ConfigErrorResult, DEFAULT_POST_LOGIN_REDIRECT};

use serde::Deserialize;

/// One federated provider's client registration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OAuthProviderConfig {
    pub enabled: bool,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
}

impl OAuthProviderConfig {
    fn validate(&self, name: &str) -> ConfigErrorResult<()> {
        if !self.enabled {
            return Ok(());
        }

        for (field, value) in [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("redirect_uri", &self.redirect_uri),
        ] {
            if value.as_deref().unwrap_or("").is_empty() {
                return Err(ConfigError::oauth(format!(
                    "oauth.{}.{} is required when oauth.{}.enabled = true",
                    name, field, name
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    pub google: OAuthProviderConfig,
    pub facebook: OAuthProviderConfig,
    /// Where the callback sends the browser after a successful sign-in
    pub post_login_redirect: String,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            google: OAuthProviderConfig::default(),
            facebook: OAuthProviderConfig::default(),
            post_login_redirect: String::from(DEFAULT_POST_LOGIN_REDIRECT),
        }
    }
}

impl OAuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.google.validate("google")?;
        self.facebook.validate("facebook")?;

        if self.post_login_redirect.is_empty() {
            return Err(ConfigError::oauth("oauth.post_login_redirect cannot be empty"));
        }

        Ok(())
    }
}
