use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_IDENTITY_TTL_SECS, DEFAULT_RESET_TTL_SECS,
    DEFAULT_SESSION_TTL_SECS,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret for all token classes. Required.
    pub session_secret: Option<String>,
    /// Identity token lifetime (login/signup result)
    pub identity_ttl_secs: i64,
    /// Session cookie lifetime
    pub session_ttl_secs: i64,
    /// Password reset token lifetime
    pub reset_ttl_secs: i64,
    /// Set the Secure attribute on the session cookie
    pub cookie_secure: bool,
    /// Refuse to mint session cookies for unverified email accounts
    pub require_verified_email: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: None,
            identity_ttl_secs: DEFAULT_IDENTITY_TTL_SECS,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            reset_ttl_secs: DEFAULT_RESET_TTL_SECS,
            cookie_secure: true,
            require_verified_email: false,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match self.session_secret.as_deref() {
            None | Some("") => {
                return Err(ConfigError::auth(
                    "auth.session_secret is required (set it in config.toml or ID_AUTH_SESSION_SECRET)",
                ));
            }
            Some(secret) if secret.len() < 32 => {
                return Err(ConfigError::auth(
                    "auth.session_secret must be at least 32 bytes",
                ));
            }
            Some(_) => {}
        }

        for (name, value) in [
            ("auth.identity_ttl_secs", self.identity_ttl_secs),
            ("auth.session_ttl_secs", self.session_ttl_secs),
            ("auth.reset_ttl_secs", self.reset_ttl_secs),
        ] {
            if value <= 0 {
                return Err(ConfigError::auth(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
