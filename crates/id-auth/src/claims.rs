use crate::{AuthError, Result as AuthErrorResult};

use id_core::Role;

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audience for short-lived identity tokens returned by login/signup
pub const AUD_IDENTITY: &str = "identity";
/// Audience for the long-lived session cookie token
pub const AUD_SESSION: &str = "session";
/// Audience for password reset tokens
pub const AUD_RESET: &str = "password_reset";

/// Token claims shared by all three token classes.
///
/// The audience is what separates the classes; verification pins it, so an
/// identity token can never pass as a session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account uid)
    pub sub: String,
    /// Token class (see the AUD_* constants)
    pub aud: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    /// Role embedded at mint time; absent on reset tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    pub iat: i64,
}

impl Claims {
    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub (account uid) cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if Uuid::parse_str(&self.sub).is_err() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub is not a valid uid".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Subject parsed as a uid. Call after validate().
    #[track_caller]
    pub fn uid(&self) -> AuthErrorResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|e| AuthError::InvalidClaim {
            claim: "sub".to_string(),
            message: format!("sub is not a valid uid: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Role claim, falling back to the default role when absent or unknown
    pub fn role(&self) -> Role {
        self.role
            .as_deref()
            .and_then(|s| Role::from_str(s).ok())
            .unwrap_or_default()
    }
}
