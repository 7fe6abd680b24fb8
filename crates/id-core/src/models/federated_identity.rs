//! Link between an external identity provider and a local account.

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supported federated identity providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    Google,
    Facebook,
}

impl Provider {
    /// Provider id as stored and as used in routes ("google", "facebook")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Facebook => "facebook",
        }
    }
}

impl FromStr for Provider {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "google" => Ok(Self::Google),
            "facebook" => Ok(Self::Facebook),
            _ => Err(CoreError::InvalidProvider {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A (provider, provider_uid) pair linked to a local account.
/// The pair is unique: one external identity maps to exactly one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederatedIdentity {
    pub provider: Provider,
    /// The subject id as issued by the provider
    pub provider_uid: String,
    pub account_uid: Uuid,
    pub created_at: DateTime<Utc>,
}

impl FederatedIdentity {
    pub fn new(provider: Provider, provider_uid: String, account_uid: Uuid) -> Self {
        Self {
            provider,
            provider_uid,
            account_uid,
            created_at: Utc::now(),
        }
    }
}
