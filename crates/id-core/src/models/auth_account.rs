//! Identity record - the account as the authentication layer sees it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authentication account.
///
/// This is the authoritative identity record: it owns the uid, the
/// credential material, and the disabled flag. The application-facing
/// [`crate::UserProfile`] is a parallel record keyed by the same uid and may
/// lag behind this one (it is created lazily on first read).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthAccount {
    pub uid: Uuid,
    /// Stored lowercased; unique across accounts
    pub email: String,
    /// Argon2id PHC string; absent for federated-only accounts
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub display_name: Option<String>,
    pub email_verified: bool,
    pub disabled: bool,
    pub created_at: DateTime<Utc>,
}

impl AuthAccount {
    /// Create a new password-backed account. The uid is minted here and
    /// nowhere else.
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        Self {
            uid: Uuid::new_v4(),
            email: email.to_lowercase(),
            password_hash: Some(password_hash),
            display_name,
            email_verified: false,
            disabled: false,
            created_at: Utc::now(),
        }
    }

    /// Create a new account from a federated identity. Provider-asserted
    /// emails are treated as verified.
    pub fn new_federated(email: String, display_name: Option<String>) -> Self {
        Self {
            uid: Uuid::new_v4(),
            email: email.to_lowercase(),
            password_hash: None,
            display_name,
            email_verified: true,
            disabled: false,
            created_at: Utc::now(),
        }
    }

    /// Whether this account can sign in with a password
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}
