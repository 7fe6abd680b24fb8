//! Application profile record, parallel to the identity account.

use crate::{AuthAccount, Role};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The application-facing user record ("profile document").
///
/// Keyed by the uid the identity layer assigned; never creates its own ids.
/// Should exist for every account but may be absent - readers create it
/// lazily with the default role when they find it missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: Uuid,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub disabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a fresh profile for an identity account, least-privileged role
    pub fn for_account(account: &AuthAccount) -> Self {
        let now = Utc::now();
        Self {
            uid: account.uid,
            email: Some(account.email.clone()),
            display_name: account.display_name.clone(),
            role: Role::default(),
            disabled: account.disabled,
            created_at: now,
            updated_at: now,
        }
    }
}
