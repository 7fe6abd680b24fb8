use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

/// Optional seed account created at startup when missing, so a fresh
/// deployment has at least one super_admin to log in with.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct BootstrapConfig {
    pub super_admin_email: Option<String>,
    pub super_admin_password: Option<String>,
    pub super_admin_display_name: Option<String>,
}

impl BootstrapConfig {
    /// Seeding happens only when both email and password are set
    pub fn is_configured(&self) -> bool {
        self.super_admin_email.as_deref().unwrap_or("") != ""
            && self.super_admin_password.as_deref().unwrap_or("") != ""
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.super_admin_email.is_some() != self.super_admin_password.is_some() {
            return Err(ConfigError::config(
                "bootstrap.super_admin_email and bootstrap.super_admin_password must be set together",
            ));
        }

        Ok(())
    }
}
