use crate::{
    AuthConfig, BootstrapConfig, ConfigError, ConfigErrorResult, DatabaseConfig, LoggingConfig,
    OAuthConfig, RateLimitConfig, ServerConfig,
};

use std::path::PathBuf;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub oauth: OAuthConfig,
    pub bootstrap: BootstrapConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Load .env if present (development)
    /// 2. Check for ID_CONFIG_DIR env var, else use ./.id/
    /// 3. Auto-create config directory if it doesn't exist
    /// 4. Load config.toml if it exists, else use defaults
    /// 5. Apply ID_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let _ = dotenvy::dotenv();

        let config_dir = Self::config_dir()?;

        // Auto-create config directory
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: ID_CONFIG_DIR env var > ./.id/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("ID_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".id"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        self.oauth.validate()?;
        self.bootstrap.validate()?;
        self.rate_limit.validate()?;

        // Validate database path doesn't escape config dir
        let db_path = std::path::Path::new(&self.database.path);
        if db_path.is_absolute() || self.database.path.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (max {} connections)",
            self.server.host, self.server.port, self.server.max_connections
        );
        info!("  database: {}", self.database.path);

        info!(
            "  auth: session ttl={}s, identity ttl={}s, secure cookies={}, require verified email={}",
            self.auth.session_ttl_secs,
            self.auth.identity_ttl_secs,
            self.auth.cookie_secure,
            self.auth.require_verified_email
        );

        info!(
            "  oauth: google={}, facebook={}",
            if self.oauth.google.enabled {
                "enabled"
            } else {
                "disabled"
            },
            if self.oauth.facebook.enabled {
                "enabled"
            } else {
                "disabled"
            }
        );

        info!(
            "  bootstrap: super_admin={}",
            if self.bootstrap.is_configured() {
                "configured"
            } else {
                "not configured"
            }
        );

        info!(
            "  rate_limit: {}/{}s",
            self.rate_limit.max_requests, self.rate_limit.window_secs
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("ID_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("ID_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "ID_SERVER_MAX_CONNECTIONS",
            &mut self.server.max_connections,
        );

        // Database
        Self::apply_env_string("ID_DATABASE_PATH", &mut self.database.path);

        // Auth
        Self::apply_env_option_string("ID_AUTH_SESSION_SECRET", &mut self.auth.session_secret);
        Self::apply_env_parse("ID_AUTH_IDENTITY_TTL_SECS", &mut self.auth.identity_ttl_secs);
        Self::apply_env_parse("ID_AUTH_SESSION_TTL_SECS", &mut self.auth.session_ttl_secs);
        Self::apply_env_parse("ID_AUTH_RESET_TTL_SECS", &mut self.auth.reset_ttl_secs);
        Self::apply_env_bool("ID_AUTH_COOKIE_SECURE", &mut self.auth.cookie_secure);
        Self::apply_env_bool(
            "ID_AUTH_REQUIRE_VERIFIED_EMAIL",
            &mut self.auth.require_verified_email,
        );

        // OAuth
        Self::apply_env_bool("ID_OAUTH_GOOGLE_ENABLED", &mut self.oauth.google.enabled);
        Self::apply_env_option_string(
            "ID_OAUTH_GOOGLE_CLIENT_ID",
            &mut self.oauth.google.client_id,
        );
        Self::apply_env_option_string(
            "ID_OAUTH_GOOGLE_CLIENT_SECRET",
            &mut self.oauth.google.client_secret,
        );
        Self::apply_env_option_string(
            "ID_OAUTH_GOOGLE_REDIRECT_URI",
            &mut self.oauth.google.redirect_uri,
        );
        Self::apply_env_bool("ID_OAUTH_FACEBOOK_ENABLED", &mut self.oauth.facebook.enabled);
        Self::apply_env_option_string(
            "ID_OAUTH_FACEBOOK_CLIENT_ID",
            &mut self.oauth.facebook.client_id,
        );
        Self::apply_env_option_string(
            "ID_OAUTH_FACEBOOK_CLIENT_SECRET",
            &mut self.oauth.facebook.client_secret,
        );
        Self::apply_env_option_string(
            "ID_OAUTH_FACEBOOK_REDIRECT_URI",
            &mut self.oauth.facebook.redirect_uri,
        );
        Self::apply_env_string(
            "ID_OAUTH_POST_LOGIN_REDIRECT",
            &mut self.oauth.post_login_redirect,
        );

        // Bootstrap
        Self::apply_env_option_string(
            "ID_BOOTSTRAP_SUPER_ADMIN_EMAIL",
            &mut self.bootstrap.super_admin_email,
        );
        Self::apply_env_option_string(
            "ID_BOOTSTRAP_SUPER_ADMIN_PASSWORD",
            &mut self.bootstrap.super_admin_password,
        );
        Self::apply_env_option_string(
            "ID_BOOTSTRAP_SUPER_ADMIN_DISPLAY_NAME",
            &mut self.bootstrap.super_admin_display_name,
        );

        // Rate limit
        Self::apply_env_parse(
            "ID_RATE_LIMIT_MAX_REQUESTS",
            &mut self.rate_limit.max_requests,
        );
        Self::apply_env_parse("ID_RATE_LIMIT_WINDOW_SECS", &mut self.rate_limit.window_secs);

        // Logging
        Self::apply_env_parse("ID_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("ID_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("ID_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
