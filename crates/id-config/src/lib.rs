mod auth_config;
mod bootstrap_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod oauth_config;
mod rate_limit_config;
mod server_config;

pub use auth_config::AuthConfig;
pub use bootstrap_config::BootstrapConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use oauth_config::{OAuthConfig, OAuthProviderConfig};
pub use rate_limit_config::RateLimitConfig;
pub use server_config::ServerConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;
const DEFAULT_MAX_CONNECTIONS: usize = 10000;
const MIN_MAX_CONNECTIONS: usize = 1;
const MAX_MAX_CONNECTIONS: usize = 100000;
const DEFAULT_DATABASE_FILENAME: &str = "identity.db";
const DEFAULT_IDENTITY_TTL_SECS: i64 = 60 * 60;
const DEFAULT_SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 5;
const DEFAULT_RESET_TTL_SECS: i64 = 60 * 30;
const DEFAULT_POST_LOGIN_REDIRECT: &str = "/";
const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 10;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

#[cfg(test)]
mod tests;
