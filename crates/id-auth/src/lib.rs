pub mod claims;
pub mod error;
pub mod login_rate_limiter;
pub mod oauth;
pub mod password;
pub mod rate_limit_config;
pub mod token;

pub use claims::{AUD_IDENTITY, AUD_RESET, AUD_SESSION, Claims};
pub use error::{AuthError, Result};
pub use login_rate_limiter::LoginRateLimiter;
pub use oauth::{AuthorizationDetails, FederatedProfile, OAuthError, OAuthManager, OAuthProvider};
pub use password::{Argon2Hasher, Hasher, HashingError};
pub use rate_limit_config::RateLimitConfig;
pub use token::{TokenConfig, TokenService};

#[cfg(test)]
mod tests;
