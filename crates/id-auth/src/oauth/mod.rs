//! Federated sign-in: OAuth 2.0 authorization-code flow with PKCE.

pub mod facebook;
pub mod google;

pub use facebook::FacebookOAuthProvider;
pub use google::GoogleOAuthProvider;

use id_core::Provider;

use std::collections::HashMap;
use std::sync::Arc;

use oauth2::{CsrfToken, PkceCodeVerifier};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("Invalid URL format: {0}")]
    InvalidUrl(#[from] oauth2::url::ParseError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("OAuth token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Failed to parse user profile response")]
    ProfileParse,

    #[error("Provider did not supply an email address")]
    MissingEmail,

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(Provider),
}

/// Everything the caller must hold onto between redirect and callback
pub struct AuthorizationDetails {
    pub url: String,
    pub csrf_token: CsrfToken,
    pub pkce_verifier: PkceCodeVerifier,
}

/// Normalized profile as fetched from a provider's userinfo endpoint
#[derive(Deserialize, Debug)]
pub struct FederatedProfile {
    pub provider_uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub email_verified: bool,
}

impl FederatedProfile {
    /// Email is required to provision a local account
    pub fn require_email(&self) -> Result<&str, OAuthError> {
        self.email.as_deref().ok_or(OAuthError::MissingEmail)
    }
}

#[async_trait::async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Generate the authorization URL plus the CSRF/PKCE state the
    /// callback will need.
    fn authorization_details(&self) -> AuthorizationDetails;

    /// Exchange an authorization code for an access token
    async fn exchange_code(
        &self,
        code: String,
        pkce_verifier_secret: String,
    ) -> Result<String, OAuthError>;

    /// Fetch the user's profile with an access token
    async fn fetch_profile(&self, access_token: &str) -> Result<FederatedProfile, OAuthError>;
}

/// Configured providers, keyed by provider id
#[derive(Clone, Default)]
pub struct OAuthManager {
    providers: HashMap<Provider, Arc<dyn OAuthProvider>>,
}

impl OAuthManager {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    pub fn add_provider(&mut self, provider: Provider, implementation: Arc<dyn OAuthProvider>) {
        self.providers.insert(provider, implementation);
    }

    pub fn get_provider(&self, provider: Provider) -> Result<&Arc<dyn OAuthProvider>, OAuthError> {
        self.providers
            .get(&provider)
            .ok_or(OAuthError::ProviderNotConfigured(provider))
    }

    pub fn has_provider(&self, provider: Provider) -> bool {
        self.providers.contains_key(&provider)
    }
}
