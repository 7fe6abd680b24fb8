use crate::oauth::{AuthorizationDetails, FederatedProfile, OAuthError, OAuthProvider};

use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, PkceCodeChallenge,
    PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use reqwest::{Client, ClientBuilder, redirect};
use serde::Deserialize;

pub struct FacebookOAuthProvider {
    client_id: ClientId,
    client_secret: ClientSecret,
    auth_url: AuthUrl,
    token_url: TokenUrl,
    redirect_url: RedirectUrl,
}

impl FacebookOAuthProvider {
    pub fn new(
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> Result<Self, OAuthError> {
        Ok(Self {
            client_id: ClientId::new(client_id),
            client_secret: ClientSecret::new(client_secret),
            auth_url: AuthUrl::new("https://www.facebook.com/v19.0/dialog/oauth".to_string())?,
            token_url: TokenUrl::new(
                "https://graph.facebook.com/v19.0/oauth/access_token".to_string(),
            )?,
            redirect_url: RedirectUrl::new(redirect_uri)?,
        })
    }
}

#[async_trait::async_trait]
impl OAuthProvider for FacebookOAuthProvider {
    fn authorization_details(&self) -> AuthorizationDetails {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_token) = BasicClient::new(self.client_id.clone())
            .set_client_secret(self.client_secret.clone())
            .set_auth_uri(self.auth_url.clone())
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone())
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("public_profile".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        AuthorizationDetails {
            url: auth_url.to_string(),
            csrf_token,
            pkce_verifier,
        }
    }

    async fn exchange_code(
        &self,
        code: String,
        pkce_verifier_secret: String,
    ) -> Result<String, OAuthError> {
        let http_client = ClientBuilder::new()
            .redirect(redirect::Policy::none())
            .build()?;

        let token_result = BasicClient::new(self.client_id.clone())
            .set_client_secret(self.client_secret.clone())
            .set_auth_uri(self.auth_url.clone())
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone())
            .exchange_code(AuthorizationCode::new(code))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier_secret))
            .request_async(&http_client)
            .await
            .map_err(|e| {
                log::error!("Facebook token exchange failed: {:?}", e);
                OAuthError::TokenExchange(e.to_string())
            })?;

        Ok(token_result.access_token().secret().to_string())
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<FederatedProfile, OAuthError> {
        #[derive(Deserialize)]
        struct FacebookProfile {
            id: String,
            email: Option<String>,
            name: Option<String>,
        }

        let profile: FacebookProfile = Client::new()
            .get("https://graph.facebook.com/me")
            .query(&[("fields", "id,name,email")])
            .bearer_auth(access_token)
            .send()
            .await?
            .json()
            .await
            .map_err(|_| OAuthError::ProfileParse)?;

        Ok(FederatedProfile {
            provider_uid: profile.id,
            // Facebook only returns confirmed addresses
            email_verified: profile.email.is_some(),
            email: profile.email,
            display_name: profile.name,
        })
    }
}
