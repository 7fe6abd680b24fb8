use crate::{AUD_IDENTITY, AUD_RESET, AUD_SESSION, AuthError, Claims, Result as AuthErrorResult};

use id_core::Role;

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

/// Token lifetimes and signing secret
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HS256 signing secret, shared by all token classes
    pub secret: String,
    /// Identity token lifetime (default 1 hour)
    pub identity_ttl_secs: i64,
    /// Session cookie lifetime (default 5 days)
    pub session_ttl_secs: i64,
    /// Password reset token lifetime (default 30 minutes)
    pub reset_ttl_secs: i64,
}

impl TokenConfig {
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            identity_ttl_secs: 60 * 60,
            session_ttl_secs: 60 * 60 * 24 * 5,
            reset_ttl_secs: 60 * 30,
        }
    }
}

/// Mints and verifies the three token classes (identity, session, reset).
///
/// HS256 throughout. Verification pins the audience, validates expiry with a
/// 30 second clock skew tolerance, then runs claim validation.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: TokenConfig,
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            config,
        }
    }

    /// Session cookie lifetime, for Max-Age on the cookie itself
    pub fn session_ttl_secs(&self) -> i64 {
        self.config.session_ttl_secs
    }

    /// Mint an identity token for a freshly authenticated account
    #[track_caller]
    pub fn mint_identity_token(
        &self,
        uid: Uuid,
        email: Option<String>,
        email_verified: bool,
        role: Role,
    ) -> AuthErrorResult<String> {
        self.mint(
            uid,
            AUD_IDENTITY,
            email,
            email_verified,
            Some(role),
            self.config.identity_ttl_secs,
        )
    }

    /// Mint the session cookie token from verified identity claims.
    /// The role travels as-is: it was embedded when the identity token
    /// was minted.
    #[track_caller]
    pub fn mint_session_token(&self, identity: &Claims) -> AuthErrorResult<String> {
        let uid = identity.uid()?;
        self.mint(
            uid,
            AUD_SESSION,
            identity.email.clone(),
            identity.email_verified,
            Some(identity.role()),
            self.config.session_ttl_secs,
        )
    }

    /// Mint a session cookie token directly, without the identity-token
    /// intermediate (federated callbacks land here).
    #[track_caller]
    pub fn mint_session_for(
        &self,
        uid: Uuid,
        email: Option<String>,
        email_verified: bool,
        role: Role,
    ) -> AuthErrorResult<String> {
        self.mint(
            uid,
            AUD_SESSION,
            email,
            email_verified,
            Some(role),
            self.config.session_ttl_secs,
        )
    }

    /// Mint a password reset token
    #[track_caller]
    pub fn mint_reset_token(&self, uid: Uuid) -> AuthErrorResult<String> {
        self.mint(uid, AUD_RESET, None, false, None, self.config.reset_ttl_secs)
    }

    pub fn verify_identity_token(&self, token: &str) -> AuthErrorResult<Claims> {
        self.verify(token, AUD_IDENTITY)
    }

    pub fn verify_session_token(&self, token: &str) -> AuthErrorResult<Claims> {
        self.verify(token, AUD_SESSION)
    }

    pub fn verify_reset_token(&self, token: &str) -> AuthErrorResult<Claims> {
        self.verify(token, AUD_RESET)
    }

    #[track_caller]
    fn mint(
        &self,
        uid: Uuid,
        aud: &str,
        email: Option<String>,
        email_verified: bool,
        role: Option<Role>,
        ttl_secs: i64,
    ) -> AuthErrorResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: uid.to_string(),
            aud: aud.to_string(),
            email,
            email_verified,
            role: role.map(|r| r.as_str().to_string()),
            exp: now + ttl_secs,
            iat: now,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AuthError::JwtEncode {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    #[track_caller]
    fn verify(&self, token: &str, aud: &str) -> AuthErrorResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 30; // 30 second clock skew tolerance
        validation.set_audience(&[aud]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::JwtDecode {
                        source: e,
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        // Additional claim validation
        token_data.claims.validate()?;

        Ok(token_data.claims)
    }
}
