use crate::{AuthError, TokenConfig, TokenService};

use id_core::Role;

use uuid::Uuid;

fn test_service() -> TokenService {
    TokenService::new(TokenConfig::new(
        "test-secret-key-at-least-32-bytes".to_string(),
    ))
}

#[test]
fn given_identity_token_when_verified_then_returns_claims() {
    let service = test_service();
    let uid = Uuid::new_v4();

    let token = service
        .mint_identity_token(uid, Some("a@b.test".to_string()), true, Role::Customer)
        .unwrap();
    let claims = service.verify_identity_token(&token).unwrap();

    assert_eq!(claims.uid().unwrap(), uid);
    assert_eq!(claims.email.as_deref(), Some("a@b.test"));
    assert!(claims.email_verified);
    assert_eq!(claims.role(), Role::Customer);
}

#[test]
fn given_identity_token_when_verified_as_session_then_rejected() {
    let service = test_service();
    let uid = Uuid::new_v4();

    let token = service
        .mint_identity_token(uid, None, false, Role::User)
        .unwrap();
    let result = service.verify_session_token(&token);

    assert!(matches!(result, Err(AuthError::JwtDecode { .. })));
}

#[test]
fn given_identity_claims_when_session_minted_then_role_carries_over() {
    let service = test_service();
    let uid = Uuid::new_v4();

    let id_token = service
        .mint_identity_token(uid, Some("a@b.test".to_string()), true, Role::Admin)
        .unwrap();
    let identity = service.verify_identity_token(&id_token).unwrap();

    let session_token = service.mint_session_token(&identity).unwrap();
    let session = service.verify_session_token(&session_token).unwrap();

    assert_eq!(session.uid().unwrap(), uid);
    assert_eq!(session.role(), Role::Admin);
    assert!(session.email_verified);
}

#[test]
fn given_expired_token_when_verified_then_returns_token_expired_error() {
    let mut config = TokenConfig::new("test-secret-key-at-least-32-bytes".to_string());
    config.identity_ttl_secs = -3600; // minted already expired
    let service = TokenService::new(config);

    let token = service
        .mint_identity_token(Uuid::new_v4(), None, false, Role::User)
        .unwrap();
    let result = service.verify_identity_token(&token);

    assert!(matches!(result, Err(AuthError::TokenExpired { .. })));
}

#[test]
fn given_wrong_secret_when_verified_then_returns_decode_error() {
    let service = test_service();
    let other = TokenService::new(TokenConfig::new(
        "another-secret-key-at-least-32-b".to_string(),
    ));

    let token = service
        .mint_identity_token(Uuid::new_v4(), None, false, Role::User)
        .unwrap();
    let result = other.verify_identity_token(&token);

    assert!(matches!(result, Err(AuthError::JwtDecode { .. })));
}

#[test]
fn given_reset_token_when_verified_then_has_no_role() {
    let service = test_service();
    let uid = Uuid::new_v4();

    let token = service.mint_reset_token(uid).unwrap();
    let claims = service.verify_reset_token(&token).unwrap();

    assert_eq!(claims.uid().unwrap(), uid);
    assert!(claims.role.is_none());
    assert_eq!(claims.role(), Role::User); // fallback
}

#[test]
fn given_malformed_token_when_verified_then_returns_decode_error() {
    let service = test_service();

    let result = service.verify_session_token("not-a-jwt");

    assert!(matches!(result, Err(AuthError::JwtDecode { .. })));
}

#[test]
fn given_unknown_role_claim_when_read_then_falls_back_to_user() {
    let service = test_service();
    let uid = Uuid::new_v4();

    let token = service
        .mint_identity_token(uid, None, false, Role::User)
        .unwrap();
    let mut claims = service.verify_identity_token(&token).unwrap();
    claims.role = Some("emperor".to_string());

    assert_eq!(claims.role(), Role::User);
}
