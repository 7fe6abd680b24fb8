use crate::{AuthAccount, Provider, Role, UserProfile};

use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::User.as_str(), "user");
    assert_eq!(Role::Customer.as_str(), "customer");
    assert_eq!(Role::Admin.as_str(), "admin");
    assert_eq!(Role::SuperAdmin.as_str(), "super_admin");
}

#[test]
fn test_role_from_str() {
    assert_eq!(Role::from_str("user").unwrap(), Role::User);
    assert_eq!(Role::from_str("customer").unwrap(), Role::Customer);
    assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
    assert_eq!(Role::from_str("super_admin").unwrap(), Role::SuperAdmin);
    assert!(Role::from_str("root").is_err());
    assert!(Role::from_str("").is_err());
}

#[test]
fn test_role_default_is_least_privileged() {
    assert_eq!(Role::default(), Role::User);
}

#[test]
fn test_role_admin_gate() {
    assert!(!Role::User.is_admin());
    assert!(!Role::Customer.is_admin());
    assert!(Role::Admin.is_admin());
    assert!(Role::SuperAdmin.is_admin());
}

#[test]
fn test_provider_round_trip() {
    assert_eq!(Provider::from_str("google").unwrap(), Provider::Google);
    assert_eq!(Provider::from_str("facebook").unwrap(), Provider::Facebook);
    assert!(Provider::from_str("github").is_err());
}

#[test]
fn test_new_account_normalizes_email() {
    let account = AuthAccount::new("Admin@Example.COM".to_string(), "hash".to_string(), None);
    assert_eq!(account.email, "admin@example.com");
    assert!(!account.email_verified);
    assert!(!account.disabled);
    assert!(account.has_password());
}

#[test]
fn test_federated_account_is_verified_and_passwordless() {
    let account = AuthAccount::new_federated("who@example.com".to_string(), None);
    assert!(account.email_verified);
    assert!(!account.has_password());
}

#[test]
fn test_profile_for_account_defaults() {
    let account = AuthAccount::new(
        "who@example.com".to_string(),
        "hash".to_string(),
        Some("Who".to_string()),
    );
    let profile = UserProfile::for_account(&account);

    assert_eq!(profile.uid, account.uid);
    assert_eq!(profile.email.as_deref(), Some("who@example.com"));
    assert_eq!(profile.display_name.as_deref(), Some("Who"));
    assert_eq!(profile.role, Role::User);
    assert!(!profile.disabled);
    assert_eq!(profile.created_at, profile.updated_at);
}
