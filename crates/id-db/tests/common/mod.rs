#![allow(dead_code)]

use id_core::{AuthAccount, UserProfile};

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Build a password account with a unique email
pub fn test_account(tag: &str) -> AuthAccount {
    AuthAccount::new(
        format!("{}@example.com", tag),
        "$argon2id$stub-hash".to_string(),
        Some(format!("Test {}", tag)),
    )
}

/// Build the profile record for an account
pub fn test_profile(account: &AuthAccount) -> UserProfile {
    UserProfile::for_account(account)
}
