//! Identity account repository.

use crate::{DbError, Result as DbErrorResult};

use id_core::AuthAccount;

use std::panic::Location;

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account. A duplicate email surfaces as
    /// [`DbError::EmailTaken`].
    pub async fn create(&self, account: &AuthAccount) -> DbErrorResult<()> {
        let result = sqlx::query(
            r#"
                INSERT INTO auth_accounts (
                    uid, email, password_hash, display_name,
                    email_verified, disabled, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(account.uid.to_string())
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.display_name)
        .bind(account.email_verified)
        .bind(account.disabled)
        .bind(account.created_at.timestamp())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(DbError::EmailTaken {
                    email: account.email.clone(),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_uid(&self, uid: Uuid) -> DbErrorResult<Option<AuthAccount>> {
        let row = sqlx::query(
            r#"
                SELECT uid, email, password_hash, display_name,
                    email_verified, disabled, created_at
                FROM auth_accounts
                WHERE uid = ?
            "#,
        )
        .bind(uid.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_account(&r)).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<AuthAccount>> {
        let row = sqlx::query(
            r#"
                SELECT uid, email, password_hash, display_name,
                    email_verified, disabled, created_at
                FROM auth_accounts
                WHERE email = ?
            "#,
        )
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_account(&r)).transpose()
    }

    /// One page of accounts in uid order. `page_token` is the uid of the
    /// last account on the previous page.
    pub async fn list_page(
        &self,
        limit: i64,
        page_token: Option<&str>,
    ) -> DbErrorResult<Vec<AuthAccount>> {
        let rows = sqlx::query(
            r#"
                SELECT uid, email, password_hash, display_name,
                    email_verified, disabled, created_at
                FROM auth_accounts
                WHERE uid > ?
                ORDER BY uid
                LIMIT ?
            "#,
        )
        .bind(page_token.unwrap_or(""))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_account).collect()
    }

    pub async fn set_disabled(&self, uid: Uuid, disabled: bool) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE auth_accounts
                SET disabled = ?
                WHERE uid = ?
            "#,
        )
        .bind(disabled)
        .bind(uid.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_password_hash(&self, uid: Uuid, password_hash: &str) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE auth_accounts
                SET password_hash = ?
                WHERE uid = ?
            "#,
        )
        .bind(password_hash)
        .bind(uid.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn mark_email_verified(&self, uid: Uuid) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE auth_accounts
                SET email_verified = 1
                WHERE uid = ?
            "#,
        )
        .bind(uid.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, uid: Uuid) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM auth_accounts WHERE uid = ?")
            .bind(uid.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[track_caller]
fn map_account(row: &SqliteRow) -> DbErrorResult<AuthAccount> {
    let uid: String = row.try_get("uid")?;
    let created_at: i64 = row.try_get("created_at")?;

    Ok(AuthAccount {
        uid: Uuid::parse_str(&uid).map_err(|e| DbError::Initialization {
            message: format!("Invalid UUID in auth_accounts.uid: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        display_name: row.try_get("display_name")?,
        email_verified: row.try_get("email_verified")?,
        disabled: row.try_get("disabled")?,
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| {
            DbError::Initialization {
                message: "Invalid timestamp in auth_accounts.created_at".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
    })
}
