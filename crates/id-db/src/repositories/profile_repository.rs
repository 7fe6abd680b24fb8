//! Profile record repository.
//!
//! Profiles are the application-facing half of the user data: a separate
//! collection keyed by the account uid. A profile should exist for every
//! account but can be missing; `ensure_exists` is the reconciliation point
//! every read path goes through.

use crate::{DbError, Result as DbErrorResult};

use id_core::{AuthAccount, Role, UserProfile};

use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub struct ProfileRepository {
    pool: SqlitePool,
}

impl ProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Write the profile record, replacing any existing one wholesale
    /// (document-store set semantics).
    pub async fn upsert(&self, profile: &UserProfile) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO user_profiles (
                    uid, email, display_name, role, disabled, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT (uid) DO UPDATE SET
                    email = excluded.email,
                    display_name = excluded.display_name,
                    role = excluded.role,
                    disabled = excluded.disabled,
                    updated_at = excluded.updated_at
            "#,
        )
        .bind(profile.uid.to_string())
        .bind(&profile.email)
        .bind(&profile.display_name)
        .bind(profile.role.as_str())
        .bind(profile.disabled)
        .bind(profile.created_at.timestamp())
        .bind(profile.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_uid(&self, uid: Uuid) -> DbErrorResult<Option<UserProfile>> {
        let row = sqlx::query(
            r#"
                SELECT uid, email, display_name, role, disabled, created_at, updated_at
                FROM user_profiles
                WHERE uid = ?
            "#,
        )
        .bind(uid.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_profile(&r)).transpose()
    }

    /// Return the profile for an account, creating it with the default role
    /// when it is missing. This is how the two parallel records are
    /// reconciled after drift.
    pub async fn ensure_exists(&self, account: &AuthAccount) -> DbErrorResult<UserProfile> {
        if let Some(profile) = self.find_by_uid(account.uid).await? {
            return Ok(profile);
        }

        let profile = UserProfile::for_account(account);
        self.upsert(&profile).await?;
        Ok(profile)
    }

    pub async fn update_role(&self, uid: Uuid, role: Role) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE user_profiles
                SET role = ?, updated_at = ?
                WHERE uid = ?
            "#,
        )
        .bind(role.as_str())
        .bind(Utc::now().timestamp())
        .bind(uid.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_disabled(&self, uid: Uuid, disabled: bool) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE user_profiles
                SET disabled = ?, updated_at = ?
                WHERE uid = ?
            "#,
        )
        .bind(disabled)
        .bind(Utc::now().timestamp())
        .bind(uid.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, uid: Uuid) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM user_profiles WHERE uid = ?")
            .bind(uid.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[track_caller]
fn map_profile(row: &SqliteRow) -> DbErrorResult<UserProfile> {
    let uid: String = row.try_get("uid")?;
    let role: String = row.try_get("role")?;
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(UserProfile {
        uid: Uuid::parse_str(&uid).map_err(|e| DbError::Initialization {
            message: format!("Invalid UUID in user_profiles.uid: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        email: row.try_get("email")?,
        display_name: row.try_get("display_name")?,
        role: Role::from_str(&role).map_err(|e| DbError::Initialization {
            message: format!("Invalid role in user_profiles.role: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        disabled: row.try_get("disabled")?,
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| {
            DbError::Initialization {
                message: "Invalid timestamp in user_profiles.created_at".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
        updated_at: DateTime::from_timestamp(updated_at, 0).ok_or_else(|| {
            DbError::Initialization {
                message: "Invalid timestamp in user_profiles.updated_at".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
    })
}
