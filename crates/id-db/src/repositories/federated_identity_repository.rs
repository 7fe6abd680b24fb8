//! Federated identity link repository.

use crate::{DbError, Result as DbErrorResult};

use id_core::{FederatedIdentity, Provider};

use std::panic::Location;
use std::str::FromStr;

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub struct FederatedIdentityRepository {
    pool: SqlitePool,
}

impl FederatedIdentityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn link(&self, identity: &FederatedIdentity) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO federated_identities (
                    provider, provider_uid, account_uid, created_at
                ) VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(identity.provider.as_str())
        .bind(&identity.provider_uid)
        .bind(identity.account_uid.to_string())
        .bind(identity.created_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find(
        &self,
        provider: Provider,
        provider_uid: &str,
    ) -> DbErrorResult<Option<FederatedIdentity>> {
        let row = sqlx::query(
            r#"
                SELECT provider, provider_uid, account_uid, created_at
                FROM federated_identities
                WHERE provider = ? AND provider_uid = ?
            "#,
        )
        .bind(provider.as_str())
        .bind(provider_uid)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_identity(&r)).transpose()
    }

    /// Remove all provider links for an account (part of account deletion)
    pub async fn delete_for_account(&self, account_uid: Uuid) -> DbErrorResult<u64> {
        let result = sqlx::query("DELETE FROM federated_identities WHERE account_uid = ?")
            .bind(account_uid.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[track_caller]
fn map_identity(row: &SqliteRow) -> DbErrorResult<FederatedIdentity> {
    let provider: String = row.try_get("provider")?;
    let account_uid: String = row.try_get("account_uid")?;
    let created_at: i64 = row.try_get("created_at")?;

    Ok(FederatedIdentity {
        provider: Provider::from_str(&provider).map_err(|e| DbError::Initialization {
            message: format!("Invalid provider in federated_identities.provider: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        provider_uid: row.try_get("provider_uid")?,
        account_uid: Uuid::parse_str(&account_uid).map_err(|e| DbError::Initialization {
            message: format!("Invalid UUID in federated_identities.account_uid: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| {
            DbError::Initialization {
                message: "Invalid timestamp in federated_identities.created_at".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
    })
}
