//! SQLite per-user credential repository.
//!
//! Implements `CredentialStore` from `goalcoach-core`. Values are written
//! through the writer pool and read through the reader pool; they are never
//! logged.

use chrono::{DateTime, Utc};
use sqlx::Row;

use goalcoach_core::repository::credential::CredentialStore;
use goalcoach_types::credential::StoredCredential;
use goalcoach_types::error::RepositoryError;

use super::pool::DatabasePool;

pub struct SqliteCredentialRepository {
    pool: DatabasePool,
}

impl SqliteCredentialRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn query_err(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => RepositoryError::Connection,
        other => RepositoryError::Query(other.to_string()),
    }
}

impl CredentialStore for SqliteCredentialRepository {
    async fn get(&self, user_id: &str) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query("SELECT credential FROM user_credentials WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        row.map(|row| row.try_get::<String, _>("credential").map_err(query_err))
            .transpose()
    }

    async fn set(&self, user_id: &str, credential: &str) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO user_credentials (user_id, credential, created_at, updated_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(user_id) DO UPDATE SET credential = excluded.credential, updated_at = excluded.updated_at",
        )
        .bind(user_id)
        .bind(credential)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        tracing::debug!(user_id, "stored user credential");
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM user_credentials WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool.writer)
            .await
            .map_err(query_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StoredCredential>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT user_id, created_at, updated_at FROM user_credentials ORDER BY user_id",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            let user_id: String = row.try_get("user_id").map_err(query_err)?;
            let created_at: String = row.try_get("created_at").map_err(query_err)?;
            let updated_at: String = row.try_get("updated_at").map_err(query_err)?;

            entries.push(StoredCredential {
                user_id,
                created_at: parse_datetime(&created_at)?,
                updated_at: parse_datetime(&updated_at)?,
            });
        }

        Ok(entries)
    }
}
