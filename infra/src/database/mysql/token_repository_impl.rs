//! MySQL implementation of the TokenRepository trait.
//!
//! Rows hold the SHA-256 hash of the refresh token, never the token itself.
//! Rotation is a single conditional `UPDATE` so that two requests presenting
//! the same token cannot both succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use solar_core::domain::entities::token::RefreshToken;
use solar_core::errors::DomainError;
use solar_core::repositories::TokenRepository;

use super::{column_error, parse_uuid};
use crate::database::db_error;

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, token_hash, expires_at, created_at, updated_at FROM refresh_tokens";

/// MySQL implementation of TokenRepository
#[derive(Clone)]
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;
        let user_id: String = row.try_get("user_id").map_err(column_error("user_id"))?;

        Ok(RefreshToken {
            id: parse_uuid(&id, "refresh_tokens.id")?,
            user_id: parse_uuid(&user_id, "refresh_tokens.user_id")?,
            token_hash: row.try_get("token_hash").map_err(column_error("token_hash"))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(column_error("expires_at"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error("created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(column_error("updated_at"))?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn find_active(
        &self,
        token_hash: &str,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshToken>, DomainError> {
        let query = format!(
            "{SELECT_COLUMNS} WHERE token_hash = ? AND user_id = ? AND expires_at > ? LIMIT 1"
        );

        let row = sqlx::query(&query)
            .bind(token_hash)
            .bind(user_id.to_string())
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find refresh token"))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (id, user_id, token_hash, expires_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.user_id.to_string())
            .bind(&token.token_hash)
            .bind(token.expires_at)
            .bind(token.created_at)
            .bind(token.updated_at)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to save refresh token"))?;

        Ok(token)
    }

    async fn rotate(
        &self,
        id: Uuid,
        expected_hash: &str,
        new_hash: &str,
        new_expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET token_hash = ?, expires_at = ?, updated_at = ?
            WHERE id = ? AND token_hash = ? AND expires_at > ?
        "#;

        let result = sqlx::query(query)
            .bind(new_hash)
            .bind(new_expires_at)
            .bind(now)
            .bind(id.to_string())
            .bind(expected_hash)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to rotate refresh token"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_by_hash(&self, user_id: Uuid, token_hash: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = ? AND token_hash = ?")
            .bind(user_id.to_string())
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete refresh token"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_active(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM refresh_tokens WHERE user_id = ? AND expires_at > ?",
        )
        .bind(user_id.to_string())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count refresh tokens"))?;

        Ok(count.max(0) as u64)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete expired refresh tokens"))?;

        let deleted = result.rows_affected();
        tracing::info!(deleted, "Deleted expired refresh tokens");
        Ok(deleted)
    }
}
