//! MySQL implementation of the ProfileRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use solar_core::domain::entities::profile::Profile;
use solar_core::errors::DomainError;
use solar_core::repositories::ProfileRepository;

use super::{column_error, parse_uuid};
use crate::database::db_error;

/// MySQL implementation of ProfileRepository
#[derive(Clone)]
pub struct MySqlProfileRepository {
    pool: MySqlPool,
}

impl MySqlProfileRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_profile(row: &sqlx::mysql::MySqlRow) -> Result<Profile, DomainError> {
        let user_id: String = row.try_get("user_id").map_err(column_error("user_id"))?;

        Ok(Profile {
            user_id: parse_uuid(&user_id, "profiles.user_id")?,
            display_name: row.try_get("display_name").map_err(column_error("display_name"))?,
            phone: row.try_get("phone").map_err(column_error("phone"))?,
            address: row.try_get("address").map_err(column_error("address"))?,
            company_name: row.try_get("company_name").map_err(column_error("company_name"))?,
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
impl ProfileRepository for MySqlProfileRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, display_name, phone, address, company_name, created_at, updated_at
            FROM profiles
            WHERE user_id = ?
            "#,
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find profile"))?;

        row.as_ref().map(Self::row_to_profile).transpose()
    }

    async fn create(&self, profile: Profile) -> Result<Profile, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, display_name, phone, address, company_name, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(profile.user_id.to_string())
        .bind(&profile.display_name)
        .bind(&profile.phone)
        .bind(&profile.address)
        .bind(&profile.company_name)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to create profile"))?;

        Ok(profile)
    }

    async fn update(&self, profile: Profile) -> Result<Profile, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET display_name = ?, phone = ?, address = ?, company_name = ?, updated_at = ?
            WHERE user_id = ?
            "#,
        )
        .bind(&profile.display_name)
        .bind(&profile.phone)
        .bind(&profile.address)
        .bind(&profile.company_name)
        .bind(profile.updated_at)
        .bind(profile.user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update profile"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("profile"));
        }

        Ok(profile)
    }

    async fn delete(&self, user_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete profile"))?;

        Ok(result.rows_affected() > 0)
    }
}
