//! Token repository trait defining the interface for refresh credential persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken row persistence
///
/// Token values are always passed in hashed form. Every method that reasons
/// about liveness takes `now` explicitly so that the caller owns the clock.
///
/// # Concurrency
/// [`TokenRepository::rotate`] must be a single atomic compare-and-swap: it
/// only overwrites the row when the row still holds `expected_hash` and is
/// still live. Two callers racing on the same row see exactly one `true`.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Find a live row for the given hash and owner
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - row exists, belongs to `user_id` and `expires_at > now`
    /// * `Ok(None)` - no such live row
    /// * `Err(DomainError)` - Database error occurred
    async fn find_active(
        &self,
        token_hash: &str,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshToken>, DomainError>;

    /// Persist a new refresh token row
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved row
    /// * `Err(DomainError)` - Save failed (e.g., duplicate hash)
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Overwrite a row's token value and expiry if it is unchanged and live
    ///
    /// # Returns
    /// * `Ok(true)` - exactly one row was updated
    /// * `Ok(false)` - the row was already rotated, deleted or expired
    /// * `Err(DomainError)` - Database error occurred
    async fn rotate(
        &self,
        id: Uuid,
        expected_hash: &str,
        new_hash: &str,
        new_expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Delete the row holding `token_hash` for `user_id`
    ///
    /// # Returns
    /// * `Ok(true)` - a row was removed
    /// * `Ok(false)` - no matching row
    async fn delete_by_hash(&self, user_id: Uuid, token_hash: &str) -> Result<bool, DomainError>;

    /// Count live rows owned by a user
    async fn count_active(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<u64, DomainError>;

    /// Delete every row with `expires_at <= now`
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of rows deleted
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
