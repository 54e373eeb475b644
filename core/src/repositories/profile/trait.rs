//! Profile repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::profile::Profile;
use crate::errors::DomainError;

/// Repository trait for Profile persistence operations
///
/// A principal owns at most one profile, keyed by its user id.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, DomainError>;

    async fn create(&self, profile: Profile) -> Result<Profile, DomainError>;

    /// Persist the full profile record
    ///
    /// # Returns
    /// * `Ok(Profile)` - The updated profile
    /// * `Err(DomainError::NotFound)` - no profile for this user
    async fn update(&self, profile: Profile) -> Result<Profile, DomainError>;

    /// Remove the profile owned by `user_id`; returns whether one existed
    async fn delete(&self, user_id: Uuid) -> Result<bool, DomainError>;
}
