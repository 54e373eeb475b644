//! Read and update the profile owned by the signed-in principal

use std::sync::Arc;

use solar_shared::validation::is_valid_phone;
use tracing::info;

use crate::domain::entities::profile::{Profile, ProfileUpdate};
use crate::domain::entities::user::Role;
use crate::domain::value_objects::Principal;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::ProfileRepository;

pub struct ProfileService<P: ProfileRepository> {
    profile_repository: Arc<P>,
}

impl<P: ProfileRepository> ProfileService<P> {
    pub fn new(profile_repository: Arc<P>) -> Self {
        Self { profile_repository }
    }

    /// Fetch the caller's profile; ADMIN principals have none
    pub async fn get_profile(&self, principal: &Principal) -> DomainResult<Profile> {
        self.profile_repository
            .find_by_user_id(principal.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("profile"))
    }

    /// Apply a partial update to the caller's profile
    ///
    /// # Returns
    ///
    /// * `Ok(Profile)` - The stored profile after the update
    /// * `Err(ValidationError::NotAllowedForRole)` - `company_name` from a non-dealer
    /// * `Err(ValidationError::InvalidFormat)` - Malformed phone or blank display name
    /// * `Err(DomainError::NotFound)` - Caller has no profile
    pub async fn update_profile(
        &self,
        principal: &Principal,
        update: ProfileUpdate,
    ) -> DomainResult<Profile> {
        if update.company_name.is_some() && principal.role != Role::Dealer {
            return Err(ValidationError::NotAllowedForRole {
                field: "companyName".to_string(),
                role: principal.role.to_string(),
            }
            .into());
        }

        if matches!(update.display_name.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(ValidationError::InvalidFormat { field: "displayName".to_string() }.into());
        }

        if matches!(update.phone.as_deref(), Some(phone) if !is_valid_phone(phone)) {
            return Err(ValidationError::InvalidFormat { field: "phone".to_string() }.into());
        }

        let mut profile = self.get_profile(principal).await?;
        if update.is_empty() {
            return Ok(profile);
        }

        profile.apply(update);
        let profile = self.profile_repository.update(profile).await?;

        info!(user_id = %principal.user_id, "Profile updated");
        Ok(profile)
    }
}
