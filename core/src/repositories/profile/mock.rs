//! Mock implementation of ProfileRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::profile::Profile;
use crate::errors::DomainError;

use super::trait_::ProfileRepository;

/// Mock profile repository for testing
#[derive(Clone, Default)]
pub struct MockProfileRepository {
    profiles: Arc<RwLock<HashMap<Uuid, Profile>>>,
}

impl MockProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&user_id).cloned())
    }

    async fn create(&self, profile: Profile) -> Result<Profile, DomainError> {
        let mut profiles = self.profiles.write().await;

        if profiles.contains_key(&profile.user_id) {
            return Err(DomainError::internal("profile already exists"));
        }

        profiles.insert(profile.user_id, profile.clone());
        Ok(profile)
    }

    async fn update(&self, profile: Profile) -> Result<Profile, DomainError> {
        let mut profiles = self.profiles.write().await;

        if !profiles.contains_key(&profile.user_id) {
            return Err(DomainError::not_found("profile"));
        }

        profiles.insert(profile.user_id, profile.clone());
        Ok(profile)
    }

    async fn delete(&self, user_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.profiles.write().await.remove(&user_id).is_some())
    }
}
