//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// In-memory token repository
///
/// Rows are keyed by id. `rotate` checks and writes under a single write
/// lock, which gives it the same compare-and-swap semantics as the
/// conditional `UPDATE` used against MySQL.
#[derive(Clone)]
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, RefreshToken>>>,
    fail_writes: Arc<RwLock<bool>>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: Arc::new(RwLock::new(false)),
        }
    }

    /// Make every subsequent write fail with an internal error
    pub async fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.write().await = fail;
    }

    /// Move every row owned by `user_id` into the past
    pub async fn expire_user_tokens(&self, user_id: Uuid) {
        let mut tokens = self.tokens.write().await;
        for token in tokens.values_mut().filter(|t| t.user_id == user_id) {
            token.expires_at = Utc::now() - Duration::seconds(1);
        }
    }

    /// Snapshot of all stored rows
    pub async fn all(&self) -> Vec<RefreshToken> {
        self.tokens.read().await.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    async fn check_writable(&self) -> Result<(), DomainError> {
        if *self.fail_writes.read().await {
            return Err(DomainError::internal("mock token store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn find_active(
        &self,
        token_hash: &str,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .find(|t| t.token_hash == token_hash && t.user_id == user_id && t.is_active_at(now))
            .cloned())
    }

    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        self.check_writable().await?;
        let mut tokens = self.tokens.write().await;

        // Mirrors the unique index on token_hash
        if tokens.values().any(|t| t.token_hash == token.token_hash) {
            return Err(DomainError::internal("duplicate refresh token hash"));
        }

        tokens.insert(token.id, token.clone());
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
        self.check_writable().await?;
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(&id) {
            Some(token) if token.token_hash == expected_hash && token.is_active_at(now) => {
                token.rotate(new_hash.to_string(), new_expires_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_by_hash(&self, user_id: Uuid, token_hash: &str) -> Result<bool, DomainError> {
        self.check_writable().await?;
        let mut tokens = self.tokens.write().await;

        let id = tokens
            .values()
            .find(|t| t.user_id == user_id && t.token_hash == token_hash)
            .map(|t| t.id);

        Ok(id.and_then(|id| tokens.remove(&id)).is_some())
    }

    async fn count_active(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .filter(|t| t.user_id == user_id && t.is_active_at(now))
            .count() as u64)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        self.check_writable().await?;
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|_, token| token.is_active_at(now));

        Ok((initial_count - tokens.len()) as u64)
    }
}
