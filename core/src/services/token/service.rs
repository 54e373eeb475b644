//! Main token service implementation

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::token::{
    AccessClaims, RefreshClaims, RefreshToken, TokenPair, TokenUse,
};
use crate::domain::value_objects::Principal;
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Service for managing access credentials and stored refresh credentials
///
/// Refresh tokens are signed JWTs, but the stored row is the only authority on
/// whether one is still usable. A refresh token is honoured only while a row
/// with its SHA-256 hash exists for the same user and has not expired.
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: R,
    config: TokenServiceConfig,
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    access_validation: Validation,
    refresh_validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Token repository for persistence
    /// * `config` - Token service configuration
    pub fn new(repository: R, config: TokenServiceConfig) -> Self {
        let access_encoding_key = EncodingKey::from_secret(config.access_secret.as_bytes());
        let access_decoding_key = DecodingKey::from_secret(config.access_secret.as_bytes());
        let refresh_encoding_key = EncodingKey::from_secret(config.refresh_secret.as_bytes());
        let refresh_decoding_key = DecodingKey::from_secret(config.refresh_secret.as_bytes());

        let mut access_validation = Validation::new(config.algorithm);
        access_validation.set_issuer(&[config.issuer.as_str()]);
        access_validation.set_audience(&[config.audience.as_str()]);
        access_validation.validate_exp = true;
        access_validation.validate_nbf = true;
        access_validation.leeway = 0;

        // The stored row decides refresh expiry, not the embedded `exp`
        let mut refresh_validation = Validation::new(config.algorithm);
        refresh_validation.set_issuer(&[config.issuer.as_str()]);
        refresh_validation.set_audience(&[config.audience.as_str()]);
        refresh_validation.validate_exp = false;
        refresh_validation.leeway = 0;

        Self {
            repository,
            config,
            access_encoding_key,
            access_decoding_key,
            refresh_encoding_key,
            refresh_decoding_key,
            access_validation,
            refresh_validation,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Issues a fresh credential pair and stores the refresh row
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The issued pair
    /// * `Err(DomainError::Internal)` - Signing or persistence failed
    pub async fn issue_credentials(&self, principal: &Principal) -> Result<TokenPair, DomainError> {
        let now = Utc::now();
        let access_token = self.generate_access_token(principal, now)?;
        let (refresh_token, expires_at) = self.generate_refresh_token(principal, now)?;

        let row = RefreshToken::new(principal.user_id, hash_token(&refresh_token), expires_at);
        self.repository.create(row).await?;

        info!(user_id = %principal.user_id, role = %principal.role, "Issued credentials");
        Ok(self.token_pair(access_token, refresh_token))
    }

    /// Exchanges a refresh token for a new pair, superseding the presented one
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New pair; the presented refresh token is no longer valid
    /// * `Err(TokenError::InvalidToken)` - Signature or structure is wrong
    /// * `Err(TokenError::InvalidOrExpiredToken)` - No live row, or a concurrent
    ///   rotation of the same token won
    pub async fn rotate_credentials(&self, presented: &str) -> Result<TokenPair, DomainError> {
        let claims = self.decode_refresh_token(presented)?;
        let principal = claims
            .principal()
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;

        let now = Utc::now();
        let presented_hash = hash_token(presented);

        let row = self
            .repository
            .find_active(&presented_hash, principal.user_id, now)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %principal.user_id, "Refresh rejected: no live credential");
                DomainError::Token(TokenError::InvalidOrExpiredToken)
            })?;

        let access_token = self.generate_access_token(&principal, now)?;
        let (refresh_token, expires_at) = self.generate_refresh_token(&principal, now)?;

        let swapped = self
            .repository
            .rotate(row.id, &presented_hash, &hash_token(&refresh_token), expires_at, now)
            .await?;

        if !swapped {
            warn!(user_id = %principal.user_id, credential_id = %row.id, "Refresh rejected: credential already rotated");
            return Err(DomainError::Token(TokenError::InvalidOrExpiredToken));
        }

        info!(user_id = %principal.user_id, credential_id = %row.id, "Rotated credentials");
        Ok(self.token_pair(access_token, refresh_token))
    }

    /// Verifies an access token and returns the claims
    ///
    /// Stateless: signature, issuer, audience, `nbf` and `exp` with zero leeway.
    ///
    /// # Returns
    ///
    /// * `Ok(AccessClaims)` - The decoded claims if valid
    /// * `Err(TokenError::ExpiredToken)` - Valid signature, past `exp`
    /// * `Err(TokenError::InvalidToken)` - Anything else
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, DomainError> {
        let token_data = decode::<AccessClaims>(token, &self.access_decoding_key, &self.access_validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::ExpiredToken),
                _ => {
                    debug!(error = %e, "Access token rejected");
                    DomainError::Token(TokenError::InvalidToken)
                }
            })?;

        if token_data.claims.token_use != TokenUse::Access {
            return Err(DomainError::Token(TokenError::InvalidToken));
        }

        Ok(token_data.claims)
    }

    /// Deletes the stored row for a refresh token (logout)
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - A live session was ended
    /// * `Ok(false)` - Nothing matched; not treated as an error
    pub async fn revoke_credential(&self, user_id: Uuid, refresh_token: &str) -> Result<bool, DomainError> {
        let removed = self
            .repository
            .delete_by_hash(user_id, &hash_token(refresh_token))
            .await?;

        if removed {
            info!(user_id = %user_id, "Revoked refresh credential");
        }
        Ok(removed)
    }

    /// Counts live refresh rows for a user
    pub async fn count_active_credentials(&self, user_id: Uuid) -> Result<u64, DomainError> {
        self.repository.count_active(user_id, Utc::now()).await
    }

    /// Removes expired refresh rows from storage
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - Number of rows deleted
    pub async fn purge_expired_credentials(&self) -> Result<u64, DomainError> {
        let purged = self.repository.delete_expired(Utc::now()).await?;
        info!(purged, "Purged expired refresh credentials");
        Ok(purged)
    }

    fn token_pair(&self, access_token: String, refresh_token: String) -> TokenPair {
        TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_ttl.num_seconds(),
            self.config.refresh_token_ttl.num_seconds(),
        )
    }

    fn generate_access_token(&self, principal: &Principal, now: DateTime<Utc>) -> Result<String, DomainError> {
        let claims = AccessClaims::new(
            principal,
            now,
            self.config.access_token_ttl,
            &self.config.issuer,
            &self.config.audience,
        );
        self.encode_access_claims(&claims)
    }

    /// Signs a refresh token and returns it with the expiry its row must carry
    fn generate_refresh_token(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<(String, DateTime<Utc>), DomainError> {
        let mut nonce = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut nonce);

        let expires_at = now + self.config.refresh_token_ttl;
        let claims = RefreshClaims::new(
            principal,
            now,
            expires_at,
            hex::encode(nonce),
            &self.config.issuer,
            &self.config.audience,
        );

        let token = self.encode_refresh_claims(&claims)?;
        Ok((token, expires_at))
    }

    fn decode_refresh_token(&self, token: &str) -> Result<RefreshClaims, DomainError> {
        let token_data = decode::<RefreshClaims>(token, &self.refresh_decoding_key, &self.refresh_validation)
            .map_err(|e| {
                debug!(error = %e, "Refresh token failed to decode");
                DomainError::Token(TokenError::InvalidToken)
            })?;

        if token_data.claims.token_use != TokenUse::Refresh {
            return Err(DomainError::Token(TokenError::InvalidToken));
        }

        Ok(token_data.claims)
    }

    /// Encodes access claims into a JWT
    pub(crate) fn encode_access_claims(&self, claims: &AccessClaims) -> Result<String, DomainError> {
        encode(&Header::new(self.config.algorithm), claims, &self.access_encoding_key)
            .map_err(|e| DomainError::internal(format!("failed to sign access token: {e}")))
    }

    /// Encodes refresh claims into a JWT
    pub(crate) fn encode_refresh_claims(&self, claims: &RefreshClaims) -> Result<String, DomainError> {
        encode(&Header::new(self.config.algorithm), claims, &self.refresh_encoding_key)
            .map_err(|e| DomainError::internal(format!("failed to sign refresh token: {e}")))
    }
}

/// Hashes a token for storage (SHA-256, lowercase hex)
pub(crate) fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
