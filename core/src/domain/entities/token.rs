//! Token entities for JWT-based authentication.
//!
//! Two credential kinds exist. Access tokens are stateless JWTs verified by
//! signature and expiry only. Refresh tokens are JWTs as well, but a refresh
//! token is only honoured while a matching [`RefreshToken`] row exists.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::Role;
use crate::domain::value_objects::Principal;

/// Discriminates the two JWT kinds so one can never stand in for the other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    Access,
    Refresh,
}

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,

    pub email: String,

    pub role: Role,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    pub iss: String,

    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    pub token_use: TokenUse,
}

impl AccessClaims {
    /// Creates claims for an access token issued at `now`
    pub fn new(
        principal: &Principal,
        now: DateTime<Utc>,
        ttl: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        Self {
            sub: principal.user_id.to_string(),
            email: principal.email.clone(),
            role: principal.role,
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
            token_use: TokenUse::Access,
        }
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Rebuilds the principal the token was issued to
    pub fn principal(&self) -> Result<Principal, uuid::Error> {
        Ok(Principal::new(self.user_id()?, self.email.clone(), self.role))
    }
}

/// Claims carried by a refresh token
///
/// `jti` holds 256 bits of randomness so that every issued refresh token is
/// unpredictable and distinct, even when two are minted in the same second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,

    pub email: String,

    pub role: Role,

    pub iat: i64,

    pub exp: i64,

    pub iss: String,

    pub aud: String,

    pub jti: String,

    pub token_use: TokenUse,
}

impl RefreshClaims {
    pub fn new(
        principal: &Principal,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        nonce: String,
        issuer: &str,
        audience: &str,
    ) -> Self {
        Self {
            sub: principal.user_id.to_string(),
            email: principal.email.clone(),
            role: principal.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: nonce,
            token_use: TokenUse::Refresh,
        }
    }

    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    pub fn principal(&self) -> Result<Principal, uuid::Error> {
        Ok(Principal::new(self.user_id()?, self.email.clone(), self.role))
    }
}

/// Refresh credential row stored in the database
///
/// The row is rewritten in place on every rotation, so at most one token
/// value is live per row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the row
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// SHA-256 hex digest of the current token value
    pub token_hash: String,

    /// Timestamp when the current token value stops being accepted
    pub expires_at: DateTime<Utc>,

    /// Timestamp when the row was created (first login)
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last rotation
    pub updated_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Creates a new refresh token row
    pub fn new(user_id: Uuid, token_hash: String, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            expires_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// A row is usable only while `expires_at > now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    pub fn is_expired(&self) -> bool {
        !self.is_active_at(Utc::now())
    }

    /// Overwrites the token value and expiry (rotation)
    pub fn rotate(&mut self, token_hash: String, expires_at: DateTime<Utc>) {
        self.token_hash = token_hash;
        self.expires_at = expires_at;
        self.updated_at = Utc::now();
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal() -> Principal {
        Principal::new(Uuid::new_v4(), "owner@example.com".to_string(), Role::User)
    }

    #[test]
    fn test_access_claims() {
        let principal = principal();
        let now = Utc::now();
        let claims = AccessClaims::new(&principal, now, Duration::minutes(15), "solarlink", "solarlink-api");

        assert_eq!(claims.user_id().unwrap(), principal.user_id);
        assert_eq!(claims.email, "owner@example.com");
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert_eq!(claims.token_use, TokenUse::Access);
        assert_eq!(claims.principal().unwrap(), principal);
    }

    #[test]
    fn test_access_claims_have_unique_ids() {
        let principal = principal();
        let now = Utc::now();
        let a = AccessClaims::new(&principal, now, Duration::minutes(15), "i", "a");
        let b = AccessClaims::new(&principal, now, Duration::minutes(15), "i", "a");
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_refresh_claims_expiry_matches_row() {
        let principal = principal();
        let now = Utc::now();
        let expires_at = now + Duration::days(7);
        let claims = RefreshClaims::new(&principal, now, expires_at, "nonce".to_string(), "i", "a");

        assert_eq!(claims.exp, expires_at.timestamp());
        assert_eq!(claims.token_use, TokenUse::Refresh);
        assert_eq!(claims.user_id().unwrap(), principal.user_id);
    }

    #[test]
    fn test_token_use_serialization() {
        assert_eq!(serde_json::to_string(&TokenUse::Refresh).unwrap(), "\"refresh\"");
    }

    #[test]
    fn test_refresh_token_activity_window() {
        let now = Utc::now();
        let token = RefreshToken::new(Uuid::new_v4(), "hash".to_string(), now + Duration::days(7));

        assert!(token.is_active_at(now));
        assert!(!token.is_expired());
        assert!(!token.is_active_at(now + Duration::days(7)));
    }

    #[test]
    fn test_refresh_token_rotation_overwrites_in_place() {
        let now = Utc::now();
        let mut token = RefreshToken::new(Uuid::new_v4(), "old".to_string(), now + Duration::days(1));
        let id = token.id;

        token.rotate("new".to_string(), now + Duration::days(7));

        assert_eq!(token.id, id);
        assert_eq!(token.token_hash, "new");
        assert_eq!(token.expires_at, now + Duration::days(7));
    }
}
