//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::Role;

/// Authentication response returned after registration or login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Refresh token for obtaining a new pair
    pub refresh_token: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,

    /// Role of the authenticated principal
    pub role: Role,
}

impl AuthResponse {
    /// Creates an authentication response from a token pair and role
    pub fn from_token_pair(token_pair: TokenPair, role: Role) -> Self {
        Self {
            access_token: token_pair.access_token,
            refresh_token: token_pair.refresh_token,
            expires_in: token_pair.access_expires_in,
            role,
        }
    }
}
