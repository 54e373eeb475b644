//! Domain-specific error types for authentication, credential management and
//! input validation.
//!
//! Messages here are for logs and developers. The HTTP layer decides what a
//! client gets to see.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are never distinguished
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Role not allowed: {role}")]
    RoleNotAllowed { role: String },

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Credential errors raised by the token service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, malformed structure, wrong issuer/audience or wrong token use
    #[error("Invalid token")]
    InvalidToken,

    /// Well-formed access token past its expiry
    #[error("Token expired")]
    ExpiredToken,

    /// Refresh token with no live stored row (expired, superseded or revoked)
    #[error("Invalid or expired refresh token")]
    InvalidOrExpiredToken,
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Field {field} is not allowed for role {role}")]
    NotAllowedForRole { field: String, role: String },
}
