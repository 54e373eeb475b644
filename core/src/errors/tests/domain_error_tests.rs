//! Unit tests for domain error types

use crate::errors::{AuthError, DomainError, TokenError, ValidationError};

#[test]
fn test_token_error_messages_are_distinct() {
    assert_eq!(TokenError::InvalidToken.to_string(), "Invalid token");
    assert_eq!(TokenError::ExpiredToken.to_string(), "Token expired");
    assert_eq!(
        TokenError::InvalidOrExpiredToken.to_string(),
        "Invalid or expired refresh token"
    );
}

#[test]
fn test_domain_error_bridges_token_error() {
    let error: DomainError = TokenError::InvalidOrExpiredToken.into();
    assert!(matches!(error, DomainError::Token(TokenError::InvalidOrExpiredToken)));
    // transparent keeps the inner message
    assert_eq!(error.to_string(), "Invalid or expired refresh token");
}

#[test]
fn test_domain_error_bridges_auth_and_validation() {
    let auth: DomainError = AuthError::EmailAlreadyRegistered.into();
    assert!(matches!(auth, DomainError::Auth(AuthError::EmailAlreadyRegistered)));

    let validation: DomainError = ValidationError::NotAllowedForRole {
        field: "companyName".to_string(),
        role: "USER".to_string(),
    }
    .into();
    assert_eq!(
        validation.to_string(),
        "Field companyName is not allowed for role USER"
    );
}

#[test]
fn test_helpers() {
    let error = DomainError::not_found("profile");
    assert_eq!(error.to_string(), "Resource not found: profile");

    let error = DomainError::internal("connection reset");
    assert_eq!(error.to_string(), "Internal error: connection reset");
}
