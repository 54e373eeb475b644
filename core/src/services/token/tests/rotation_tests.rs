//! Refresh rotation behaviour, including concurrent rotation of one token

use std::sync::Arc;

use chrono::{Duration, Utc};
use futures_util::future::join_all;

use crate::domain::entities::token::RefreshClaims;
use crate::errors::{DomainError, TokenError};
use crate::services::token::TokenService;

use super::service_tests::{dealer, service, test_config};

fn is_invalid_or_expired<T>(result: &Result<T, DomainError>) -> bool {
    matches!(result, Err(DomainError::Token(TokenError::InvalidOrExpiredToken)))
}

#[tokio::test]
async fn test_rotate_once_then_reuse_fails() {
    let service = service();
    let principal = dealer();
    let original = service.issue_credentials(&principal).await.unwrap();

    let rotated = service.rotate_credentials(&original.refresh_token).await.unwrap();
    assert_ne!(rotated.refresh_token, original.refresh_token);

    let claims = service.verify_access_token(&rotated.access_token).unwrap();
    assert_eq!(claims.user_id().unwrap(), principal.user_id);
    assert_eq!(claims.role, principal.role);

    let reuse = service.rotate_credentials(&original.refresh_token).await;
    assert!(is_invalid_or_expired(&reuse));
}

#[tokio::test]
async fn test_rotation_overwrites_row_in_place() {
    let service = service();
    let principal = dealer();
    let original = service.issue_credentials(&principal).await.unwrap();
    let row_before = service.repository().all().await.remove(0);

    service.rotate_credentials(&original.refresh_token).await.unwrap();

    let rows = service.repository().all().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, row_before.id);
    assert_ne!(rows[0].token_hash, row_before.token_hash);
    assert!(rows[0].expires_at >= row_before.expires_at);
}

#[tokio::test]
async fn test_rotating_expired_row_always_fails() {
    let service = service();
    let principal = dealer();
    let pair = service.issue_credentials(&principal).await.unwrap();
    service.repository().expire_user_tokens(principal.user_id).await;

    for _ in 0..3 {
        let result = service.rotate_credentials(&pair.refresh_token).await;
        assert!(is_invalid_or_expired(&result));
    }
}

#[tokio::test]
async fn test_rotation_chain() {
    let service = service();
    let principal = dealer();

    let (_a0, r0) = {
        let pair = service.issue_credentials(&principal).await.unwrap();
        (pair.access_token, pair.refresh_token)
    };
    let first = service.rotate_credentials(&r0).await.unwrap();
    assert_ne!(first.refresh_token, r0);

    assert!(is_invalid_or_expired(&service.rotate_credentials(&r0).await));

    let second = service.rotate_credentials(&first.refresh_token).await.unwrap();
    assert_ne!(second.refresh_token, first.refresh_token);
    assert!(service.verify_access_token(&second.access_token).is_ok());
    assert_eq!(service.count_active_credentials(principal.user_id).await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_rotations_have_single_winner() {
    const ATTEMPTS: usize = 16;

    let service = Arc::new(service());
    let pair = service.issue_credentials(&dealer()).await.unwrap();

    let handles = (0..ATTEMPTS).map(|_| {
        let service = Arc::clone(&service);
        let token = pair.refresh_token.clone();
        tokio::spawn(async move { service.rotate_credentials(&token).await })
    });

    let results: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("rotation task panicked"))
        .collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    let losers = results.iter().filter(|r| is_invalid_or_expired(r)).count();
    assert_eq!(winners, 1);
    assert_eq!(losers, ATTEMPTS - 1);
}

#[tokio::test]
async fn test_malformed_refresh_token_is_invalid() {
    let service = service();
    for token in ["", "garbage", "x.y.z"] {
        let result = service.rotate_credentials(token).await;
        assert!(matches!(result, Err(DomainError::Token(TokenError::InvalidToken))));
    }
}

#[tokio::test]
async fn test_access_token_cannot_rotate() {
    let service = service();
    let pair = service.issue_credentials(&dealer()).await.unwrap();

    let result = service.rotate_credentials(&pair.access_token).await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::InvalidToken))));
}

#[tokio::test]
async fn test_unknown_but_well_signed_refresh_token_fails_lookup() {
    let service = service();
    let now = Utc::now();
    let claims = RefreshClaims::new(
        &dealer(),
        now,
        now + Duration::days(7),
        "never-stored".to_string(),
        "solarlink",
        "solarlink-api",
    );
    let token = service.encode_refresh_claims(&claims).unwrap();

    let result = service.rotate_credentials(&token).await;
    assert!(is_invalid_or_expired(&result));
}

#[tokio::test]
async fn test_refresh_token_from_other_service_is_invalid() {
    let service = service();
    let other = TokenService::new(
        crate::repositories::MockTokenRepository::new(),
        crate::services::token::TokenServiceConfig {
            refresh_secret: "another-refresh-secret".to_string(),
            ..test_config()
        },
    );
    let pair = other.issue_credentials(&dealer()).await.unwrap();

    let result = service.rotate_credentials(&pair.refresh_token).await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::InvalidToken))));
}
