//! Unit tests for mock profile repository implementation

use uuid::Uuid;

use crate::domain::entities::profile::{Profile, ProfileUpdate};
use crate::errors::DomainError;
use crate::repositories::profile::{MockProfileRepository, ProfileRepository};

#[tokio::test]
async fn test_create_find_update() {
    let repo = MockProfileRepository::new();
    let user_id = Uuid::new_v4();
    repo.create(Profile::new(user_id, "Sunny Homes".to_string(), None))
        .await
        .unwrap();

    let mut profile = repo.find_by_user_id(user_id).await.unwrap().unwrap();
    profile.apply(ProfileUpdate {
        phone: Some("+61400000000".to_string()),
        ..Default::default()
    });
    let updated = repo.update(profile).await.unwrap();
    assert_eq!(updated.phone.as_deref(), Some("+61400000000"));
    assert_eq!(updated.display_name, "Sunny Homes");
}

#[tokio::test]
async fn test_update_missing_profile() {
    let repo = MockProfileRepository::new();
    let result = repo
        .update(Profile::new(Uuid::new_v4(), "Ghost".to_string(), None))
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_delete_profile() {
    let repo = MockProfileRepository::new();
    let user_id = Uuid::new_v4();
    repo.create(Profile::new(user_id, "Sunny Homes".to_string(), None))
        .await
        .unwrap();

    assert!(repo.delete(user_id).await.unwrap());
    assert!(repo.find_by_user_id(user_id).await.unwrap().is_none());
    assert!(!repo.delete(user_id).await.unwrap());
}
