//! User repository trait defining the interface for principal persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Emails are stored lower-cased; callers normalize before lookup.
///
/// # Example
/// ```no_run
/// # use solar_core::repositories::UserRepository;
/// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
/// match repo.find_by_email("owner@example.com").await? {
///     Some(user) => println!("Found {} with role {}", user.id, user.role),
///     None => println!("No account"),
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))` - email taken
    /// * `Err(DomainError)` - other persistence failure
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user by id; returns whether a row was removed
    ///
    /// Stored profiles and refresh tokens go with it.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Check if a user exists with the given email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
