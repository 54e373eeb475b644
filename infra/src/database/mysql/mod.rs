//! MySQL repository implementations

mod profile_repository_impl;
mod token_repository_impl;
mod user_repository_impl;

pub use profile_repository_impl::MySqlProfileRepository;
pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

use solar_core::errors::DomainError;
use uuid::Uuid;

/// UUIDs are stored as CHAR(36)
pub(crate) fn parse_uuid(value: &str, column: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value)
        .map_err(|e| DomainError::internal(format!("Invalid UUID in {}: {}", column, e)))
}

pub(crate) fn column_error(column: &str) -> impl FnOnce(sqlx::Error) -> DomainError + '_ {
    move |e| DomainError::internal(format!("Failed to get {}: {}", column, e))
}
