//! bcrypt password hashing
//!
//! Both functions are CPU-bound; async callers run them on the blocking pool.

use crate::errors::DomainError;

pub fn hash_password(password: &str, cost: u32) -> Result<String, DomainError> {
    bcrypt::hash(password, cost)
        .map_err(|e| DomainError::internal(format!("password hashing failed: {e}")))
}

/// Returns `Ok(false)` on mismatch; `Err` only for an unreadable stored hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, DomainError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| DomainError::internal(format!("password verification failed: {e}")))
}
