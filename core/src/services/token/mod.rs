//! Token service module for JWT session management
//!
//! This module handles the credential lifecycle:
//! - Access token issuance and stateless verification
//! - Refresh token issuance backed by a stored row
//! - Rotation guarded by an atomic compare-and-swap on that row
//! - Logout, per-user session counts and expired row purging

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
