//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the SolarLink backend.
//! It provides the MySQL connection pool, embedded migrations and the SQLx
//! implementations of the repository traits declared in `solar_core`.

/// Database module - MySQL implementations using SQLx
pub mod database;

pub use database::{
    DatabasePool, MySqlProfileRepository, MySqlTokenRepository, MySqlUserRepository,
    PoolStatistics,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
