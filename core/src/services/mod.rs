//! Business services containing domain logic and use cases.

pub mod auth;
pub mod profile;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, Registration};
pub use profile::ProfileService;
pub use token::{TokenService, TokenServiceConfig};
