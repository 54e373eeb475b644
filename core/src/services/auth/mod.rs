//! Authentication service module
//!
//! Email/password registration and login, with session handling delegated
//! to the token service.

mod config;
mod password;
mod service;


pub use config::AuthServiceConfig;
pub use password::{hash_password, verify_password};
pub use service::{AuthService, Registration};
