//! Authentication route handlers
//!
//! This module contains the account and session endpoints:
//! - Registration and login
//! - Credential rotation
//! - Logout
//! - Principal introspection

pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;
