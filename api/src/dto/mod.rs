//! Request and response bodies (camelCase on the wire)

pub mod admin;
pub mod auth;
pub mod profile;

pub use admin::{PurgeResponse, SessionCountResponse};
pub use auth::{
    AuthResponse, LoginRequest, LogoutRequest, MeResponse, RefreshTokenRequest,
    RefreshTokenResponse, RegisterRequest,
};
pub use profile::{ProfileResponse, UpdateProfileRequest};
