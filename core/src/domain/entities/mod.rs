//! Domain entities representing core business objects.

pub mod profile;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use profile::{Profile, ProfileUpdate};
pub use token::{
    AccessClaims, RefreshClaims, RefreshToken, TokenPair, TokenUse,
};
pub use user::{Role, User};
