pub mod profile;
pub mod token;
pub mod user;

pub use profile::ProfileRepository;
pub use token::TokenRepository;
pub use user::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use profile::MockProfileRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use token::MockTokenRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user::MockUserRepository;
