pub mod error;

pub use error::{handle_domain_error, unauthorized_response, validation_error_response};
