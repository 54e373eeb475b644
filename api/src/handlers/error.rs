//! Maps domain errors to HTTP responses
//!
//! This is the only place a `DomainError` becomes a status code. Every
//! credential failure collapses into the same 401 body so that clients
//! cannot tell a malformed token from an expired or superseded one.

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use solar_core::errors::{AuthError, DomainError, ValidationError};
use solar_shared::{error_codes, ErrorResponse};
use validator::ValidationErrors;

pub const UNAUTHORIZED_MESSAGE: &str = "Invalid or expired token";
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Generic 401 used for every token failure
pub fn unauthorized_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(error_codes::UNAUTHORIZED, UNAUTHORIZED_MESSAGE))
}

pub fn forbidden_response() -> HttpResponse {
    HttpResponse::Forbidden().json(ErrorResponse::new(error_codes::FORBIDDEN, "Insufficient permissions"))
}

/// 400 with per-field validator codes under `details`
pub fn validation_error_response(errors: ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request");
    for (field, field_errors) in errors.field_errors() {
        let codes: Vec<String> = field_errors.iter().map(|e| e.code.to_string()).collect();
        response = response.add_detail(field.to_string(), codes);
    }
    HttpResponse::BadRequest().json(response)
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Token(token_error) => {
            tracing::debug!(error = %token_error, "Credential rejected");
            unauthorized_response()
        }
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials => HttpResponse::Unauthorized().json(ErrorResponse::new(
                error_codes::INVALID_CREDENTIALS,
                "Invalid email or password",
            )),
            AuthError::EmailAlreadyRegistered => HttpResponse::Conflict().json(ErrorResponse::new(
                error_codes::CONFLICT,
                "Email already registered",
            )),
            AuthError::RoleNotAllowed { role } => HttpResponse::BadRequest().json(
                ErrorResponse::new(error_codes::VALIDATION_ERROR, "Role not allowed")
                    .add_detail("role", role),
            ),
            AuthError::InsufficientPermissions => forbidden_response(),
        },
        DomainError::ValidationErr(validation_error) => {
            let (field, code) = match &validation_error {
                ValidationError::RequiredField { field } => (field.clone(), "required"),
                ValidationError::InvalidFormat { field } => (field.clone(), "invalid_format"),
                ValidationError::NotAllowedForRole { field, .. } => (field.clone(), "not_allowed_for_role"),
            };
            HttpResponse::BadRequest().json(
                ErrorResponse::new(error_codes::VALIDATION_ERROR, validation_error.to_string())
                    .add_detail(field, vec![code]),
            )
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            format!("{} not found", capitalize(&resource)),
        )),
        DomainError::Internal { message } => {
            tracing::error!(%message, "Internal error");
            HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
                .json(ErrorResponse::new(error_codes::INTERNAL_ERROR, INTERNAL_MESSAGE))
        }
    }
}

/// Body-parse failures become 400s with a JSON body
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        format!("Invalid request body: {}", error),
    ));
    actix_web::error::InternalError::from_response(error, response).into()
}

/// Body-parse failures on the refresh endpoint get the generic 401
pub fn refresh_json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    actix_web::error::InternalError::from_response(error, unauthorized_response()).into()
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
