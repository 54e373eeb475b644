use actix_web::{web, HttpResponse};
use validator::Validate;

use solar_core::domain::entities::user::Role;
use solar_core::errors::ValidationError;
use solar_core::repositories::{ProfileRepository, TokenRepository, UserRepository};
use solar_core::services::Registration;

use crate::app::AppState;
use crate::dto::auth::{AuthResponse, RegisterRequest};
use crate::handlers::error::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/register
///
/// Creates a USER or DEALER account and returns a fresh credential pair.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "owner@example.com",
///     "password": "string (8-72 chars, letters and digits)",
///     "role": "USER | DEALER",
///     "displayName": "string",
///     "companyName": "string (dealers only)"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "accessToken": "eyJ...",
///     "refreshToken": "eyJ...",
///     "expiresIn": 900,
///     "role": "USER"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Validation failure or a role that cannot self-register
/// - 409 Conflict: Email already registered
/// - 500 Internal Server Error: Persistence failure
pub async fn register<U, P, T>(
    state: web::Data<AppState<U, P, T>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: ProfileRepository + 'static,
    T: TokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    let request = request.into_inner();
    let role = match request.role.parse::<Role>() {
        Ok(role) => role,
        Err(_) => {
            return handle_domain_error(
                ValidationError::InvalidFormat { field: "role".to_string() }.into(),
            )
        }
    };

    let registration = Registration {
        email: request.email,
        password: request.password,
        role,
        display_name: request.display_name,
        company_name: request.company_name,
    };

    match state.auth_service.register(registration).await {
        Ok(response) => HttpResponse::Created().json(AuthResponse::from(response)),
        Err(error) => handle_domain_error(error),
    }
}
