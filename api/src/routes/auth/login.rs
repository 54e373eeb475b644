use actix_web::{web, HttpResponse};
use validator::Validate;

use solar_core::repositories::{ProfileRepository, TokenRepository, UserRepository};

use crate::app::AppState;
use crate::dto::auth::{AuthResponse, LoginRequest};
use crate::handlers::error::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/login
///
/// ## Errors
/// - 400 Bad Request: Malformed body
/// - 401 Unauthorized: Unknown email or wrong password (indistinguishable)
pub async fn login<U, P, T>(
    state: web::Data<AppState<U, P, T>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: ProfileRepository + 'static,
    T: TokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state.auth_service.login(&request.email, &request.password).await {
        Ok(response) => HttpResponse::Ok().json(AuthResponse::from(response)),
        Err(error) => handle_domain_error(error),
    }
}
