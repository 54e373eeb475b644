use actix_web::{web, HttpResponse};
use validator::Validate;

use solar_core::repositories::{ProfileRepository, TokenRepository, UserRepository};
use solar_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::auth::LogoutRequest;
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::middleware::auth::AuthContext;

/// Handler for POST /api/v1/auth/logout
///
/// Deletes the presented refresh token if it belongs to the caller.
/// Requires authentication via Bearer token in Authorization header.
/// Logging out twice is not an error.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 500 Internal Server Error: Persistence failure
pub async fn logout<U, P, T>(
    state: web::Data<AppState<U, P, T>>,
    auth: AuthContext,
    request: web::Json<LogoutRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: ProfileRepository + 'static,
    T: TokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state.auth_service.logout(auth.user_id, &request.refresh_token).await {
        Ok(_) => HttpResponse::Ok().json(MessageResponse::new("Logged out successfully")),
        Err(error) => handle_domain_error(error),
    }
}
