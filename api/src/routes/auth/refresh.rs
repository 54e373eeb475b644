use actix_web::{web, HttpResponse};
use validator::Validate;

use solar_core::repositories::{ProfileRepository, TokenRepository, UserRepository};

use crate::app::AppState;
use crate::dto::auth::{RefreshTokenRequest, RefreshTokenResponse};
use crate::handlers::error::{handle_domain_error, unauthorized_response};

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new pair. The presented token is
/// consumed: presenting it again fails.
///
/// # Request Body
///
/// ```json
/// {
///     "refreshToken": "string"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "accessToken": "eyJ...",
///     "refreshToken": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Any malformed, expired, unknown or already-rotated
///   token, and any malformed body. The body never says which.
/// - 500 Internal Server Error: Persistence failure
pub async fn refresh<U, P, T>(
    state: web::Data<AppState<U, P, T>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: ProfileRepository + 'static,
    T: TokenRepository + 'static,
{
    if request.validate().is_err() {
        return unauthorized_response();
    }

    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(RefreshTokenResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
