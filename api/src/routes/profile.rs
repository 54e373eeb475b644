//! Profile endpoints for the signed-in principal

use actix_web::{web, HttpResponse};
use validator::Validate;

use solar_core::repositories::{ProfileRepository, TokenRepository, UserRepository};

use crate::app::AppState;
use crate::dto::profile::{ProfileResponse, UpdateProfileRequest};
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/profile
///
/// ## Errors
/// - 404 Not Found: The caller has no profile (administrators)
pub async fn get_profile<U, P, T>(
    state: web::Data<AppState<U, P, T>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: ProfileRepository + 'static,
    T: TokenRepository + 'static,
{
    match state.profile_service.get_profile(&auth.principal()).await {
        Ok(profile) => HttpResponse::Ok().json(ProfileResponse::from(profile)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /api/v1/profile
///
/// ## Errors
/// - 400 Bad Request: Invalid field, or `companyName` from a non-dealer
/// - 404 Not Found: The caller has no profile
pub async fn update_profile<U, P, T>(
    state: web::Data<AppState<U, P, T>>,
    auth: AuthContext,
    request: web::Json<UpdateProfileRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: ProfileRepository + 'static,
    T: TokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state
        .profile_service
        .update_profile(&auth.principal(), request.into_inner().into())
        .await
    {
        Ok(profile) => HttpResponse::Ok().json(ProfileResponse::from(profile)),
        Err(error) => handle_domain_error(error),
    }
}
