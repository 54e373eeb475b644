//! Administrator session maintenance

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use solar_core::repositories::{ProfileRepository, TokenRepository, UserRepository};

use crate::app::AppState;
use crate::dto::admin::{PurgeResponse, SessionCountResponse};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/admin/users/{user_id}/sessions
pub async fn session_count<U, P, T>(
    state: web::Data<AppState<U, P, T>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: ProfileRepository + 'static,
    T: TokenRepository + 'static,
{
    let user_id = path.into_inner();

    match state.token_service.count_active_credentials(user_id).await {
        Ok(active_sessions) => {
            tracing::debug!(admin_id = %auth.user_id, %user_id, active_sessions, "Session count requested");
            HttpResponse::Ok().json(SessionCountResponse {
                user_id,
                active_sessions,
            })
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/admin/sessions/purge
///
/// Deletes every refresh token row already past its expiry.
pub async fn purge_expired<U, P, T>(
    state: web::Data<AppState<U, P, T>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: ProfileRepository + 'static,
    T: TokenRepository + 'static,
{
    match state.token_service.purge_expired_credentials().await {
        Ok(purged) => {
            tracing::info!(admin_id = %auth.user_id, purged, "Expired sessions purged");
            HttpResponse::Ok().json(PurgeResponse { purged })
        }
        Err(error) => handle_domain_error(error),
    }
}
