//! Application state and factory
//!
//! This module holds the services shared across workers and builds the
//! Actix-web application used both by the binary and by integration tests.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::DefaultHeaders,
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use solar_core::domain::entities::user::Role;
use solar_core::repositories::{ProfileRepository, TokenRepository, UserRepository};
use solar_core::services::{AuthService, ProfileService, TokenService};
use solar_infra::DatabasePool;
use solar_shared::{error_codes, CorsConfig, ErrorResponse, HealthResponse};

use crate::handlers::error::{json_error_handler, refresh_json_error_handler};
use crate::middleware::{auth::AccessTokenVerifier, cors::create_cors, JwtAuth};
use crate::routes::{admin, auth, profile};

/// Shared services, one instance per process
pub struct AppState<U, P, T>
where
    U: UserRepository,
    P: ProfileRepository,
    T: TokenRepository,
{
    pub auth_service: Arc<AuthService<U, P, T>>,
    pub profile_service: Arc<ProfileService<P>>,
    pub token_service: Arc<TokenService<T>>,
    /// Checked by `/health` when present
    pub database: Option<DatabasePool>,
}

impl<U, P, T> AppState<U, P, T>
where
    U: UserRepository,
    P: ProfileRepository,
    T: TokenRepository,
{
    pub fn new(
        auth_service: Arc<AuthService<U, P, T>>,
        profile_service: Arc<ProfileService<P>>,
        token_service: Arc<TokenService<T>>,
    ) -> Self {
        Self {
            auth_service,
            profile_service,
            token_service,
            database: None,
        }
    }

    pub fn with_database(mut self, database: DatabasePool) -> Self {
        self.database = Some(database);
        self
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<U, P, T>(
    app_state: web::Data<AppState<U, P, T>>,
    cors_config: &CorsConfig,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    P: ProfileRepository + 'static,
    T: TokenRepository + 'static,
{
    let verifier: Arc<dyn AccessTokenVerifier> = app_state.token_service.clone();

    let security_headers = DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
        .add(("Referrer-Policy", "no-referrer"))
        .add(("Cache-Control", "no-store"));

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(verifier))
        .app_data(
            web::JsonConfig::default()
                .limit(max_payload_size)
                .error_handler(json_error_handler),
        )
        // Last registered runs first: tracing span wraps everything
        .wrap(security_headers)
        .wrap(create_cors(cors_config))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check::<U, P, T>))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register::register::<U, P, T>))
                        .route("/login", web::post().to(auth::login::login::<U, P, T>))
                        .service(
                            web::resource("/refresh")
                                .app_data(
                                    web::JsonConfig::default()
                                        .limit(max_payload_size)
                                        .error_handler(refresh_json_error_handler),
                                )
                                .route(web::post().to(auth::refresh::refresh::<U, P, T>)),
                        )
                        .route(
                            "/logout",
                            web::post()
                                .to(auth::logout::logout::<U, P, T>)
                                .wrap(JwtAuth::new()),
                        )
                        .route("/me", web::get().to(auth::me::me).wrap(JwtAuth::new())),
                )
                .service(
                    web::scope("/profile")
                        .wrap(JwtAuth::new())
                        .route("", web::get().to(profile::get_profile::<U, P, T>))
                        .route("", web::put().to(profile::update_profile::<U, P, T>)),
                )
                .service(
                    web::scope("/admin")
                        .wrap(JwtAuth::require_role(Role::Admin))
                        .route(
                            "/users/{user_id}/sessions",
                            web::get().to(admin::session_count::<U, P, T>),
                        )
                        .route(
                            "/sessions/purge",
                            web::post().to(admin::purge_expired::<U, P, T>),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

const SERVICE_NAME: &str = "solarlink-api";

/// Health check endpoint handler
///
/// 503 when the database cannot be reached.
async fn health_check<U, P, T>(state: web::Data<AppState<U, P, T>>) -> HttpResponse
where
    U: UserRepository + 'static,
    P: ProfileRepository + 'static,
    T: TokenRepository + 'static,
{
    let version = env!("CARGO_PKG_VERSION");

    let Some(database) = &state.database else {
        return HttpResponse::Ok().json(HealthResponse::healthy(SERVICE_NAME, version));
    };

    match database.health_check().await {
        Ok(true) => HttpResponse::Ok().json(
            HealthResponse::healthy(SERVICE_NAME, version)
                .with_database(database.get_statistics().to_string()),
        ),
        Ok(false) | Err(_) => HttpResponse::ServiceUnavailable().json(
            HealthResponse::unhealthy(SERVICE_NAME, version).with_database("unreachable"),
        ),
    }
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
