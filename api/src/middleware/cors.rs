//! CORS middleware configuration for cross-origin requests.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use solar_shared::CorsConfig;

/// Creates a CORS middleware instance from configuration
///
/// A `*` entry in `allowed_origins` allows any origin; otherwise only the
/// listed origins are accepted.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::info!("CORS: allowing any origin");
        cors = cors.allow_any_origin();
    } else {
        for origin in config.allowed_origins.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            tracing::info!(%origin, "CORS: adding allowed origin");
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
