use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use solar_api::{create_app, AppState};
use solar_core::services::{
    AuthService, AuthServiceConfig, ProfileService, TokenService, TokenServiceConfig,
};
use solar_infra::{DatabasePool, MySqlProfileRepository, MySqlTokenRepository, MySqlUserRepository};
use solar_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting SolarLink API server");

    let config = AppConfig::load().context("failed to load configuration")?;
    info!(environment = ?config.environment, "Configuration loaded");

    if config.auth.jwt.is_using_default_secret() {
        warn!("Using default JWT secrets; set SOLAR_AUTH__JWT__ACCESS_SECRET and SOLAR_AUTH__JWT__REFRESH_SECRET");
    }

    let database = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to database")?;

    if config.database.run_migrations {
        database.run_migrations().await.context("failed to run migrations")?;
    }

    let pool = database.get_pool().clone();
    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let profile_repository = Arc::new(MySqlProfileRepository::new(pool.clone()));
    let token_repository = MySqlTokenRepository::new(pool);

    let token_service = Arc::new(TokenService::new(
        token_repository,
        TokenServiceConfig::from(&config.auth.jwt),
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::clone(&profile_repository),
        Arc::clone(&token_service),
        AuthServiceConfig::from(&config.auth),
    ));
    let profile_service = Arc::new(ProfileService::new(profile_repository));

    if let Some(admin) = &config.auth.bootstrap_admin {
        let created = auth_service
            .ensure_admin(&admin.email, &admin.password)
            .await
            .context("failed to bootstrap administrator")?;
        if created {
            info!(email = %admin.email, "Administrator account created");
        }
    }

    let app_state = web::Data::new(
        AppState::new(auth_service, profile_service, token_service).with_database(database.clone()),
    );
    let cors_config = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;
    let bind_address = config.server.bind_address();
    info!(%bind_address, "Server will bind");

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), &cors_config, max_payload_size)
    })
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {bind_address}"))?;

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await?;

    database.close().await;
    info!("Server stopped");
    Ok(())
}
