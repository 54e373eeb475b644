//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT credentials and administrator bootstrap
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection
//! - `server` - HTTP server and CORS configuration
//!
//! Configuration is layered: built-in defaults for the detected environment,
//! then an optional `config/{environment}.toml`, then `SOLAR_*` environment
//! variables using `__` as the nesting separator
//! (e.g. `SOLAR_AUTH__JWT__ACCESS_SECRET`).

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthConfig, BootstrapAdminConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use server::{CorsConfig, ServerConfig};

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "SOLAR";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in defaults for an environment
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self {
                environment,
                server: ServerConfig::new("0.0.0.0", 8080),
                database: DatabaseConfig::default().with_max_connections(50),
                auth: AuthConfig::default(),
                cors: CorsConfig::default(),
            },
            Environment::Development | Environment::Staging => Self {
                environment,
                server: ServerConfig::default(),
                database: DatabaseConfig::default(),
                auth: AuthConfig::default(),
                cors: CorsConfig::development(),
            },
        }
    }

    /// Load configuration from defaults, optional file and environment
    pub fn load() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let defaults = config::Config::try_from(&Self::for_environment(environment))?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(environment.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: Self = settings.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Check cross-field invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let jwt = &self.auth.jwt;

        if jwt.access_token_expiry <= 0 {
            return Err(ConfigError::Invalid(
                "auth.jwt.access_token_expiry must be positive".to_string(),
            ));
        }
        if jwt.access_token_expiry >= jwt.refresh_token_expiry {
            return Err(ConfigError::Invalid(
                "auth.jwt.access_token_expiry must be shorter than refresh_token_expiry".to_string(),
            ));
        }
        if jwt.access_secret == jwt.refresh_secret {
            return Err(ConfigError::Invalid(
                "auth.jwt access and refresh secrets must differ".to_string(),
            ));
        }
        if self.environment.is_production() && jwt.is_using_default_secret() {
            return Err(ConfigError::Invalid(
                "default JWT secrets are not allowed in production".to_string(),
            ));
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::Invalid(
                "auth.bcrypt_cost must be between 4 and 31".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_access_window_must_be_shorter() {
        let mut config = AppConfig::default();
        config.auth.jwt.access_token_expiry = config.auth.jwt.refresh_token_expiry;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_secrets_must_differ() {
        let mut config = AppConfig::default();
        config.auth.jwt = JwtConfig::new("same", "same");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_production_rejects_default_secrets() {
        let config = AppConfig::for_environment(Environment::Production);
        assert!(config.validate().is_err());

        let mut config = AppConfig::for_environment(Environment::Production);
        config.auth.jwt = JwtConfig::new("prod-access", "prod-refresh");
        assert!(config.validate().is_ok());
    }
}
