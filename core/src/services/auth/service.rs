//! Main authentication service implementation

use std::sync::Arc;

use solar_shared::validation::{is_strong_password, normalize_email};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::entities::profile::Profile;
use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{Role, User};
use crate::domain::value_objects::{AuthResponse, Principal};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{ProfileRepository, TokenRepository, UserRepository};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::{hash_password, verify_password};

/// Input for self-registration
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub display_name: String,
    /// Dealers only
    pub company_name: Option<String>,
}

/// Authentication service for account creation, login and session lifecycle
pub struct AuthService<U, P, T>
where
    U: UserRepository,
    P: ProfileRepository,
    T: TokenRepository,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Profile repository, written once at registration
    profile_repository: Arc<P>,
    /// Token service for JWT management
    token_service: Arc<TokenService<T>>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, P, T> AuthService<U, P, T>
where
    U: UserRepository,
    P: ProfileRepository,
    T: TokenRepository,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        profile_repository: Arc<P>,
        token_service: Arc<TokenService<T>>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            profile_repository,
            token_service,
            config,
        }
    }

    /// Register a USER or DEALER principal and sign them in
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Credentials for the new account
    /// * `Err(AuthError::RoleNotAllowed)` - ADMIN requested
    /// * `Err(AuthError::EmailAlreadyRegistered)` - Email taken
    /// * `Err(ValidationError)` - Weak password, empty display name, or a
    ///   company name supplied for a non-dealer
    pub async fn register(&self, registration: Registration) -> DomainResult<AuthResponse> {
        let Registration {
            email,
            password,
            role,
            display_name,
            company_name,
        } = registration;

        if !role.is_self_registrable() {
            return Err(AuthError::RoleNotAllowed { role: role.to_string() }.into());
        }

        let display_name = display_name.trim().to_string();
        if display_name.is_empty() {
            return Err(ValidationError::RequiredField { field: "displayName".to_string() }.into());
        }

        if company_name.is_some() && role != Role::Dealer {
            return Err(ValidationError::NotAllowedForRole {
                field: "companyName".to_string(),
                role: role.to_string(),
            }
            .into());
        }

        if !is_strong_password(&password) {
            return Err(ValidationError::InvalidFormat { field: "password".to_string() }.into());
        }

        let email = normalize_email(&email);
        if self.user_repository.exists_by_email(&email).await? {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        let password_hash = self.hash(password).await?;
        let user = self.user_repository.create(User::new(email, password_hash, role)).await?;

        match self.provision(&user, display_name, company_name).await {
            Ok(tokens) => {
                info!(user_id = %user.id, role = %role, "Registered new account");
                Ok(AuthResponse::from_token_pair(tokens, role))
            }
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "Registration failed after account insert, removing account");
                self.remove_account(user.id).await;
                Err(e)
            }
        }
    }

    /// Profile and first session for a freshly inserted account
    async fn provision(
        &self,
        user: &User,
        display_name: String,
        company_name: Option<String>,
    ) -> DomainResult<TokenPair> {
        if user.role.has_profile() {
            self.profile_repository
                .create(Profile::new(user.id, display_name, company_name))
                .await?;
        }

        self.token_service.issue_credentials(&Principal::from(user)).await
    }

    /// Undo a partial registration so the email can be used again
    async fn remove_account(&self, user_id: Uuid) {
        if let Err(e) = self.profile_repository.delete(user_id).await {
            error!(%user_id, error = %e, "Failed to remove profile of incomplete registration");
        }
        if let Err(e) = self.user_repository.delete(user_id).await {
            error!(%user_id, error = %e, "Failed to remove incomplete registration");
        }
    }

    /// Authenticate with email and password
    ///
    /// Unknown email and wrong password are both reported as
    /// `AuthError::InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);

        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                warn!("Login failed: unknown account");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.verify(password.to_string(), user.password_hash.clone()).await? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        info!(user_id = %user.id, "Login succeeded");

        let tokens = self.token_service.issue_credentials(&Principal::from(&user)).await?;
        Ok(AuthResponse::from_token_pair(tokens, user.role))
    }

    /// Exchange a refresh token for a new pair
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        self.token_service.rotate_credentials(refresh_token).await
    }

    /// End the session that owns `refresh_token`
    pub async fn logout(&self, user_id: Uuid, refresh_token: &str) -> DomainResult<bool> {
        self.token_service.revoke_credential(user_id, refresh_token).await
    }

    /// Create the administrator account if it does not exist yet
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Account created
    /// * `Ok(false)` - An ADMIN with this email already exists
    /// * `Err(AuthError::EmailAlreadyRegistered)` - Email belongs to a non-admin
    pub async fn ensure_admin(&self, email: &str, password: &str) -> DomainResult<bool> {
        let email = normalize_email(email);

        if let Some(existing) = self.user_repository.find_by_email(&email).await? {
            if existing.is_admin() {
                return Ok(false);
            }
            warn!(user_id = %existing.id, "Bootstrap admin email belongs to a non-admin account");
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        let password_hash = self.hash(password.to_string()).await?;
        let admin = self
            .user_repository
            .create(User::new(email, password_hash, Role::Admin))
            .await?;

        info!(user_id = %admin.id, "Created bootstrap administrator");
        Ok(true)
    }

    async fn hash(&self, password: String) -> DomainResult<String> {
        let cost = self.config.bcrypt_cost;
        tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("hashing task failed: {e}")))?
    }

    async fn verify(&self, password: String, password_hash: String) -> DomainResult<bool> {
        tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .map_err(|e| DomainError::internal(format!("verification task failed: {e}")))?
    }
}
