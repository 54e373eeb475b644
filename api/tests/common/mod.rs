//! Shared setup for API integration tests
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App,
};
use solar_api::{create_app, AppState};
use solar_core::domain::entities::user::Role;
use solar_core::domain::value_objects::AuthResponse;
use solar_core::services::{
    AuthService, AuthServiceConfig, ProfileService, Registration, TokenService, TokenServiceConfig,
};
use solar_core::{MockProfileRepository, MockTokenRepository, MockUserRepository};
use solar_infra::DatabasePool;
use solar_shared::CorsConfig;

pub type TestState = AppState<MockUserRepository, MockProfileRepository, MockTokenRepository>;

pub const PASSWORD: &str = "sunshine42";
pub const ADMIN_EMAIL: &str = "admin@solarlink.test";

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub tokens: MockTokenRepository,
    pub users: Arc<MockUserRepository>,
    pub profiles: Arc<MockProfileRepository>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::build(None)
    }

    pub fn with_database(database: DatabasePool) -> Self {
        Self::build(Some(database))
    }

    fn build(database: Option<DatabasePool>) -> Self {
        let tokens = MockTokenRepository::new();
        let users = Arc::new(MockUserRepository::new());
        let profiles = Arc::new(MockProfileRepository::new());

        let token_service = Arc::new(TokenService::new(tokens.clone(), TokenServiceConfig::default()));
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&users),
            Arc::clone(&profiles),
            Arc::clone(&token_service),
            AuthServiceConfig { bcrypt_cost: 4 },
        ));
        let profile_service = Arc::new(ProfileService::new(Arc::clone(&profiles)));

        let mut state = AppState::new(auth_service, profile_service, token_service);
        state.database = database;

        Self {
            state: web::Data::new(state),
            tokens,
            users,
            profiles,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        create_app(self.state.clone(), &CorsConfig::development(), 64 * 1024)
    }

    /// Register directly through the service layer
    pub async fn register(&self, email: &str, role: Role) -> AuthResponse {
        let company_name = (role == Role::Dealer).then(|| "Bright Panels Pty Ltd".to_string());
        self.state
            .auth_service
            .register(Registration {
                email: email.to_string(),
                password: PASSWORD.to_string(),
                role,
                display_name: "Test Account".to_string(),
                company_name,
            })
            .await
            .expect("registration should succeed")
    }

    /// Create the administrator and sign in as them
    pub async fn admin(&self) -> AuthResponse {
        self.state
            .auth_service
            .ensure_admin(ADMIN_EMAIL, PASSWORD)
            .await
            .expect("admin bootstrap should succeed");
        self.state
            .auth_service
            .login(ADMIN_EMAIL, PASSWORD)
            .await
            .expect("admin login should succeed")
    }
}

pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (actix_web::http::header::AUTHORIZATION, format!("Bearer {token}"))
}
