//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the bearer token from the Authorization header,
//! verifies it through the token service registered in app data, and injects
//! an [`AuthContext`] into the request. Token failures produce the same generic
//! 401 body as the refresh endpoint; a role mismatch is a 403.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use solar_core::{
    domain::entities::{token::AccessClaims, user::Role},
    domain::value_objects::Principal,
    errors::{AuthError, DomainError, TokenError},
    repositories::TokenRepository,
    services::token::TokenService,
};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use crate::handlers::error::{handle_domain_error, unauthorized_response};

/// Authenticated principal injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// User ID extracted from JWT claims
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    /// JWT ID for tracing
    pub jti: String,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: AccessClaims) -> Option<Self> {
        let user_id = claims.user_id().ok()?;
        Some(Self {
            user_id,
            email: claims.email,
            role: claims.role,
            jti: claims.jti,
        })
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.email.clone(), self.role)
    }
}

/// Object-safe view of the token service used by the middleware
pub trait AccessTokenVerifier: Send + Sync {
    fn verify_access_token(&self, token: &str) -> Result<AccessClaims, DomainError>;
}

impl<R: TokenRepository> AccessTokenVerifier for TokenService<R> {
    fn verify_access_token(&self, token: &str) -> Result<AccessClaims, DomainError> {
        TokenService::verify_access_token(self, token)
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Default)]
pub struct JwtAuth {
    /// Role the principal must hold, if any
    required_role: Option<Role>,
}

impl JwtAuth {
    /// Any authenticated principal
    pub fn new() -> Self {
        Self::default()
    }

    /// Only principals holding `role`; others get 403
    pub fn require_role(role: Role) -> Self {
        Self {
            required_role: Some(role),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            required_role: self.required_role,
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    required_role: Option<Role>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let required_role = self.required_role;

        Box::pin(async move {
            let auth_context = match authenticate(&req, required_role) {
                Ok(auth_context) => auth_context,
                Err(error) => {
                    let response = handle_domain_error(error);
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            // Inject auth context into request extensions
            req.extensions_mut().insert(auth_context);

            service.call(req).await.map(|res| res.map_into_left_body())
        })
    }
}

/// Resolve the caller from the bearer token and check the required role
///
/// Token problems of any kind surface as `TokenError::InvalidToken` or the
/// verifier's own token error, which all map to the same 401.
fn authenticate(req: &ServiceRequest, required_role: Option<Role>) -> Result<AuthContext, DomainError> {
    let token = extract_bearer_token(req).ok_or(TokenError::InvalidToken)?;

    let verifier = req
        .app_data::<web::Data<Arc<dyn AccessTokenVerifier>>>()
        .ok_or_else(|| {
            tracing::error!("Access token verifier missing from app data");
            TokenError::InvalidToken
        })?;

    let auth_context = AuthContext::from_claims(verifier.verify_access_token(&token)?)
        .ok_or(TokenError::InvalidToken)?;

    if let Some(role) = required_role {
        if auth_context.role != role {
            tracing::warn!(user_id = %auth_context.user_id, required = %role, "Role check failed");
            return Err(AuthError::InsufficientPermissions.into());
        }
    }

    Ok(auth_context)
}

fn unauthorized() -> Error {
    InternalError::from_response("unauthorized", unauthorized_response()).into()
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(unauthorized);

        ready(result)
    }
}
