//! Bearer token authentication middleware for protecting API endpoints.
//!
//! The middleware reads the `Authorization` header (falling back to
//! `Jwt-Token`), verifies the `Bearer <token>` value with the shared
//! `TokenCodec`, and injects an `AuthContext` into the request.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::{header::AUTHORIZATION, StatusCode},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};
use um_core::{
    domain::entities::token::{Claims, JWT_TOKEN_HEADER},
    errors::{AuthError, DomainError},
    services::token::TokenCodec,
};
use um_shared::error_codes;

use crate::handlers::error::{error_response, handle_domain_error, FORBIDDEN_MESSAGE};

/// Authenticated caller injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Username from the token subject
    pub username: String,
    /// Authorities granted when the token was issued
    pub authorities: Vec<String>,
}

impl AuthContext {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            authorities: claims.authorities,
        }
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }

    /// Fails with `InsufficientPermissions` unless `authority` was granted
    pub fn require(&self, authority: &str) -> Result<(), DomainError> {
        if self.has_authority(authority) {
            Ok(())
        } else {
            log::warn!("{} lacks authority {}", self.username, authority);
            Err(AuthError::InsufficientPermissions.into())
        }
    }
}

/// Bearer token authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    codec: Arc<TokenCodec>,
}

impl JwtAuth {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
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
            codec: self.codec.clone(),
        }))
    }
}

/// Bearer token authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    codec: Arc<TokenCodec>,
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

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let codec = self.codec.clone();

        Box::pin(async move {
            let header_value = match extract_header_value(&req) {
                Some(value) => value,
                None => {
                    let response =
                        error_response(StatusCode::FORBIDDEN, error_codes::FORBIDDEN, FORBIDDEN_MESSAGE);
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            let claims = match codec.verify_bearer(&header_value) {
                Ok(claims) => claims,
                Err(e) => {
                    let response = handle_domain_error(e);
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            req.extensions_mut().insert(AuthContext::from_claims(claims));

            let response = service.call(req).await?;
            Ok(response.map_into_left_body())
        })
    }
}

/// Raw `Bearer ...` value from `Authorization`, or from `Jwt-Token`
fn extract_header_value(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .or_else(|| req.headers().get(JWT_TOKEN_HEADER))?
        .to_str()
        .ok()
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result: Result<Self, Error> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| {
                let response =
                    error_response(StatusCode::FORBIDDEN, error_codes::FORBIDDEN, FORBIDDEN_MESSAGE);
                Error::from(InternalError::from_response("authentication required", response))
            });

        ready(result)
    }
}
