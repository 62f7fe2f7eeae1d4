//! API key authentication middleware
//!
//! Every protected route requires an `x-api-key` header matching one of
//! the configured keys. Failures are answered directly with the standard
//! `{ error, message }` body and never reach the inner service.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use mg_shared::config::SecurityConfig;
use mg_shared::errors::{error_codes, ErrorResponse};

const API_KEY_HEADER: &str = "x-api-key";

/// API key middleware factory
pub struct ApiKeyAuth {
    config: SecurityConfig,
}

impl ApiKeyAuth {
    pub fn new(config: SecurityConfig) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service: Rc::new(service),
            config: self.config.clone(),
        }))
    }
}

/// API key middleware service
pub struct ApiKeyAuthMiddleware<S> {
    service: Rc<S>,
    config: SecurityConfig,
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
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
        let config = self.config.clone();

        Box::pin(async move {
            let denial = match extract_api_key(&req) {
                None => Some("API key is required"),
                Some(key) if !config.is_valid_key(&key) => {
                    tracing::warn!(path = %req.path(), "Rejected request with invalid API key");
                    Some("Invalid API key")
                }
                Some(_) => None,
            };

            if let Some(message) = denial {
                let response = unauthorized(message);
                return Ok(req.into_response(response).map_into_right_body());
            }

            service
                .call(req)
                .await
                .map(|response| response.map_into_left_body())
        })
    }
}

/// Pull the trimmed `x-api-key` header value; `None` when missing or blank
fn extract_api_key(req: &ServiceRequest) -> Option<String> {
    let presented = req.headers().get(API_KEY_HEADER)?.to_str().ok()?.trim();
    if presented.is_empty() {
        None
    } else {
        Some(presented.to_string())
    }
}

/// Build a 401 carrying the standard error body
fn unauthorized(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(error_codes::UNAUTHORIZED, message))
}
