//! Application state and factory
//!
//! Builds the Actix application with all middleware and routes wired.
//! The factory is generic over the engine dependencies so integration
//! tests can assemble the exact same app around in-memory fakes.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{error::InternalError, web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use mg_core::repositories::KeyValueStore;
use mg_core::services::{Clock, DeliveryService, Mailer, SecureRandom};
use mg_shared::config::{CorsConfig, Environment, SecurityConfig};
use mg_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::ApiKeyAuth;
use crate::routes::{activation, health::health, verification};

/// Shared state injected into every handler
pub struct AppState<S, C, R, M>
where
    S: KeyValueStore,
    C: Clock,
    R: SecureRandom,
    M: Mailer,
{
    pub delivery: Arc<DeliveryService<S, C, R, M>>,

    /// Probed directly by the health endpoint
    pub store: Arc<S>,

    /// Probed directly by the health endpoint
    pub mailer: Arc<M>,

    /// Controls the development-only token echo
    pub environment: Environment,
}

/// Create and configure the application with all dependencies
///
/// `/health` stays public; everything else sits inside a scope guarded
/// by the API key middleware. CORS wraps the whole app so browser
/// preflights are answered without a key.
pub fn create_app<S, C, R, M>(
    state: web::Data<AppState<S, C, R, M>>,
    security: SecurityConfig,
    cors: CorsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: KeyValueStore + 'static,
    C: Clock + 'static,
    R: SecureRandom + 'static,
    M: Mailer + 'static,
{
    App::new()
        .app_data(state)
        .app_data(json_config())
        .wrap(TracingLogger::default())
        .wrap(build_cors(&cors))
        .route("/health", web::get().to(health::<S, C, R, M>))
        .service(
            web::scope("")
                .wrap(ApiKeyAuth::new(security))
                .route(
                    "/generate",
                    web::post().to(verification::generate_code::<S, C, R, M>),
                )
                .route(
                    "/verify",
                    web::post().to(verification::verify_code::<S, C, R, M>),
                )
                .route(
                    "/generate-activation",
                    web::post().to(activation::generate_activation::<S, C, R, M>),
                )
                .route(
                    "/verify-activation",
                    web::post().to(activation::verify_activation::<S, C, R, M>),
                )
                .route(
                    "/resend-activation",
                    web::post().to(activation::resend_activation::<S, C, R, M>),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Answer malformed JSON bodies with the standard error shape
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        let response =
            HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, message));
        InternalError::from_response(err, response).into()
    })
}

/// Build the CORS policy from configuration
fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(config.allowed_methods.iter().map(String::as_str))
        .allowed_headers(config.allowed_headers.iter().map(String::as_str))
        .max_age(config.max_age as usize);

    if config.allows_any_origin() {
        cors = cors.allow_any_origin().send_wildcard();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
