//! MailGate API server binary
//!
//! Wires the Redis store, the SMTP mailer, and the delivery engines
//! together and serves the HTTP surface.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use tracing_subscriber::EnvFilter;

use mg_core::services::{
    CodeEngine, CodeEngineConfig, DeliveryConfig, DeliveryService, OsRandom, RateLimiter,
    RateLimiterConfig, SystemClock, TokenEngine,
};
use mg_core::{KeyValueStore, Mailer};
use mg_infra::{RedisStore, SmtpMailer};

use mg_api::app::{create_app, AppState};
use mg_api::config;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.env_filter())),
        )
        .init();

    tracing::info!(
        environment = %config.environment,
        address = %config.server.bind_address(),
        "Starting MailGate API server"
    );

    let store = Arc::new(RedisStore::connect(&config.store).await?);
    let mailer = Arc::new(SmtpMailer::new(&config.smtp, config.code.expire_minutes)?);

    // A dependency down at boot is worth a warning, not an abort; the
    // health endpoint keeps reporting it until it recovers.
    match store.ping().await {
        Ok(()) => tracing::info!("Redis connection successful"),
        Err(e) => tracing::warn!(error = %e, "Redis connection failed"),
    }
    match mailer.test_connection().await {
        Ok(()) => tracing::info!("SMTP connection successful"),
        Err(e) => tracing::warn!(error = %e, "SMTP connection failed"),
    }

    let clock = Arc::new(SystemClock);
    let random = Arc::new(OsRandom);

    let codes = CodeEngine::new(
        store.clone(),
        clock.clone(),
        random.clone(),
        CodeEngineConfig::new(config.code.length, config.code.expire_minutes as i64),
    );
    let tokens = TokenEngine::new(store.clone(), clock.clone(), random.clone());
    let limiter = RateLimiter::new(
        store.clone(),
        RateLimiterConfig::new(
            config.rate_limit.email_per_hour,
            config.rate_limit.ip_per_hour,
        ),
    );
    let delivery = Arc::new(DeliveryService::new(
        codes,
        tokens,
        limiter,
        mailer.clone(),
        DeliveryConfig::new(&config.code.default_system_name),
    ));

    let state = web::Data::new(AppState {
        delivery,
        store,
        mailer,
        environment: config.environment,
    });

    let security = config.security.clone();
    let cors = config.cors.clone();
    let bind_address = config.server.bind_address();

    let mut server =
        HttpServer::new(move || create_app(state.clone(), security.clone(), cors.clone()))
            .bind(&bind_address)?
            .keep_alive(Duration::from_secs(config.server.keep_alive));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    tracing::info!(address = %bind_address, "Server listening");
    server.run().await?;

    Ok(())
}
