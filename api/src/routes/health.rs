//! Health endpoint probing the store and the mailer

use actix_web::{web, HttpResponse};

use mg_core::repositories::KeyValueStore;
use mg_core::services::{Clock, Mailer, SecureRandom};

use crate::app::AppState;
use crate::dto::HealthResponse;

/// Handler for GET /health
///
/// Probes Redis and the SMTP relay and reports both. Answers 200 only
/// when every dependency is reachable, 503 otherwise, so load balancers
/// can rotate a broken instance out.
pub async fn health<S, C, R, M>(state: web::Data<AppState<S, C, R, M>>) -> HttpResponse
where
    S: KeyValueStore + 'static,
    C: Clock + 'static,
    R: SecureRandom + 'static,
    M: Mailer + 'static,
{
    let redis = state.store.ping().await.map_err(|e| e.to_string());
    let smtp = state.mailer.test_connection().await;

    let report = HealthResponse::report(redis, smtp);
    if report.is_healthy() {
        HttpResponse::Ok().json(report)
    } else {
        tracing::warn!(
            redis = %report.checks.redis,
            smtp = %report.checks.smtp,
            "Health check failed"
        );
        HttpResponse::ServiceUnavailable().json(report)
    }
}
