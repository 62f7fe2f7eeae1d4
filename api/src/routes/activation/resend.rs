//! Handler for POST /resend-activation

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use mg_core::repositories::KeyValueStore;
use mg_core::services::{Clock, Mailer, SecureRandom};
use mg_shared::utils::email::mask_email;

use crate::app::AppState;
use crate::dto::{ActivationResponse, ResendActivationRequest};
use crate::errors;
use crate::routes::client_ip;

/// Resend the activation link for an existing live token
///
/// Unlike /generate-activation this never mints a token: a missing or
/// expired one answers 400. The response body never carries the token
/// identifier, in any environment.
pub async fn resend_activation<S, C, R, M>(
    req: HttpRequest,
    state: web::Data<AppState<S, C, R, M>>,
    body: web::Json<ResendActivationRequest>,
) -> HttpResponse
where
    S: KeyValueStore + 'static,
    C: Clock + 'static,
    R: SecureRandom + 'static,
    M: Mailer + 'static,
{
    if let Err(validation) = body.validate() {
        return errors::validation_failed(&validation);
    }

    let client_ip = client_ip(&req);
    tracing::info!(
        email = %mask_email(&body.email),
        action = %body.action,
        client_ip = %client_ip,
        "Activation resend requested"
    );

    match state
        .delivery
        .resend_activation(
            &body.email,
            &body.action,
            body.base_url.as_deref(),
            body.system.as_deref(),
            &client_ip,
        )
        .await
    {
        Ok(token) => HttpResponse::Ok().json(ActivationResponse::sent(
            "Activation email resent successfully",
            &token,
            false,
        )),
        Err(error) => errors::resend_activation_error(&error, &body.email),
    }
}
