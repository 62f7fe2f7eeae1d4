//! Handler for POST /generate-activation

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use mg_core::repositories::KeyValueStore;
use mg_core::services::{Clock, Mailer, SecureRandom};
use mg_shared::utils::email::mask_email;

use crate::app::AppState;
use crate::dto::{ActivationResponse, GenerateActivationRequest};
use crate::errors;
use crate::routes::client_ip;

/// Issue or reuse an activation token and email its link
///
/// A live token for the same (email, action) pair is reused with its
/// send bookkeeping bumped; otherwise a fresh one is minted. The token
/// identifier itself is echoed in the body only in development.
pub async fn generate_activation<S, C, R, M>(
    req: HttpRequest,
    state: web::Data<AppState<S, C, R, M>>,
    body: web::Json<GenerateActivationRequest>,
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
        "Activation link requested"
    );

    match state
        .delivery
        .send_activation(
            &body.email,
            &body.action,
            &body.base_url,
            body.system.as_deref(),
            body.custom_data.as_ref(),
            &client_ip,
        )
        .await
    {
        Ok(generated) => HttpResponse::Ok().json(ActivationResponse::sent(
            "Activation email sent successfully",
            &generated.token,
            state.environment.is_debug(),
        )),
        Err(error) => errors::generate_activation_error(&error, &body.email),
    }
}
