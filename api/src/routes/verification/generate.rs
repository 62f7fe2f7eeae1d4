//! Handler for POST /generate

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use mg_core::repositories::KeyValueStore;
use mg_core::services::{Clock, Mailer, SecureRandom};
use mg_shared::utils::email::mask_email;

use crate::app::AppState;
use crate::dto::{GenerateCodeRequest, MessageResponse};
use crate::errors;
use crate::routes::client_ip;

/// Issue a verification code and email it to the requested address
///
/// Both rate-limit scopes are checked before any work happens and only
/// counted after the email is confirmed sent.
pub async fn generate_code<S, C, R, M>(
    req: HttpRequest,
    state: web::Data<AppState<S, C, R, M>>,
    body: web::Json<GenerateCodeRequest>,
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
        client_ip = %client_ip,
        "Verification code requested"
    );

    match state
        .delivery
        .send_code(
            &body.email,
            body.system.as_deref(),
            body.custom_data.as_ref(),
            &client_ip,
        )
        .await
    {
        Ok(()) => {
            HttpResponse::Ok().json(MessageResponse::ok("Verification code sent successfully"))
        }
        Err(error) => errors::generate_code_error(&error, &body.email),
    }
}
