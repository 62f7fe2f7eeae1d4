//! Handler for POST /verify

use actix_web::{web, HttpResponse};
use validator::Validate;

use mg_core::repositories::KeyValueStore;
use mg_core::services::{Clock, Mailer, SecureRandom};
use mg_shared::utils::email::mask_email;

use crate::app::AppState;
use crate::dto::{MessageResponse, VerifyCodeRequest};
use crate::errors;

/// Redeem a verification code
///
/// A correct code is consumed on the spot; a wrong guess leaves the
/// stored code intact. Verification never touches the rate limits.
pub async fn verify_code<S, C, R, M>(
    state: web::Data<AppState<S, C, R, M>>,
    body: web::Json<VerifyCodeRequest>,
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

    match state.delivery.verify_code(&body.email, &body.code).await {
        Ok(()) => {
            tracing::info!(email = %mask_email(&body.email), "Verification code redeemed");
            HttpResponse::Ok().json(MessageResponse::ok("Verification successful"))
        }
        Err(error) => errors::verify_code_error(&error),
    }
}
