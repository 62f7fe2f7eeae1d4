//! Handler for POST /verify-activation

use actix_web::{web, HttpResponse};
use validator::Validate;

use mg_core::repositories::KeyValueStore;
use mg_core::services::{Clock, Mailer, SecureRandom};
use mg_shared::utils::email::mask_email;

use crate::app::AppState;
use crate::dto::{RedeemResponse, VerifyActivationRequest};
use crate::errors;

/// Redeem an activation token by its identifier
///
/// Success releases the claims stored with the token and consumes it.
/// Like code verification, redemption never touches the rate limits.
pub async fn verify_activation<S, C, R, M>(
    state: web::Data<AppState<S, C, R, M>>,
    body: web::Json<VerifyActivationRequest>,
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

    match state.delivery.redeem_activation(&body.token).await {
        Ok(claims) => {
            tracing::info!(
                email = %mask_email(&claims.email),
                action = %claims.action,
                "Activation token redeemed"
            );
            HttpResponse::Ok().json(RedeemResponse::ok("Activation successful", claims))
        }
        Err(error) => errors::verify_activation_error(&error),
    }
}
