//! Domain error to HTTP response mapping
//!
//! Every string in this module is wire-visible and part of the
//! established API contract. The delivery layer has already replaced
//! store and mailer internals with stable step messages, so 500 bodies
//! can carry them verbatim.

use actix_web::HttpResponse;
use validator::ValidationErrors;

use mg_core::domain::value_objects::LimitScope;
use mg_core::errors::{DomainError, ResendDenial};
use mg_shared::errors::{error_codes, ErrorResponse};

use crate::dto::ActivationResponse;

/// 400 with the generic "Bad Request" title
pub fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, message))
}

/// 400 for a body that failed validator checks
pub fn validation_failed(errors: &ValidationErrors) -> HttpResponse {
    bad_request(flatten_validation(errors))
}

/// 500 with a stable client-safe message
fn internal(message: impl Into<String>) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        error_codes::INTERNAL_SERVER_ERROR,
        message,
    ))
}

/// 429 for a fixed-window ceiling hit
fn rate_limited(scope: &LimitScope, current: u32, email: &str) -> HttpResponse {
    let message = match scope {
        LimitScope::Ip => {
            format!("IP rate limit exceeded. Current: {current} requests per hour")
        }
        LimitScope::Email => {
            format!("Email rate limit exceeded. Current: {current} requests per hour for {email}")
        }
    };
    HttpResponse::TooManyRequests().json(ErrorResponse::new(
        error_codes::RATE_LIMIT_EXCEEDED,
        message,
    ))
}

/// 429 for a denied resend, shaped like an ActivationResponse
fn resend_denied(denial: &ResendDenial) -> HttpResponse {
    let body = match denial {
        ResendDenial::MaxSendsReached {
            send_count,
            max_sends,
        } => ActivationResponse::max_sends_reached(*send_count, *max_sends),
        ResendDenial::Cooldown { next_allowed_at } => {
            ActivationResponse::cooldown(*next_allowed_at)
        }
    };
    HttpResponse::TooManyRequests().json(body)
}

/// Map a failed POST /generate
pub fn generate_code_error(error: &DomainError, email: &str) -> HttpResponse {
    match error {
        DomainError::RateLimitExceeded { scope, current, .. } => {
            rate_limited(scope, *current, email)
        }
        DomainError::Validation { message } => bad_request(message),
        DomainError::Generation { message } | DomainError::Transport { message } => {
            internal(message)
        }
        _ => internal("Internal server error"),
    }
}

/// Map a failed POST /verify
pub fn verify_code_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::NotFoundOrExpired { .. } => HttpResponse::BadRequest().json(
            ErrorResponse::new(
                error_codes::INVALID_OR_EXPIRED_CODE,
                "Verification code not found or has expired",
            ),
        ),
        DomainError::CodeMismatch => HttpResponse::BadRequest().json(ErrorResponse::new(
            error_codes::INVALID_CODE,
            "The verification code provided is incorrect",
        )),
        DomainError::Validation { message } => bad_request(message),
        DomainError::Transport { message } => internal(message),
        _ => internal("Internal server error"),
    }
}

/// Map a failed POST /generate-activation
pub fn generate_activation_error(error: &DomainError, email: &str) -> HttpResponse {
    match error {
        DomainError::RateLimitExceeded { scope, current, .. } => {
            rate_limited(scope, *current, email)
        }
        DomainError::ResendDenied(denial) => resend_denied(denial),
        DomainError::Validation { message } => bad_request(message),
        DomainError::Generation { message } | DomainError::Transport { message } => {
            internal(message)
        }
        _ => internal("Internal server error"),
    }
}

/// Map a failed POST /verify-activation
pub fn verify_activation_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::NotFoundOrExpired { .. } => HttpResponse::BadRequest().json(
            ErrorResponse::new(
                error_codes::INVALID_OR_EXPIRED_TOKEN,
                "Activation token not found or has expired",
            ),
        ),
        DomainError::TokenExpired => HttpResponse::BadRequest().json(ErrorResponse::new(
            error_codes::EXPIRED_TOKEN,
            "Activation token has expired",
        )),
        DomainError::Validation { message } => bad_request(message),
        DomainError::Transport { message } => internal(message),
        _ => internal("Internal server error"),
    }
}

/// Map a failed POST /resend-activation
pub fn resend_activation_error(error: &DomainError, email: &str) -> HttpResponse {
    match error {
        DomainError::RateLimitExceeded { scope, current, .. } => {
            rate_limited(scope, *current, email)
        }
        DomainError::ResendDenied(denial) => resend_denied(denial),
        DomainError::NotFoundOrExpired { .. } => HttpResponse::BadRequest().json(
            ErrorResponse::new(
                error_codes::NO_ACTIVE_TOKEN,
                "No activation token found for this email and action",
            ),
        ),
        DomainError::Validation { message } => bad_request(message),
        DomainError::Transport { message } => internal(message),
        _ => internal("Internal server error"),
    }
}

/// Collapse validator output into one deterministic message
fn flatten_validation(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let code = field_errors
                .first()
                .map(|error| error.code.as_ref())
                .unwrap_or("invalid");
            format!("{field}: {code}")
        })
        .collect();
    parts.sort();
    parts.join(", ")
}
