//! Error taxonomy for the code, token, and rate-limit engines.

use thiserror::Error;

use crate::domain::value_objects::LimitScope;

/// Reason a resend request was refused
///
/// Carried inside [`DomainError::ResendDenied`] so the HTTP layer can
/// shape its 429 payload (send counts for the cap case, a retry
/// timestamp for the cooldown case).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResendDenial {
    #[error("maximum resend limit reached ({send_count}/{max_sends})")]
    MaxSendsReached { send_count: u32, max_sends: u32 },

    #[error("must wait for resend cooldown, next allowed at {next_allowed_at}")]
    Cooldown { next_allowed_at: i64 },
}

/// Core domain errors
///
/// An evicted key and a never-issued key are observably identical, so
/// both surface as [`DomainError::NotFoundOrExpired`]. Store and mailer
/// failures are collapsed into [`DomainError::Transport`]; the HTTP
/// layer must not leak their internals to clients.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{resource} not found or expired")]
    NotFoundOrExpired { resource: String },

    #[error("Verification code mismatch")]
    CodeMismatch,

    #[error("Activation token expired")]
    TokenExpired,

    #[error("Rate limit exceeded for {scope}: {current} of {limit} per hour")]
    RateLimitExceeded {
        scope: LimitScope,
        current: u32,
        limit: u32,
    },

    #[error(transparent)]
    ResendDenied(#[from] ResendDenial),

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Generation error: {message}")]
    Generation { message: String },
}

impl DomainError {
    /// Shorthand for a transport failure with a formatted message
    pub fn transport(message: impl Into<String>) -> Self {
        DomainError::Transport {
            message: message.into(),
        }
    }

    /// Shorthand for a validation failure with a formatted message
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
