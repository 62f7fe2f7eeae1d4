//! Outbound response bodies

use serde::Serialize;

use mg_core::domain::entities::{ActivationToken, MAX_SEND_COUNT};
use mg_core::services::ActivationClaims;

/// Plain success envelope for the code endpoints
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Envelope for the activation send endpoints, also used as the 429 body
/// when a resend is denied
///
/// `token` is only populated in development so integration tests can
/// redeem without a mailbox; production clients never see it.
#[derive(Debug, Clone, Serialize)]
pub struct ActivationResponse {
    pub success: bool,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    pub can_resend: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_resend_at: Option<i64>,

    pub send_count: u32,
    pub max_sends: u32,
}

impl ActivationResponse {
    /// Success body after a confirmed send
    pub fn sent(message: impl Into<String>, token: &ActivationToken, include_token: bool) -> Self {
        Self {
            success: true,
            message: message.into(),
            token: include_token.then(|| token.token.clone()),
            can_resend: !token.is_exhausted(),
            next_resend_at: Some(token.next_resend_at()),
            send_count: token.send_count,
            max_sends: MAX_SEND_COUNT,
        }
    }

    /// Denial body for a token whose send cap is spent
    pub fn max_sends_reached(send_count: u32, max_sends: u32) -> Self {
        Self {
            success: false,
            message: "Maximum resend limit reached. Please try again later.".to_string(),
            token: None,
            can_resend: false,
            next_resend_at: None,
            send_count,
            max_sends,
        }
    }

    /// Denial body for a token still inside the resend cooldown
    ///
    /// The send count is unknown at denial time, so the wire reports 0
    /// as the established contract does.
    pub fn cooldown(next_resend_at: i64) -> Self {
        Self {
            success: false,
            message: "Please wait 60 seconds before resending the email.".to_string(),
            token: None,
            can_resend: false,
            next_resend_at: Some(next_resend_at),
            send_count: 0,
            max_sends: MAX_SEND_COUNT,
        }
    }
}

/// Success body for a redeemed activation token
#[derive(Debug, Clone, Serialize)]
pub struct RedeemResponse {
    pub success: bool,
    pub message: String,
    pub data: ActivationClaims,
}

impl RedeemResponse {
    pub fn ok(message: impl Into<String>, claims: ActivationClaims) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: claims,
        }
    }
}

/// Dependency probe results for the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    /// "ok" or the connection error
    pub redis: String,

    /// "ok" or the connection error
    pub smtp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub checks: HealthChecks,
}

impl HealthResponse {
    /// Build the report; healthy only when every check passed
    pub fn report(redis: Result<(), String>, smtp: Result<(), String>) -> Self {
        let healthy = redis.is_ok() && smtp.is_ok();
        let into_field = |check: Result<(), String>| match check {
            Ok(()) => "ok".to_string(),
            Err(error) => error,
        };

        Self {
            status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            checks: HealthChecks {
                redis: into_field(redis),
                smtp: into_field(smtp),
            },
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
