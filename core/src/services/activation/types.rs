//! Outcome types for the token engine

use serde::Serialize;

use crate::domain::entities::ActivationToken;
use crate::domain::value_objects::ActionKind;

/// Result of a generation request
#[derive(Debug, Clone)]
pub struct GeneratedActivation {
    /// The live token after this request
    pub token: ActivationToken,

    /// Whether this request minted the token
    ///
    /// Only a freshly created token may be rolled back when the email
    /// send fails; discarding a reused token would erase its resend
    /// history.
    pub freshly_created: bool,
}

/// Claims released by a successful redemption
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivationClaims {
    pub email: String,
    pub action: ActionKind,
    pub system: String,
}
