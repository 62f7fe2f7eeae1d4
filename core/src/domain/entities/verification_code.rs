//! Verification code entity for email-based one-time-code flows.

use serde::{Deserialize, Serialize};

/// Default number of digits in a verification code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (30 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 30;

/// A one-time numeric code bound to an email address
///
/// At most one live code exists per email; generating a new code for the
/// same address replaces the previous one. The stored JSON shape is part
/// of the persistence contract, so field names must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// The numeric code as entered by the user
    pub code: String,

    /// Email address this code was issued to
    pub email: String,

    /// System name shown in the delivery email
    pub system: String,

    /// Unix timestamp of issuance
    pub created_at: i64,
}

impl VerificationCode {
    /// Creates a new verification code record
    ///
    /// # Arguments
    ///
    /// * `code` - The already-generated numeric code
    /// * `email` - Email address the code is issued to
    /// * `system` - System label used in the delivery email
    /// * `now` - Current unix timestamp
    pub fn new(
        code: impl Into<String>,
        email: impl Into<String>,
        system: impl Into<String>,
        now: i64,
    ) -> Self {
        Self {
            code: code.into(),
            email: email.into(),
            system: system.into(),
            created_at: now,
        }
    }

    /// Seconds elapsed since the code was issued
    pub fn age_seconds(&self, now: i64) -> i64 {
        (now - self.created_at).max(0)
    }
}
