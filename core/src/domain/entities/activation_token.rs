//! Activation token entity for account activation and password reset links.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ActionKind;

/// Maximum number of emails that may be sent for one token
pub const MAX_SEND_COUNT: u32 = 3;

/// Minimum seconds between two sends for the same token
pub const RESEND_COOLDOWN_SECONDS: i64 = 60;

/// Fixed token lifetime in minutes, measured from creation
pub const TOKEN_EXPIRY_MINUTES: i64 = 30;

/// A single-use activation token scoped to one (email, action) pair
///
/// Exactly one live token exists per (email, action); a second generation
/// request while one is live mutates it (send count, last-sent) instead of
/// minting a new identifier. The expiry is absolute and never extended by
/// resends. The stored JSON shape is part of the persistence contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationToken {
    /// Random UUID identifying the token
    pub token: String,

    /// Email address the activation link is sent to
    pub email: String,

    /// What the link activates (registration, password reset, ...)
    pub action: ActionKind,

    /// System name shown in the delivery email
    pub system: String,

    /// Unix timestamp of creation
    pub created_at: i64,

    /// Absolute unix timestamp after which the token is dead
    pub expires_at: i64,

    /// Number of emails sent for this token, starts at 1
    pub send_count: u32,

    /// Unix timestamp of the most recent send
    pub last_sent_at: i64,
}

impl ActivationToken {
    /// Creates a fresh token for a first-time generation
    ///
    /// The first email counts as a send, so `send_count` starts at 1 and
    /// `last_sent_at` equals `created_at`.
    ///
    /// # Arguments
    ///
    /// * `token` - Pre-generated UUID string
    /// * `email` - Recipient email address
    /// * `action` - Action kind this token activates
    /// * `system` - System label used in the delivery email
    /// * `now` - Current unix timestamp
    pub fn new(
        token: impl Into<String>,
        email: impl Into<String>,
        action: ActionKind,
        system: impl Into<String>,
        now: i64,
    ) -> Self {
        Self {
            token: token.into(),
            email: email.into(),
            action,
            system: system.into(),
            created_at: now,
            expires_at: now + TOKEN_EXPIRY_MINUTES * 60,
            send_count: 1,
            last_sent_at: now,
        }
    }

    /// Whether the token is past its absolute expiry
    pub fn is_expired(&self, now: i64) -> bool {
        now > self.expires_at
    }

    /// Whether the send cap has been reached
    pub fn is_exhausted(&self) -> bool {
        self.send_count >= MAX_SEND_COUNT
    }

    /// Whether the resend cooldown is still running
    pub fn in_cooldown(&self, now: i64) -> bool {
        now - self.last_sent_at < RESEND_COOLDOWN_SECONDS
    }

    /// Earliest unix timestamp at which another send is permitted
    pub fn next_resend_at(&self) -> i64 {
        self.last_sent_at + RESEND_COOLDOWN_SECONDS
    }

    /// Sends remaining before the cap, 0 when exhausted
    pub fn remaining_sends(&self) -> u32 {
        MAX_SEND_COUNT.saturating_sub(self.send_count)
    }

    /// Record another email send for this token
    ///
    /// Bumps the send count and last-sent timestamp. The token identifier
    /// and expiry are deliberately untouched.
    pub fn record_send(&mut self, now: i64) {
        self.send_count += 1;
        self.last_sent_at = now;
    }

    /// Remaining lifetime in seconds, 0 once expired
    pub fn ttl_seconds(&self, now: i64) -> i64 {
        (self.expires_at - now).max(0)
    }
}
