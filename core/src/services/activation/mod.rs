//! Activation token engine module
//!
//! Single-use activation links for registration, password reset, and
//! custom actions:
//! - one live token per (email, action) pair, stored as a dual-key
//!   record (primary by token id, secondary index by email and action)
//! - resend throttling: 60 second cooldown, 3 sends total
//! - absolute 30-minute expiry that resends never extend
//! - delete-on-redeem single use

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::TokenEngine;
pub use types::{ActivationClaims, GeneratedActivation};
