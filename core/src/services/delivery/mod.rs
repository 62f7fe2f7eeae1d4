//! Request orchestration module
//!
//! Composes the rate limiter, the two engines, and the outbound mailer
//! into the five delivery flows: send code, verify code, send
//! activation, resend activation, redeem activation. Owns the
//! check-send-count ordering and the rollback of freshly created state
//! when a send fails.

mod config;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::DeliveryConfig;
pub use service::DeliveryService;
pub use traits::Mailer;
