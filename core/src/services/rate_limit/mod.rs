//! Fixed-window rate limiting module
//!
//! Hourly send budgets per email address and per client IP, backed by
//! store counters whose window is armed once and never extended.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::RateLimiterConfig;
pub use service::{RateLimitStatus, RateLimiter};
