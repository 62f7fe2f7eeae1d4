//! Verification code engine module
//!
//! Issues short numeric codes for email ownership checks:
//! - cryptographically secure generation
//! - TTL-bound storage with one live code per email
//! - constant-time compare-and-consume redemption

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::CodeEngineConfig;
pub use service::CodeEngine;
