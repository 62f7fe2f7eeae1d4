//! Shared utilities and common types for MailGate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from environment variables
//! - Error response structures shared by the HTTP layer
//! - Utility functions (email validation and masking)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CodeConfig, CorsConfig, Environment, LoggingConfig, RateLimitConfig,
    SecurityConfig, ServerConfig, SmtpConfig, StoreConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::email;
