//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `codes` - Verification code generation settings
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - Per-email and per-IP generation rate limits
//! - `security` - API key authentication configuration
//! - `server` - HTTP server and CORS configuration
//! - `smtp` - Outbound mail delivery configuration
//! - `store` - Redis connection configuration

pub mod codes;
pub mod environment;
pub mod rate_limit;
pub mod security;
pub mod server;
pub mod smtp;
pub mod store;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use codes::CodeConfig;
pub use environment::{Environment, LoggingConfig};
pub use rate_limit::RateLimitConfig;
pub use security::SecurityConfig;
pub use server::{CorsConfig, ServerConfig};
pub use smtp::SmtpConfig;
pub use store::StoreConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Redis store configuration
    pub store: StoreConfig,

    /// SMTP delivery configuration
    pub smtp: SmtpConfig,

    /// API key security configuration
    pub security: SecurityConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Verification code configuration
    pub code: CodeConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            store: StoreConfig::default(),
            smtp: SmtpConfig::default(),
            security: SecurityConfig::default(),
            rate_limit: RateLimitConfig::default(),
            code: CodeConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load the full configuration from environment variables
    ///
    /// Every sub-configuration reads its own variables and falls back to
    /// documented defaults when a variable is unset.
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        Self {
            environment: env,
            server: ServerConfig::from_env(),
            store: StoreConfig::from_env(),
            smtp: SmtpConfig::from_env(),
            security: SecurityConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            code: CodeConfig::from_env(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }

    /// Create configuration for local development
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            rate_limit: RateLimitConfig::development(),
            ..Default::default()
        }
    }

    /// Validate cross-field constraints that `from_env` cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server port must be non-zero".to_string());
        }
        if self.rate_limit.email_per_hour == 0 || self.rate_limit.ip_per_hour == 0 {
            return Err("rate limit ceilings must be at least 1".to_string());
        }
        if !(4..=10).contains(&self.code.length) {
            return Err(format!(
                "code length {} outside supported range 4..=10",
                self.code.length
            ));
        }
        if self.code.expire_minutes == 0 {
            return Err("code expiry must be at least one minute".to_string());
        }
        Ok(())
    }
}
