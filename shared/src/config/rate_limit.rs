//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Generation rate limit configuration
///
/// Both limits use fixed one-hour windows counted in Redis. They apply to
/// operations that send mail; validation endpoints are never limited.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Max code or token generations per email address per window
    pub email_per_hour: u32,

    /// Max code or token generations per client IP per window
    pub ip_per_hour: u32,

    /// Window length in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            email_per_hour: 5,
            ip_per_hour: 30,
            window_seconds: default_window_seconds(),
        }
    }
}

impl RateLimitConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let email_per_hour = std::env::var("RATE_LIMIT_EMAIL_PER_HOUR")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);
        let ip_per_hour = std::env::var("RATE_LIMIT_IP_PER_HOUR")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Self {
            email_per_hour,
            ip_per_hour,
            window_seconds: default_window_seconds(),
        }
    }

    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            email_per_hour: 100,
            ip_per_hour: 1000,
            window_seconds: default_window_seconds(),
        }
    }
}

fn default_window_seconds() -> u64 {
    3600 // 1 hour
}
