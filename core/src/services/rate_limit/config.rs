//! Configuration for the rate limiter

/// Ceilings and window length for the fixed-window counters
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Maximum sends per email address per window
    pub email_per_hour: u32,
    /// Maximum sends per client IP per window
    pub ip_per_hour: u32,
    /// Window length in seconds, armed at the first increment
    pub window_seconds: u64,
}

impl RateLimiterConfig {
    pub fn new(email_per_hour: u32, ip_per_hour: u32) -> Self {
        Self {
            email_per_hour,
            ip_per_hour,
            window_seconds: 3_600,
        }
    }
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::new(5, 30)
    }
}
