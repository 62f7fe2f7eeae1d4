//! Redis store configuration module

use serde::{Deserialize, Serialize};

/// Redis store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Redis connection URL
    pub url: String,

    /// Maximum connection attempts before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial delay between connection attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379/0"),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl StoreConfig {
    /// Create a new store configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    ///
    /// `REDIS_URL` wins when set. Otherwise the URL is assembled from
    /// `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD` and `REDIS_DB`.
    pub fn from_env() -> Self {
        if let Ok(url) = std::env::var("REDIS_URL") {
            return Self::new(url);
        }

        let host = std::env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = std::env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = std::env::var("REDIS_PASSWORD").unwrap_or_default();
        let database = std::env::var("REDIS_DB")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<u8>()
            .unwrap_or(0);

        let url = if password.is_empty() {
            format!("redis://{}:{}/{}", host, port, database)
        } else {
            format!("redis://:{}@{}:{}/{}", password, host, port, database)
        };

        Self::new(url)
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}
