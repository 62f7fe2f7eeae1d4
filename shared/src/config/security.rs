//! API key security configuration module

use serde::{Deserialize, Serialize};

/// API key authentication configuration
///
/// Callers authenticate with a static key in the `x-api-key` header.
/// Multiple keys are supported so consumers can rotate without downtime.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SecurityConfig {
    /// Accepted API keys
    pub api_keys: Vec<String>,
}

impl SecurityConfig {
    /// Create a configuration accepting the given keys
    pub fn new(api_keys: Vec<String>) -> Self {
        Self { api_keys }
    }

    /// Create from the comma-separated `API_KEYS` environment variable
    pub fn from_env() -> Self {
        let api_keys = std::env::var("API_KEYS")
            .map(|raw| {
                raw.split(',')
                    .map(|key| key.trim().to_string())
                    .filter(|key| !key.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self { api_keys }
    }

    /// Check a presented key against the configured set
    pub fn is_valid_key(&self, candidate: &str) -> bool {
        self.api_keys.iter().any(|key| key == candidate)
    }

    /// Whether any keys are configured at all
    pub fn has_keys(&self) -> bool {
        !self.api_keys.is_empty()
    }
}
