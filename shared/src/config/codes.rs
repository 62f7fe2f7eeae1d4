//! Verification code configuration module

use serde::{Deserialize, Serialize};

/// Verification code generation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CodeConfig {
    /// Code and activation token lifetime in minutes
    pub expire_minutes: u64,

    /// Number of digits in a generated code
    pub length: usize,

    /// System name used in mail when the caller does not supply one
    pub default_system_name: String,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            expire_minutes: 30,
            length: 6,
            default_system_name: String::from("MailGate"),
        }
    }
}

impl CodeConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let expire_minutes = std::env::var("CODE_EXPIRE_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);
        let length = std::env::var("CODE_LENGTH")
            .unwrap_or_else(|_| "6".to_string())
            .parse()
            .unwrap_or(6);
        let default_system_name =
            std::env::var("DEFAULT_SYSTEM_NAME").unwrap_or_else(|_| "MailGate".to_string());

        Self {
            expire_minutes,
            length,
            default_system_name,
        }
    }

    /// Code lifetime in seconds
    pub fn expire_seconds(&self) -> u64 {
        self.expire_minutes * 60
    }
}
