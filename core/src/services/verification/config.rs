//! Configuration for the code engine

use crate::domain::entities::verification_code::{DEFAULT_CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES};

/// Tunables for verification code issuance
#[derive(Debug, Clone)]
pub struct CodeEngineConfig {
    /// Number of decimal digits in a generated code
    pub code_length: usize,
    /// Minutes before a stored code expires
    pub expire_minutes: i64,
}

impl CodeEngineConfig {
    pub fn new(code_length: usize, expire_minutes: i64) -> Self {
        Self {
            code_length,
            expire_minutes,
        }
    }

    /// Stored-code TTL in seconds
    pub fn expire_seconds(&self) -> u64 {
        (self.expire_minutes * 60).max(0) as u64
    }
}

impl Default for CodeEngineConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            expire_minutes: DEFAULT_EXPIRATION_MINUTES,
        }
    }
}
