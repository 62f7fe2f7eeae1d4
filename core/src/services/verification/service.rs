//! Verification code engine

use std::sync::Arc;

use constant_time_eq::constant_time_eq;

use mg_shared::utils::email::mask_email;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::KeyValueStore;
use crate::services::clock::Clock;
use crate::services::random::SecureRandom;

use super::config::CodeEngineConfig;

/// Engine for issuing and redeeming numeric verification codes
///
/// At most one live code exists per email: issuing again overwrites the
/// previous record and restarts its TTL. Redemption is single-use, the
/// record is deleted on the first successful match and kept on a
/// mismatch so the owner can retry until the TTL runs out.
pub struct CodeEngine<S: KeyValueStore, C: Clock, R: SecureRandom> {
    store: Arc<S>,
    clock: Arc<C>,
    random: Arc<R>,
    config: CodeEngineConfig,
}

impl<S: KeyValueStore, C: Clock, R: SecureRandom> CodeEngine<S, C, R> {
    /// Create a new code engine
    ///
    /// # Arguments
    ///
    /// * `store` - TTL-capable key-value store
    /// * `clock` - Time source for creation timestamps
    /// * `random` - Cryptographically secure digit source
    /// * `config` - Code length and expiry tunables
    pub fn new(store: Arc<S>, clock: Arc<C>, random: Arc<R>, config: CodeEngineConfig) -> Self {
        Self {
            store,
            clock,
            random,
            config,
        }
    }

    /// Generate a fresh numeric code of the configured length
    pub fn generate(&self) -> DomainResult<String> {
        self.random.digits(self.config.code_length)
    }

    /// Persist a code for an email, replacing any previous one
    ///
    /// # Returns
    ///
    /// The stored record, including its creation timestamp.
    pub async fn store_code(
        &self,
        email: &str,
        code: &str,
        system: &str,
    ) -> DomainResult<VerificationCode> {
        let record = VerificationCode::new(code, email, system, self.clock.now_unix());
        let payload = serde_json::to_string(&record).map_err(|e| {
            DomainError::transport(format!("failed to serialize code record: {}", e))
        })?;

        self.store
            .set(&code_key(email), &payload, self.config.expire_seconds())
            .await?;

        tracing::info!(
            email = %mask_email(email),
            expire_minutes = self.config.expire_minutes,
            "Stored verification code"
        );
        Ok(record)
    }

    /// Fetch the live code record for an email
    ///
    /// # Returns
    ///
    /// * `Ok(record)` - A live code exists
    /// * `Err(DomainError::NotFoundOrExpired)` - No code stored, or the
    ///   TTL already evicted it; the two are indistinguishable
    pub async fn fetch(&self, email: &str) -> DomainResult<VerificationCode> {
        let raw = self
            .store
            .get(&code_key(email))
            .await?
            .ok_or_else(|| DomainError::NotFoundOrExpired {
                resource: "verification code".to_string(),
            })?;

        serde_json::from_str(&raw)
            .map_err(|e| DomainError::transport(format!("corrupt code record: {}", e)))
    }

    /// Drop the live code for an email, if any
    ///
    /// Idempotent; consuming an absent code is not an error.
    pub async fn consume(&self, email: &str) -> DomainResult<()> {
        self.store.delete(&code_key(email)).await?;
        Ok(())
    }

    /// Verify a candidate code and burn the record on success
    ///
    /// The comparison is byte-exact and constant-time; no trimming or
    /// case folding. On a mismatch the stored record stays untouched.
    pub async fn verify(&self, email: &str, candidate: &str) -> DomainResult<()> {
        let record = self.fetch(email).await?;

        if !constant_time_compare(&record.code, candidate) {
            tracing::warn!(email = %mask_email(email), "Verification code mismatch");
            return Err(DomainError::CodeMismatch);
        }

        // Single use. A failed delete is logged and not surfaced; the TTL
        // finishes the cleanup.
        if let Err(e) = self.store.delete(&code_key(email)).await {
            tracing::warn!(
                email = %mask_email(email),
                error = %e,
                "Failed to delete verification code after successful match"
            );
        }

        tracing::info!(email = %mask_email(email), "Verification code accepted");
        Ok(())
    }
}

/// Storage key for the live code of an email address
fn code_key(email: &str) -> String {
    format!("verify:{}", email)
}

/// Constant-time equality with a length guard
///
/// Length differences short-circuit; the length of a code is not secret.
fn constant_time_compare(stored: &str, candidate: &str) -> bool {
    if stored.len() != candidate.len() {
        return false;
    }
    constant_time_eq(stored.as_bytes(), candidate.as_bytes())
}
