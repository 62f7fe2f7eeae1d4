//! Activation token engine

use std::sync::Arc;

use mg_shared::utils::email::mask_email;

use crate::domain::entities::activation_token::{
    ActivationToken, MAX_SEND_COUNT, TOKEN_EXPIRY_MINUTES,
};
use crate::domain::value_objects::ActionKind;
use crate::errors::{DomainError, DomainResult, ResendDenial};
use crate::repositories::KeyValueStore;
use crate::services::clock::Clock;
use crate::services::random::SecureRandom;

use super::types::{ActivationClaims, GeneratedActivation};

/// Engine for issuing, resending, and redeeming activation tokens
///
/// Each (email, action) pair owns at most one live token. Requesting
/// another link while one is live reuses it, bumping its send
/// bookkeeping; the token identifier and absolute expiry never change
/// after creation. Generation and resend share one eligibility gate, so
/// neither path can sidestep the cooldown or the send cap.
pub struct TokenEngine<S: KeyValueStore, C: Clock, R: SecureRandom> {
    store: Arc<S>,
    clock: Arc<C>,
    random: Arc<R>,
}

impl<S: KeyValueStore, C: Clock, R: SecureRandom> TokenEngine<S, C, R> {
    /// Create a new token engine
    ///
    /// # Arguments
    ///
    /// * `store` - TTL-capable key-value store
    /// * `clock` - Time source for cooldown and expiry decisions
    /// * `random` - UUID source for token identifiers
    pub fn new(store: Arc<S>, clock: Arc<C>, random: Arc<R>) -> Self {
        Self {
            store,
            clock,
            random,
        }
    }

    /// Check whether another send is permitted for (email, action)
    ///
    /// The send cap is checked before the cooldown, so an exhausted
    /// token always reports [`ResendDenial::MaxSendsReached`] even while
    /// a cooldown is also running.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(token))` - A live token exists and may be sent again
    /// * `Ok(None)` - No live token; a fresh one may be created
    /// * `Err(DomainError::ResendDenied)` - Cap reached or cooldown running
    pub async fn check_resend_eligibility(
        &self,
        email: &str,
        action: &ActionKind,
    ) -> DomainResult<Option<ActivationToken>> {
        let Some(token) = self.fetch_by_email(email, action).await? else {
            return Ok(None);
        };

        if token.is_exhausted() {
            return Err(ResendDenial::MaxSendsReached {
                send_count: token.send_count,
                max_sends: MAX_SEND_COUNT,
            }
            .into());
        }

        if token.in_cooldown(self.clock.now_unix()) {
            return Err(ResendDenial::Cooldown {
                next_allowed_at: token.next_resend_at(),
            }
            .into());
        }

        Ok(Some(token))
    }

    /// Issue an activation token for (email, action)
    ///
    /// Reuses the live token when one exists, otherwise mints a fresh
    /// one and writes the record and its email index in one atomic
    /// batch sharing the full 30-minute TTL.
    pub async fn generate(
        &self,
        email: &str,
        action: &ActionKind,
        system: &str,
    ) -> DomainResult<GeneratedActivation> {
        if let Some(mut token) = self.check_resend_eligibility(email, action).await? {
            token.record_send(self.clock.now_unix());
            self.update(&token).await?;

            tracing::info!(
                email = %mask_email(email),
                action = %token.action,
                send_count = token.send_count,
                "Reusing live activation token"
            );
            return Ok(GeneratedActivation {
                token,
                freshly_created: false,
            });
        }

        let token = ActivationToken::new(
            self.random.uuid(),
            email,
            action.clone(),
            system,
            self.clock.now_unix(),
        );
        let payload = serde_json::to_string(&token).map_err(|e| {
            DomainError::transport(format!("failed to serialize activation token: {}", e))
        })?;

        self.store
            .set_pair(
                &token_key(&token.token),
                &payload,
                &email_key(email, action),
                &token.token,
                (TOKEN_EXPIRY_MINUTES * 60) as u64,
            )
            .await?;

        tracing::info!(
            email = %mask_email(email),
            action = %token.action,
            "Created activation token"
        );
        Ok(GeneratedActivation {
            token,
            freshly_created: true,
        })
    }

    /// Record another send for an existing live token
    ///
    /// # Returns
    ///
    /// * `Ok(token)` - The token after the send was recorded
    /// * `Err(DomainError::NotFoundOrExpired)` - No live token to resend
    /// * `Err(DomainError::ResendDenied)` - Cap reached or cooldown running
    pub async fn resend(&self, email: &str, action: &ActionKind) -> DomainResult<ActivationToken> {
        let Some(mut token) = self.check_resend_eligibility(email, action).await? else {
            return Err(DomainError::NotFoundOrExpired {
                resource: "activation token".to_string(),
            });
        };

        token.record_send(self.clock.now_unix());
        self.update(&token).await?;

        tracing::info!(
            email = %mask_email(email),
            action = %token.action,
            send_count = token.send_count,
            "Recorded activation resend"
        );
        Ok(token)
    }

    /// Redeem a token by identifier, burning it on success
    ///
    /// # Returns
    ///
    /// * `Ok(claims)` - Token was live; record and index are deleted
    /// * `Err(DomainError::NotFoundOrExpired)` - Unknown or evicted id
    /// * `Err(DomainError::TokenExpired)` - Past its absolute expiry;
    ///   the record is purged eagerly instead of waiting for the TTL
    pub async fn redeem(&self, token_id: &str) -> DomainResult<ActivationClaims> {
        let raw = self
            .store
            .get(&token_key(token_id))
            .await?
            .ok_or_else(|| DomainError::NotFoundOrExpired {
                resource: "activation token".to_string(),
            })?;
        let token: ActivationToken = serde_json::from_str(&raw).map_err(|e| {
            DomainError::transport(format!("corrupt activation token record: {}", e))
        })?;

        let primary = token_key(token_id);
        let index = email_key(&token.email, &token.action);

        if token.is_expired(self.clock.now_unix()) {
            if let Err(e) = self.store.delete_pair(&primary, &index).await {
                tracing::warn!(error = %e, "Failed to purge expired activation token");
            }
            return Err(DomainError::TokenExpired);
        }

        // Single use. A failed delete is logged and not surfaced; the TTL
        // finishes the cleanup.
        if let Err(e) = self.store.delete_pair(&primary, &index).await {
            tracing::warn!(error = %e, "Failed to delete redeemed activation token");
        }

        tracing::info!(
            email = %mask_email(&token.email),
            action = %token.action,
            "Activation token redeemed"
        );
        Ok(ActivationClaims {
            email: token.email,
            action: token.action,
            system: token.system,
        })
    }

    /// Remove a freshly created token after a failed send
    ///
    /// Clears the (email, action) slot so the next request mints a new
    /// token instead of inheriting send bookkeeping from one that never
    /// went out. Callers must not use this for reused tokens.
    pub async fn discard(&self, token: &ActivationToken) -> DomainResult<()> {
        self.store
            .delete_pair(
                &token_key(&token.token),
                &email_key(&token.email, &token.action),
            )
            .await
    }

    async fn fetch_by_email(
        &self,
        email: &str,
        action: &ActionKind,
    ) -> DomainResult<Option<ActivationToken>> {
        let Some(token_id) = self.store.get(&email_key(email, action)).await? else {
            return Ok(None);
        };
        let Some(raw) = self.store.get(&token_key(&token_id)).await? else {
            // The index outlived its record; treat the slot as free.
            return Ok(None);
        };
        let token = serde_json::from_str(&raw).map_err(|e| {
            DomainError::transport(format!("corrupt activation token record: {}", e))
        })?;
        Ok(Some(token))
    }

    /// Rewrite the primary record under its remaining TTL
    ///
    /// The email index is untouched: it still maps to the same token id
    /// and its own TTL keeps running. Expiry is absolute, so the write
    /// must not restart the clock.
    async fn update(&self, token: &ActivationToken) -> DomainResult<()> {
        let key = token_key(&token.token);
        let ttl = match self.store.ttl_remaining(&key).await? {
            Some(ttl) if ttl > 0 => ttl,
            // The record vanished between read and write.
            _ => return Err(DomainError::TokenExpired),
        };

        let payload = serde_json::to_string(token).map_err(|e| {
            DomainError::transport(format!("failed to serialize activation token: {}", e))
        })?;
        self.store.set(&key, &payload, ttl as u64).await
    }
}

/// Primary record key for a token id
fn token_key(token: &str) -> String {
    format!("activation:token:{}", token)
}

/// Secondary index key mapping (email, action) to the live token id
fn email_key(email: &str, action: &ActionKind) -> String {
    format!("activation:email:{}:{}", email, action.as_str())
}
