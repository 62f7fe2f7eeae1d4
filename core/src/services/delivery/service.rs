//! Delivery orchestrator implementing the five request flows

use std::sync::Arc;

use serde_json::Value;

use mg_shared::utils::email::mask_email;

use crate::domain::entities::ActivationToken;
use crate::domain::value_objects::{ActionKind, LimitScope};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::KeyValueStore;
use crate::services::activation::{ActivationClaims, GeneratedActivation, TokenEngine};
use crate::services::clock::Clock;
use crate::services::random::SecureRandom;
use crate::services::rate_limit::{RateLimitStatus, RateLimiter};
use crate::services::verification::CodeEngine;

use super::config::DeliveryConfig;
use super::traits::Mailer;

/// Fallback link base for resends that do not carry one
const DEFAULT_RESEND_BASE_URL: &str = "http://localhost:3000";

/// Orchestrator for the code and activation delivery flows
///
/// Every send flow runs the same spine: rate-limit checks first, then
/// the engine mutation, then the email, and only after a confirmed send
/// the counter increments. A failed send rolls back freshly created
/// state (stored code, fresh token) and consumes no budget; reused
/// tokens are never rolled back because that would erase their resend
/// history.
///
/// Engine and store failures are logged here with their internals and
/// replaced by stable client-safe messages before they leave this
/// layer.
pub struct DeliveryService<S, C, R, M>
where
    S: KeyValueStore,
    C: Clock,
    R: SecureRandom,
    M: Mailer,
{
    codes: CodeEngine<S, C, R>,
    tokens: TokenEngine<S, C, R>,
    limiter: RateLimiter<S>,
    mailer: Arc<M>,
    config: DeliveryConfig,
}

impl<S, C, R, M> DeliveryService<S, C, R, M>
where
    S: KeyValueStore,
    C: Clock,
    R: SecureRandom,
    M: Mailer,
{
    /// Create a new delivery service
    ///
    /// # Arguments
    ///
    /// * `codes` - Verification code engine
    /// * `tokens` - Activation token engine
    /// * `limiter` - Fixed-window rate limiter
    /// * `mailer` - Outbound email transport
    /// * `config` - Orchestration tunables
    pub fn new(
        codes: CodeEngine<S, C, R>,
        tokens: TokenEngine<S, C, R>,
        limiter: RateLimiter<S>,
        mailer: Arc<M>,
        config: DeliveryConfig,
    ) -> Self {
        Self {
            codes,
            tokens,
            limiter,
            mailer,
            config,
        }
    }

    /// Issue a verification code and email it
    ///
    /// Flow: limits, generate, store, send. A failed send deletes the
    /// stored code and consumes no rate-limit budget.
    pub async fn send_code(
        &self,
        email: &str,
        system: Option<&str>,
        custom_data: Option<&Value>,
        client_ip: &str,
    ) -> DomainResult<()> {
        self.check_limits(email, client_ip).await?;

        let code = self.codes.generate().map_err(|e| {
            tracing::error!(error = %e, "Verification code generation failed");
            DomainError::Generation {
                message: "Failed to generate verification code".to_string(),
            }
        })?;

        let system = self.system_label(system);

        self.codes
            .store_code(email, &code, system)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    email = %mask_email(email),
                    "Storing verification code failed"
                );
                DomainError::transport("Failed to store verification code")
            })?;

        if let Err(e) = self
            .mailer
            .send_verification_code(email, &code, system, custom_data)
            .await
        {
            tracing::error!(
                error = %e,
                email = %mask_email(email),
                "Verification email send failed"
            );
            // The unsendable code must not stay redeemable.
            if let Err(cleanup) = self.codes.consume(email).await {
                tracing::warn!(error = %cleanup, "Failed to clean up unsent verification code");
            }
            return Err(DomainError::transport("Failed to send verification email"));
        }

        self.count_send(email, client_ip).await;

        tracing::info!(email = %mask_email(email), system, "Verification code sent");
        Ok(())
    }

    /// Verify a candidate code for an email
    pub async fn verify_code(&self, email: &str, candidate: &str) -> DomainResult<()> {
        self.codes
            .verify(email, candidate)
            .await
            .map_err(|e| match e {
                DomainError::Transport { .. } => {
                    tracing::error!(
                        error = %e,
                        email = %mask_email(email),
                        "Code verification failed"
                    );
                    DomainError::transport("Failed to verify code")
                }
                other => other,
            })
    }

    /// Issue or reuse an activation token and email its link
    ///
    /// Flow: limits, eligibility, mint-or-reuse, send. A failed send
    /// discards the token only when this request minted it.
    pub async fn send_activation(
        &self,
        email: &str,
        action: &ActionKind,
        base_url: &str,
        system: Option<&str>,
        custom_data: Option<&Value>,
        client_ip: &str,
    ) -> DomainResult<GeneratedActivation> {
        self.check_limits(email, client_ip).await?;

        // Probe the slot first so a later persistence failure can be
        // reported against the branch that actually ran.
        let reusing = self
            .tokens
            .check_resend_eligibility(email, action)
            .await
            .map_err(|e| match e {
                DomainError::ResendDenied(denial) => DomainError::ResendDenied(denial),
                other => {
                    tracing::error!(error = %other, "Resend eligibility check failed");
                    DomainError::transport("Failed to check resend eligibility")
                }
            })?
            .is_some();

        let system = self.system_label(system);
        let generated = self
            .tokens
            .generate(email, action, system)
            .await
            .map_err(|e| match e {
                DomainError::ResendDenied(denial) => DomainError::ResendDenied(denial),
                other => {
                    tracing::error!(error = %other, "Activation token persistence failed");
                    if reusing {
                        DomainError::transport("Failed to update activation token")
                    } else {
                        DomainError::transport("Failed to store activation token")
                    }
                }
            })?;

        let url = action.activation_url(base_url, &generated.token.token);

        if let Err(e) = self
            .mailer
            .send_activation_link(email, &url, action, system, custom_data)
            .await
        {
            tracing::error!(
                error = %e,
                email = %mask_email(email),
                "Activation email send failed"
            );
            if generated.freshly_created {
                if let Err(cleanup) = self.tokens.discard(&generated.token).await {
                    tracing::warn!(error = %cleanup, "Failed to discard unsent activation token");
                }
            }
            return Err(DomainError::transport("Failed to send activation email"));
        }

        self.count_send(email, client_ip).await;

        tracing::info!(
            email = %mask_email(email),
            action = %action,
            send_count = generated.token.send_count,
            "Activation email sent"
        );
        Ok(generated)
    }

    /// Resend the activation link for an existing live token
    ///
    /// Requires a live token; the send is never rolled back since the
    /// token predates this request.
    pub async fn resend_activation(
        &self,
        email: &str,
        action: &ActionKind,
        base_url: Option<&str>,
        system: Option<&str>,
        client_ip: &str,
    ) -> DomainResult<ActivationToken> {
        self.check_limits(email, client_ip).await?;

        let token = self.tokens.resend(email, action).await.map_err(|e| match e {
            DomainError::ResendDenied(denial) => DomainError::ResendDenied(denial),
            DomainError::NotFoundOrExpired { resource } => {
                DomainError::NotFoundOrExpired { resource }
            }
            other => {
                tracing::error!(error = %other, "Activation token update failed");
                DomainError::transport("Failed to update activation token")
            }
        })?;

        // The stored label wins; the request label and the default are
        // fallbacks for records that never carried one.
        let system = if token.system.is_empty() {
            self.system_label(system).to_string()
        } else {
            token.system.clone()
        };

        let base_url = match base_url {
            Some(base) if !base.is_empty() => base,
            _ => DEFAULT_RESEND_BASE_URL,
        };
        let url = action.activation_url(base_url, &token.token);

        if let Err(e) = self
            .mailer
            .send_activation_link(email, &url, action, &system, None)
            .await
        {
            tracing::error!(
                error = %e,
                email = %mask_email(email),
                "Activation email resend failed"
            );
            return Err(DomainError::transport("Failed to resend activation email"));
        }

        self.count_send(email, client_ip).await;

        tracing::info!(
            email = %mask_email(email),
            action = %action,
            send_count = token.send_count,
            "Activation email resent"
        );
        Ok(token)
    }

    /// Redeem an activation token by identifier
    pub async fn redeem_activation(&self, token_id: &str) -> DomainResult<ActivationClaims> {
        self.tokens.redeem(token_id).await.map_err(|e| match e {
            DomainError::Transport { .. } => {
                tracing::error!(error = %e, "Activation token redemption failed");
                DomainError::transport("Failed to verify activation token")
            }
            other => other,
        })
    }

    /// Run the IP check then the email check, read-only
    async fn check_limits(&self, email: &str, client_ip: &str) -> DomainResult<()> {
        let ip_status = self
            .limiter
            .check(LimitScope::Ip, client_ip)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "IP rate limit check failed");
                DomainError::transport("Failed to check IP rate limit")
            })?;
        if let RateLimitStatus::Exceeded { current, limit } = ip_status {
            return Err(DomainError::RateLimitExceeded {
                scope: LimitScope::Ip,
                current,
                limit,
            });
        }

        let email_status = self
            .limiter
            .check(LimitScope::Email, email)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Email rate limit check failed");
                DomainError::transport("Failed to check email rate limit")
            })?;
        if let RateLimitStatus::Exceeded { current, limit } = email_status {
            return Err(DomainError::RateLimitExceeded {
                scope: LimitScope::Email,
                current,
                limit,
            });
        }

        Ok(())
    }

    /// Count a confirmed send against both scopes
    ///
    /// Counter failures after a delivered email are logged, never
    /// surfaced.
    async fn count_send(&self, email: &str, client_ip: &str) {
        if let Err(e) = self.limiter.increment(LimitScope::Email, email).await {
            tracing::warn!(error = %e, "Failed to count email send");
        }
        if let Err(e) = self.limiter.increment(LimitScope::Ip, client_ip).await {
            tracing::warn!(error = %e, "Failed to count IP send");
        }
    }

    fn system_label<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(system) if !system.is_empty() => system,
            _ => &self.config.default_system_name,
        }
    }
}
