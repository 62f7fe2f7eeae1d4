//! Fixed-window rate limiter

use std::sync::Arc;

use crate::domain::value_objects::LimitScope;
use crate::errors::DomainResult;
use crate::repositories::KeyValueStore;

use super::config::RateLimiterConfig;

/// Outcome of a rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitStatus {
    /// Under the ceiling, with the count seen so far
    Allowed { current: u32 },
    /// At or over the ceiling
    Exceeded { current: u32, limit: u32 },
}

impl RateLimitStatus {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitStatus::Allowed { .. })
    }
}

/// Fixed-window counters per email address and per client IP
///
/// `check` is read-only so a denied request consumes no budget;
/// `increment` counts one confirmed action. The counter's expiry is
/// armed by its first increment and later increments never extend it,
/// so every window is exactly one configured interval long.
pub struct RateLimiter<S: KeyValueStore> {
    store: Arc<S>,
    config: RateLimiterConfig,
}

impl<S: KeyValueStore> RateLimiter<S> {
    pub fn new(store: Arc<S>, config: RateLimiterConfig) -> Self {
        Self { store, config }
    }

    /// Read a counter and compare it against its ceiling
    ///
    /// A missing or unreadable counter reads as zero.
    pub async fn check(&self, scope: LimitScope, identity: &str) -> DomainResult<RateLimitStatus> {
        let current = match self.store.get(&counter_key(scope, identity)).await? {
            Some(raw) => raw.parse::<u32>().unwrap_or(0),
            None => 0,
        };

        let limit = self.ceiling(scope);
        if current < limit {
            Ok(RateLimitStatus::Allowed { current })
        } else {
            tracing::warn!(scope = %scope, current, limit, "Rate limit ceiling reached");
            Ok(RateLimitStatus::Exceeded { current, limit })
        }
    }

    /// Count one confirmed send against (scope, identity)
    ///
    /// # Returns
    ///
    /// The counter value after this increment.
    pub async fn increment(&self, scope: LimitScope, identity: &str) -> DomainResult<u64> {
        self.store
            .incr_and_expire(&counter_key(scope, identity), self.config.window_seconds)
            .await
    }

    fn ceiling(&self, scope: LimitScope) -> u32 {
        match scope {
            LimitScope::Email => self.config.email_per_hour,
            LimitScope::Ip => self.config.ip_per_hour,
        }
    }
}

/// Counter key for (scope, identity)
fn counter_key(scope: LimitScope, identity: &str) -> String {
    format!("genlimit:{}:{}", scope.as_str(), identity)
}
