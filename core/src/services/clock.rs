//! Clock abstraction for time-dependent engine logic
//!
//! Cooldowns, absolute expiry checks, and TTL calculations all read the
//! current time through this trait so tests can drive them
//! deterministically instead of sleeping.

use chrono::Utc;

/// Source of the current time as unix seconds
pub trait Clock: Send + Sync {
    /// Seconds since the unix epoch
    fn now_unix(&self) -> i64;
}

/// Production clock backed by the system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Manually advanced clock for tests
#[cfg(test)]
pub struct MockClock {
    now: std::sync::atomic::AtomicI64,
}

#[cfg(test)]
impl MockClock {
    pub fn new(start: i64) -> Self {
        Self {
            now: std::sync::atomic::AtomicI64::new(start),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: i64) {
        self.now
            .fetch_add(seconds, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
impl Clock for MockClock {
    fn now_unix(&self) -> i64 {
        self.now.load(std::sync::atomic::Ordering::SeqCst)
    }
}
