//! In-memory store used by engine unit tests
//!
//! TTL eviction is driven by a [`Clock`] rather than wall time so tests
//! can jump across cooldowns, windows, and expiries instantly.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::errors::DomainError;
use crate::services::clock::{Clock, SystemClock};

use super::KeyValueStore;

struct Entry {
    value: String,
    expires_at: Option<i64>,
}

/// In-memory [`KeyValueStore`] with lazy expiry and failure injection
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
    fail_all: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            fail_all: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
        }
    }

    /// Make every operation fail with a transport error
    pub fn set_fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Make only `delete` and `delete_pair` fail
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(DomainError::transport("memory store failure injected"));
        }
        Ok(())
    }

    fn check_deletes(&self) -> Result<(), DomainError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(DomainError::transport("memory store delete failure injected"));
        }
        Ok(())
    }

    fn purge_expired(entries: &mut HashMap<String, Entry>, key: &str, now: i64) {
        let expired = entries
            .get(key)
            .map_or(false, |e| e.expires_at.map_or(false, |at| now >= at));
        if expired {
            entries.remove(key);
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.check_available()?;
        let now = self.clock.now_unix();
        let mut entries = self.entries.lock().unwrap();
        Self::purge_expired(&mut entries, key, now);
        Ok(entries.get(key).map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        self.check_available()?;
        let now = self.clock.now_unix();
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Some(now + ttl_seconds as i64),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        self.check_deletes()?;
        let now = self.clock.now_unix();
        let mut entries = self.entries.lock().unwrap();
        Self::purge_expired(&mut entries, key, now);
        Ok(entries.remove(key).is_some())
    }

    async fn ttl_remaining(&self, key: &str) -> Result<Option<i64>, DomainError> {
        self.check_available()?;
        let now = self.clock.now_unix();
        let mut entries = self.entries.lock().unwrap();
        Self::purge_expired(&mut entries, key, now);
        Ok(entries
            .get(key)
            .and_then(|e| e.expires_at)
            .map(|at| at - now))
    }

    async fn incr_and_expire(&self, key: &str, window_seconds: u64) -> Result<u64, DomainError> {
        self.check_available()?;
        let now = self.clock.now_unix();
        let mut entries = self.entries.lock().unwrap();
        Self::purge_expired(&mut entries, key, now);

        match entries.get_mut(key) {
            None => {
                entries.insert(
                    key.to_string(),
                    Entry {
                        value: "1".to_string(),
                        expires_at: Some(now + window_seconds as i64),
                    },
                );
                Ok(1)
            }
            Some(entry) => {
                let current: u64 = entry
                    .value
                    .parse()
                    .map_err(|_| DomainError::transport("counter value is not an integer"))?;
                let next = current + 1;
                entry.value = next.to_string();
                // Expiry is only armed when missing, never extended.
                if entry.expires_at.is_none() {
                    entry.expires_at = Some(now + window_seconds as i64);
                }
                Ok(next)
            }
        }
    }

    async fn set_pair(
        &self,
        first_key: &str,
        first_value: &str,
        second_key: &str,
        second_value: &str,
        ttl_seconds: u64,
    ) -> Result<(), DomainError> {
        self.check_available()?;
        let now = self.clock.now_unix();
        let expires_at = Some(now + ttl_seconds as i64);
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            first_key.to_string(),
            Entry {
                value: first_value.to_string(),
                expires_at,
            },
        );
        entries.insert(
            second_key.to_string(),
            Entry {
                value: second_value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete_pair(&self, first_key: &str, second_key: &str) -> Result<(), DomainError> {
        self.check_available()?;
        self.check_deletes()?;
        let mut entries = self.entries.lock().unwrap();
        entries.remove(first_key);
        entries.remove(second_key);
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.check_available()
    }
}
