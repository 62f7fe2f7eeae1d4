//! Shared harness for the HTTP integration tests
//!
//! Boots the real application factory with in-memory fakes behind the
//! engine traits. The clock is shared between the store and the engines
//! so advancing it moves cooldowns, windows, and TTL eviction together.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::{test, web};
use async_trait::async_trait;
use serde_json::Value;

use mg_api::AppState;
use mg_core::domain::value_objects::ActionKind;
use mg_core::errors::DomainError;
use mg_core::repositories::KeyValueStore;
use mg_core::services::{
    Clock, CodeEngine, CodeEngineConfig, DeliveryConfig, DeliveryService, Mailer, OsRandom,
    RateLimiter, RateLimiterConfig, TokenEngine,
};
use mg_shared::config::{Environment, SecurityConfig};

/// API key every test app accepts
pub const API_KEY: &str = "test-key";

/// Fixed start instant so timestamps in assertions are predictable
pub const START_UNIX: i64 = 1_700_000_000;

/// Manually advanced clock shared by the store and the engines
pub struct TestClock {
    now: AtomicI64,
}

impl TestClock {
    pub fn new(start: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
        }
    }

    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for TestClock {
    fn now_unix(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

struct Entry {
    value: String,
    expires_at: Option<i64>,
}

/// In-memory [`KeyValueStore`] with clock-driven lazy expiry
pub struct TestStore {
    entries: Mutex<HashMap<String, Entry>>,
    clock: Arc<TestClock>,
    fail_all: AtomicBool,
}

impl TestStore {
    pub fn with_clock(clock: Arc<TestClock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            fail_all: AtomicBool::new(false),
        }
    }

    /// Make every operation fail with a transport error
    pub fn set_fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(DomainError::transport("test store failure injected"));
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

#[async_trait]
impl KeyValueStore for TestStore {
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
        let mut entries = self.entries.lock().unwrap();
        entries.remove(first_key);
        entries.remove(second_key);
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.check_available()
    }
}

/// Recording [`Mailer`] with failure injection
#[derive(Default)]
pub struct TestMailer {
    codes: Mutex<Vec<(String, String)>>,
    links: Mutex<Vec<(String, String)>>,
    fail_sends: AtomicBool,
    fail_connection: AtomicBool,
}

impl TestMailer {
    /// Last verification code delivered, if any
    pub fn last_code(&self) -> Option<String> {
        self.codes
            .lock()
            .unwrap()
            .last()
            .map(|(_, code)| code.clone())
    }

    /// Last activation URL delivered, if any
    pub fn last_link(&self) -> Option<String> {
        self.links.lock().unwrap().last().map(|(_, url)| url.clone())
    }

    pub fn sent_links(&self) -> usize {
        self.links.lock().unwrap().len()
    }

    /// Make both send methods fail
    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    /// Make the connectivity probe fail
    pub fn set_fail_connection(&self, fail: bool) {
        self.fail_connection.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for TestMailer {
    async fn send_verification_code(
        &self,
        to: &str,
        code: &str,
        _system: &str,
        _custom_data: Option<&Value>,
    ) -> Result<(), String> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err("smtp send refused".to_string());
        }
        self.codes
            .lock()
            .unwrap()
            .push((to.to_string(), code.to_string()));
        Ok(())
    }

    async fn send_activation_link(
        &self,
        to: &str,
        url: &str,
        _action: &ActionKind,
        _system: &str,
        _custom_data: Option<&Value>,
    ) -> Result<(), String> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err("smtp send refused".to_string());
        }
        self.links
            .lock()
            .unwrap()
            .push((to.to_string(), url.to_string()));
        Ok(())
    }

    async fn test_connection(&self) -> Result<(), String> {
        if self.fail_connection.load(Ordering::SeqCst) {
            return Err("smtp unreachable".to_string());
        }
        Ok(())
    }
}

/// Everything a test needs to drive and observe the app
pub struct Harness {
    pub state: web::Data<AppState<TestStore, TestClock, OsRandom, TestMailer>>,
    pub store: Arc<TestStore>,
    pub mailer: Arc<TestMailer>,
    pub clock: Arc<TestClock>,
}

/// Build application state with explicit rate limits and environment
pub fn build_state(environment: Environment, limits: RateLimiterConfig) -> Harness {
    let clock = Arc::new(TestClock::new(START_UNIX));
    let store = Arc::new(TestStore::with_clock(clock.clone()));
    let mailer = Arc::new(TestMailer::default());
    let random = Arc::new(OsRandom);

    let codes = CodeEngine::new(
        store.clone(),
        clock.clone(),
        random.clone(),
        CodeEngineConfig::new(6, 30),
    );
    let tokens = TokenEngine::new(store.clone(), clock.clone(), random);
    let limiter = RateLimiter::new(store.clone(), limits);
    let delivery = Arc::new(DeliveryService::new(
        codes,
        tokens,
        limiter,
        mailer.clone(),
        DeliveryConfig::new("MailGate"),
    ));

    let state = web::Data::new(AppState {
        delivery,
        store: store.clone(),
        mailer: mailer.clone(),
        environment,
    });

    Harness {
        state,
        store,
        mailer,
        clock,
    }
}

/// Development state with limits high enough to stay out of the way
pub fn default_state() -> Harness {
    build_state(Environment::Development, RateLimiterConfig::new(100, 100))
}

/// Security config accepting [`API_KEY`]
pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(vec![API_KEY.to_string()])
}

/// Authenticated POST with a JSON body
pub fn post_json(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .insert_header(("x-api-key", API_KEY))
        .set_json(body)
}
