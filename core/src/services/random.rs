//! Cryptographically secure randomness for codes and token identifiers
//!
//! Both the numeric verification codes and the activation token UUIDs
//! come from this trait so tests can script exact values.

use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// Source of cryptographically secure random material
pub trait SecureRandom: Send + Sync {
    /// Generate a string of `length` uniformly distributed decimal digits
    ///
    /// # Returns
    ///
    /// * `Ok(digits)` - The generated code
    /// * `Err(DomainError::Generation)` - The system entropy source failed
    fn digits(&self, length: usize) -> DomainResult<String>;

    /// Generate a fresh opaque token identifier
    fn uuid(&self) -> String;
}

/// Production source backed by the operating system CSPRNG
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl SecureRandom for OsRandom {
    fn digits(&self, length: usize) -> DomainResult<String> {
        let mut rng = OsRng;
        let mut digits = String::with_capacity(length);
        let mut buf = [0u8; 32];

        while digits.len() < length {
            rng.try_fill_bytes(&mut buf)
                .map_err(|e| DomainError::Generation {
                    message: format!("system random source unavailable: {}", e),
                })?;

            for byte in buf {
                // 250..=255 are rejected so each digit stays equally likely.
                if byte < 250 {
                    digits.push(char::from(b'0' + byte % 10));
                    if digits.len() == length {
                        break;
                    }
                }
            }
        }

        Ok(digits)
    }

    fn uuid(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Scripted random source for tests
///
/// Pops pre-loaded values; falls back to a deterministic pattern once
/// the script runs dry.
#[cfg(test)]
pub struct MockRandom {
    digits: std::sync::Mutex<std::collections::VecDeque<String>>,
    uuids: std::sync::Mutex<std::collections::VecDeque<String>>,
    fail_digits: std::sync::atomic::AtomicBool,
    uuid_counter: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockRandom {
    pub fn new() -> Self {
        Self {
            digits: std::sync::Mutex::new(std::collections::VecDeque::new()),
            uuids: std::sync::Mutex::new(std::collections::VecDeque::new()),
            fail_digits: std::sync::atomic::AtomicBool::new(false),
            uuid_counter: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn push_digits(&self, value: &str) {
        self.digits.lock().unwrap().push_back(value.to_string());
    }

    pub fn push_uuid(&self, value: &str) {
        self.uuids.lock().unwrap().push_back(value.to_string());
    }

    pub fn set_fail_digits(&self, fail: bool) {
        self.fail_digits
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
impl SecureRandom for MockRandom {
    fn digits(&self, length: usize) -> DomainResult<String> {
        if self.fail_digits.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(DomainError::Generation {
                message: "scripted generation failure".to_string(),
            });
        }
        if let Some(scripted) = self.digits.lock().unwrap().pop_front() {
            return Ok(scripted);
        }
        Ok("0123456789".chars().cycle().take(length).collect())
    }

    fn uuid(&self) -> String {
        if let Some(scripted) = self.uuids.lock().unwrap().pop_front() {
            return scripted;
        }
        let n = self
            .uuid_counter
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        format!("mock-uuid-{}", n)
    }
}
