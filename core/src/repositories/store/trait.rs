//! Key-value store trait defining the persistence interface for all engines.

use async_trait::async_trait;

use crate::errors::DomainError;

/// TTL-capable key-value store contract
///
/// The store is the single source of truth: every read and write
/// round-trips through it, there is no in-process caching, so stateless
/// request handlers can scale horizontally. Implementations provide
/// per-key linearizability and atomicity for the batched operations
/// (`set_pair`, `delete_pair`, `incr_and_expire`); nothing is guaranteed
/// across independent calls.
///
/// Implementations may retry transient connection failures internally,
/// but callers treat every error as terminal for the current request.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    ///
    /// # Arguments
    /// * `key` - The key to read
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Key exists and has not expired
    /// * `Ok(None)` - Key absent or already evicted by TTL; the two cases
    ///   are indistinguishable by design
    /// * `Err(DomainError)` - Store unreachable
    ///
    /// # Example
    /// ```no_run
    /// # use mg_core::repositories::KeyValueStore;
    /// # async fn example(store: &impl KeyValueStore) -> Result<(), Box<dyn std::error::Error>> {
    /// match store.get("verify:user@example.com").await? {
    ///     Some(json) => println!("live code record: {}", json),
    ///     None => println!("no live code"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Write a value with an expiry
    ///
    /// Overwrites any existing value and replaces its TTL.
    ///
    /// # Arguments
    /// * `key` - The key to write
    /// * `value` - Serialized payload
    /// * `ttl_seconds` - Lifetime; the store evicts the key afterwards
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError>;

    /// Delete a key
    ///
    /// Idempotent; deleting an absent key is not an error.
    ///
    /// # Returns
    /// * `Ok(true)` - A key was removed
    /// * `Ok(false)` - Nothing to remove
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Remaining lifetime of a key in seconds
    ///
    /// # Returns
    /// * `Ok(Some(seconds))` - Key exists with an expiry
    /// * `Ok(None)` - Key absent, or exists without an expiry
    async fn ttl_remaining(&self, key: &str) -> Result<Option<i64>, DomainError>;

    /// Atomically increment a counter, arming its expiry on first use
    ///
    /// The increment and the conditional expiry must execute as one
    /// indivisible unit so a crash between them can never leave a
    /// non-expiring counter. Subsequent increments within the window do
    /// not extend it.
    ///
    /// # Arguments
    /// * `key` - Counter key
    /// * `window_seconds` - Window length armed on the first increment
    ///
    /// # Returns
    /// * `Ok(count)` - The counter value after this increment
    async fn incr_and_expire(&self, key: &str, window_seconds: u64) -> Result<u64, DomainError>;

    /// Atomically write two keys with one shared expiry
    ///
    /// Used for a record and its secondary index, which must never be
    /// observable in a half-written state.
    ///
    /// # Example
    /// ```no_run
    /// # use mg_core::repositories::KeyValueStore;
    /// # async fn example(store: &impl KeyValueStore) -> Result<(), Box<dyn std::error::Error>> {
    /// store
    ///     .set_pair(
    ///         "activation:token:3f1e2d4c",
    ///         "{\"token\":\"3f1e2d4c\"}",
    ///         "activation:email:user@example.com:registration",
    ///         "3f1e2d4c",
    ///         1800,
    ///     )
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    async fn set_pair(
        &self,
        first_key: &str,
        first_value: &str,
        second_key: &str,
        second_value: &str,
        ttl_seconds: u64,
    ) -> Result<(), DomainError>;

    /// Atomically delete two keys
    ///
    /// Idempotent like [`KeyValueStore::delete`].
    async fn delete_pair(&self, first_key: &str, second_key: &str) -> Result<(), DomainError>;

    /// Liveness probe against the store
    async fn ping(&self) -> Result<(), DomainError>;
}
