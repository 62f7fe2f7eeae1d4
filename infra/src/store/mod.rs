//! Store module for Redis-backed persistence
//!
//! This module implements the core `KeyValueStore` contract on top of a
//! multiplexed Redis connection, including retry logic for transient
//! connection failures.

pub mod redis;

pub use redis::RedisStore;

// Re-export commonly used types
pub use mg_shared::config::StoreConfig;
