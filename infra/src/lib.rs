//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for MailGate. It holds
//! the concrete adapters behind the core service traits: the Redis
//! key-value store that backs verification codes, activation tokens and
//! rate-limit counters, and the SMTP mailer that delivers the mail.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Store**: Redis implementation of the `KeyValueStore` contract
//! - **Mailer**: SMTP delivery with HTML bodies rendered from templates
//!
//! No business rules live here. Expiry, cooldown and limit decisions all
//! belong to `mg_core`; these types only talk to the outside world and
//! translate its failures into domain transport errors.

/// Mailer module - SMTP delivery and mail templates
pub mod mailer;

/// Store module - Redis implementation of the key-value store
pub mod store;

pub use mailer::SmtpMailer;
pub use store::RedisStore;
