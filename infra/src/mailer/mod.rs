//! Mailer module for outbound SMTP delivery
//!
//! Implements the core `Mailer` contract on top of lettre's async SMTP
//! transport. Mail bodies are HTML rendered from handlebars templates;
//! the wording and layout live in [`templates`], the transport concerns
//! in [`smtp`].

pub mod smtp;
pub mod templates;

pub use smtp::SmtpMailer;

// Re-export commonly used types
pub use mg_shared::config::SmtpConfig;
