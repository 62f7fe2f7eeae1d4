//! Domain-specific error types and error handling.

mod domain_error;

// Re-export all error types and utilities
pub use domain_error::{DomainError, DomainResult, ResendDenial};
