//! Value objects representing immutable domain concepts.

pub mod action;
pub mod limit_scope;

// Re-export commonly used types
pub use action::ActionKind;
pub use limit_scope::LimitScope;
