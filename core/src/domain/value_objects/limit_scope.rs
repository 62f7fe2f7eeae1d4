//! Identity scope for generation rate limiting.

use serde::{Deserialize, Serialize};

/// Which identity a rate-limit counter is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitScope {
    /// Counter keyed on the recipient email address
    Email,
    /// Counter keyed on the client IP address
    Ip,
}

impl LimitScope {
    /// Short label used in store keys and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            LimitScope::Email => "email",
            LimitScope::Ip => "ip",
        }
    }
}

impl std::fmt::Display for LimitScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
