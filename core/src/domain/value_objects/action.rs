//! Action kind attached to an activation token.

use serde::{Deserialize, Serialize};

/// What an activation link is for
///
/// `registration` and `password_reset` get dedicated landing pages;
/// anything else falls back to a generic verify page. Unknown strings are
/// preserved rather than rejected so new actions do not require a
/// lock-step deploy of this service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    Registration,
    PasswordReset,
    Other(String),
}

impl ActionKind {
    /// Wire and storage representation of the action
    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::Registration => "registration",
            ActionKind::PasswordReset => "password_reset",
            ActionKind::Other(name) => name,
        }
    }

    /// Build the front-end landing URL for this action
    ///
    /// A trailing slash on `base_url` is trimmed so callers can pass
    /// either form.
    pub fn activation_url(&self, base_url: &str, token: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            ActionKind::Registration => format!("{}/activate?token={}", base, token),
            ActionKind::PasswordReset => format!("{}/reset-password?token={}", base, token),
            ActionKind::Other(_) => format!("{}/verify?token={}", base, token),
        }
    }
}

impl From<String> for ActionKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "registration" => ActionKind::Registration,
            "password_reset" => ActionKind::PasswordReset,
            _ => ActionKind::Other(value),
        }
    }
}

impl From<&str> for ActionKind {
    fn from(value: &str) -> Self {
        ActionKind::from(value.to_string())
    }
}

impl From<ActionKind> for String {
    fn from(value: ActionKind) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
