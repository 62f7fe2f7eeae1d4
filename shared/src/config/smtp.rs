//! SMTP delivery configuration module

use serde::{Deserialize, Serialize};

/// Outbound mail configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// SMTP relay host
    pub host: String,

    /// SMTP relay port (587 for STARTTLS)
    pub port: u16,

    /// Account username, also used as the from address
    pub username: String,

    /// Account password or app password
    pub password: String,

    /// Display name on outgoing mail
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::from("smtp.gmail.com"),
            port: 587,
            username: String::new(),
            password: String::new(),
            from_name: default_from_name(),
        }
    }
}

impl SmtpConfig {
    /// Create from `SMTP_*` environment variables
    pub fn from_env() -> Self {
        let host = std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let port = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .unwrap_or(587);
        let username = std::env::var("SMTP_USERNAME").unwrap_or_default();
        let password = std::env::var("SMTP_PASSWORD").unwrap_or_default();
        let from_name = std::env::var("SMTP_FROM_NAME").unwrap_or_else(|_| default_from_name());

        Self {
            host,
            port,
            username,
            password,
            from_name,
        }
    }

    /// Whether credentials were provided
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Sender mailbox in `Name <address>` form
    pub fn from_mailbox(&self) -> String {
        format!("{} <{}>", self.from_name, self.username)
    }
}

fn default_from_name() -> String {
    String::from("MailGate System")
}
