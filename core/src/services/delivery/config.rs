//! Configuration for the delivery orchestrator

/// Tunables for request orchestration
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// System label used when a request does not name one
    pub default_system_name: String,
}

impl DeliveryConfig {
    pub fn new(default_system_name: impl Into<String>) -> Self {
        Self {
            default_system_name: default_system_name.into(),
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self::new("MailGate")
    }
}
