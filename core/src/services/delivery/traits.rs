//! Outbound email transport trait

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::value_objects::ActionKind;

/// Outbound email transport
///
/// Implementations render and send the actual messages; the
/// orchestrator only decides what to send and when. Errors are plain
/// strings and the orchestrator wraps them into domain errors, so
/// transport internals never reach clients.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a verification code email
    ///
    /// # Arguments
    ///
    /// * `to` - Recipient address
    /// * `code` - Numeric code to present
    /// * `system` - System name shown in the subject and body
    /// * `custom_data` - Optional free-form template data
    async fn send_verification_code(
        &self,
        to: &str,
        code: &str,
        system: &str,
        custom_data: Option<&Value>,
    ) -> Result<(), String>;

    /// Send an activation link email
    ///
    /// # Arguments
    ///
    /// * `to` - Recipient address
    /// * `url` - Fully built activation URL including the token
    /// * `action` - Drives the subject line and body variant
    /// * `system` - System name shown in the subject and body
    /// * `custom_data` - Optional free-form template data
    async fn send_activation_link(
        &self,
        to: &str,
        url: &str,
        action: &ActionKind,
        system: &str,
        custom_data: Option<&Value>,
    ) -> Result<(), String>;

    /// Probe transport connectivity for health reporting
    async fn test_connection(&self) -> Result<(), String>;
}
