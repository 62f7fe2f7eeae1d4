//! Inbound request bodies
//!
//! Field names follow the established wire contract: snake_case except
//! `customData` and `baseUrl`, which existing consumers already send in
//! camelCase.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use mg_core::domain::value_objects::ActionKind;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateCodeRequest {
    #[validate(email)]
    pub email: String,

    /// System label shown in the delivery email; server default applies
    pub system: Option<String>,

    /// Free-form object forwarded to the email template
    #[serde(rename = "customData")]
    pub custom_data: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateActivationRequest {
    #[validate(email)]
    pub email: String,

    /// What the link activates: "registration", "password_reset", or a
    /// consumer-defined action
    #[validate(custom = "action_present")]
    pub action: ActionKind,

    /// Front-end base the activation link points at
    #[serde(rename = "baseUrl")]
    #[validate(url, custom = "http_base_url")]
    pub base_url: String,

    pub system: Option<String>,

    #[serde(rename = "customData")]
    pub custom_data: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyActivationRequest {
    #[validate(length(min = 1))]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendActivationRequest {
    #[validate(email)]
    pub email: String,

    #[validate(custom = "action_present")]
    pub action: ActionKind,

    /// Optional; the server falls back to its configured default
    #[serde(rename = "baseUrl")]
    pub base_url: Option<String>,

    pub system: Option<String>,
}

/// Reject an action that deserialized from an empty or blank string
fn action_present(action: &ActionKind) -> Result<(), ValidationError> {
    if action.as_str().trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Require an http(s) base for the activation link
///
/// The url check alone admits any scheme, including schemeless forms
/// like `http:host` that the WHATWG parser repairs.
fn http_base_url(base_url: &str) -> Result<(), ValidationError> {
    if base_url.starts_with("http://") || base_url.starts_with("https://") {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}
