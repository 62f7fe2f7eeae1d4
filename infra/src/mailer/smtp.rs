//! SMTP mailer implementation
//!
//! Delivers mail through a STARTTLS relay using lettre's async
//! transport. Errors cross the `Mailer` boundary as plain strings; the
//! orchestrating service decides what clients get to see.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde_json::Value;
use tracing::{debug, error, info};

use mg_core::domain::value_objects::ActionKind;
use mg_core::errors::DomainError;
use mg_core::services::Mailer;
use mg_shared::config::SmtpConfig;
use mg_shared::utils::email::mask_email;

use super::templates;

/// SMTP delivery of verification and activation mail
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    code_expire_minutes: u64,
}

impl SmtpMailer {
    /// Build a mailer against a STARTTLS relay
    ///
    /// The relay is not contacted here; the first send or connection
    /// probe does that.
    ///
    /// # Arguments
    /// * `config` - SMTP relay settings and credentials
    /// * `code_expire_minutes` - Code lifetime quoted in verification mail
    pub fn new(config: &SmtpConfig, code_expire_minutes: u64) -> Result<Self, DomainError> {
        info!("Configuring SMTP relay {}:{}", config.host, config.port);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| {
                error!("Invalid SMTP relay configuration: {}", e);
                DomainError::transport(format!("invalid SMTP relay: {}", e))
            })?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.from_mailbox(),
            code_expire_minutes,
        })
    }

    fn build_message(&self, to: &str, subject: &str, body: String) -> Result<Message, String> {
        Message::builder()
            .from(self
                .from
                .parse()
                .map_err(|e| format!("invalid sender address: {}", e))?)
            .to(to
                .parse()
                .map_err(|e| format!("invalid recipient address: {}", e))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body)
            .map_err(|e| format!("failed to build message: {}", e))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_verification_code(
        &self,
        to: &str,
        code: &str,
        system: &str,
        _custom_data: Option<&Value>,
    ) -> Result<(), String> {
        let body = templates::verification_code_body(code, system, self.code_expire_minutes)
            .map_err(|e| format!("failed to render verification mail: {}", e))?;
        let subject = format!("Verification code for {}", system);
        let message = self.build_message(to, &subject, body)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("smtp send failed: {}", e))?;

        debug!(recipient = %mask_email(to), "Verification mail sent");
        Ok(())
    }

    async fn send_activation_link(
        &self,
        to: &str,
        url: &str,
        action: &ActionKind,
        system: &str,
        custom_data: Option<&Value>,
    ) -> Result<(), String> {
        let body = templates::activation_link_body(url, action, system, custom_data)
            .map_err(|e| format!("failed to render activation mail: {}", e))?;
        let message = self.build_message(to, &subject_for(action, system), body)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("smtp send failed: {}", e))?;

        debug!(
            recipient = %mask_email(to),
            action = action.as_str(),
            "Activation mail sent"
        );
        Ok(())
    }

    async fn test_connection(&self) -> Result<(), String> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("smtp relay refused the connection".to_string()),
            Err(e) => Err(format!("smtp connection failed: {}", e)),
        }
    }
}

/// Subject line for an activation action
fn subject_for(action: &ActionKind, system: &str) -> String {
    match action {
        ActionKind::Registration => format!("Activate your {} account", system),
        ActionKind::PasswordReset => format!("Reset your {} password", system),
        ActionKind::Other(_) => format!("Verify your email for {}", system),
    }
}
