//! Email delivery adapters
//!
//! - [`ResendEmailService`] sends through the Resend HTTP API
//! - [`ConsoleEmailService`] prints codes for local development
//!
//! [`create_email_service`] picks one from [`EmailConfig`].

use async_trait::async_trait;

use cafe_core::services::verification::{ChannelError, EmailChannelTrait};
use cafe_shared::config::{EmailConfig, Environment};

use crate::InfrastructureError;

pub mod console_email;
pub mod resend_email;
pub mod template;

pub use console_email::{ConsoleEmailService, SentEmail};
pub use resend_email::ResendEmailService;

#[cfg(test)]
mod tests;

/// Email channel selected at startup
#[derive(Clone)]
pub enum EmailService {
    Resend(ResendEmailService),
    Console(ConsoleEmailService),
}

impl EmailService {
    pub fn provider_name(&self) -> &'static str {
        match self {
            EmailService::Resend(_) => "resend",
            EmailService::Console(_) => "console",
        }
    }
}

#[async_trait]
impl EmailChannelTrait for EmailService {
    async fn send_verification_code(
        &self,
        to: &str,
        recipient_name: &str,
        code: &str,
    ) -> Result<(), ChannelError> {
        match self {
            EmailService::Resend(service) => {
                service.send_verification_code(to, recipient_name, code).await
            }
            EmailService::Console(service) => {
                service.send_verification_code(to, recipient_name, code).await
            }
        }
    }
}

/// Build the email channel named by `config.provider`.
///
/// Production refuses the console sender and a Resend setup without an API
/// key. Other environments fall back to the console sender with a warning.
pub fn create_email_service(
    config: &EmailConfig,
    environment: Environment,
    code_ttl_minutes: i64,
) -> Result<EmailService, InfrastructureError> {
    match config.provider.as_str() {
        "resend" => match ResendEmailService::new(config, code_ttl_minutes) {
            Ok(service) => Ok(EmailService::Resend(service)),
            Err(e) if environment.allows_console_channels() => {
                tracing::warn!(error = %e, "Resend email not configured, using console sender");
                Ok(EmailService::Console(ConsoleEmailService::new()))
            }
            Err(e) => Err(e),
        },
        "console" if environment.allows_console_channels() => {
            Ok(EmailService::Console(ConsoleEmailService::new()))
        }
        "console" => Err(InfrastructureError::Config(format!(
            "Console email sender is not allowed in {}",
            environment
        ))),
        other => Err(InfrastructureError::Config(format!(
            "Unknown email provider '{}'",
            other
        ))),
    }
}
