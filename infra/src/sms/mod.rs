//! Phone verification adapters
//!
//! The provider owns phone codes end to end: generation, SMS delivery,
//! expiry and attempt limits. Adapters here only start sessions and check
//! submitted codes.
//!
//! - [`TwilioVerifyService`] talks to Twilio Verify v2
//! - [`MockPhoneVerificationService`] keeps sessions in process for development

use async_trait::async_trait;

use cafe_core::services::verification::{ChannelError, PhoneChannelTrait, PhoneCheckStatus};
use cafe_shared::config::{Environment, PhoneVerificationConfig};

use crate::InfrastructureError;

pub mod mock_phone;
pub mod twilio_verify;

pub use mock_phone::MockPhoneVerificationService;
pub use twilio_verify::TwilioVerifyService;

#[cfg(test)]
mod tests;

/// Phone verification channel selected at startup
#[derive(Clone)]
pub enum PhoneVerificationService {
    Twilio(TwilioVerifyService),
    Mock(MockPhoneVerificationService),
}

impl PhoneVerificationService {
    pub fn provider_name(&self) -> &'static str {
        match self {
            PhoneVerificationService::Twilio(_) => "twilio",
            PhoneVerificationService::Mock(_) => "mock",
        }
    }
}

#[async_trait]
impl PhoneChannelTrait for PhoneVerificationService {
    async fn start_verification(&self, phone: &str) -> Result<(), ChannelError> {
        match self {
            PhoneVerificationService::Twilio(service) => service.start_verification(phone).await,
            PhoneVerificationService::Mock(service) => service.start_verification(phone).await,
        }
    }

    async fn check_verification(
        &self,
        phone: &str,
        code: &str,
    ) -> Result<PhoneCheckStatus, ChannelError> {
        match self {
            PhoneVerificationService::Twilio(service) => {
                service.check_verification(phone, code).await
            }
            PhoneVerificationService::Mock(service) => {
                service.check_verification(phone, code).await
            }
        }
    }
}

/// Build the phone verification channel named by `config.provider`.
///
/// Production refuses the mock and incomplete Twilio credentials. Other
/// environments fall back to the mock with a warning.
pub fn create_phone_verification_service(
    config: &PhoneVerificationConfig,
    environment: Environment,
) -> Result<PhoneVerificationService, InfrastructureError> {
    match config.provider.as_str() {
        "twilio" => match TwilioVerifyService::new(config) {
            Ok(service) => Ok(PhoneVerificationService::Twilio(service)),
            Err(e) if environment.allows_console_channels() => {
                tracing::warn!(error = %e, "Twilio Verify not configured, using mock phone verification");
                Ok(PhoneVerificationService::Mock(MockPhoneVerificationService::new()))
            }
            Err(e) => Err(e),
        },
        "mock" if environment.allows_console_channels() => {
            Ok(PhoneVerificationService::Mock(MockPhoneVerificationService::new()))
        }
        "mock" => Err(InfrastructureError::Config(format!(
            "Mock phone verification is not allowed in {}",
            environment
        ))),
        other => Err(InfrastructureError::Config(format!(
            "Unknown phone verification provider '{}'",
            other
        ))),
    }
}
