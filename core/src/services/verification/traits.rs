//! Traits for the external verification channels

use async_trait::async_trait;

use super::types::{ChannelError, PhoneCheckStatus};

/// Transactional email delivery
#[async_trait]
pub trait EmailChannelTrait: Send + Sync {
    /// Send the sign-up code to `to`, greeting `recipient_name`
    async fn send_verification_code(
        &self,
        to: &str,
        recipient_name: &str,
        code: &str,
    ) -> Result<(), ChannelError>;
}

/// Third-party phone verification provider. The provider owns code
/// generation, delivery, expiry and attempt limits.
#[async_trait]
pub trait PhoneChannelTrait: Send + Sync {
    /// Ask the provider to text a fresh code to an E.164 number
    async fn start_verification(&self, phone: &str) -> Result<(), ChannelError>;

    /// Check a submitted code against the provider's open session
    async fn check_verification(
        &self,
        phone: &str,
        code: &str,
    ) -> Result<PhoneCheckStatus, ChannelError>;
}
