//! The phone OTP leg shared by registration and password reset

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use cafe_shared::phone::mask_phone_number;

use crate::errors::VerificationError;

use super::policy::{is_well_formed_code, ResendGuard};
use super::traits::PhoneChannelTrait;
use super::types::{ChannelError, PhoneCheckStatus};

/// Starts and checks phone verifications, applying the resend cooldown and
/// translating channel results into verification errors
pub struct PhoneLeg<P: PhoneChannelTrait> {
    channel: Arc<P>,
    resend_guard: ResendGuard,
}

impl<P: PhoneChannelTrait> Clone for PhoneLeg<P> {
    fn clone(&self) -> Self {
        Self {
            channel: Arc::clone(&self.channel),
            resend_guard: self.resend_guard.clone(),
        }
    }
}

impl<P: PhoneChannelTrait> PhoneLeg<P> {
    pub fn new(channel: Arc<P>, resend_guard: ResendGuard) -> Self {
        Self {
            channel,
            resend_guard,
        }
    }

    /// Send a fresh code to `phone` unless the account is inside its cooldown
    pub async fn dispatch(
        &self,
        account_id: Uuid,
        phone: &str,
        now: DateTime<Utc>,
    ) -> Result<(), VerificationError> {
        let reservation = self.resend_guard.reserve(account_id, now).await?;

        if let Err(e) = self.channel.start_verification(phone).await {
            self.resend_guard.release(account_id, reservation).await;
            tracing::warn!(
                account_id = %account_id,
                phone = %mask_phone_number(phone),
                error = %e,
                event = "phone_otp_dispatch_failed",
                "Phone verification could not be started"
            );
            return Err(map_channel_error(e));
        }

        tracing::info!(
            account_id = %account_id,
            phone = %mask_phone_number(phone),
            event = "phone_otp_dispatched",
            "Phone verification started"
        );
        Ok(())
    }

    /// Succeeds only when the channel approves `code` for `phone`.
    /// Malformed codes are rejected without spending a provider attempt.
    pub async fn check(&self, phone: &str, code: &str) -> Result<(), VerificationError> {
        if !is_well_formed_code(code) {
            return Err(VerificationError::InvalidOtp);
        }

        let status = self
            .channel
            .check_verification(phone, code)
            .await
            .map_err(map_channel_error)?;

        match status {
            PhoneCheckStatus::Approved => Ok(()),
            PhoneCheckStatus::Rejected => Err(VerificationError::InvalidOtp),
            PhoneCheckStatus::SessionNotFound => Err(VerificationError::VerificationSessionExpired),
        }
    }
}

fn map_channel_error(error: ChannelError) -> VerificationError {
    match error {
        ChannelError::Throttled {
            retry_after_seconds,
        } => VerificationError::ResendThrottled {
            retry_after_seconds,
        },
        ChannelError::InvalidRecipient | ChannelError::Unavailable { .. } => {
            VerificationError::PhoneChannelUnavailable
        }
    }
}
