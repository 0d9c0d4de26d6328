//! The verification error taxonomy shared by registration and password reset

use cafe_shared::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Failures an owner can act on. Messages never reveal codes, hashes or
/// whether an unverified account exists for a given email.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("An account with this email is already registered")]
    AlreadyRegistered,

    #[error("We couldn't send the verification email. Please try again")]
    EmailDeliveryFailed,

    #[error("No pending verification was found for this account")]
    NoPendingVerification,

    #[error("No verification code has been issued. Please request a new one")]
    CodeNotIssued,

    #[error("The verification code is incorrect")]
    CodeMismatch,

    #[error("The verification code has expired. Please request a new one")]
    CodeExpired,

    #[error("The one-time password is incorrect")]
    InvalidOtp,

    #[error("The one-time password has expired. Please request a new one")]
    VerificationSessionExpired,

    #[error("Phone verification is temporarily unavailable. Please try again later")]
    PhoneChannelUnavailable,

    #[error("No verified account was found for these details")]
    NoVerifiedAccount,

    #[error("Password reset is not authorized. Please verify your phone again")]
    ResetNotAuthorized,

    #[error("Too many code requests. Please wait before requesting another")]
    ResendThrottled { retry_after_seconds: Option<i64> },

    #[error("The phone number is not a supported mobile number")]
    InvalidPhoneNumber,
}

impl VerificationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            VerificationError::AlreadyRegistered => error_codes::ALREADY_REGISTERED,
            VerificationError::EmailDeliveryFailed => error_codes::EMAIL_DELIVERY_FAILED,
            VerificationError::NoPendingVerification => error_codes::NO_PENDING_VERIFICATION,
            VerificationError::CodeNotIssued => error_codes::CODE_NOT_ISSUED,
            VerificationError::CodeMismatch => error_codes::CODE_MISMATCH,
            VerificationError::CodeExpired => error_codes::CODE_EXPIRED,
            VerificationError::InvalidOtp => error_codes::INVALID_OTP,
            VerificationError::VerificationSessionExpired => {
                error_codes::VERIFICATION_SESSION_EXPIRED
            }
            VerificationError::PhoneChannelUnavailable => error_codes::PHONE_CHANNEL_UNAVAILABLE,
            VerificationError::NoVerifiedAccount => error_codes::NO_VERIFIED_ACCOUNT,
            VerificationError::ResetNotAuthorized => error_codes::RESET_NOT_AUTHORIZED,
            VerificationError::ResendThrottled { .. } => error_codes::RESEND_THROTTLED,
            VerificationError::InvalidPhoneNumber => error_codes::PHONE_INVALID,
        }
    }
}

impl IntoErrorResponse for VerificationError {
    fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.error_code(), self.to_string());
        match self {
            VerificationError::ResendThrottled {
                retry_after_seconds: Some(seconds),
            } => response.add_detail("retry_after_seconds", seconds),
            _ => response,
        }
    }
}
