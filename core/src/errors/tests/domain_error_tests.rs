//! Unit tests for domain error types

use crate::errors::{DomainError, VerificationError};
use cafe_shared::IntoErrorResponse;

#[test]
fn test_verification_error_codes_are_stable() {
    assert_eq!(VerificationError::CodeMismatch.error_code(), "CODE_MISMATCH");
    assert_eq!(VerificationError::CodeExpired.error_code(), "CODE_EXPIRED");
    assert_eq!(
        VerificationError::VerificationSessionExpired.error_code(),
        "VERIFICATION_SESSION_EXPIRED"
    );
    assert_eq!(VerificationError::NoVerifiedAccount.error_code(), "NO_VERIFIED_ACCOUNT");
}

#[test]
fn test_domain_error_bridges_verification_kind() {
    let error: DomainError = VerificationError::InvalidOtp.into();
    assert_eq!(error.error_code(), "INVALID_OTP");
    assert_eq!(error.verification_kind(), Some(&VerificationError::InvalidOtp));
}

#[test]
fn test_throttled_response_carries_retry_after() {
    let response = VerificationError::ResendThrottled {
        retry_after_seconds: Some(25),
    }
    .to_error_response();

    assert_eq!(response.error, "RESEND_THROTTLED");
    let details = response.details.expect("details present");
    assert_eq!(details["retry_after_seconds"], serde_json::json!(25));
}

#[test]
fn test_storage_error_does_not_leak_message() {
    let error = DomainError::Storage {
        message: "connection refused to 10.0.0.5:3306".to_string(),
    };
    let response = error.to_error_response();

    assert_eq!(response.error, "STORAGE_ERROR");
    assert!(!response.message.contains("10.0.0.5"));
}

#[test]
fn test_pending_and_unknown_share_wording() {
    // Same message whether the account is unknown or already advanced
    let message = VerificationError::NoPendingVerification.to_string();
    assert!(!message.to_lowercase().contains("email"));
}
