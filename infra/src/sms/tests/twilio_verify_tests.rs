use reqwest::StatusCode;

use cafe_core::services::verification::{ChannelError, PhoneCheckStatus};
use cafe_shared::config::PhoneVerificationConfig;

use crate::sms::twilio_verify::{classify_check_status, classify_error};
use crate::sms::TwilioVerifyService;
use crate::InfrastructureError;

fn configured() -> PhoneVerificationConfig {
    PhoneVerificationConfig {
        account_sid: Some("ACtest_account_sid".to_string()),
        auth_token: Some("test_auth_token".to_string()),
        service_sid: Some("VAtest_service_sid".to_string()),
        ..PhoneVerificationConfig::default()
    }
}

#[test]
fn test_new_requires_every_credential() {
    for strip in 0..3 {
        let mut config = configured();
        match strip {
            0 => config.account_sid = None,
            1 => config.auth_token = Some(String::new()),
            _ => config.service_sid = None,
        }

        let result = TwilioVerifyService::new(&config);
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }
}

#[test]
fn test_service_url() {
    let service = TwilioVerifyService::new(&configured()).unwrap();
    assert_eq!(
        service.service_url(),
        "https://verify.twilio.com/v2/Services/VAtest_service_sid"
    );
}

#[test]
fn test_check_status_mapping() {
    assert_eq!(classify_check_status("approved"), PhoneCheckStatus::Approved);
    assert_eq!(classify_check_status("pending"), PhoneCheckStatus::Rejected);
    assert_eq!(classify_check_status("expired"), PhoneCheckStatus::SessionNotFound);
    assert_eq!(
        classify_check_status("max_attempts_reached"),
        PhoneCheckStatus::SessionNotFound
    );
}

#[test]
fn test_missing_session() {
    assert_eq!(
        classify_error(StatusCode::NOT_FOUND, Some(20404), None),
        Ok(PhoneCheckStatus::SessionNotFound)
    );
    assert_eq!(
        classify_error(StatusCode::BAD_REQUEST, Some(60202), None),
        Ok(PhoneCheckStatus::SessionNotFound)
    );
}

#[test]
fn test_throttling() {
    assert_eq!(
        classify_error(StatusCode::TOO_MANY_REQUESTS, Some(60203), Some(30)),
        Err(ChannelError::Throttled {
            retry_after_seconds: Some(30)
        })
    );
    assert_eq!(
        classify_error(StatusCode::BAD_REQUEST, Some(60203), None),
        Err(ChannelError::Throttled {
            retry_after_seconds: None
        })
    );
}

#[test]
fn test_invalid_recipient_codes() {
    for code in [60200, 21211, 21614] {
        assert_eq!(
            classify_error(StatusCode::BAD_REQUEST, Some(code), None),
            Err(ChannelError::InvalidRecipient)
        );
    }
}

#[test]
fn test_other_failures_unavailable() {
    assert!(matches!(
        classify_error(StatusCode::UNAUTHORIZED, Some(20003), None),
        Err(ChannelError::Unavailable { .. })
    ));
    assert!(matches!(
        classify_error(StatusCode::SERVICE_UNAVAILABLE, None, None),
        Err(ChannelError::Unavailable { .. })
    ));
}
