//! Unit tests for the shared phone OTP leg

use chrono::Utc;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::VerificationError;
use crate::services::verification::{ChannelError, PhoneLeg, ResendGuard};

use super::mocks::MockPhoneChannel;

const PHONE: &str = "+919876543210";

fn leg(cooldown: i64) -> (PhoneLeg<MockPhoneChannel>, Arc<MockPhoneChannel>) {
    let channel = Arc::new(MockPhoneChannel::new());
    (PhoneLeg::new(channel.clone(), ResendGuard::new(cooldown)), channel)
}

#[tokio::test]
async fn test_dispatch_then_approve() {
    let (leg, channel) = leg(0);
    leg.dispatch(Uuid::new_v4(), PHONE, Utc::now()).await.unwrap();

    assert_eq!(channel.start_count(), 1);
    leg.check(PHONE, "246810").await.unwrap();
}

#[tokio::test]
async fn test_check_maps_statuses() {
    let (leg, _) = leg(0);
    assert_eq!(
        leg.check(PHONE, "246810").await,
        Err(VerificationError::VerificationSessionExpired)
    );

    leg.dispatch(Uuid::new_v4(), PHONE, Utc::now()).await.unwrap();
    assert_eq!(leg.check(PHONE, "111111").await, Err(VerificationError::InvalidOtp));
}

#[tokio::test]
async fn test_channel_errors_are_classified() {
    let (leg, channel) = leg(0);

    channel.fail_start_with(Some(ChannelError::Throttled {
        retry_after_seconds: Some(60),
    }));
    assert_eq!(
        leg.dispatch(Uuid::new_v4(), PHONE, Utc::now()).await,
        Err(VerificationError::ResendThrottled {
            retry_after_seconds: Some(60)
        })
    );

    channel.fail_start_with(Some(ChannelError::Unavailable {
        message: "503".to_string(),
    }));
    assert_eq!(
        leg.dispatch(Uuid::new_v4(), PHONE, Utc::now()).await,
        Err(VerificationError::PhoneChannelUnavailable)
    );

    channel.fail_check_with(Some(ChannelError::Unavailable {
        message: "timeout".to_string(),
    }));
    assert_eq!(
        leg.check(PHONE, "246810").await,
        Err(VerificationError::PhoneChannelUnavailable)
    );
}

#[tokio::test]
async fn test_failed_dispatch_does_not_start_cooldown() {
    let (leg, channel) = leg(30);
    let account_id = Uuid::new_v4();
    let now = Utc::now();

    channel.fail_start_with(Some(ChannelError::Unavailable {
        message: "down".to_string(),
    }));
    assert!(leg.dispatch(account_id, PHONE, now).await.is_err());

    channel.fail_start_with(None);
    leg.dispatch(account_id, PHONE, now).await.unwrap();
    assert!(matches!(
        leg.dispatch(account_id, PHONE, now).await,
        Err(VerificationError::ResendThrottled { .. })
    ));
}

#[tokio::test]
async fn test_malformed_code_skips_provider() {
    let (leg, channel) = leg(0);
    leg.dispatch(Uuid::new_v4(), PHONE, Utc::now()).await.unwrap();

    assert_eq!(leg.check(PHONE, "12ab").await, Err(VerificationError::InvalidOtp));
    assert_eq!(leg.check(PHONE, " 246810").await, Err(VerificationError::InvalidOtp));
    assert_eq!(channel.check_count(), 0);
}

#[tokio::test]
async fn test_concurrent_dispatches_send_once() {
    let (leg, channel) = leg(30);
    channel.slow_start.store(true, Ordering::SeqCst);
    let account_id = Uuid::new_v4();
    let now = Utc::now();

    let (first, second) = tokio::join!(
        leg.dispatch(account_id, PHONE, now),
        leg.dispatch(account_id, PHONE, now)
    );

    assert_eq!(
        [first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(),
        1
    );
    let refused = if first.is_ok() { second } else { first };
    assert!(matches!(
        refused,
        Err(VerificationError::ResendThrottled { .. })
    ));
    assert_eq!(channel.start_count(), 1);
}
