//! The registration and reset flows running on the development adapters

use std::sync::Arc;

use cafe_core::domain::value_objects::CafeProfile;
use cafe_core::errors::{DomainError, VerificationError};
use cafe_core::repositories::{AccountRepository, InMemoryAccountRepository};
use cafe_core::services::{
    PasswordResetService, RegistrationRequest, RegistrationService, SystemClock,
    VerificationServiceConfig,
};
use cafe_infra::{ConsoleEmailService, MockPhoneVerificationService};

const EMAIL: &str = "owner@filterkaapi.in";
const PHONE: &str = "+919876543210";

struct Stack {
    accounts: Arc<InMemoryAccountRepository>,
    email: Arc<ConsoleEmailService>,
    phone: Arc<MockPhoneVerificationService>,
    registration:
        RegistrationService<InMemoryAccountRepository, ConsoleEmailService, MockPhoneVerificationService>,
    reset: PasswordResetService<InMemoryAccountRepository, MockPhoneVerificationService>,
}

fn stack() -> Stack {
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let email = Arc::new(ConsoleEmailService::new());
    let phone = Arc::new(MockPhoneVerificationService::new());
    let config = VerificationServiceConfig {
        resend_cooldown_seconds: 0,
        password_hash_cost: 4,
        ..VerificationServiceConfig::default()
    };

    Stack {
        registration: RegistrationService::new(
            accounts.clone(),
            email.clone(),
            phone.clone(),
            Arc::new(SystemClock),
            config.clone(),
        ),
        reset: PasswordResetService::new(
            accounts.clone(),
            phone.clone(),
            Arc::new(SystemClock),
            config,
        ),
        accounts,
        email,
        phone,
    }
}

fn sign_up() -> RegistrationRequest {
    RegistrationRequest {
        profile: CafeProfile {
            owner_name: "Asha Rao".to_string(),
            cafe_name: "Filter Kaapi House".to_string(),
            address: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
        },
        email: EMAIL.to_string(),
        phone: "98765 43210".to_string(),
        password: "Sunrise#2024".to_string(),
    }
}

#[tokio::test]
async fn registration_and_reset_on_development_adapters() {
    let s = stack();

    let begun = s.registration.begin_registration(sign_up()).await.unwrap();
    let email_code = s.email.last_code_for(EMAIL).unwrap();

    let proven = s
        .registration
        .validate_email_code(EMAIL, &email_code)
        .await
        .unwrap();
    assert!(!proven.phone_otp_dispatch_failed);

    let phone_code = s.phone.last_code_for(PHONE).await.unwrap();
    s.registration
        .validate_phone_code(begun.account_id, &phone_code)
        .await
        .unwrap();

    let account = s.accounts.find_by_id(begun.account_id).await.unwrap().unwrap();
    assert!(account.is_fully_verified());
    let old_hash = account.password_hash.clone();

    let initiation = s.reset.initiate_reset(EMAIL).await.unwrap();
    assert!(initiation.phone_hint.ends_with("3210"));

    let reset_code = s.phone.last_code_for(PHONE).await.unwrap();
    s.reset
        .verify_reset_code(initiation.account_id, &reset_code)
        .await
        .unwrap();
    s.reset
        .complete_reset(initiation.account_id, "Monsoon#2025")
        .await
        .unwrap();

    let account = s.accounts.find_by_id(begun.account_id).await.unwrap().unwrap();
    assert_ne!(account.password_hash, old_hash);
}

#[tokio::test]
async fn phone_outage_keeps_email_proof() {
    let s = stack();
    let begun = s.registration.begin_registration(sign_up()).await.unwrap();
    let email_code = s.email.last_code_for(EMAIL).unwrap();

    s.phone.set_simulate_failure(true);
    let proven = s
        .registration
        .validate_email_code(EMAIL, &email_code)
        .await
        .unwrap();
    assert!(proven.phone_otp_dispatch_failed);

    s.phone.set_simulate_failure(false);
    s.registration.resend_phone_code(begun.account_id).await.unwrap();
    assert!(s.phone.last_code_for(PHONE).await.is_some());
}

#[tokio::test]
async fn email_outage_reports_delivery_failure() {
    let s = stack();
    s.email.set_simulate_failure(true);

    let result = s.registration.begin_registration(sign_up()).await;
    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::EmailDeliveryFailed))
    ));
    assert_eq!(s.accounts.len().await, 1);
}
