use cafe_core::services::verification::{ChannelError, EmailChannelTrait};

use crate::email::template::{render_verification_email, VERIFICATION_SUBJECT};
use crate::email::ConsoleEmailService;

#[tokio::test]
async fn test_console_records_sent_codes() {
    let service = ConsoleEmailService::new();

    service
        .send_verification_code("owner@example.com", "Asha", "123456")
        .await
        .unwrap();
    service
        .send_verification_code("owner@example.com", "Asha", "654321")
        .await
        .unwrap();

    assert_eq!(service.sent_messages().len(), 2);
    assert_eq!(
        service.last_code_for("owner@example.com").as_deref(),
        Some("654321")
    );
    assert_eq!(service.last_code_for("other@example.com"), None);
}

#[tokio::test]
async fn test_console_simulated_failure() {
    let service = ConsoleEmailService::new();
    service.set_simulate_failure(true);

    let result = service
        .send_verification_code("owner@example.com", "Asha", "123456")
        .await;

    assert!(matches!(result, Err(ChannelError::Unavailable { .. })));
    assert!(service.sent_messages().is_empty());
}

#[tokio::test]
async fn test_console_clones_share_outbox() {
    let service = ConsoleEmailService::new();
    let handle = service.clone();

    service
        .send_verification_code("owner@example.com", "Asha", "111222")
        .await
        .unwrap();

    assert_eq!(handle.last_code_for("owner@example.com").as_deref(), Some("111222"));
}

#[test]
fn test_template_contains_code_and_name() {
    let email = render_verification_email("Asha Rao", "482913", 60);

    assert_eq!(email.subject, VERIFICATION_SUBJECT);
    assert!(email.text.contains("Hi Asha Rao"));
    assert!(email.text.contains("482913"));
    assert!(email.text.contains("60 minutes"));
    assert!(email.html.contains("<strong"));
    assert!(email.html.contains("482913"));
}

#[test]
fn test_template_escapes_owner_name() {
    let email = render_verification_email("<script>alert(1)</script>", "482913", 60);

    assert!(!email.html.contains("<script>"));
    assert!(email.html.contains("&lt;script&gt;"));
}

#[test]
fn test_template_blank_name_falls_back() {
    let email = render_verification_email("   ", "482913", 60);
    assert!(email.text.starts_with("Hi there,"));
}
