use std::sync::Arc;

use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{test, web};
use serde_json::{json, Value};

use cafe_api::{create_app, AppState};
use cafe_core::repositories::InMemoryAccountRepository;
use cafe_core::services::{SystemClock, VerificationServiceConfig};
use cafe_infra::{ConsoleEmailService, MockPhoneVerificationService};

const EMAIL: &str = "asha@filterkaapi.in";
const PHONE_CODE: &str = "246810";
const MAX_PAYLOAD: usize = 64 * 1024;

type TestState =
    AppState<InMemoryAccountRepository, ConsoleEmailService, MockPhoneVerificationService>;

/// Sends a JSON POST and returns the status with the parsed body
macro_rules! post {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

struct Harness {
    state: web::Data<TestState>,
    email: ConsoleEmailService,
}

impl Harness {
    fn new(resend_cooldown_seconds: i64) -> Self {
        let email = ConsoleEmailService::new();
        let phone = MockPhoneVerificationService::new().with_fixed_code(PHONE_CODE);
        let config = VerificationServiceConfig {
            resend_cooldown_seconds,
            password_hash_cost: 4,
            ..VerificationServiceConfig::default()
        };

        let state = web::Data::new(AppState::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(email.clone()),
            Arc::new(phone),
            Arc::new(SystemClock),
            config,
        ));

        Self { state, email }
    }

    fn email_code(&self) -> String {
        self.email
            .last_code_for(EMAIL)
            .expect("an email code should have been sent")
    }
}

fn sign_up() -> Value {
    json!({
        "owner_name": "Asha Rao",
        "cafe_name": "Filter Kaapi House",
        "email": EMAIL,
        "phone": "98765 43210",
        "address": "12 MG Road",
        "city": "Bengaluru",
        "state": "Karnataka",
        "pincode": "560001",
        "password": "Sunrise#2024"
    })
}

fn account_id(body: &Value) -> String {
    body["data"]["account_id"]
        .as_str()
        .expect("response should carry an account id")
        .to_string()
}

#[actix_web::test]
async fn test_health_check() {
    let harness = Harness::new(0);
    let app = test::init_service(create_app(harness.state.clone(), MAX_PAYLOAD)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_full_registration_flow() {
    let harness = Harness::new(0);
    let app = test::init_service(create_app(harness.state.clone(), MAX_PAYLOAD)).await;

    let (status, body) = post!(app, "/api/v1/owners/register", sign_up());
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["next_step"], "email-verification");
    assert_eq!(body["data"]["resumed"], false);
    let id = account_id(&body);

    let (status, body) = post!(
        app,
        "/api/v1/owners/verify-email",
        json!({ "email": EMAIL, "code": harness.email_code() })
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["account_id"], id.as_str());
    assert_eq!(body["data"]["next_step"], "phone-verification");
    assert_eq!(body["data"]["phone_code_sent"], true);

    let (status, body) = post!(
        app,
        &format!("/api/v1/owners/{}/verify-phone", id),
        json!({ "code": PHONE_CODE })
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["registration_step"], "completed");

    // The approved session is spent, so a repeat check needs a fresh code
    let (status, body) = post!(
        app,
        &format!("/api/v1/owners/{}/verify-phone", id),
        json!({ "code": "000000" })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VERIFICATION_SESSION_EXPIRED");

    let (status, body) = post!(app, "/api/v1/owners/register", sign_up());
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ALREADY_REGISTERED");
}

#[actix_web::test]
async fn test_register_again_resumes_pending_account() {
    let harness = Harness::new(0);
    let app = test::init_service(create_app(harness.state.clone(), MAX_PAYLOAD)).await;

    let (status, first) = post!(app, "/api/v1/owners/register", sign_up());
    assert_eq!(status, StatusCode::CREATED);
    let stale_code = harness.email_code();

    let (status, second) = post!(app, "/api/v1/owners/register", sign_up());
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["data"]["resumed"], true);
    assert_eq!(account_id(&first), account_id(&second));

    let fresh_code = harness.email_code();
    if stale_code != fresh_code {
        let (status, body) = post!(
            app,
            "/api/v1/owners/verify-email",
            json!({ "email": EMAIL, "code": stale_code })
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "CODE_MISMATCH");
    }

    let (status, _) = post!(
        app,
        "/api/v1/owners/verify-email",
        json!({ "email": EMAIL, "code": fresh_code })
    );
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_register_rejects_invalid_fields() {
    let harness = Harness::new(0);
    let app = test::init_service(create_app(harness.state.clone(), MAX_PAYLOAD)).await;

    let mut request = sign_up();
    request["phone"] = json!("12345");
    request["password"] = json!("password");
    request["pincode"] = json!("012345");

    let (status, body) = post!(app, "/api/v1/owners/register", request);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["phone"].is_array());
    assert!(body["details"]["password"].is_array());
    assert!(body["details"]["pincode"].is_array());
    assert!(harness.email.sent_messages().is_empty());
}

#[actix_web::test]
async fn test_verify_email_for_unknown_address() {
    let harness = Harness::new(0);
    let app = test::init_service(create_app(harness.state.clone(), MAX_PAYLOAD)).await;

    let (status, body) = post!(
        app,
        "/api/v1/owners/verify-email",
        json!({ "email": "nobody@example.com", "code": "123456" })
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NO_PENDING_VERIFICATION");
}

#[actix_web::test]
async fn test_phone_step_requires_email_proof() {
    let harness = Harness::new(0);
    let app = test::init_service(create_app(harness.state.clone(), MAX_PAYLOAD)).await;

    let (_, body) = post!(app, "/api/v1/owners/register", sign_up());
    let id = account_id(&body);

    let (status, body) = post!(
        app,
        &format!("/api/v1/owners/{}/verify-phone", id),
        json!({ "code": PHONE_CODE })
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NO_PENDING_VERIFICATION");

    let (status, _) = post!(
        app,
        &format!("/api/v1/owners/{}/resend-phone-code", id),
        json!({})
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_wrong_phone_code_is_rejected() {
    let harness = Harness::new(0);
    let app = test::init_service(create_app(harness.state.clone(), MAX_PAYLOAD)).await;

    let (_, body) = post!(app, "/api/v1/owners/register", sign_up());
    let id = account_id(&body);
    post!(
        app,
        "/api/v1/owners/verify-email",
        json!({ "email": EMAIL, "code": harness.email_code() })
    );

    let (status, _) = post!(
        app,
        &format!("/api/v1/owners/{}/verify-phone", id),
        json!({ "code": "111111" })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post!(
        app,
        &format!("/api/v1/owners/{}/verify-phone", id),
        json!({ "code": PHONE_CODE })
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["registration_step"], "completed");
}

#[actix_web::test]
async fn test_resend_phone_code_is_throttled() {
    let harness = Harness::new(30);
    let app = test::init_service(create_app(harness.state.clone(), MAX_PAYLOAD)).await;

    let (_, body) = post!(app, "/api/v1/owners/register", sign_up());
    let id = account_id(&body);
    post!(
        app,
        "/api/v1/owners/verify-email",
        json!({ "email": EMAIL, "code": harness.email_code() })
    );

    let (status, body) = post!(
        app,
        &format!("/api/v1/owners/{}/resend-phone-code", id),
        json!({})
    );
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "RESEND_THROTTLED");
}

#[actix_web::test]
async fn test_resend_phone_code_without_cooldown() {
    let harness = Harness::new(0);
    let app = test::init_service(create_app(harness.state.clone(), MAX_PAYLOAD)).await;

    let (_, body) = post!(app, "/api/v1/owners/register", sign_up());
    let id = account_id(&body);
    post!(
        app,
        "/api/v1/owners/verify-email",
        json!({ "email": EMAIL, "code": harness.email_code() })
    );

    let (status, body) = post!(
        app,
        &format!("/api/v1/owners/{}/resend-phone-code", id),
        json!({})
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["account_id"], id.as_str());
}

#[actix_web::test]
async fn test_password_reset_flow() {
    let harness = Harness::new(0);
    let app = test::init_service(create_app(harness.state.clone(), MAX_PAYLOAD)).await;

    let (_, body) = post!(app, "/api/v1/owners/register", sign_up());
    let id = account_id(&body);
    post!(
        app,
        "/api/v1/owners/verify-email",
        json!({ "email": EMAIL, "code": harness.email_code() })
    );
    post!(
        app,
        &format!("/api/v1/owners/{}/verify-phone", id),
        json!({ "code": PHONE_CODE })
    );

    let (status, body) = post!(
        app,
        "/api/v1/owners/password-reset",
        json!({ "email": EMAIL })
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account_id(&body), id);
    let hint = body["data"]["phone_hint"].as_str().unwrap();
    assert!(hint.ends_with("3210"));
    assert!(!hint.contains("98765"));

    // No authorization yet
    let (status, body) = post!(
        app,
        &format!("/api/v1/owners/password-reset/{}/complete", id),
        json!({ "new_password": "Monsoon#2025" })
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "RESET_NOT_AUTHORIZED");

    let (status, body) = post!(
        app,
        &format!("/api/v1/owners/password-reset/{}/verify", id),
        json!({ "code": PHONE_CODE })
    );
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["expires_at"].is_string());

    let (status, _) = post!(
        app,
        &format!("/api/v1/owners/password-reset/{}/complete", id),
        json!({ "new_password": "Monsoon#2025" })
    );
    assert_eq!(status, StatusCode::OK);

    // The authorization is single use
    let (status, _) = post!(
        app,
        &format!("/api/v1/owners/password-reset/{}/complete", id),
        json!({ "new_password": "Harvest#2026" })
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_password_reset_requires_verified_account() {
    let harness = Harness::new(0);
    let app = test::init_service(create_app(harness.state.clone(), MAX_PAYLOAD)).await;

    let (status, body) = post!(
        app,
        "/api/v1/owners/password-reset",
        json!({ "email": EMAIL })
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NO_VERIFIED_ACCOUNT");

    // Pending accounts look the same as unknown ones
    post!(app, "/api/v1/owners/register", sign_up());
    let (status, body) = post!(
        app,
        "/api/v1/owners/password-reset",
        json!({ "email": EMAIL })
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NO_VERIFIED_ACCOUNT");
}

#[actix_web::test]
async fn test_weak_new_password_is_rejected() {
    let harness = Harness::new(0);
    let app = test::init_service(create_app(harness.state.clone(), MAX_PAYLOAD)).await;

    let (status, body) = post!(
        app,
        "/api/v1/owners/password-reset/9b2f7c1e-1d1a-4c55-8a10-3f4b8f0f2a11/complete",
        json!({ "new_password": "short" })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_malformed_requests() {
    let harness = Harness::new(0);
    let app = test::init_service(create_app(harness.state.clone(), MAX_PAYLOAD)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/owners/register")
        .insert_header(ContentType::json())
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");

    let (status, body) = post!(
        app,
        "/api/v1/owners/not-a-uuid/verify-phone",
        json!({ "code": PHONE_CODE })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_unknown_route_returns_not_found() {
    let harness = Harness::new(0);
    let app = test::init_service(create_app(harness.state.clone(), MAX_PAYLOAD)).await;

    let req = test::TestRequest::get().uri("/api/v1/cafes").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}
