//! Twilio Verify v2 implementation
//!
//! - `POST {api_url}/Services/{sid}/Verifications` starts a session and
//!   texts a code
//! - `POST {api_url}/Services/{sid}/VerificationCheck` checks a code
//!
//! Both use basic auth with the account SID and auth token. Twilio error
//! payloads are classified by HTTP status and Twilio error code.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use cafe_core::services::verification::{ChannelError, PhoneChannelTrait, PhoneCheckStatus};
use cafe_shared::config::PhoneVerificationConfig;
use cafe_shared::phone::mask_phone_number;

use crate::InfrastructureError;

/// Resource not found; no pending verification for this number
const ERROR_NOT_FOUND: u32 = 20404;
/// Invalid parameter, usually the `To` number
const ERROR_INVALID_PARAMETER: u32 = 60200;
/// Max check attempts reached; the session is closed
const ERROR_MAX_CHECK_ATTEMPTS: u32 = 60202;
/// Max send attempts reached
const ERROR_MAX_SEND_ATTEMPTS: u32 = 60203;
/// The `To` number is not a valid phone number
const ERROR_INVALID_TO_NUMBER: u32 = 21211;
/// The `To` number is not a mobile number
const ERROR_NOT_MOBILE: u32 = 21614;

#[derive(Debug, Deserialize)]
struct VerificationResponse {
    status: String,
}

#[derive(Debug, Default, Deserialize)]
struct TwilioErrorBody {
    code: Option<u32>,
    message: Option<String>,
}

/// Twilio Verify client
#[derive(Clone)]
pub struct TwilioVerifyService {
    client: Client,
    account_sid: String,
    auth_token: String,
    service_url: String,
}

impl TwilioVerifyService {
    /// Create a client from configuration
    ///
    /// # Errors
    /// * `InfrastructureError::Config` - any of the three credentials is missing
    pub fn new(config: &PhoneVerificationConfig) -> Result<Self, InfrastructureError> {
        let required = |value: &Option<String>, name: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| InfrastructureError::Config(format!("{} is required", name)))
        };

        let account_sid = required(&config.account_sid, "TWILIO_ACCOUNT_SID")?;
        let auth_token = required(&config.auth_token, "TWILIO_AUTH_TOKEN")?;
        let service_sid = required(&config.service_sid, "TWILIO_VERIFY_SERVICE_SID")?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            account_sid,
            auth_token,
            service_url: format!(
                "{}/Services/{}",
                config.api_url.trim_end_matches('/'),
                service_sid
            ),
        })
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<reqwest::Response, ChannelError> {
        self.client
            .post(format!("{}/{}", self.service_url, path))
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, path = path, "Twilio Verify request failed");
                ChannelError::Unavailable {
                    message: e.to_string(),
                }
            })
    }

    async fn read_error(response: reqwest::Response) -> (StatusCode, Option<i64>, TwilioErrorBody) {
        let status = response.status();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok());
        let body = response.json::<TwilioErrorBody>().await.unwrap_or_default();
        (status, retry_after, body)
    }
}

/// Classify a failed Twilio response.
///
/// `Ok(SessionNotFound)` is only meaningful for checks; starts treat it as
/// an unavailable provider.
pub(crate) fn classify_error(
    status: StatusCode,
    error_code: Option<u32>,
    retry_after_seconds: Option<i64>,
) -> Result<PhoneCheckStatus, ChannelError> {
    match (status, error_code) {
        (StatusCode::NOT_FOUND, _) | (_, Some(ERROR_NOT_FOUND)) | (_, Some(ERROR_MAX_CHECK_ATTEMPTS)) => {
            Ok(PhoneCheckStatus::SessionNotFound)
        }
        (StatusCode::TOO_MANY_REQUESTS, _) | (_, Some(ERROR_MAX_SEND_ATTEMPTS)) => {
            Err(ChannelError::Throttled { retry_after_seconds })
        }
        (_, Some(ERROR_INVALID_PARAMETER | ERROR_INVALID_TO_NUMBER | ERROR_NOT_MOBILE)) => {
            Err(ChannelError::InvalidRecipient)
        }
        (status, code) => Err(ChannelError::Unavailable {
            message: match code {
                Some(code) => format!("Twilio error {} (status {})", code, status.as_u16()),
                None => format!("Twilio responded with status {}", status.as_u16()),
            },
        }),
    }
}

/// Map a successful check's `status` field
pub(crate) fn classify_check_status(status: &str) -> PhoneCheckStatus {
    match status {
        "approved" => PhoneCheckStatus::Approved,
        // Canceled, expired and max-attempts sessions are closed
        "canceled" | "expired" | "max_attempts_reached" => PhoneCheckStatus::SessionNotFound,
        _ => PhoneCheckStatus::Rejected,
    }
}

#[async_trait]
impl PhoneChannelTrait for TwilioVerifyService {
    async fn start_verification(&self, phone: &str) -> Result<(), ChannelError> {
        let response = self
            .post_form("Verifications", &[("To", phone), ("Channel", "sms")])
            .await?;

        if response.status().is_success() {
            tracing::info!(phone = %mask_phone_number(phone), "Twilio verification started");
            return Ok(());
        }

        let (status, retry_after, body) = Self::read_error(response).await;
        tracing::warn!(
            phone = %mask_phone_number(phone),
            status = status.as_u16(),
            twilio_code = ?body.code,
            detail = ?body.message,
            "Twilio refused to start verification"
        );

        match classify_error(status, body.code, retry_after) {
            Err(e) => Err(e),
            Ok(_) => Err(ChannelError::Unavailable {
                message: format!("Verify service not found (status {})", status.as_u16()),
            }),
        }
    }

    async fn check_verification(
        &self,
        phone: &str,
        code: &str,
    ) -> Result<PhoneCheckStatus, ChannelError> {
        let response = self
            .post_form("VerificationCheck", &[("To", phone), ("Code", code)])
            .await?;

        if response.status().is_success() {
            let body: VerificationResponse =
                response.json().await.map_err(|e| ChannelError::Unavailable {
                    message: format!("Unreadable Twilio response: {}", e),
                })?;
            let outcome = classify_check_status(&body.status);
            tracing::debug!(
                phone = %mask_phone_number(phone),
                twilio_status = %body.status,
                outcome = ?outcome,
                "Twilio verification checked"
            );
            return Ok(outcome);
        }

        let (status, retry_after, body) = Self::read_error(response).await;
        tracing::debug!(
            phone = %mask_phone_number(phone),
            status = status.as_u16(),
            twilio_code = ?body.code,
            "Twilio verification check failed"
        );
        classify_error(status, body.code, retry_after)
    }
}
