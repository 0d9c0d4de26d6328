//! Resend email service implementation
//!
//! Sends the sign-up code through `POST {api_url}/emails` with a bearer API
//! key. Provider responses are classified into [`ChannelError`] here so the
//! core never sees HTTP details.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

use cafe_core::services::verification::{ChannelError, EmailChannelTrait};
use cafe_shared::config::EmailConfig;

use super::template::render_verification_email;
use crate::InfrastructureError;

#[derive(Debug, Serialize)]
struct ResendSendEmailBody<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

/// Resend transactional email sender
#[derive(Clone)]
pub struct ResendEmailService {
    client: Client,
    api_key: String,
    from_address: String,
    endpoint: String,
    code_ttl_minutes: i64,
}

impl ResendEmailService {
    /// Create a sender from configuration
    ///
    /// # Errors
    /// * `InfrastructureError::Config` - missing API key or sender address
    /// * `InfrastructureError::Http` - the HTTP client could not be built
    pub fn new(config: &EmailConfig, code_ttl_minutes: i64) -> Result<Self, InfrastructureError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| InfrastructureError::Config("EMAIL_API_KEY is required".to_string()))?
            .to_string();

        if config.from_address.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "EMAIL_FROM is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("cafe-platform/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key,
            from_address: config.from_address.clone(),
            endpoint: format!("{}/emails", config.api_url.trim_end_matches('/')),
            code_ttl_minutes,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Map a non-success Resend status to a channel error
pub(crate) fn classify_status(status: StatusCode, retry_after_seconds: Option<i64>) -> ChannelError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => ChannelError::Throttled { retry_after_seconds },
        StatusCode::UNPROCESSABLE_ENTITY => ChannelError::InvalidRecipient,
        other => ChannelError::Unavailable {
            message: format!("Resend responded with status {}", other.as_u16()),
        },
    }
}

pub(crate) fn retry_after(headers: &header::HeaderMap) -> Option<i64> {
    headers
        .get(header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<i64>().ok())
}

#[async_trait]
impl EmailChannelTrait for ResendEmailService {
    async fn send_verification_code(
        &self,
        to: &str,
        recipient_name: &str,
        code: &str,
    ) -> Result<(), ChannelError> {
        let email = render_verification_email(recipient_name, code, self.code_ttl_minutes);
        let body = ResendSendEmailBody {
            from: &self.from_address,
            to: vec![to],
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Resend request failed");
                ChannelError::Unavailable {
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "Resend accepted verification email");
            return Ok(());
        }

        let retry_after_seconds = retry_after(response.headers());
        let detail = response.text().await.unwrap_or_default();
        tracing::warn!(
            status = status.as_u16(),
            detail = %detail,
            "Resend rejected verification email"
        );

        Err(classify_status(status, retry_after_seconds))
    }
}
