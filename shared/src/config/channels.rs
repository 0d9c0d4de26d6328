//! External channel provider configuration

use serde::{Deserialize, Serialize};

/// Transactional email provider settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider name: `resend` or `console`
    pub provider: String,

    /// API key for the HTTP provider
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sender address, e.g. `Cafe Platform <no-reply@cafe.example>`
    pub from_address: String,

    /// Provider API base URL
    #[serde(default = "default_email_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("resend"),
            api_key: None,
            from_address: String::from("Cafe Platform <no-reply@cafe.example>"),
            api_url: default_email_api_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl EmailConfig {
    /// Development config printing codes to the console
    pub fn console() -> Self {
        Self {
            provider: String::from("console"),
            ..Default::default()
        }
    }

    /// Overlay `EMAIL_*` environment variables on a base config
    pub fn from_env(base: Self) -> Self {
        Self {
            provider: std::env::var("EMAIL_PROVIDER").unwrap_or(base.provider),
            api_key: std::env::var("EMAIL_API_KEY").ok().or(base.api_key),
            from_address: std::env::var("EMAIL_FROM").unwrap_or(base.from_address),
            api_url: std::env::var("EMAIL_API_URL").unwrap_or(base.api_url),
            timeout_seconds: base.timeout_seconds,
        }
    }
}

/// Phone verification provider settings (Twilio Verify)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhoneVerificationConfig {
    /// Provider name: `twilio` or `mock`
    pub provider: String,

    #[serde(default)]
    pub account_sid: Option<String>,

    #[serde(default)]
    pub auth_token: Option<String>,

    /// Verify service SID (`VA...`)
    #[serde(default)]
    pub service_sid: Option<String>,

    #[serde(default = "default_verify_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for PhoneVerificationConfig {
    fn default() -> Self {
        Self {
            provider: String::from("twilio"),
            account_sid: None,
            auth_token: None,
            service_sid: None,
            api_url: default_verify_api_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl PhoneVerificationConfig {
    /// Development config with in-process sessions
    pub fn mock() -> Self {
        Self {
            provider: String::from("mock"),
            ..Default::default()
        }
    }

    /// Overlay `TWILIO_*` environment variables on a base config
    pub fn from_env(base: Self) -> Self {
        Self {
            provider: std::env::var("PHONE_VERIFICATION_PROVIDER").unwrap_or(base.provider),
            account_sid: std::env::var("TWILIO_ACCOUNT_SID").ok().or(base.account_sid),
            auth_token: std::env::var("TWILIO_AUTH_TOKEN").ok().or(base.auth_token),
            service_sid: std::env::var("TWILIO_VERIFY_SERVICE_SID").ok().or(base.service_sid),
            api_url: base.api_url,
            timeout_seconds: base.timeout_seconds,
        }
    }

    /// All three Twilio credentials are present
    pub fn has_credentials(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some() && self.service_sid.is_some()
    }
}

fn default_email_api_url() -> String {
    String::from("https://api.resend.com")
}

fn default_verify_api_url() -> String {
    String::from("https://verify.twilio.com/v2")
}

fn default_timeout_seconds() -> u64 {
    10
}
