//! Verification pipeline configuration

use serde::{Deserialize, Serialize};

/// Lifetimes and limits shared by the registration and password-reset flows
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Email code lifetime in minutes
    #[serde(default = "default_email_code_ttl_minutes")]
    pub email_code_ttl_minutes: i64,

    /// Minimum seconds between phone-code dispatches per account (0 disables)
    #[serde(default = "default_resend_cooldown_seconds")]
    pub resend_cooldown_seconds: i64,

    /// Lifetime of a reset authorization after the phone code was approved
    #[serde(default = "default_reset_authorization_ttl_minutes")]
    pub reset_authorization_ttl_minutes: i64,

    /// bcrypt work factor
    #[serde(default = "default_password_hash_cost")]
    pub password_hash_cost: u32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            email_code_ttl_minutes: default_email_code_ttl_minutes(),
            resend_cooldown_seconds: default_resend_cooldown_seconds(),
            reset_authorization_ttl_minutes: default_reset_authorization_ttl_minutes(),
            password_hash_cost: default_password_hash_cost(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            email_code_ttl_minutes: env_or("EMAIL_CODE_TTL_MINUTES", defaults.email_code_ttl_minutes),
            resend_cooldown_seconds: env_or(
                "PHONE_RESEND_COOLDOWN_SECONDS",
                defaults.resend_cooldown_seconds,
            ),
            reset_authorization_ttl_minutes: env_or(
                "RESET_AUTHORIZATION_TTL_MINUTES",
                defaults.reset_authorization_ttl_minutes,
            ),
            password_hash_cost: env_or("PASSWORD_HASH_COST", defaults.password_hash_cost),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}

fn default_email_code_ttl_minutes() -> i64 {
    60
}

fn default_resend_cooldown_seconds() -> i64 {
    30
}

fn default_reset_authorization_ttl_minutes() -> i64 {
    15
}

fn default_password_hash_cost() -> u32 {
    12 // bcrypt::DEFAULT_COST
}
