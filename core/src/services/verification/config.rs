//! Configuration for the verification services

use cafe_shared::VerificationConfig;

use crate::domain::entities::DEFAULT_EXPIRATION_MINUTES;

/// Configuration for the registration and password-reset services
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Minutes before an email code expires
    pub email_code_ttl_minutes: i64,
    /// Minimum seconds between phone-code dispatches per account (0 disables)
    pub resend_cooldown_seconds: i64,
    /// Minutes a reset authorization stays usable
    pub reset_authorization_ttl_minutes: i64,
    /// bcrypt work factor
    pub password_hash_cost: u32,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            email_code_ttl_minutes: DEFAULT_EXPIRATION_MINUTES,
            resend_cooldown_seconds: 30,
            reset_authorization_ttl_minutes: 15,
            password_hash_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            email_code_ttl_minutes: config.email_code_ttl_minutes,
            resend_cooldown_seconds: config.resend_cooldown_seconds,
            reset_authorization_ttl_minutes: config.reset_authorization_ttl_minutes,
            password_hash_cost: config.password_hash_cost,
        }
    }
}
