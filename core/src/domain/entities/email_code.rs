//! Email verification code issued at sign-up.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::Rng;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of an email code (1 hour)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 60;

const CODE_MIN: u32 = 100_000;
const CODE_MAX: u32 = 999_999;

/// A freshly issued email code together with its validity window
#[derive(Clone, PartialEq, Eq)]
pub struct EmailCode {
    pub code: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl EmailCode {
    /// Issue a new random code valid for `ttl_minutes` from `now`
    pub fn issue(now: DateTime<Utc>, ttl_minutes: i64) -> Self {
        Self {
            code: generate_code(),
            issued_at: now,
            expires_at: now + Duration::minutes(ttl_minutes),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        is_expired(self.expires_at, now)
    }

    /// Exact, constant-time comparison with a submitted code
    pub fn matches(&self, candidate: &str) -> bool {
        codes_match(&self.code, candidate)
    }
}

impl std::fmt::Debug for EmailCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailCode")
            .field("code", &"******")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Uniform 6-digit code from the OS CSPRNG, never starting with 0
pub fn generate_code() -> String {
    OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
}

/// A code is expired at or after its expiry instant
pub fn is_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= expires_at
}

pub(crate) fn codes_match(stored: &str, candidate: &str) -> bool {
    constant_time_eq(stored.as_bytes(), candidate.as_bytes())
}
