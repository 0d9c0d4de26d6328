//! In-process phone verification for development and testing
//!
//! Mirrors the provider contract: one open session per number, a fresh code
//! on every start, a ten minute lifetime and a cap on wrong guesses. Codes
//! are logged instead of texted.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use cafe_core::services::verification::{ChannelError, PhoneChannelTrait, PhoneCheckStatus};
use cafe_shared::phone::{is_valid_e164, mask_phone_number};

/// Session lifetime, matching the Twilio Verify default
pub const SESSION_TTL_MINUTES: i64 = 10;

/// Wrong guesses allowed before the session closes
pub const MAX_CHECK_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone)]
struct Session {
    code: String,
    expires_at: DateTime<Utc>,
    failed_checks: u32,
}

/// Mock phone verification provider
#[derive(Clone)]
pub struct MockPhoneVerificationService {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    fixed_code: Option<String>,
    session_ttl: Duration,
    simulate_failure: Arc<AtomicBool>,
}

impl MockPhoneVerificationService {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            fixed_code: None,
            session_ttl: Duration::minutes(SESSION_TTL_MINUTES),
            simulate_failure: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Issue `code` for every session instead of a random one
    pub fn with_fixed_code(mut self, code: impl Into<String>) -> Self {
        self.fixed_code = Some(code.into());
        self
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Make subsequent calls fail with `Unavailable`
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Code of the open session for `phone`, if any
    pub async fn last_code_for(&self, phone: &str) -> Option<String> {
        self.sessions
            .read()
            .await
            .get(phone)
            .map(|session| session.code.clone())
    }

    pub async fn open_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn ensure_available(&self) -> Result<(), ChannelError> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(ChannelError::Unavailable {
                message: "simulated failure".to_string(),
            });
        }
        Ok(())
    }

    fn next_code(&self) -> String {
        match &self.fixed_code {
            Some(code) => code.clone(),
            None => format!("{:06}", rand::thread_rng().gen_range(0..1_000_000)),
        }
    }
}

impl Default for MockPhoneVerificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PhoneChannelTrait for MockPhoneVerificationService {
    async fn start_verification(&self, phone: &str) -> Result<(), ChannelError> {
        self.ensure_available()?;

        if !is_valid_e164(phone) {
            return Err(ChannelError::InvalidRecipient);
        }

        let code = self.next_code();
        let session = Session {
            code: code.clone(),
            expires_at: Utc::now() + self.session_ttl,
            failed_checks: 0,
        };
        self.sessions.write().await.insert(phone.to_string(), session);

        tracing::info!(
            phone = %mask_phone_number(phone),
            code = %code,
            "Mock phone verification started"
        );
        Ok(())
    }

    async fn check_verification(
        &self,
        phone: &str,
        code: &str,
    ) -> Result<PhoneCheckStatus, ChannelError> {
        self.ensure_available()?;

        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get_mut(phone) else {
            return Ok(PhoneCheckStatus::SessionNotFound);
        };

        if Utc::now() >= session.expires_at {
            sessions.remove(phone);
            return Ok(PhoneCheckStatus::SessionNotFound);
        }

        if session.code == code {
            sessions.remove(phone);
            return Ok(PhoneCheckStatus::Approved);
        }

        session.failed_checks += 1;
        if session.failed_checks >= MAX_CHECK_ATTEMPTS {
            sessions.remove(phone);
        }
        Ok(PhoneCheckStatus::Rejected)
    }
}
