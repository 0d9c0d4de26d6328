//! Console-based email sender for development

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use cafe_core::services::verification::{ChannelError, EmailChannelTrait};

/// A message the console sender would have delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub recipient_name: String,
    pub code: String,
}

/// Email sender that logs codes instead of delivering them.
///
/// Keeps every message so local tooling and tests can read the last code.
#[derive(Clone, Default)]
pub struct ConsoleEmailService {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    simulate_failure: Arc<AtomicBool>,
}

impl ConsoleEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail with `Unavailable`
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    pub fn sent_messages(&self) -> Vec<SentEmail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Most recent code sent to `email`
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent.lock().ok().and_then(|sent| {
            sent.iter()
                .rev()
                .find(|message| message.to == email)
                .map(|message| message.code.clone())
        })
    }
}

#[async_trait]
impl EmailChannelTrait for ConsoleEmailService {
    async fn send_verification_code(
        &self,
        to: &str,
        recipient_name: &str,
        code: &str,
    ) -> Result<(), ChannelError> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            tracing::warn!(email = %to, "Simulated email delivery failure");
            return Err(ChannelError::Unavailable {
                message: "simulated failure".to_string(),
            });
        }

        println!();
        println!("========================================");
        println!("  VERIFICATION CODE FOR: {} ({})", to, recipient_name);
        println!("  CODE: {}", code);
        println!("========================================");
        println!();

        tracing::info!(email = %to, code = %code, "Verification code sent to console");

        if let Ok(mut sent) = self.sent.lock() {
            sent.push(SentEmail {
                to: to.to_string(),
                recipient_name: recipient_name.to_string(),
                code: code.to_string(),
            });
        }
        Ok(())
    }
}
