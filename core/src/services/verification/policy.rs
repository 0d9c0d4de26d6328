//! Resend and code-format policy

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use cafe_shared::validation::validators;

use crate::errors::VerificationError;

/// Six ASCII digits, nothing else
pub fn is_well_formed_code(code: &str) -> bool {
    validators::is_verification_code(code)
}

/// Per-account cooldown between phone-code dispatches
#[derive(Clone)]
pub struct ResendGuard {
    cooldown: Duration,
    last_dispatch: Arc<RwLock<HashMap<Uuid, DateTime<Utc>>>>,
}

impl ResendGuard {
    pub fn new(cooldown_seconds: i64) -> Self {
        Self {
            cooldown: Duration::seconds(cooldown_seconds.max(0)),
            last_dispatch: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.cooldown > Duration::zero()
    }

    /// Claim the dispatch slot for `account_id`, or refuse it inside the
    /// cooldown window.
    ///
    /// The check and the claim happen under one write lock, so of two
    /// concurrent resends only one gets through. Hand the returned
    /// reservation to [`ResendGuard::release`] if the send fails.
    pub async fn reserve(
        &self,
        account_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Reservation, VerificationError> {
        if !self.is_enabled() {
            return Ok(Reservation::default());
        }

        let mut last_dispatch = self.last_dispatch.write().await;
        if let Some(last) = last_dispatch.get(&account_id) {
            if now < *last + self.cooldown {
                let remaining = (*last + self.cooldown - now).num_seconds().max(1);
                return Err(VerificationError::ResendThrottled {
                    retry_after_seconds: Some(remaining),
                });
            }
        }

        // Entries older than the window carry no information
        last_dispatch.retain(|_, at| now < *at + self.cooldown);
        let previous = last_dispatch.insert(account_id, now);
        Ok(Reservation {
            claimed_at: Some(now),
            previous,
        })
    }

    /// Give back a slot whose send the channel did not accept
    pub async fn release(&self, account_id: Uuid, reservation: Reservation) {
        let Some(claimed_at) = reservation.claimed_at else {
            return;
        };

        let mut last_dispatch = self.last_dispatch.write().await;
        // A later reservation owns the entry now
        if last_dispatch.get(&account_id) != Some(&claimed_at) {
            return;
        }
        match reservation.previous {
            Some(previous) => last_dispatch.insert(account_id, previous),
            None => last_dispatch.remove(&account_id),
        };
    }
}

/// A claimed dispatch slot
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Reservation {
    claimed_at: Option<DateTime<Utc>>,
    previous: Option<DateTime<Utc>>,
}
