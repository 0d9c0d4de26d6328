//! In-process table of reset authorizations

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::is_expired;
use crate::domain::value_objects::ResetAuthorization;

/// One outstanding authorization per account; a new approval replaces the old
#[derive(Clone)]
pub struct ResetGrants {
    ttl: Duration,
    grants: Arc<RwLock<HashMap<Uuid, DateTime<Utc>>>>,
}

impl ResetGrants {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            ttl: Duration::minutes(ttl_minutes),
            grants: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn issue(&self, account_id: Uuid, now: DateTime<Utc>) -> ResetAuthorization {
        let expires_at = now + self.ttl;
        let mut grants = self.grants.write().await;
        grants.retain(|_, expiry| !is_expired(*expiry, now));
        grants.insert(account_id, expires_at);
        ResetAuthorization {
            account_id,
            expires_at,
        }
    }

    /// Remove and return a live grant. Two concurrent callers can't both
    /// receive it.
    pub async fn take(&self, account_id: Uuid, now: DateTime<Utc>) -> Option<ResetAuthorization> {
        let expires_at = self.grants.write().await.remove(&account_id)?;
        if is_expired(expires_at, now) {
            return None;
        }
        Some(ResetAuthorization {
            account_id,
            expires_at,
        })
    }

    /// Put back a grant whose reset could not be stored
    pub async fn restore(&self, grant: ResetAuthorization) {
        self.grants
            .write()
            .await
            .entry(grant.account_id)
            .or_insert(grant.expires_at);
    }
}
