//! In-memory AccountRepository used by tests and local development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Account, RegistrationStep};
use crate::errors::DomainError;

use super::trait_::AccountRepository;

/// Account store backed by a `HashMap`, with the same conflict semantics as
/// the MySQL implementation
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with a storage error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::Storage {
                message: "account store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.check_available()?;
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.check_available()?;
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        self.check_available()?;
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(DomainError::Conflict {
                resource: "account email".to_string(),
            });
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(
        &self,
        account: Account,
        expected_step: RegistrationStep,
    ) -> Result<Account, DomainError> {
        self.check_available()?;
        let mut accounts = self.accounts.write().await;

        let stored = accounts.get(&account.id).ok_or_else(|| DomainError::NotFound {
            resource: "Account".to_string(),
        })?;

        if stored.registration_step() != expected_step || stored.version() != account.version() {
            return Err(DomainError::Conflict {
                resource: format!("account {}", account.id),
            });
        }

        let mut account = account;
        account.mark_stored();
        accounts.insert(account.id, account.clone());
        Ok(account)
    }
}
