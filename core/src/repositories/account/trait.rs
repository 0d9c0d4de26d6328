//! Account repository trait defining the interface for owner account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Account, RegistrationStep};
use crate::errors::DomainError;

/// Repository trait for [`Account`] persistence operations
///
/// Every write in the verification pipeline is read → validate →
/// conditional write. `update` carries the step and version the caller
/// read, and the store rejects the write if another request wrote the
/// account first.
///
/// Connectivity or query failures are reported as `DomainError::Storage`.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its normalized (trimmed, lower-cased) email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Insert a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError::Conflict)` - An account with this email already exists
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Replace a stored account, provided its stored step still equals
    /// `expected_step` and its stored version equals `account.version()`
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account, with its version advanced
    /// * `Err(DomainError::Conflict)` - The stored step or version no longer matches
    /// * `Err(DomainError::NotFound)` - No account with this id
    async fn update(
        &self,
        account: Account,
        expected_step: RegistrationStep,
    ) -> Result<Account, DomainError>;
}
