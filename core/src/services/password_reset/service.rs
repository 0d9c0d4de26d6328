//! Password reset service implementation

use std::sync::Arc;
use uuid::Uuid;

use cafe_shared::phone::mask_phone_number;
use cafe_shared::validation::normalize_email;

use crate::domain::entities::{Account, RegistrationStep};
use crate::domain::value_objects::{ResetAuthorization, ResetInitiation};
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::AccountRepository;
use crate::services::clock::Clock;
use crate::services::verification::{
    PasswordHasher, PhoneChannelTrait, PhoneLeg, ResendGuard, VerificationServiceConfig,
};

use super::grants::ResetGrants;

/// Password reset for fully verified owner accounts
pub struct PasswordResetService<A, P>
where
    A: AccountRepository,
    P: PhoneChannelTrait,
{
    accounts: Arc<A>,
    phone_leg: PhoneLeg<P>,
    grants: ResetGrants,
    hasher: PasswordHasher,
    clock: Arc<dyn Clock>,
}

impl<A, P> PasswordResetService<A, P>
where
    A: AccountRepository,
    P: PhoneChannelTrait,
{
    pub fn new(
        accounts: Arc<A>,
        phone_channel: Arc<P>,
        clock: Arc<dyn Clock>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            accounts,
            phone_leg: PhoneLeg::new(phone_channel, ResendGuard::new(config.resend_cooldown_seconds)),
            grants: ResetGrants::new(config.reset_authorization_ttl_minutes),
            hasher: PasswordHasher::new(config.password_hash_cost),
            clock,
        }
    }

    /// Text a reset code to the phone on file.
    ///
    /// Unknown and not-yet-verified emails both yield `NoVerifiedAccount`.
    pub async fn initiate_reset(&self, email: &str) -> DomainResult<ResetInitiation> {
        let email = normalize_email(email);
        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .filter(Account::is_fully_verified)
            .ok_or(VerificationError::NoVerifiedAccount)?;

        self.phone_leg
            .dispatch(account.id, &account.phone, self.clock.now())
            .await?;

        tracing::info!(
            account_id = %account.id,
            event = "password_reset_initiated",
            "Password reset code sent"
        );

        Ok(ResetInitiation {
            account_id: account.id,
            phone_hint: mask_phone_number(&account.phone),
        })
    }

    /// Check the reset code and hand out a single-use authorization
    pub async fn verify_reset_code(
        &self,
        account_id: Uuid,
        submitted_code: &str,
    ) -> DomainResult<ResetAuthorization> {
        let account = self.verified_account(account_id).await?;

        if let Err(e) = self.phone_leg.check(&account.phone, submitted_code).await {
            tracing::info!(
                account_id = %account_id,
                reason = e.error_code(),
                event = "reset_code_rejected",
                "Password reset code rejected"
            );
            return Err(e.into());
        }

        let grant = self.grants.issue(account_id, self.clock.now()).await;
        tracing::info!(
            account_id = %account_id,
            expires_at = %grant.expires_at,
            event = "password_reset_authorized",
            "Password reset authorized"
        );
        Ok(grant)
    }

    /// Spend the authorization and store the new password hash
    pub async fn complete_reset(&self, account_id: Uuid, new_password: &str) -> DomainResult<()> {
        if new_password.is_empty() {
            return Err(DomainError::Validation {
                message: "A new password is required".to_string(),
            });
        }

        let now = self.clock.now();
        let grant = self
            .grants
            .take(account_id, now)
            .await
            .ok_or(VerificationError::ResetNotAuthorized)?;

        match self.store_new_password(account_id, new_password).await {
            Ok(()) => {
                tracing::info!(
                    account_id = %account_id,
                    event = "password_reset_completed",
                    "Password reset completed"
                );
                Ok(())
            }
            Err(e) => {
                if matches!(e, DomainError::Storage { .. } | DomainError::Internal { .. }) {
                    self.grants.restore(grant).await;
                }
                Err(e)
            }
        }
    }

    /// Send another reset code
    pub async fn resend_reset_code(&self, account_id: Uuid) -> DomainResult<()> {
        let account = self.verified_account(account_id).await?;
        self.phone_leg
            .dispatch(account.id, &account.phone, self.clock.now())
            .await?;
        Ok(())
    }

    async fn store_new_password(&self, account_id: Uuid, new_password: &str) -> DomainResult<()> {
        let mut account = self.verified_account(account_id).await?;
        let password_hash = self.hasher.hash(new_password).await?;
        account.change_password(password_hash, self.clock.now())?;

        self.accounts
            .update(account, RegistrationStep::Completed)
            .await
            .map_err(|e| match e {
                DomainError::Conflict { .. } | DomainError::NotFound { .. } => {
                    VerificationError::NoVerifiedAccount.into()
                }
                other => other,
            })?;
        Ok(())
    }

    async fn verified_account(&self, account_id: Uuid) -> DomainResult<Account> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .filter(Account::is_fully_verified)
            .ok_or_else(|| VerificationError::NoVerifiedAccount.into())
    }
}
