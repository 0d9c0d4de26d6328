//! Registration service implementation

use std::sync::Arc;
use uuid::Uuid;

use cafe_shared::phone::{mask_phone_number, normalize_phone_number};
use cafe_shared::validation::{normalize_email, validators, Validate};

use crate::domain::entities::{Account, EmailCode, RegistrationStep};
use crate::domain::value_objects::{
    CafeProfile, EmailVerificationOutcome, PhoneVerificationOutcome, RegistrationOutcome,
};
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::AccountRepository;
use crate::services::clock::Clock;
use crate::services::verification::{
    EmailChannelTrait, PasswordHasher, PhoneChannelTrait, PhoneLeg, ResendGuard,
    VerificationServiceConfig,
};

use super::types::RegistrationRequest;

/// Writes tried by one resume before a conflict is reported
const RESUME_ATTEMPTS: u32 = 3;

/// Drives a cafe owner from sign-up to a fully verified account
pub struct RegistrationService<A, E, P>
where
    A: AccountRepository,
    E: EmailChannelTrait,
    P: PhoneChannelTrait,
{
    /// Account store
    accounts: Arc<A>,
    /// Email channel for the sign-up code
    email_channel: Arc<E>,
    /// Phone OTP leg with resend cooldown
    phone_leg: PhoneLeg<P>,
    hasher: PasswordHasher,
    clock: Arc<dyn Clock>,
    config: VerificationServiceConfig,
}

impl<A, E, P> RegistrationService<A, E, P>
where
    A: AccountRepository,
    E: EmailChannelTrait,
    P: PhoneChannelTrait,
{
    /// Create a new registration service
    ///
    /// # Arguments
    ///
    /// * `accounts` - Account repository
    /// * `email_channel` - Transactional email sender
    /// * `phone_channel` - Phone verification provider
    /// * `clock` - Time source for code expiry
    /// * `config` - Service configuration
    pub fn new(
        accounts: Arc<A>,
        email_channel: Arc<E>,
        phone_channel: Arc<P>,
        clock: Arc<dyn Clock>,
        config: VerificationServiceConfig,
    ) -> Self {
        let phone_leg = PhoneLeg::new(phone_channel, ResendGuard::new(config.resend_cooldown_seconds));
        Self {
            accounts,
            email_channel,
            phone_leg,
            hasher: PasswordHasher::new(config.password_hash_cost),
            clock,
            config,
        }
    }

    /// Start or resume a registration and email the sign-up code.
    ///
    /// An unverified account with the same email is overwritten with the new
    /// submission and a fresh code; a verified one is refused. If the email
    /// cannot be sent the pending account stays stored and the caller gets
    /// `EmailDeliveryFailed`, so a retry resumes it.
    pub async fn begin_registration(
        &self,
        request: RegistrationRequest,
    ) -> DomainResult<RegistrationOutcome> {
        let email = normalize_email(&request.email);
        if !validators::is_valid_email(&email) {
            return Err(DomainError::Validation {
                message: "A valid email address is required".to_string(),
            });
        }

        let phone = normalize_phone_number(&request.phone)
            .ok_or(VerificationError::InvalidPhoneNumber)?;

        let profile = request.profile.trimmed();
        profile.validate().map_err(|errors| DomainError::Validation {
            message: errors
                .errors()
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        })?;

        if request.password.is_empty() {
            return Err(DomainError::Validation {
                message: "A password is required".to_string(),
            });
        }

        let password_hash = self.hasher.hash(&request.password).await?;
        let code = EmailCode::issue(self.clock.now(), self.config.email_code_ttl_minutes);

        let (account, resumed) = match self.accounts.find_by_email(&email).await? {
            Some(existing) => {
                let account = self
                    .resume(existing, phone, password_hash, profile, &code)
                    .await?;
                (account, true)
            }
            None => {
                let pending = Account::new_pending(
                    email.clone(),
                    phone.clone(),
                    password_hash.clone(),
                    profile.clone(),
                    &code,
                );
                match self.accounts.create(pending).await {
                    Ok(account) => (account, false),
                    Err(DomainError::Conflict { .. }) => {
                        // Lost a concurrent sign-up for the same email; take the resume path once
                        let existing = self
                            .accounts
                            .find_by_email(&email)
                            .await?
                            .ok_or(VerificationError::NoPendingVerification)?;
                        let account = self
                            .resume(existing, phone, password_hash, profile, &code)
                            .await?;
                        (account, true)
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        tracing::info!(
            account_id = %account.id,
            resumed = resumed,
            event = "registration_pending",
            "Pending owner registration stored"
        );

        if let Err(e) = self
            .email_channel
            .send_verification_code(&account.email, &account.profile.owner_name, &code.code)
            .await
        {
            tracing::warn!(
                account_id = %account.id,
                error = %e,
                event = "email_code_delivery_failed",
                "Verification email could not be sent"
            );
            return Err(VerificationError::EmailDeliveryFailed.into());
        }

        tracing::info!(
            account_id = %account.id,
            expires_at = %code.expires_at,
            event = "email_code_sent",
            "Verification email sent"
        );

        Ok(RegistrationOutcome {
            account_id: account.id,
            email: account.email,
            resumed,
            next_step: RegistrationStep::EmailVerification,
        })
    }

    /// Check the emailed code and move the account to phone verification.
    ///
    /// After the transition is stored the phone channel is asked for a code.
    /// A dispatch failure does not undo the email proof; it is reported
    /// through `phone_otp_dispatch_failed`.
    pub async fn validate_email_code(
        &self,
        email: &str,
        submitted_code: &str,
    ) -> DomainResult<EmailVerificationOutcome> {
        let email = normalize_email(email);
        let mut account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(VerificationError::NoPendingVerification)?;

        let now = self.clock.now();
        if let Err(e) = account.verify_email(submitted_code, now) {
            tracing::info!(
                account_id = %account.id,
                reason = e.error_code(),
                event = "email_code_rejected",
                "Email code rejected"
            );
            return Err(e.into());
        }

        let account = self
            .accounts
            .update(account, RegistrationStep::EmailVerification)
            .await
            .map_err(|e| match e {
                // Another request verified or resumed this account first
                DomainError::Conflict { .. } => VerificationError::NoPendingVerification.into(),
                other => other,
            })?;

        tracing::info!(
            account_id = %account.id,
            event = "email_verified",
            "Owner email verified"
        );

        let phone_otp_dispatch_failed = self
            .phone_leg
            .dispatch(account.id, &account.phone, now)
            .await
            .is_err();

        Ok(EmailVerificationOutcome {
            account_id: account.id,
            next_step: account.registration_step(),
            phone_otp_dispatch_failed,
        })
    }

    /// Check the phone code with the provider and complete the registration.
    ///
    /// The provider decides every submission, including repeats on a
    /// completed account. Those are not written again.
    pub async fn validate_phone_code(
        &self,
        account_id: Uuid,
        submitted_code: &str,
    ) -> DomainResult<PhoneVerificationOutcome> {
        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(VerificationError::NoPendingVerification)?;

        // No phone proof without an email proof
        if !account.is_verified() {
            return Err(VerificationError::NoPendingVerification.into());
        }

        if let Err(e) = self.phone_leg.check(&account.phone, submitted_code).await {
            tracing::info!(
                account_id = %account_id,
                reason = e.error_code(),
                event = "phone_code_rejected",
                "Phone code rejected"
            );
            return Err(e.into());
        }

        if account.registration_step() == RegistrationStep::Completed {
            return Ok(PhoneVerificationOutcome {
                account_id,
                step: RegistrationStep::Completed,
            });
        }

        account.complete_phone_verification(self.clock.now())?;
        let account = self
            .accounts
            .update(account, RegistrationStep::PhoneVerification)
            .await
            .map_err(|e| match e {
                DomainError::Conflict { .. } => VerificationError::NoPendingVerification.into(),
                other => other,
            })?;

        tracing::info!(
            account_id = %account.id,
            phone = %mask_phone_number(&account.phone),
            event = "registration_completed",
            "Owner phone verified, registration complete"
        );

        Ok(PhoneVerificationOutcome {
            account_id: account.id,
            step: account.registration_step(),
        })
    }

    /// Send a new phone code to an account waiting for phone verification
    pub async fn resend_phone_code(&self, account_id: Uuid) -> DomainResult<()> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .filter(Account::awaits_phone_verification)
            .ok_or(VerificationError::NoPendingVerification)?;

        self.phone_leg
            .dispatch(account.id, &account.phone, self.clock.now())
            .await?;
        Ok(())
    }

    /// Overwrite an unverified account with a new submission.
    ///
    /// A conflicting write is re-read and retried, so a concurrent resume
    /// does not fail this one. A concurrent email proof turns it into
    /// `AlreadyRegistered`.
    async fn resume(
        &self,
        existing: Account,
        phone: String,
        password_hash: String,
        profile: CafeProfile,
        code: &EmailCode,
    ) -> DomainResult<Account> {
        let mut current = existing;
        let mut attempt = 1;

        loop {
            let expected_step = current.registration_step();
            let mut resumed = current.clone();
            resumed.resume_registration(
                phone.clone(),
                password_hash.clone(),
                profile.clone(),
                code,
            )?;

            match self.accounts.update(resumed, expected_step).await {
                Err(DomainError::Conflict { .. }) if attempt < RESUME_ATTEMPTS => {
                    attempt += 1;
                    current = self
                        .accounts
                        .find_by_id(current.id)
                        .await?
                        .ok_or(VerificationError::NoPendingVerification)?;
                }
                result => return result,
            }
        }
    }
}
