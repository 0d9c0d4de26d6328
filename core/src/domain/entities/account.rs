//! Cafe owner account and its registration state machine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::email_code::{codes_match, is_expired, EmailCode};
use crate::domain::value_objects::CafeProfile;
use crate::errors::VerificationError;

/// Registration progress. Variants are declared in pipeline order so the
/// derived `Ord` matches the only allowed direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationStep {
    /// Waiting for the email code
    EmailVerification,
    /// Email proven, waiting for the phone code
    PhoneVerification,
    /// Both proofs recorded
    Completed,
}

impl RegistrationStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStep::EmailVerification => "email-verification",
            RegistrationStep::PhoneVerification => "phone-verification",
            RegistrationStep::Completed => "completed",
        }
    }
}

impl fmt::Display for RegistrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email-verification" => Ok(RegistrationStep::EmailVerification),
            "phone-verification" => Ok(RegistrationStep::PhoneVerification),
            "completed" => Ok(RegistrationStep::Completed),
            other => Err(format!("Unknown registration step: {}", other)),
        }
    }
}

/// Everything needed to rebuild an [`Account`] from storage
#[derive(Clone)]
pub struct AccountParts {
    pub id: Uuid,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub profile: CafeProfile,
    pub registration_step: RegistrationStep,
    pub is_verified: bool,
    pub is_phone_verified: bool,
    pub verify_code: Option<String>,
    pub verify_code_expiry: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: u64,
}

/// A cafe owner account.
///
/// Identity and profile fields are public. The verification state
/// (`registration_step`, both proof flags and the email code) only changes
/// through the transition methods below, which keep these invariants:
///
/// - `is_verified` flips only after a stored-code match before expiry
/// - `is_phone_verified` flips only when `is_verified` already holds
/// - the step never moves backwards
/// - the email code is cleared once the email is proven
///
/// `version` counts stored writes. Repositories only accept an update whose
/// version matches the stored row, so a write based on an outdated read fails.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,

    /// Trimmed, lower-cased email; unique across accounts
    pub email: String,

    /// Normalized E.164 phone number
    pub phone: String,

    /// bcrypt hash of the password
    pub password_hash: String,

    pub profile: CafeProfile,

    registration_step: RegistrationStep,
    is_verified: bool,
    is_phone_verified: bool,
    verify_code: Option<String>,
    verify_code_expiry: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    version: u64,
}

impl Account {
    /// Creates a pending account waiting for its email code
    pub fn new_pending(
        email: String,
        phone: String,
        password_hash: String,
        profile: CafeProfile,
        code: &EmailCode,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            phone,
            password_hash,
            profile,
            registration_step: RegistrationStep::EmailVerification,
            is_verified: false,
            is_phone_verified: false,
            verify_code: Some(code.code.clone()),
            verify_code_expiry: Some(code.expires_at),
            created_at: code.issued_at,
            updated_at: code.issued_at,
            version: 0,
        }
    }

    /// Rebuilds an account loaded from storage
    pub fn restore(parts: AccountParts) -> Self {
        Self {
            id: parts.id,
            email: parts.email,
            phone: parts.phone,
            password_hash: parts.password_hash,
            profile: parts.profile,
            registration_step: parts.registration_step,
            is_verified: parts.is_verified,
            is_phone_verified: parts.is_phone_verified,
            verify_code: parts.verify_code,
            verify_code_expiry: parts.verify_code_expiry,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
            version: parts.version,
        }
    }

    /// Write count of the row this account was read from
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Advances the version after a repository stored this account
    pub fn mark_stored(&mut self) {
        self.version += 1;
    }

    pub fn registration_step(&self) -> RegistrationStep {
        self.registration_step
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    pub fn is_phone_verified(&self) -> bool {
        self.is_phone_verified
    }

    pub fn verify_code(&self) -> Option<&str> {
        self.verify_code.as_deref()
    }

    pub fn verify_code_expiry(&self) -> Option<DateTime<Utc>> {
        self.verify_code_expiry
    }

    /// Both proofs recorded; the only state password reset accepts
    pub fn is_fully_verified(&self) -> bool {
        self.is_verified && self.is_phone_verified
    }

    /// Email proven but phone proof still outstanding
    pub fn awaits_phone_verification(&self) -> bool {
        self.is_verified && !self.is_phone_verified
    }

    /// Restarts an unverified registration with fresh credentials and code.
    ///
    /// The newest submission wins for password, phone and profile.
    pub fn resume_registration(
        &mut self,
        phone: String,
        password_hash: String,
        profile: CafeProfile,
        code: &EmailCode,
    ) -> Result<(), VerificationError> {
        if self.is_verified {
            return Err(VerificationError::AlreadyRegistered);
        }

        self.phone = phone;
        self.password_hash = password_hash;
        self.profile = profile;
        self.verify_code = Some(code.code.clone());
        self.verify_code_expiry = Some(code.expires_at);
        self.updated_at = code.issued_at;
        Ok(())
    }

    /// Checks a submitted email code and, on success, moves to phone verification.
    ///
    /// Checks run in order: pending step, code issued, exact match, expiry.
    pub fn verify_email(
        &mut self,
        submitted_code: &str,
        now: DateTime<Utc>,
    ) -> Result<(), VerificationError> {
        if self.registration_step != RegistrationStep::EmailVerification || self.is_verified {
            return Err(VerificationError::NoPendingVerification);
        }

        let stored = self
            .verify_code
            .as_deref()
            .ok_or(VerificationError::CodeNotIssued)?;

        if !codes_match(stored, submitted_code) {
            return Err(VerificationError::CodeMismatch);
        }

        // A code without an expiry is treated as already expired
        match self.verify_code_expiry {
            Some(expiry) if !is_expired(expiry, now) => {}
            _ => return Err(VerificationError::CodeExpired),
        }

        self.is_verified = true;
        self.registration_step = RegistrationStep::PhoneVerification;
        self.verify_code = None;
        self.verify_code_expiry = None;
        self.updated_at = now;
        Ok(())
    }

    /// Records the phone proof after the channel approved the code
    pub fn complete_phone_verification(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<(), VerificationError> {
        if !self.is_verified || self.registration_step != RegistrationStep::PhoneVerification {
            return Err(VerificationError::NoPendingVerification);
        }

        self.is_phone_verified = true;
        self.registration_step = RegistrationStep::Completed;
        self.updated_at = now;
        Ok(())
    }

    /// Replaces the password hash of a fully verified account
    pub fn change_password(
        &mut self,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> Result<(), VerificationError> {
        if !self.is_fully_verified() {
            return Err(VerificationError::NoVerifiedAccount);
        }

        self.password_hash = password_hash;
        self.updated_at = now;
        Ok(())
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("phone", &cafe_shared::phone::mask_phone_number(&self.phone))
            .field("password_hash", &"[redacted]")
            .field("profile", &self.profile)
            .field("registration_step", &self.registration_step)
            .field("is_verified", &self.is_verified)
            .field("is_phone_verified", &self.is_phone_verified)
            .field("verify_code", &self.verify_code.as_ref().map(|_| "******"))
            .field("verify_code_expiry", &self.verify_code_expiry)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("version", &self.version)
            .finish()
    }
}
