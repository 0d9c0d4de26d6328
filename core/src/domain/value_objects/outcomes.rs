//! Results returned by the verification pipeline. None of them carries a code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::RegistrationStep;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationOutcome {
    pub account_id: Uuid,
    pub email: String,
    /// An unverified registration for this email already existed
    pub resumed: bool,
    pub next_step: RegistrationStep,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailVerificationOutcome {
    pub account_id: Uuid,
    pub next_step: RegistrationStep,
    /// Email is proven but the phone code could not be dispatched; the owner
    /// should request a resend
    pub phone_otp_dispatch_failed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneVerificationOutcome {
    pub account_id: Uuid,
    pub step: RegistrationStep,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetInitiation {
    pub account_id: Uuid,
    /// Phone with all but the last 4 digits masked
    pub phone_hint: String,
}

/// Short-lived, single-use permission to set a new password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetAuthorization {
    pub account_id: Uuid,
    pub expires_at: DateTime<Utc>,
}
