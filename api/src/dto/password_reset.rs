use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use cafe_core::domain::value_objects::{ResetAuthorization, ResetInitiation};

use super::validators::{email_address, strong_password};

/// POST /api/v1/owners/password-reset
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InitiateResetRequest {
    #[validate(custom = "email_address")]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiateResetResponse {
    pub account_id: Uuid,
    /// Masked phone the code was sent to, e.g. `+91******3210`
    pub phone_hint: String,
}

impl From<ResetInitiation> for InitiateResetResponse {
    fn from(initiation: ResetInitiation) -> Self {
        Self {
            account_id: initiation.account_id,
            phone_hint: initiation.phone_hint,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetAuthorizedResponse {
    pub account_id: Uuid,
    /// Complete the reset before this instant
    pub expires_at: DateTime<Utc>,
}

impl From<ResetAuthorization> for ResetAuthorizedResponse {
    fn from(authorization: ResetAuthorization) -> Self {
        Self {
            account_id: authorization.account_id,
            expires_at: authorization.expires_at,
        }
    }
}

/// POST /api/v1/owners/password-reset/{id}/complete
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct CompleteResetRequest {
    #[validate(custom = "strong_password")]
    pub new_password: String,
}

impl std::fmt::Debug for CompleteResetRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompleteResetRequest")
            .field("new_password", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChangedResponse {
    pub account_id: Uuid,
}
