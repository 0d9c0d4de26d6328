use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use cafe_core::domain::entities::RegistrationStep;
use cafe_core::domain::value_objects::{
    CafeProfile, EmailVerificationOutcome, PhoneVerificationOutcome, RegistrationOutcome,
};
use cafe_core::services::RegistrationRequest;

use super::validators::{email_address, indian_mobile, not_blank, pincode, six_digit_code, strong_password};

/// POST /api/v1/owners/register
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RegisterOwnerRequest {
    #[validate(custom = "not_blank", length(max = 255))]
    pub owner_name: String,

    #[validate(custom = "not_blank", length(max = 255))]
    pub cafe_name: String,

    #[validate(custom = "email_address", length(max = 255))]
    pub email: String,

    /// 10-digit mobile number, optionally with +91 / 0 prefix and spaces
    #[validate(custom = "indian_mobile")]
    pub phone: String,

    #[validate(custom = "not_blank", length(max = 255))]
    pub address: String,

    #[validate(custom = "not_blank", length(max = 255))]
    pub city: String,

    #[validate(custom = "not_blank", length(max = 255))]
    pub state: String,

    #[validate(custom = "pincode")]
    pub pincode: String,

    #[validate(custom = "strong_password")]
    pub password: String,
}

impl std::fmt::Debug for RegisterOwnerRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterOwnerRequest")
            .field("email", &self.email)
            .field("cafe_name", &self.cafe_name)
            .field("password", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl From<RegisterOwnerRequest> for RegistrationRequest {
    fn from(request: RegisterOwnerRequest) -> Self {
        RegistrationRequest {
            profile: CafeProfile {
                owner_name: request.owner_name,
                cafe_name: request.cafe_name,
                address: request.address,
                city: request.city,
                state: request.state,
                pincode: request.pincode,
            },
            email: request.email,
            phone: request.phone,
            password: request.password,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterOwnerResponse {
    pub account_id: Uuid,
    pub email: String,
    pub next_step: RegistrationStep,
    /// An earlier unverified sign-up for this email was replaced
    pub resumed: bool,
}

impl From<RegistrationOutcome> for RegisterOwnerResponse {
    fn from(outcome: RegistrationOutcome) -> Self {
        Self {
            account_id: outcome.account_id,
            email: outcome.email,
            next_step: outcome.next_step,
            resumed: outcome.resumed,
        }
    }
}

/// POST /api/v1/owners/verify-email
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(custom = "email_address")]
    pub email: String,

    #[validate(custom = "six_digit_code")]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailResponse {
    pub account_id: Uuid,
    pub next_step: RegistrationStep,
    /// False when the phone code could not be sent; ask for a resend
    pub phone_code_sent: bool,
}

impl From<EmailVerificationOutcome> for VerifyEmailResponse {
    fn from(outcome: EmailVerificationOutcome) -> Self {
        Self {
            account_id: outcome.account_id,
            next_step: outcome.next_step,
            phone_code_sent: !outcome.phone_otp_dispatch_failed,
        }
    }
}

/// POST /api/v1/owners/{id}/verify-phone and the reset code check
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(custom = "six_digit_code")]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPhoneResponse {
    pub account_id: Uuid,
    pub registration_step: RegistrationStep,
}

impl From<PhoneVerificationOutcome> for VerifyPhoneResponse {
    fn from(outcome: PhoneVerificationOutcome) -> Self {
        Self {
            account_id: outcome.account_id,
            registration_step: outcome.step,
        }
    }
}

/// Acknowledges a phone code dispatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeSentResponse {
    pub account_id: Uuid,
}
