//! Input types for the registration service

use crate::domain::value_objects::CafeProfile;

/// A sign-up submission, already schema-validated by the intake layer
#[derive(Clone)]
pub struct RegistrationRequest {
    pub profile: CafeProfile,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl std::fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("profile", &self.profile)
            .field("email", &self.email)
            .field("phone", &cafe_shared::phone::mask_phone_number(&self.phone))
            .field("password", &"[redacted]")
            .finish()
    }
}
