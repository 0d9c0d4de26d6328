//! Business services containing the verification pipeline use cases.

pub mod clock;
pub mod password_reset;
pub mod registration;
pub mod verification;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use password_reset::PasswordResetService;
pub use registration::{RegistrationRequest, RegistrationService};
pub use verification::{
    ChannelError, EmailChannelTrait, PhoneChannelTrait, PhoneCheckStatus,
    VerificationServiceConfig,
};
