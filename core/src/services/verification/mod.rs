//! Building blocks shared by the registration and password-reset flows
//!
//! - channel traits for email delivery and phone verification
//! - the resend cooldown and code format policy
//! - the phone OTP leg reused by both state machines
//! - password hashing

mod config;
mod password;
mod phone_leg;
mod policy;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::VerificationServiceConfig;
pub use password::PasswordHasher;
pub use phone_leg::PhoneLeg;
pub use policy::{is_well_formed_code, Reservation, ResendGuard};
pub use traits::{EmailChannelTrait, PhoneChannelTrait};
pub use types::{ChannelError, PhoneCheckStatus};
