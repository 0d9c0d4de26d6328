//! Password reset through the phone OTP leg
//!
//! Only fully verified accounts can reset. The owner re-proves phone
//! ownership, receives a short-lived single-use authorization, and spends it
//! on the new password.

mod grants;
mod service;

#[cfg(test)]
mod tests;

pub use grants::ResetGrants;
pub use service::PasswordResetService;
