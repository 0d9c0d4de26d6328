//! Route handlers under `/api/v1/owners`
//!
//! - registration: sign-up, email code, phone code, phone code resend
//! - password reset: start, phone code check, new password, resend

pub mod password_reset;
pub mod registration;
