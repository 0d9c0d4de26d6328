//! Owner registration state machine
//!
//! `email-verification` → `phone-verification` → `completed`, driven by
//! four request-level operations: begin, validate email code, validate phone
//! code and resend phone code.

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::RegistrationService;
pub use types::RegistrationRequest;
