//! # Cafe Core
//!
//! Core business logic for cafe owner onboarding: the owner account entity,
//! the verification error taxonomy, repository and channel interfaces, and
//! the registration and password-reset state machines built on them.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience. Items are named so the
// `account` modules of `domain::entities` and `repositories` stay apart.
pub use domain::entities::{Account, AccountParts, EmailCode, RegistrationStep};
pub use domain::value_objects::{
    CafeProfile, EmailVerificationOutcome, PhoneVerificationOutcome, RegistrationOutcome,
    ResetAuthorization, ResetInitiation,
};
pub use errors::{DomainError, DomainResult, VerificationError};
pub use repositories::{AccountRepository, InMemoryAccountRepository};
pub use services::{
    ChannelError, Clock, EmailChannelTrait, ManualClock, PasswordResetService, PhoneChannelTrait,
    PhoneCheckStatus, RegistrationRequest, RegistrationService, SystemClock,
    VerificationServiceConfig,
};
