//! Value objects representing immutable domain concepts.

pub mod cafe_profile;
pub mod outcomes;

pub use cafe_profile::CafeProfile;
pub use outcomes::{
    EmailVerificationOutcome, PhoneVerificationOutcome, RegistrationOutcome, ResetAuthorization,
    ResetInitiation,
};
