//! Domain entities representing core business objects.

pub mod account;
pub mod email_code;

pub use account::{Account, AccountParts, RegistrationStep};
pub use email_code::{generate_code, is_expired, EmailCode, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES};
