//! Request and response bodies

pub mod password_reset;
pub mod registration;
mod validators;

pub use password_reset::*;
pub use registration::*;
