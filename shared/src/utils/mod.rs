//! Common utility functions

pub mod phone;
pub mod validation;

pub use phone::{mask_phone_number, normalize_phone_number};
pub use validation::{normalize_email, validators, Validate, ValidationErrors};
