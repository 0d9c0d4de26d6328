//! `validator` custom rules backed by the shared validators

use std::borrow::Cow;

use validator::ValidationError;

use cafe_shared::phone::normalize_phone_number;
use cafe_shared::validation::validators;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn indian_mobile(phone: &str) -> Result<(), ValidationError> {
    normalize_phone_number(phone)
        .map(|_| ())
        .ok_or_else(|| invalid("phone", "Enter a valid 10-digit Indian mobile number"))
}

pub fn pincode(value: &str) -> Result<(), ValidationError> {
    if validators::is_valid_pincode(value) {
        Ok(())
    } else {
        Err(invalid("pincode", "Pincode must be 6 digits and cannot start with 0"))
    }
}

pub fn strong_password(password: &str) -> Result<(), ValidationError> {
    if validators::is_strong_password(password) {
        Ok(())
    } else {
        Err(invalid(
            "password",
            "Password must be 8-64 characters with upper and lower case letters, a digit and a symbol",
        ))
    }
}

pub fn six_digit_code(code: &str) -> Result<(), ValidationError> {
    if validators::is_verification_code(code.trim()) {
        Ok(())
    } else {
        Err(invalid("code", "Code must be exactly 6 digits"))
    }
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if validators::not_empty(value) {
        Ok(())
    } else {
        Err(invalid("required", "This field is required"))
    }
}

pub fn email_address(email: &str) -> Result<(), ValidationError> {
    if validators::is_valid_email(email) {
        Ok(())
    } else {
        Err(invalid("email", "Enter a valid email address"))
    }
}
