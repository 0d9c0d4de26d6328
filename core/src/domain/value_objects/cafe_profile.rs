//! Cafe details collected at sign-up.

use cafe_shared::validation::{validators, Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CafeProfile {
    pub owner_name: String,
    pub cafe_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl CafeProfile {
    /// Copy with surrounding whitespace removed from every field
    pub fn trimmed(&self) -> Self {
        Self {
            owner_name: self.owner_name.trim().to_string(),
            cafe_name: self.cafe_name.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            pincode: self.pincode.trim().to_string(),
        }
    }
}

impl Validate for CafeProfile {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let required = [
            ("owner_name", &self.owner_name),
            ("cafe_name", &self.cafe_name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
        ];
        for (field, value) in required {
            if !validators::not_empty(value) {
                errors.add_error(field, format!("{} is required", field), "required");
            } else if !validators::length_between(value.trim(), 1, 255) {
                errors.add_error(field, format!("{} is too long", field), "length");
            }
        }

        if !validators::is_valid_pincode(&self.pincode) {
            errors.add_error("pincode", "pincode must be 6 digits", "invalid_pincode");
        }

        errors.into_result()
    }
}
