//! Phone number utilities
//!
//! Owner phones are stored in E.164 form. Only Indian mobile numbers
//! (`+91` followed by ten digits starting with 6-9) are accepted.

use once_cell::sync::Lazy;
use regex::Regex;

/// Dialing prefix of the single supported country
pub const SUPPORTED_COUNTRY_CODE: &str = "+91";

static INDIAN_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+91[6-9][0-9]{9}$").unwrap());

static LOCAL_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").unwrap());

// Generic E.164 shape
static E164_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9][0-9]{1,14}$").unwrap());

/// Remove common formatting characters (spaces, dashes, parentheses)
pub fn strip_formatting(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Normalize an owner phone into `+91XXXXXXXXXX`.
///
/// Accepts a bare 10-digit mobile, `91` + 10 digits, `0` + 10 digits, or the
/// full E.164 form. Returns `None` when the result is not a valid mobile.
pub fn normalize_phone_number(phone: &str) -> Option<String> {
    let stripped = strip_formatting(phone);

    let candidate = if stripped.starts_with('+') {
        stripped
    } else if LOCAL_MOBILE_REGEX.is_match(&stripped) {
        format!("{}{}", SUPPORTED_COUNTRY_CODE, stripped)
    } else if stripped.len() == 12 && stripped.starts_with("91") {
        format!("+{}", stripped)
    } else if stripped.len() == 11 && stripped.starts_with('0') {
        format!("{}{}", SUPPORTED_COUNTRY_CODE, &stripped[1..])
    } else {
        return None;
    };

    INDIAN_MOBILE_REGEX.is_match(&candidate).then_some(candidate)
}

/// Check if an already-normalized number is a supported mobile
pub fn is_supported_mobile(phone: &str) -> bool {
    INDIAN_MOBILE_REGEX.is_match(phone)
}

/// Check the generic E.164 shape (`+` followed by up to 15 digits)
pub fn is_valid_e164(phone: &str) -> bool {
    E164_REGEX.is_match(phone)
}

/// Mask a phone number for display and logs, keeping the last 4 digits
/// (e.g. `+91******3210`)
pub fn mask_phone_number(phone: &str) -> String {
    let stripped = strip_formatting(phone);
    let digits = stripped.trim_start_matches('+');
    if digits.len() < 6 {
        return "****".to_string();
    }

    let (prefix, rest) = if stripped.starts_with(SUPPORTED_COUNTRY_CODE) {
        (SUPPORTED_COUNTRY_CODE, &stripped[SUPPORTED_COUNTRY_CODE.len()..])
    } else {
        ("", stripped.as_str())
    };

    let visible = &rest[rest.len() - 4..];
    format!("{}{}{}", prefix, "*".repeat(rest.len() - 4), visible)
}
