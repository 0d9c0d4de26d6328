//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message, safe to show to the owner
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an error response with details
    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes shared by the verification pipeline and its HTTP surface
pub mod error_codes {
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const CONFLICT: &str = "CONFLICT";
    pub const ALREADY_REGISTERED: &str = "ALREADY_REGISTERED";
    pub const EMAIL_DELIVERY_FAILED: &str = "EMAIL_DELIVERY_FAILED";
    pub const NO_PENDING_VERIFICATION: &str = "NO_PENDING_VERIFICATION";
    pub const CODE_NOT_ISSUED: &str = "CODE_NOT_ISSUED";
    pub const CODE_MISMATCH: &str = "CODE_MISMATCH";
    pub const CODE_EXPIRED: &str = "CODE_EXPIRED";
    pub const INVALID_OTP: &str = "INVALID_OTP";
    pub const VERIFICATION_SESSION_EXPIRED: &str = "VERIFICATION_SESSION_EXPIRED";
    pub const PHONE_CHANNEL_UNAVAILABLE: &str = "PHONE_CHANNEL_UNAVAILABLE";
    pub const NO_VERIFIED_ACCOUNT: &str = "NO_VERIFIED_ACCOUNT";
    pub const RESET_NOT_AUTHORIZED: &str = "RESET_NOT_AUTHORIZED";
    pub const RESEND_THROTTLED: &str = "RESEND_THROTTLED";
    pub const PHONE_INVALID: &str = "PHONE_INVALID";
}

/// Trait for converting errors to ErrorResponse
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}

/// Result type with ErrorResponse as error
pub type ApiResult<T> = Result<T, ErrorResponse>;
