//! Domain-specific error types and error handling.

mod types;

pub use types::VerificationError;

use cafe_shared::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Optimistic precondition or uniqueness check lost against a concurrent write
    #[error("Conflicting update: {resource}")]
    Conflict { resource: String },

    /// Account store unreachable or query failure
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to the verification taxonomy
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::NotFound { .. } => error_codes::NOT_FOUND,
            DomainError::Conflict { .. } => error_codes::CONFLICT,
            DomainError::Storage { .. } => error_codes::STORAGE_ERROR,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Verification(err) => err.error_code(),
        }
    }

    /// The verification kind, if this is one
    pub fn verification_kind(&self) -> Option<&VerificationError> {
        match self {
            DomainError::Verification(err) => Some(err),
            _ => None,
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Verification(err) => err.to_error_response(),
            DomainError::Validation { message } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())
            }
            // Store and internal details stay in the logs
            _ => ErrorResponse::new(
                self.error_code(),
                "Something went wrong on our side. Please try again shortly.",
            ),
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_error_tests.rs"]
mod domain_error_tests;
