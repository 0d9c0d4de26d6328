//! Mapping of pipeline failures onto HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::Value;
use std::collections::HashMap;

use cafe_core::errors::{DomainError, VerificationError};
use cafe_shared::{error_codes, ErrorResponse, IntoErrorResponse};

/// Error type returned by every handler
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body failed schema validation
    #[error("Invalid request: {0}")]
    InvalidRequest(validator::ValidationErrors),

    /// Malformed JSON or path parameters
    #[error("Malformed request: {0}")]
    Malformed(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<VerificationError> for ApiError {
    fn from(error: VerificationError) -> Self {
        ApiError::Domain(error.into())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::InvalidRequest(errors)
    }
}

/// HTTP status for a verification failure
pub fn verification_status(error: &VerificationError) -> StatusCode {
    match error {
        VerificationError::AlreadyRegistered => StatusCode::CONFLICT,
        VerificationError::CodeMismatch
        | VerificationError::CodeExpired
        | VerificationError::CodeNotIssued
        | VerificationError::InvalidOtp
        | VerificationError::VerificationSessionExpired
        | VerificationError::InvalidPhoneNumber => StatusCode::BAD_REQUEST,
        VerificationError::NoPendingVerification | VerificationError::NoVerifiedAccount => {
            StatusCode::NOT_FOUND
        }
        VerificationError::ResetNotAuthorized => StatusCode::FORBIDDEN,
        VerificationError::ResendThrottled { .. } => StatusCode::TOO_MANY_REQUESTS,
        VerificationError::EmailDeliveryFailed | VerificationError::PhoneChannelUnavailable => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// HTTP status for any domain failure
pub fn domain_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Verification(inner) => verification_status(inner),
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict { .. } | DomainError::Storage { .. } | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn field_details(errors: &validator::ValidationErrors) -> HashMap<String, Value> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), Value::from(messages))
        })
        .collect()
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) | ApiError::Malformed(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(error) => domain_status(error),
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            ApiError::InvalidRequest(errors) => ErrorResponse::with_details(
                error_codes::VALIDATION_ERROR,
                "Some fields are invalid",
                field_details(errors),
            ),
            ApiError::Malformed(reason) => {
                ErrorResponse::new(error_codes::BAD_REQUEST, reason.clone())
            }
            ApiError::Domain(error) => error.to_error_response(),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error_code = %body.error, "Request rejected");
        }

        HttpResponse::build(status).json(body)
    }
}

/// `web::JsonConfig` error handler producing the shared envelope
pub fn json_error_handler(
    error: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    ApiError::Malformed(format!("Invalid JSON body: {}", error)).into()
}

/// `web::PathConfig` error handler producing the shared envelope
pub fn path_error_handler(
    error: actix_web::error::PathError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    ApiError::Malformed(format!("Invalid path parameter: {}", error)).into()
}
