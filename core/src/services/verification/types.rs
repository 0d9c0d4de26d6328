//! Channel result and error types

use thiserror::Error;

/// Outcome of a phone code check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneCheckStatus {
    /// Code accepted
    Approved,
    /// Wrong code; the session stays open
    Rejected,
    /// No open session: expired, never started, or attempts used up
    SessionNotFound,
}

/// Channel failures, classified once by the adapter that talks to the provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("Provider throttled the request")]
    Throttled { retry_after_seconds: Option<i64> },

    #[error("Provider rejected the recipient")]
    InvalidRecipient,

    #[error("Provider unavailable: {message}")]
    Unavailable { message: String },
}
