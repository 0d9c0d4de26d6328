//! Shared utilities and common types for the cafe platform server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response envelope and error codes
//! - Intake normalization (phone numbers, emails, passwords, cafe profiles)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, EmailConfig, Environment, LogFormat, LoggingConfig,
    PhoneVerificationConfig, ServerConfig, VerificationConfig,
};
pub use errors::{error_codes, ApiResult, ErrorResponse, IntoErrorResponse};
pub use types::{ApiResponse, HealthResponse, HealthStatus};
pub use utils::{phone, validation};
