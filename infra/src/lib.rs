//! # Infrastructure Layer
//!
//! Concrete adapters behind the ports defined in `cafe_core`:
//! - **Database**: MySQL account store using SQLx
//! - **Email**: Resend HTTP API and a console sender for development
//! - **SMS**: Twilio Verify and an in-process mock for development
//!
//! ## Features
//!
//! - `mysql`: Enable the MySQL account store (default)

use cafe_shared::config::{AppConfig, Environment};

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email delivery adapters
pub mod email;

/// Phone verification adapters
pub mod sms;

pub use email::{create_email_service, ConsoleEmailService, ResendEmailService};
pub use sms::{create_phone_verification_service, MockPhoneVerificationService, TwilioVerifyService};

/// Load the `.env` file for the current environment and build the
/// application configuration from environment variables.
///
/// A missing `.env` file is not an error; the process environment is used as is.
pub fn load_config() -> AppConfig {
    let env = Environment::from_env();
    if dotenvy::from_filename(env.env_file()).is_err() {
        dotenvy::dotenv().ok();
    }
    AppConfig::from_env()
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
