//! Configuration module with business-specific sub-modules
//!
//! - `channels` - Email and phone verification provider settings
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration
//! - `verification` - Code lifetimes, resend cooldown and password hashing

pub mod channels;
pub mod database;
pub mod environment;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

pub use channels::{EmailConfig, PhoneVerificationConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,

    pub server: ServerConfig,

    /// Database configuration; the in-memory store is used when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub verification: VerificationConfig,

    #[serde(default)]
    pub email: EmailConfig,

    #[serde(default)]
    pub phone: PhoneVerificationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: None,
            verification: VerificationConfig::default(),
            email: EmailConfig::default(),
            phone: PhoneVerificationConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 8080),
            database: None,
            verification: VerificationConfig::default(),
            email: EmailConfig::console(),
            phone: PhoneVerificationConfig::mock(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            database: Some(
                DatabaseConfig::new("mysql://prod-db:3306/cafe_platform").with_max_connections(50),
            ),
            verification: VerificationConfig::default(),
            email: EmailConfig::default(),
            phone: PhoneVerificationConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        };

        config.server = ServerConfig::from_env(config.server);
        if std::env::var("DATABASE_URL").is_ok() {
            config.database = Some(DatabaseConfig::from_env());
        }
        config.verification = VerificationConfig::from_env();
        config.email = EmailConfig::from_env(config.email);
        config.phone = PhoneVerificationConfig::from_env(config.phone);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_uses_local_adapters() {
        let config = AppConfig::development();
        assert!(config.database.is_none());
        assert_eq!(config.email.provider, "console");
        assert_eq!(config.phone.provider, "mock");
    }

    #[test]
    fn test_production_requires_database() {
        let config = AppConfig::production();
        assert!(config.database.is_some());
        assert!(config.environment.is_production());
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}
