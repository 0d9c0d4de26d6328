//! Layered application configuration
//!
//! Sources, later ones winning:
//! 1. presets for the current environment plus `.env` / process variables
//! 2. optional `config.<environment>.toml` in the working directory
//! 3. `CAFE__SECTION__FIELD` environment overrides

use config::{Config, ConfigError, Environment as EnvSource, File, FileFormat};

use cafe_shared::config::AppConfig;

pub const ENV_PREFIX: &str = "CAFE";

/// Load the application configuration
pub fn load() -> Result<AppConfig, ConfigError> {
    let base = cafe_infra::load_config();
    let config_file = base.environment.config_file().to_string();

    let settings = Config::builder()
        .add_source(Config::try_from(&base)?)
        .add_source(File::new(&config_file, FileFormat::Toml).required(false))
        .add_source(EnvSource::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

/// Reject combinations that cannot run
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.environment.is_production() && config.database.is_none() {
        return Err(ConfigError::Message(
            "A database is required in production; set DATABASE_URL".to_string(),
        ));
    }
    if config.verification.email_code_ttl_minutes <= 0 {
        return Err(ConfigError::Message(
            "email_code_ttl_minutes must be positive".to_string(),
        ));
    }
    if config.verification.reset_authorization_ttl_minutes <= 0 {
        return Err(ConfigError::Message(
            "reset_authorization_ttl_minutes must be positive".to_string(),
        ));
    }
    if config.verification.resend_cooldown_seconds < 0 {
        return Err(ConfigError::Message(
            "resend_cooldown_seconds cannot be negative".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_preset_is_valid() {
        assert!(validate(&AppConfig::development()).is_ok());
    }

    #[test]
    fn test_production_without_database_is_rejected() {
        let mut config = AppConfig::production();
        config.database = None;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_non_positive_ttl_is_rejected() {
        let mut config = AppConfig::development();
        config.verification.email_code_ttl_minutes = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_preset_survives_layering() {
        let base = AppConfig::development();
        let layered: AppConfig = Config::builder()
            .add_source(Config::try_from(&base).unwrap())
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(layered.server.port, base.server.port);
        assert_eq!(layered.email.provider, "console");
        assert!(layered.database.is_none());
    }
}
