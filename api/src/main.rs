use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};

use cafe_api::{config, create_app, telemetry, AppState};
use cafe_core::repositories::{AccountRepository, InMemoryAccountRepository};
use cafe_core::services::{SystemClock, VerificationServiceConfig};
use cafe_infra::database::{DatabasePool, MySqlAccountRepository};
use cafe_infra::{create_email_service, create_phone_verification_service};
use cafe_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load()?;
    telemetry::init_tracing(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting cafe owner API"
    );

    match config.database.clone() {
        Some(database) => {
            let pool = DatabasePool::new(database).await?;
            pool.run_migrations().await?;
            tracing::info!(pool = %pool.get_statistics(), "Connected to MySQL");

            let accounts = MySqlAccountRepository::new(pool.get_pool().clone());
            let result = run(config, accounts).await;
            pool.close().await;
            result
        }
        None => {
            tracing::warn!("No database configured, accounts are kept in memory");
            run(config, InMemoryAccountRepository::new()).await
        }
    }
}

/// Wire the channels around an account store and serve until shutdown
async fn run<A>(config: AppConfig, accounts: A) -> anyhow::Result<()>
where
    A: AccountRepository + 'static,
{
    let email_channel = create_email_service(
        &config.email,
        config.environment,
        config.verification.email_code_ttl_minutes,
    )?;
    let phone_channel = create_phone_verification_service(&config.phone, config.environment)?;
    tracing::info!(
        email = email_channel.provider_name(),
        phone = phone_channel.provider_name(),
        "Verification channels ready"
    );

    let state = web::Data::new(AppState::new(
        Arc::new(accounts),
        Arc::new(email_channel),
        Arc::new(phone_channel),
        Arc::new(SystemClock),
        VerificationServiceConfig::from(&config.verification),
    ));

    let max_payload_size = config.server.max_payload_size;
    let bind_address = config.server.bind_address();
    tracing::info!("Server listening on {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone(), max_payload_size))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;
    Ok(())
}
