//! Application state and factory

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use cafe_core::repositories::AccountRepository;
use cafe_core::services::{
    Clock, EmailChannelTrait, PasswordResetService, PhoneChannelTrait, RegistrationService,
    VerificationServiceConfig,
};
use cafe_shared::{error_codes, ErrorResponse, HealthResponse};

use crate::handlers::{json_error_handler, path_error_handler};
use crate::routes;

/// Shared services handed to every handler
pub struct AppState<A, E, P>
where
    A: AccountRepository,
    E: EmailChannelTrait,
    P: PhoneChannelTrait,
{
    pub registration: Arc<RegistrationService<A, E, P>>,
    pub password_reset: Arc<PasswordResetService<A, P>>,
}

impl<A, E, P> AppState<A, E, P>
where
    A: AccountRepository,
    E: EmailChannelTrait,
    P: PhoneChannelTrait,
{
    /// Build both state machines over the same account store and phone channel
    pub fn new(
        accounts: Arc<A>,
        email_channel: Arc<E>,
        phone_channel: Arc<P>,
        clock: Arc<dyn Clock>,
        config: VerificationServiceConfig,
    ) -> Self {
        let password_reset = PasswordResetService::new(
            accounts.clone(),
            phone_channel.clone(),
            clock.clone(),
            config.clone(),
        );
        let registration =
            RegistrationService::new(accounts, email_channel, phone_channel, clock, config);

        Self {
            registration: Arc::new(registration),
            password_reset: Arc::new(password_reset),
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<A, E, P>(
    app_state: web::Data<AppState<A, E, P>>,
    max_payload_size: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            impl actix_web::body::MessageBody,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    A: AccountRepository + 'static,
    E: EmailChannelTrait + 'static,
    P: PhoneChannelTrait + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(max_payload_size)
                .error_handler(json_error_handler),
        )
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1/owners")
                .configure(routes::registration::configure::<A, E, P>)
                .configure(routes::password_reset::configure::<A, E, P>),
        )
        .default_service(web::route().to(not_found))
}

/// Liveness check
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
