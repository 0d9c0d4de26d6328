//! Owner registration endpoints

pub mod register;
pub mod resend_phone_code;
pub mod verify_email;
pub mod verify_phone;

use actix_web::web;

use cafe_core::repositories::AccountRepository;
use cafe_core::services::{EmailChannelTrait, PhoneChannelTrait};

pub use register::register;
pub use resend_phone_code::resend_phone_code;
pub use verify_email::verify_email;
pub use verify_phone::verify_phone;

/// Mount the registration routes on a scope
pub fn configure<A, E, P>(cfg: &mut web::ServiceConfig)
where
    A: AccountRepository + 'static,
    E: EmailChannelTrait + 'static,
    P: PhoneChannelTrait + 'static,
{
    cfg.route("/register", web::post().to(register::<A, E, P>))
        .route("/verify-email", web::post().to(verify_email::<A, E, P>))
        .route("/{account_id}/verify-phone", web::post().to(verify_phone::<A, E, P>))
        .route(
            "/{account_id}/resend-phone-code",
            web::post().to(resend_phone_code::<A, E, P>),
        );
}
