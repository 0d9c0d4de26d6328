//! Password reset endpoints. The phone code is the only proof accepted.

pub mod complete;
pub mod initiate;
pub mod resend;
pub mod verify;

use actix_web::web;

use cafe_core::repositories::AccountRepository;
use cafe_core::services::{EmailChannelTrait, PhoneChannelTrait};

pub use complete::complete_reset;
pub use initiate::initiate_reset;
pub use resend::resend_reset_code;
pub use verify::verify_reset_code;

/// Mount the password reset routes on a scope
pub fn configure<A, E, P>(cfg: &mut web::ServiceConfig)
where
    A: AccountRepository + 'static,
    E: EmailChannelTrait + 'static,
    P: PhoneChannelTrait + 'static,
{
    cfg.route("/password-reset", web::post().to(initiate_reset::<A, E, P>))
        .route(
            "/password-reset/{account_id}/verify",
            web::post().to(verify_reset_code::<A, E, P>),
        )
        .route(
            "/password-reset/{account_id}/complete",
            web::post().to(complete_reset::<A, E, P>),
        )
        .route(
            "/password-reset/{account_id}/resend",
            web::post().to(resend_reset_code::<A, E, P>),
        );
}
