use actix_web::{web, HttpResponse};

use cafe_core::repositories::AccountRepository;
use cafe_core::services::{EmailChannelTrait, PhoneChannelTrait};
use cafe_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{VerifyEmailRequest, VerifyEmailResponse};
use crate::handlers::{validated, ApiError};

/// Handler for POST /api/v1/owners/verify-email
///
/// Proves the email address and starts phone verification. A phone
/// provider outage does not fail the request; `phone_code_sent` is false
/// and the client should call the resend endpoint.
pub async fn verify_email<A, E, P>(
    state: web::Data<AppState<A, E, P>>,
    body: web::Json<VerifyEmailRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    E: EmailChannelTrait + 'static,
    P: PhoneChannelTrait + 'static,
{
    let request = validated(body.into_inner())?;

    let outcome = state
        .registration
        .validate_email_code(&request.email, request.code.trim())
        .await?;

    let response = VerifyEmailResponse::from(outcome);
    let message = if response.phone_code_sent {
        "Email verified. We sent a code to your phone"
    } else {
        "Email verified. We could not text your phone yet, please request a new code"
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response).with_message(message)))
}
