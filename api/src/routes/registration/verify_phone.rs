use actix_web::{web, HttpResponse};
use uuid::Uuid;

use cafe_core::repositories::AccountRepository;
use cafe_core::services::{EmailChannelTrait, PhoneChannelTrait};
use cafe_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{VerifyCodeRequest, VerifyPhoneResponse};
use crate::handlers::{validated, ApiError};

/// Handler for POST /api/v1/owners/{account_id}/verify-phone
///
/// Checks the texted code with the provider and completes registration.
/// Repeating the call on a completed account succeeds without a provider call.
pub async fn verify_phone<A, E, P>(
    state: web::Data<AppState<A, E, P>>,
    path: web::Path<Uuid>,
    body: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    E: EmailChannelTrait + 'static,
    P: PhoneChannelTrait + 'static,
{
    let account_id = path.into_inner();
    let request = validated(body.into_inner())?;

    let outcome = state
        .registration
        .validate_phone_code(account_id, request.code.trim())
        .await?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::success(VerifyPhoneResponse::from(outcome))
            .with_message("Phone verified. Your account is ready"),
    ))
}
