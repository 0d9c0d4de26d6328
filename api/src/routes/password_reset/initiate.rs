use actix_web::{web, HttpResponse};

use cafe_core::repositories::AccountRepository;
use cafe_core::services::{EmailChannelTrait, PhoneChannelTrait};
use cafe_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{InitiateResetRequest, InitiateResetResponse};
use crate::handlers::{validated, ApiError};

/// Handler for POST /api/v1/owners/password-reset
///
/// Texts a code to the phone on a fully verified account. Unknown and
/// unfinished accounts get the same `404` response.
pub async fn initiate_reset<A, E, P>(
    state: web::Data<AppState<A, E, P>>,
    body: web::Json<InitiateResetRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    E: EmailChannelTrait + 'static,
    P: PhoneChannelTrait + 'static,
{
    let request = validated(body.into_inner())?;

    let initiation = state.password_reset.initiate_reset(&request.email).await?;
    let response = InitiateResetResponse::from(initiation);
    let message = format!("We sent a code to {}", response.phone_hint);

    Ok(HttpResponse::Ok().json(ApiResponse::success(response).with_message(message)))
}
