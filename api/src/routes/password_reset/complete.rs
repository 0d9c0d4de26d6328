use actix_web::{web, HttpResponse};
use uuid::Uuid;

use cafe_core::repositories::AccountRepository;
use cafe_core::services::{EmailChannelTrait, PhoneChannelTrait};
use cafe_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{CompleteResetRequest, PasswordChangedResponse};
use crate::handlers::{validated, ApiError};

/// Handler for POST /api/v1/owners/password-reset/{account_id}/complete
///
/// Consumes the authorization from a successful code check. Returns `403`
/// without one, or once it was used or expired.
pub async fn complete_reset<A, E, P>(
    state: web::Data<AppState<A, E, P>>,
    path: web::Path<Uuid>,
    body: web::Json<CompleteResetRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    E: EmailChannelTrait + 'static,
    P: PhoneChannelTrait + 'static,
{
    let account_id = path.into_inner();
    let request = validated(body.into_inner())?;

    state
        .password_reset
        .complete_reset(account_id, &request.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::success(PasswordChangedResponse { account_id })
            .with_message("Password updated"),
    ))
}
