use actix_web::{web, HttpResponse};
use uuid::Uuid;

use cafe_core::repositories::AccountRepository;
use cafe_core::services::{EmailChannelTrait, PhoneChannelTrait};
use cafe_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::CodeSentResponse;
use crate::handlers::ApiError;

/// Handler for POST /api/v1/owners/password-reset/{account_id}/resend
pub async fn resend_reset_code<A, E, P>(
    state: web::Data<AppState<A, E, P>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    E: EmailChannelTrait + 'static,
    P: PhoneChannelTrait + 'static,
{
    let account_id = path.into_inner();
    state.password_reset.resend_reset_code(account_id).await?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::success(CodeSentResponse { account_id })
            .with_message("We sent a new code to your phone"),
    ))
}
