use actix_web::{web, HttpResponse};
use uuid::Uuid;

use cafe_core::repositories::AccountRepository;
use cafe_core::services::{EmailChannelTrait, PhoneChannelTrait};
use cafe_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{ResetAuthorizedResponse, VerifyCodeRequest};
use crate::handlers::{validated, ApiError};

/// Handler for POST /api/v1/owners/password-reset/{account_id}/verify
pub async fn verify_reset_code<A, E, P>(
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

    let authorization = state
        .password_reset
        .verify_reset_code(account_id, request.code.trim())
        .await?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::success(ResetAuthorizedResponse::from(authorization))
            .with_message("Code accepted. Choose a new password"),
    ))
}
