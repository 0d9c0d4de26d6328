use actix_web::{web, HttpResponse};

use cafe_core::repositories::AccountRepository;
use cafe_core::services::{EmailChannelTrait, PhoneChannelTrait};
use cafe_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{RegisterOwnerRequest, RegisterOwnerResponse};
use crate::handlers::{validated, ApiError};

/// Handler for POST /api/v1/owners/register
///
/// Stores a pending owner account and emails a 6-digit code. Re-submitting
/// an unverified email replaces the earlier attempt and sends a new code.
///
/// # Request Body
///
/// ```json
/// {
///     "owner_name": "Asha Rao",
///     "cafe_name": "Filter Kaapi House",
///     "email": "asha@filterkaapi.in",
///     "phone": "98765 43210",
///     "address": "12 MG Road",
///     "city": "Bengaluru",
///     "state": "Karnataka",
///     "pincode": "560001",
///     "password": "Sunrise#2024"
/// }
/// ```
///
/// # Responses
///
/// - `201` new pending account, `200` resumed pending account
/// - `400` invalid fields
/// - `409` email already verified
/// - `503` email could not be sent; retrying resumes the same account
pub async fn register<A, E, P>(
    state: web::Data<AppState<A, E, P>>,
    body: web::Json<RegisterOwnerRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    E: EmailChannelTrait + 'static,
    P: PhoneChannelTrait + 'static,
{
    let request = validated(body.into_inner())?;

    let outcome = state.registration.begin_registration(request.into()).await?;
    let resumed = outcome.resumed;
    let response = ApiResponse::success(RegisterOwnerResponse::from(outcome))
        .with_message("We sent a 6-digit code to your email address");

    Ok(if resumed {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::Created().json(response)
    })
}
