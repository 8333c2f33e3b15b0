use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use super::{RequestDeadline, request_context, with_deadline};
use crate::adapters::http::{dtos::IdentityResponse, errors::ApiError};
use crate::application::auth::AuthInterop;

/// Handler for the caller's identity
///
/// GET /v2/auth/me
/// Header: Authorization: Bearer <token>
/// Response: IdentityResponse (JSON) with status 200
pub async fn me_handler(
  req: HttpRequest,
  interop: web::Data<Arc<AuthInterop>>,
  deadline: web::Data<RequestDeadline>,
) -> Result<HttpResponse, ApiError> {
  let ctx = request_context(&req);

  let identity =
    ApiError::from_outcome(with_deadline(**deadline, &ctx, interop.me(&ctx)).await)?;

  Ok(HttpResponse::Ok().json(IdentityResponse::from(identity)))
}
