use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::application::outcome::Outcome;

use super::dtos::ErrorResponse;

/// API error type that maps interop outcomes to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// 401 Unauthorized
  Unauthenticated(String),

  /// 403 Forbidden
  Forbidden(String),

  /// 404 Not Found
  NotFound(String),

  /// 409 Conflict
  Conflict(String),

  /// 400 Bad Request
  Validation(String),

  /// 500 Internal Server Error; the detail is logged, never sent
  Internal(String),
}

impl ApiError {
  /// Unwraps a successful outcome or converts the failure
  pub fn from_outcome<T>(outcome: Outcome<T>) -> Result<T, ApiError> {
    match outcome {
      Outcome::Ok(value) => Ok(value),
      Outcome::Unauthenticated(message) => Err(ApiError::Unauthenticated(message)),
      Outcome::Forbidden(message) => Err(ApiError::Forbidden(message)),
      Outcome::NotFound(message) => Err(ApiError::NotFound(message)),
      Outcome::Conflict(message) => Err(ApiError::Conflict(message)),
      Outcome::InvalidInput(message) => Err(ApiError::Validation(message)),
      Outcome::Internal => Err(ApiError::Internal("Interop reported an internal error".into())),
    }
  }

  fn error_type(&self) -> &'static str {
    match self {
      ApiError::Unauthenticated(_) => "unauthenticated",
      ApiError::Forbidden(_) => "forbidden",
      ApiError::NotFound(_) => "not_found",
      ApiError::Conflict(_) => "conflict",
      ApiError::Validation(_) => "validation_error",
      ApiError::Internal(_) => "internal_error",
    }
  }
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
      ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
      ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let message = match self {
      ApiError::Internal(msg) => {
        tracing::error!("Internal error: {}", msg);
        "An internal server error occurred".to_string()
      }
      ApiError::Unauthenticated(msg)
      | ApiError::Forbidden(msg)
      | ApiError::NotFound(msg)
      | ApiError::Conflict(msg)
      | ApiError::Validation(msg) => msg.clone(),
    };

    HttpResponse::build(self.status_code())
      .content_type(ContentType::json())
      .json(ErrorResponse {
        error: self.error_type().to_string(),
        message,
      })
  }
}
