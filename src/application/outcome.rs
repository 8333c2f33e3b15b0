use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::report::errors::ReportError;

/// Per-request input shared by every interop operation
#[derive(Debug, Clone)]
pub struct RequestContext {
  /// Raw bearer token, exactly as presented by the client
  pub credential: Option<String>,
  pub request_id: Uuid,
}

impl RequestContext {
  pub fn new(credential: Option<String>, request_id: Uuid) -> Self {
    Self {
      credential,
      request_id,
    }
  }

  pub fn credential(&self) -> Option<&str> {
    self.credential.as_deref()
  }
}

/// Discriminant of an `Outcome`, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
  Ok,
  Unauthenticated,
  Forbidden,
  NotFound,
  Conflict,
  InvalidInput,
  Internal,
}

/// Result of an interop operation.
///
/// Failure variants carry a message that is safe to show to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
  Ok(T),
  Unauthenticated(String),
  Forbidden(String),
  NotFound(String),
  Conflict(String),
  InvalidInput(String),
  Internal,
}

impl<T> Outcome<T> {
  pub fn kind(&self) -> OutcomeKind {
    match self {
      Outcome::Ok(_) => OutcomeKind::Ok,
      Outcome::Unauthenticated(_) => OutcomeKind::Unauthenticated,
      Outcome::Forbidden(_) => OutcomeKind::Forbidden,
      Outcome::NotFound(_) => OutcomeKind::NotFound,
      Outcome::Conflict(_) => OutcomeKind::Conflict,
      Outcome::InvalidInput(_) => OutcomeKind::InvalidInput,
      Outcome::Internal => OutcomeKind::Internal,
    }
  }

  pub fn is_ok(&self) -> bool {
    matches!(self, Outcome::Ok(_))
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
    match self {
      Outcome::Ok(value) => Outcome::Ok(f(value)),
      Outcome::Unauthenticated(message) => Outcome::Unauthenticated(message),
      Outcome::Forbidden(message) => Outcome::Forbidden(message),
      Outcome::NotFound(message) => Outcome::NotFound(message),
      Outcome::Conflict(message) => Outcome::Conflict(message),
      Outcome::InvalidInput(message) => Outcome::InvalidInput(message),
      Outcome::Internal => Outcome::Internal,
    }
  }

  /// Payload of a successful outcome
  pub fn ok(self) -> Option<T> {
    match self {
      Outcome::Ok(value) => Some(value),
      _ => None,
    }
  }
}

impl<T> From<AuthError> for Outcome<T> {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::Unauthenticated(message) => Outcome::Unauthenticated(message),
      AuthError::Internal => Outcome::Internal,
    }
  }
}

impl<T> From<ReportError> for Outcome<T> {
  fn from(error: ReportError) -> Self {
    match error {
      ReportError::NotFound(_) => Outcome::NotFound(error.to_string()),
      ReportError::Forbidden(_) => Outcome::Forbidden(error.to_string()),
      ReportError::Validation(inner) => Outcome::InvalidInput(inner.to_string()),
      ReportError::InvalidStatusTransition { .. }
      | ReportError::ReportClosed(_)
      | ReportError::ConcurrentModification(_) => Outcome::Conflict(error.to_string()),
      ReportError::Internal => Outcome::Internal,
    }
  }
}

/// Joins the messages of every failed field into one client-facing message
impl<T> From<validator::ValidationErrors> for Outcome<T> {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    Outcome::InvalidInput(messages.join(", "))
  }
}

impl<T> From<Result<T, ReportError>> for Outcome<T> {
  fn from(result: Result<T, ReportError>) -> Self {
    match result {
      Ok(value) => Outcome::Ok(value),
      Err(error) => error.into(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::report::value_objects::{ReportStatus, ValueObjectError};

  #[test]
  fn test_report_errors_map_to_outcomes() {
    let cases: Vec<(ReportError, OutcomeKind)> = vec![
      (ReportError::NotFound(1), OutcomeKind::NotFound),
      (ReportError::Forbidden(1), OutcomeKind::Forbidden),
      (
        ReportError::Validation(ValueObjectError::EmptyPatch),
        OutcomeKind::InvalidInput,
      ),
      (
        ReportError::InvalidStatusTransition {
          from: ReportStatus::Resolved,
          to: ReportStatus::Pending,
        },
        OutcomeKind::Conflict,
      ),
      (ReportError::ReportClosed(1), OutcomeKind::Conflict),
      (ReportError::ConcurrentModification(1), OutcomeKind::Conflict),
      (ReportError::Internal, OutcomeKind::Internal),
    ];

    for (error, expected) in cases {
      let outcome: Outcome<()> = error.into();
      assert_eq!(outcome.kind(), expected);
    }
  }

  #[test]
  fn test_auth_errors_map_to_outcomes() {
    let outcome: Outcome<()> = AuthError::Unauthenticated("Missing credential".to_string()).into();
    assert_eq!(
      outcome,
      Outcome::Unauthenticated("Missing credential".to_string())
    );

    let outcome: Outcome<()> = AuthError::Internal.into();
    assert_eq!(outcome, Outcome::Internal);
  }

  #[test]
  fn test_validation_errors_become_invalid_input() {
    let mut errors = validator::ValidationErrors::new();
    let mut error = validator::ValidationError::new("length");
    error.message = Some("Content must be between 1 and 10000 characters".into());
    errors.add("content", error);

    let outcome: Outcome<()> = errors.into();

    assert_eq!(
      outcome,
      Outcome::InvalidInput("Content must be between 1 and 10000 characters".to_string())
    );
  }

  #[test]
  fn test_map_keeps_failures() {
    assert_eq!(Outcome::Ok(2).map(|n| n * 10), Outcome::Ok(20));
    assert_eq!(
      Outcome::<i32>::NotFound("gone".to_string()).map(|n| n * 10),
      Outcome::NotFound("gone".to_string())
    );
  }
}
