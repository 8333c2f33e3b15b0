use thiserror::Error;

use super::value_objects::{ReportStatus, ValueObjectError};
use crate::domain::auth::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ReportError {
  #[error("Report not found: {0}")]
  NotFound(i64),

  #[error("Not permitted to act on report {0}")]
  Forbidden(i64),

  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Invalid status transition: {from} -> {to}")]
  InvalidStatusTransition {
    from: ReportStatus,
    to: ReportStatus,
  },

  #[error("Report {0} is closed and can no longer be edited")]
  ReportClosed(i64),

  #[error("Report {0} was changed by another request")]
  ConcurrentModification(i64),

  #[error("Internal error")]
  Internal,
}

impl ReportError {
  /// Converts a repository failure that happened while acting on `report_id`
  pub fn from_repository(report_id: i64, error: RepositoryError) -> Self {
    match error {
      RepositoryError::NotFound => ReportError::NotFound(report_id),
      RepositoryError::Conflict(reason) => {
        tracing::warn!(report_id, "Report update lost a race: {}", reason);
        ReportError::ConcurrentModification(report_id)
      }
      other => other.into(),
    }
  }
}

impl From<RepositoryError> for ReportError {
  fn from(error: RepositoryError) -> Self {
    tracing::error!("Report storage failure: {}", error);
    ReportError::Internal
  }
}
