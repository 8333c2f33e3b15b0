use thiserror::Error;

use super::value_objects::ValueObjectError;

/// Authentication error type surfaced by `AuthService`
///
/// Storage and provider details never travel past this type; they are logged
/// where the conversion happens.
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Authentication required: {0}")]
  Unauthenticated(String),

  #[error("Internal error")]
  Internal,
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Constraint violation: {0}")]
  ConstraintViolation(String),

  #[error("Concurrent modification: {0}")]
  Conflict(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

/// Identity provider errors
#[derive(Debug, Error)]
pub enum VerifierError {
  /// The credential is expired, malformed, revoked or otherwise not acceptable
  #[error("Credential rejected: {0}")]
  Rejected(String),

  /// The provider could not be reached or answered with a server error
  #[error("Identity provider unavailable: {0}")]
  Unavailable(String),
}

// Automatic conversions from external error types

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(db_err.message().to_string())
        } else if db_err.is_foreign_key_violation() || db_err.is_check_violation() {
          RepositoryError::ConstraintViolation(db_err.message().to_string())
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<RepositoryError> for AuthError {
  fn from(error: RepositoryError) -> Self {
    tracing::error!("Identity storage failure: {}", error);
    AuthError::Internal
  }
}

impl From<VerifierError> for AuthError {
  fn from(error: VerifierError) -> Self {
    match error {
      VerifierError::Rejected(reason) => {
        tracing::warn!("Credential rejected by identity provider: {}", reason);
        AuthError::Unauthenticated("Invalid or expired credential".to_string())
      }
      VerifierError::Unavailable(reason) => {
        tracing::error!("Identity provider unavailable: {}", reason);
        AuthError::Internal
      }
    }
  }
}

impl From<ValueObjectError> for AuthError {
  fn from(error: ValueObjectError) -> Self {
    AuthError::Unauthenticated(error.to_string())
  }
}
