//! In-memory repository implementations
//!
//! Thread-safe stores used by the unit and HTTP tests; the server always
//! runs on Postgres, with or without the mock verifier.

mod identity_repository;
mod report_repository;

pub use identity_repository::InMemoryIdentityRepository;
pub use report_repository::InMemoryReportRepository;

use crate::domain::auth::errors::RepositoryError;

fn poisoned<T>(_: T) -> RepositoryError {
  RepositoryError::DatabaseError("In-memory store lock poisoned".to_string())
}
