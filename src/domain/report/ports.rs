use async_trait::async_trait;

use super::entities::{NewReport, Report, ReportRevision};
use crate::domain::auth::errors::RepositoryError;

/// Repository trait for report persistence operations.
///
/// Raw persistence only: every returned report carries its `owner_id` and the
/// caller decides who may see or change it.
#[async_trait]
pub trait ReportRepository: Send + Sync {
  async fn create(&self, report: NewReport) -> Result<Report, RepositoryError>;
  async fn find_by_id(&self, id: i64) -> Result<Option<Report>, RepositoryError>;
  /// Reports of one owner, most recently created first
  async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Report>, RepositoryError>;
  /// Writes the report only if the stored row still matches `expected`.
  ///
  /// Fails with `RepositoryError::Conflict` when another write landed since
  /// `expected` was read, and with `RepositoryError::NotFound` when the row is gone.
  async fn update(
    &self,
    report: Report,
    expected: ReportRevision,
  ) -> Result<Report, RepositoryError>;
  async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
