use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::domain::auth::errors::RepositoryError;
use crate::domain::report::entities::{NewReport, Report, ReportRevision};
use crate::domain::report::ports::ReportRepository;
use crate::domain::report::value_objects::{ReportContent, ReportStatus};

/// Database row structure for reports table
#[derive(Debug, FromRow)]
struct ReportRow {
  id: i64,
  owner_id: i64,
  content: String,
  status: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<ReportRow> for Report {
  type Error = RepositoryError;

  fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
    let content = ReportContent::new(row.content)
      .map_err(|e| RepositoryError::DatabaseError(format!("Invalid stored content: {}", e)))?;
    let status = row
      .status
      .parse::<ReportStatus>()
      .map_err(|e| RepositoryError::DatabaseError(format!("Invalid stored status: {}", e)))?;

    Ok(Report {
      id: row.id,
      owner_id: row.owner_id,
      content,
      status,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

/// PostgreSQL implementation of the ReportRepository trait
pub struct PostgresReportRepository {
  pool: PgPool,
}

impl PostgresReportRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
  async fn create(&self, report: NewReport) -> Result<Report, RepositoryError> {
    let row = sqlx::query_as::<_, ReportRow>(
      r#"
            INSERT INTO reports (owner_id, content, status)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, content, status, created_at, updated_at
            "#,
    )
    .bind(report.owner_id)
    .bind(report.content.value())
    .bind(report.status.as_str())
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to create report: {}", e);
      RepositoryError::from(e)
    })?;

    row.try_into()
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Report>, RepositoryError> {
    let row = sqlx::query_as::<_, ReportRow>(
      r#"
            SELECT id, owner_id, content, status, created_at, updated_at
            FROM reports
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to find report by id: {}", e);
      RepositoryError::from(e)
    })?;

    row.map(Report::try_from).transpose()
  }

  async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Report>, RepositoryError> {
    let rows = sqlx::query_as::<_, ReportRow>(
      r#"
            SELECT id, owner_id, content, status, created_at, updated_at
            FROM reports
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
    )
    .bind(owner_id)
    .fetch_all(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to list reports by owner: {}", e);
      RepositoryError::from(e)
    })?;

    rows.into_iter().map(Report::try_from).collect()
  }

  /// Compare-and-swap on status and last write time; the row is only
  /// written when nobody else wrote it since `expected` was read
  async fn update(
    &self,
    report: Report,
    expected: ReportRevision,
  ) -> Result<Report, RepositoryError> {
    let row = sqlx::query_as::<_, ReportRow>(
      r#"
            UPDATE reports
            SET content = $2, status = $3, updated_at = $4
            WHERE id = $1 AND status = $5 AND updated_at = $6
            RETURNING id, owner_id, content, status, created_at, updated_at
            "#,
    )
    .bind(report.id)
    .bind(report.content.value())
    .bind(report.status.as_str())
    .bind(report.updated_at)
    .bind(expected.status.as_str())
    .bind(expected.updated_at)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to update report: {}", e);
      RepositoryError::from(e)
    })?;

    if let Some(row) = row {
      return row.try_into();
    }

    let exists: bool = sqlx::query_scalar(
      r#"
            SELECT EXISTS(SELECT 1 FROM reports WHERE id = $1)
            "#,
    )
    .bind(report.id)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to check report existence: {}", e);
      RepositoryError::from(e)
    })?;

    if exists {
      Err(RepositoryError::Conflict(format!(
        "report {} changed since it was read",
        report.id
      )))
    } else {
      Err(RepositoryError::NotFound)
    }
  }

  async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
    let result = sqlx::query(
      r#"
            DELETE FROM reports
            WHERE id = $1
            "#,
    )
    .bind(id)
    .execute(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to delete report: {}", e);
      RepositoryError::from(e)
    })?;

    if result.rows_affected() == 0 {
      tracing::warn!("Report {} not found for deletion", id);
      return Err(RepositoryError::NotFound);
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::entities::NewIdentity;
  use crate::domain::auth::ports::IdentityRepository;
  use crate::infrastructure::persistence::postgres::PostgresIdentityRepository;
  use crate::infrastructure::persistence::postgres::test_support::setup_test_db;

  async fn create_owner(pool: &PgPool, external_id: &str) -> i64 {
    PostgresIdentityRepository::new(pool.clone())
      .create(NewIdentity {
        external_id: external_id.to_string(),
        email: format!("{}@example.com", external_id),
        display_name: None,
        photo_url: None,
      })
      .await
      .unwrap()
      .id
  }

  fn new_report(owner_id: i64, content: &str) -> NewReport {
    NewReport::new(owner_id, ReportContent::new(content).unwrap())
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_create_and_find_report() {
    let (pool, _container) = setup_test_db().await;
    let owner_id = create_owner(&pool, "alice").await;
    let repo = PostgresReportRepository::new(pool);

    let created = repo.create(new_report(owner_id, "draft")).await.unwrap();
    let found = repo.find_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(found.owner_id, owner_id);
    assert_eq!(found.content.value(), "draft");
    assert_eq!(found.status, ReportStatus::Pending);
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_unknown_owner_is_rejected() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresReportRepository::new(pool);

    let result = repo.create(new_report(999, "orphan")).await;

    assert!(matches!(
      result,
      Err(RepositoryError::ConstraintViolation(_))
    ));
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_list_by_owner_most_recent_first() {
    let (pool, _container) = setup_test_db().await;
    let alice = create_owner(&pool, "alice").await;
    let bob = create_owner(&pool, "bob").await;
    let repo = PostgresReportRepository::new(pool);

    let first = repo.create(new_report(alice, "first")).await.unwrap();
    repo.create(new_report(bob, "other")).await.unwrap();
    let second = repo.create(new_report(alice, "second")).await.unwrap();

    let reports = repo.list_by_owner(alice).await.unwrap();

    let ids: Vec<i64> = reports.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_stale_update_is_rejected() {
    let (pool, _container) = setup_test_db().await;
    let owner_id = create_owner(&pool, "alice").await;
    let repo = PostgresReportRepository::new(pool);
    let created = repo.create(new_report(owner_id, "draft")).await.unwrap();
    let report_id = created.id;
    let read = created.revision();

    let mut first = created.clone();
    first.status = ReportStatus::Resolved;
    first.updated_at = Utc::now();
    repo.update(first, read).await.unwrap();

    let mut second = created;
    second.status = ReportStatus::Rejected;
    second.updated_at = Utc::now();
    let result = repo.update(second, read).await;

    assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    let stored = repo.find_by_id(report_id).await.unwrap().unwrap();
    assert_eq!(stored.status, ReportStatus::Resolved);
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_update_and_delete_report() {
    let (pool, _container) = setup_test_db().await;
    let owner_id = create_owner(&pool, "alice").await;
    let repo = PostgresReportRepository::new(pool);
    let mut report = repo.create(new_report(owner_id, "draft")).await.unwrap();
    let expected = report.revision();

    report.status = ReportStatus::Reviewing;
    let updated = repo.update(report, expected).await.unwrap();
    assert_eq!(updated.status, ReportStatus::Reviewing);

    repo.delete(updated.id).await.unwrap();
    assert!(repo.find_by_id(updated.id).await.unwrap().is_none());
    assert!(matches!(
      repo.delete(updated.id).await,
      Err(RepositoryError::NotFound)
    ));
  }
}
