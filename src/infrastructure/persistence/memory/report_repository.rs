use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::poisoned;
use crate::domain::auth::errors::RepositoryError;
use crate::domain::report::entities::{NewReport, Report, ReportRevision};
use crate::domain::report::ports::ReportRepository;

#[derive(Debug)]
struct ReportStore {
  next_id: i64,
  reports: HashMap<i64, Report>,
}

/// In-memory report repository.
///
/// Owner ids are not checked against stored identities.
#[derive(Debug, Clone)]
pub struct InMemoryReportRepository {
  store: Arc<RwLock<ReportStore>>,
}

impl InMemoryReportRepository {
  pub fn new() -> Self {
    Self {
      store: Arc::new(RwLock::new(ReportStore {
        next_id: 1,
        reports: HashMap::new(),
      })),
    }
  }

  /// Number of stored reports
  pub fn len(&self) -> usize {
    self
      .store
      .read()
      .map(|store| store.reports.len())
      .unwrap_or(0)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Default for InMemoryReportRepository {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
  async fn create(&self, report: NewReport) -> Result<Report, RepositoryError> {
    let mut store = self.store.write().map_err(poisoned)?;

    let now = Utc::now();
    let created = Report {
      id: store.next_id,
      owner_id: report.owner_id,
      content: report.content,
      status: report.status,
      created_at: now,
      updated_at: now,
    };

    store.next_id += 1;
    store.reports.insert(created.id, created.clone());
    Ok(created)
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Report>, RepositoryError> {
    let store = self.store.read().map_err(poisoned)?;
    Ok(store.reports.get(&id).cloned())
  }

  async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Report>, RepositoryError> {
    let store = self.store.read().map_err(poisoned)?;

    let mut reports: Vec<Report> = store
      .reports
      .values()
      .filter(|report| report.owner_id == owner_id)
      .cloned()
      .collect();
    reports.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    Ok(reports)
  }

  async fn update(
    &self,
    report: Report,
    expected: ReportRevision,
  ) -> Result<Report, RepositoryError> {
    let mut store = self.store.write().map_err(poisoned)?;

    let existing = store
      .reports
      .get_mut(&report.id)
      .ok_or(RepositoryError::NotFound)?;

    if existing.revision() != expected {
      return Err(RepositoryError::Conflict(format!(
        "report {} changed since it was read",
        report.id
      )));
    }

    // Owner and creation time are fixed at creation
    existing.content = report.content;
    existing.status = report.status;
    existing.updated_at = report.updated_at;

    Ok(existing.clone())
  }

  async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
    let mut store = self.store.write().map_err(poisoned)?;

    store
      .reports
      .remove(&id)
      .map(|_| ())
      .ok_or(RepositoryError::NotFound)
  }
}
