use std::sync::Arc;

use super::entities::{NewReport, Report, ReportPatch};
use super::errors::ReportError;
use super::ports::ReportRepository;
use super::value_objects::{OwnershipPolicy, ReportContent};
use crate::domain::auth::entities::Actor;

/// Report service enforcing ownership on every report operation
pub struct ReportService {
  report_repo: Arc<dyn ReportRepository>,
  policy: OwnershipPolicy,
}

impl ReportService {
  pub fn new(report_repo: Arc<dyn ReportRepository>, policy: OwnershipPolicy) -> Self {
    Self {
      report_repo,
      policy,
    }
  }

  /// Creates a report owned by the actor, in the initial status
  pub async fn create_report(
    &self,
    actor: &Actor,
    content: ReportContent,
  ) -> Result<Report, ReportError> {
    let report = self
      .report_repo
      .create(NewReport::new(actor.id(), content))
      .await?;

    tracing::info!(
      report_id = report.id,
      owner_id = report.owner_id,
      "Report created"
    );
    Ok(report)
  }

  pub async fn get_report(&self, actor: &Actor, report_id: i64) -> Result<Report, ReportError> {
    self.find_owned(actor, report_id).await
  }

  pub async fn update_report(
    &self,
    actor: &Actor,
    report_id: i64,
    patch: ReportPatch,
  ) -> Result<Report, ReportError> {
    let mut report = self.find_owned(actor, report_id).await?;
    let expected = report.revision();
    report.apply(patch)?;

    let updated = self
      .report_repo
      .update(report, expected)
      .await
      .map_err(|e| ReportError::from_repository(report_id, e))?;

    tracing::info!(report_id, status = %updated.status, "Report updated");
    Ok(updated)
  }

  pub async fn delete_report(&self, actor: &Actor, report_id: i64) -> Result<(), ReportError> {
    self.find_owned(actor, report_id).await?;

    self
      .report_repo
      .delete(report_id)
      .await
      .map_err(|e| ReportError::from_repository(report_id, e))?;

    tracing::info!(report_id, owner_id = actor.id(), "Report deleted");
    Ok(())
  }

  /// Reports owned by the actor, most recently created first
  pub async fn list_my_reports(&self, actor: &Actor) -> Result<Vec<Report>, ReportError> {
    Ok(self.report_repo.list_by_owner(actor.id()).await?)
  }

  /// Existence check first, then ownership
  async fn find_owned(&self, actor: &Actor, report_id: i64) -> Result<Report, ReportError> {
    let report = self
      .report_repo
      .find_by_id(report_id)
      .await?
      .ok_or(ReportError::NotFound(report_id))?;

    self.authorize(actor, report)
  }

  fn authorize(&self, actor: &Actor, report: Report) -> Result<Report, ReportError> {
    if report.is_owned_by(actor.id()) {
      return Ok(report);
    }

    tracing::warn!(
      report_id = report.id,
      actor_id = actor.id(),
      "Access to report denied"
    );

    match self.policy {
      OwnershipPolicy::Conceal => Err(ReportError::NotFound(report.id)),
      OwnershipPolicy::Disclose => Err(ReportError::Forbidden(report.id)),
    }
  }
}
