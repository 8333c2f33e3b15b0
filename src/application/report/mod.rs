//! Report interop

use std::sync::Arc;
use validator::Validate;

use super::outcome::{Outcome, RequestContext};
use crate::domain::auth::entities::Actor;
use crate::domain::auth::services::AuthService;
use crate::domain::report::entities::{Report, ReportPatch};
use crate::domain::report::errors::ReportError;
use crate::domain::report::services::ReportService;
use crate::domain::report::value_objects::{ReportContent, ReportStatus};

/// Command for creating a report
#[derive(Debug, Clone, Validate)]
pub struct CreateReportCommand {
  #[validate(length(
    min = 1,
    max = 10000,
    message = "Content must be between 1 and 10000 characters"
  ))]
  pub content: String,
}

/// Command for a partial report update
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateReportCommand {
  #[validate(length(
    min = 1,
    max = 10000,
    message = "Content must be between 1 and 10000 characters"
  ))]
  pub content: Option<String>,
  /// One of pending, reviewing, resolved, rejected
  pub status: Option<String>,
}

impl CreateReportCommand {
  fn into_content(self) -> Result<ReportContent, ReportError> {
    Ok(ReportContent::new(self.content)?)
  }
}

impl UpdateReportCommand {
  fn into_patch(self) -> Result<ReportPatch, ReportError> {
    let content = self.content.map(ReportContent::new).transpose()?;
    let status = self
      .status
      .as_deref()
      .map(str::parse::<ReportStatus>)
      .transpose()?;

    Ok(ReportPatch::new(content, status)?)
  }
}

/// Interop for the caller's reports.
///
/// Every operation authenticates first; payloads are validated only for an
/// authenticated caller, and no report is touched otherwise.
pub struct ReportInterop {
  auth_service: Arc<AuthService>,
  report_service: Arc<ReportService>,
}

impl ReportInterop {
  pub fn new(auth_service: Arc<AuthService>, report_service: Arc<ReportService>) -> Self {
    Self {
      auth_service,
      report_service,
    }
  }

  pub async fn create(
    &self,
    ctx: &RequestContext,
    command: CreateReportCommand,
  ) -> Outcome<Report> {
    let actor = match self.actor(ctx).await {
      Ok(actor) => actor,
      Err(outcome) => return outcome,
    };

    if let Err(errors) = command.validate() {
      return errors.into();
    }

    let content = match command.into_content() {
      Ok(content) => content,
      Err(error) => return error.into(),
    };

    self.report_service.create_report(&actor, content).await.into()
  }

  pub async fn get(&self, ctx: &RequestContext, report_id: i64) -> Outcome<Report> {
    let actor = match self.actor(ctx).await {
      Ok(actor) => actor,
      Err(outcome) => return outcome,
    };

    self.report_service.get_report(&actor, report_id).await.into()
  }

  pub async fn update(
    &self,
    ctx: &RequestContext,
    report_id: i64,
    command: UpdateReportCommand,
  ) -> Outcome<Report> {
    let actor = match self.actor(ctx).await {
      Ok(actor) => actor,
      Err(outcome) => return outcome,
    };

    if let Err(errors) = command.validate() {
      return errors.into();
    }

    let patch = match command.into_patch() {
      Ok(patch) => patch,
      Err(error) => return error.into(),
    };

    self
      .report_service
      .update_report(&actor, report_id, patch)
      .await
      .into()
  }

  pub async fn delete(&self, ctx: &RequestContext, report_id: i64) -> Outcome<()> {
    let actor = match self.actor(ctx).await {
      Ok(actor) => actor,
      Err(outcome) => return outcome,
    };

    self
      .report_service
      .delete_report(&actor, report_id)
      .await
      .into()
  }

  pub async fn list(&self, ctx: &RequestContext) -> Outcome<Vec<Report>> {
    let actor = match self.actor(ctx).await {
      Ok(actor) => actor,
      Err(outcome) => return outcome,
    };

    self.report_service.list_my_reports(&actor).await.into()
  }

  async fn actor<T>(&self, ctx: &RequestContext) -> Result<Actor, Outcome<T>> {
    self
      .auth_service
      .authenticate(ctx.credential())
      .await
      .map_err(|error| {
        tracing::debug!(request_id = %ctx.request_id, "Report request not authenticated");
        Outcome::from(error)
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::outcome::OutcomeKind;
  use crate::domain::report::value_objects::OwnershipPolicy;
  use crate::infrastructure::identity::MockIdentityVerifier;
  use crate::infrastructure::persistence::memory::{
    InMemoryIdentityRepository, InMemoryReportRepository,
  };
  use uuid::Uuid;

  const ALICE: &str = "mock:alice:alice@example.com";
  const BOB: &str = "mock:bob:bob@example.com";

  fn interop(policy: OwnershipPolicy) -> (ReportInterop, Arc<InMemoryReportRepository>) {
    let reports = Arc::new(InMemoryReportRepository::new());
    let auth_service = AuthService::new(
      Arc::new(InMemoryIdentityRepository::new()),
      Arc::new(MockIdentityVerifier::default()),
    );
    let report_service = ReportService::new(reports.clone(), policy);
    (
      ReportInterop::new(Arc::new(auth_service), Arc::new(report_service)),
      reports,
    )
  }

  fn ctx(credential: Option<&str>) -> RequestContext {
    RequestContext::new(credential.map(str::to_string), Uuid::new_v4())
  }

  fn create_command(content: &str) -> CreateReportCommand {
    CreateReportCommand {
      content: content.to_string(),
    }
  }

  #[tokio::test]
  async fn test_create_and_get() {
    let (interop, _) = interop(OwnershipPolicy::Conceal);

    let created = interop
      .create(&ctx(Some(ALICE)), create_command("draft"))
      .await
      .ok()
      .unwrap();
    let fetched = interop
      .get(&ctx(Some(ALICE)), created.id)
      .await
      .ok()
      .unwrap();

    assert_eq!(fetched.content.value(), "draft");
    assert_eq!(fetched.owner_id, 1);
    assert_eq!(fetched.status, ReportStatus::Pending);
  }

  #[tokio::test]
  async fn test_unauthenticated_caller_touches_nothing() {
    let (interop, reports) = interop(OwnershipPolicy::Conceal);

    let outcome = interop.create(&ctx(None), create_command("draft")).await;
    assert_eq!(outcome.kind(), OutcomeKind::Unauthenticated);

    let outcome = interop.list(&ctx(Some("not-a-mock"))).await;
    assert_eq!(outcome.kind(), OutcomeKind::Unauthenticated);

    assert!(reports.is_empty());
  }

  #[tokio::test]
  async fn test_other_identity_gets_not_found_when_concealed() {
    let (interop, _) = interop(OwnershipPolicy::Conceal);
    let report = interop
      .create(&ctx(Some(ALICE)), create_command("draft"))
      .await
      .ok()
      .unwrap();

    let outcome = interop.get(&ctx(Some(BOB)), report.id).await;

    assert_eq!(outcome.kind(), OutcomeKind::NotFound);
  }

  #[tokio::test]
  async fn test_other_identity_gets_forbidden_when_disclosed() {
    let (interop, _) = interop(OwnershipPolicy::Disclose);
    let report = interop
      .create(&ctx(Some(ALICE)), create_command("draft"))
      .await
      .ok()
      .unwrap();

    let outcome = interop.get(&ctx(Some(BOB)), report.id).await;

    assert_eq!(outcome.kind(), OutcomeKind::Forbidden);
  }

  #[tokio::test]
  async fn test_invalid_payloads() {
    let (interop, _) = interop(OwnershipPolicy::Conceal);
    let report = interop
      .create(&ctx(Some(ALICE)), create_command("draft"))
      .await
      .ok()
      .unwrap();

    let blank = interop.create(&ctx(Some(ALICE)), create_command("   ")).await;
    assert_eq!(blank.kind(), OutcomeKind::InvalidInput);

    let empty_patch = interop
      .update(&ctx(Some(ALICE)), report.id, UpdateReportCommand::default())
      .await;
    assert_eq!(empty_patch.kind(), OutcomeKind::InvalidInput);

    let unknown_status = interop
      .update(
        &ctx(Some(ALICE)),
        report.id,
        UpdateReportCommand {
          content: None,
          status: Some("archived".to_string()),
        },
      )
      .await;
    assert_eq!(unknown_status.kind(), OutcomeKind::InvalidInput);
  }

  #[tokio::test]
  async fn test_unauthenticated_invalid_payload_is_unauthenticated() {
    let (interop, reports) = interop(OwnershipPolicy::Conceal);

    let outcome = interop.create(&ctx(None), create_command("")).await;
    assert_eq!(outcome.kind(), OutcomeKind::Unauthenticated);

    let outcome = interop
      .update(
        &ctx(None),
        1,
        UpdateReportCommand {
          content: Some(String::new()),
          status: None,
        },
      )
      .await;
    assert_eq!(outcome.kind(), OutcomeKind::Unauthenticated);

    assert!(reports.is_empty());
  }

  #[tokio::test]
  async fn test_oversized_content_is_invalid_input() {
    let (interop, reports) = interop(OwnershipPolicy::Conceal);

    let outcome = interop
      .create(&ctx(Some(ALICE)), create_command(&"x".repeat(10_001)))
      .await;

    assert_eq!(
      outcome,
      Outcome::InvalidInput("Content must be between 1 and 10000 characters".to_string())
    );
    assert!(reports.is_empty());
  }

  #[test]
  fn test_command_validation() {
    assert!(create_command("draft").validate().is_ok());
    assert!(create_command("").validate().is_err());

    let status_only = UpdateReportCommand {
      content: None,
      status: Some("reviewing".to_string()),
    };
    assert!(status_only.validate().is_ok());

    let empty_content = UpdateReportCommand {
      content: Some(String::new()),
      status: None,
    };
    assert!(empty_content.validate().is_err());
  }

  #[tokio::test]
  async fn test_update_conflicts_after_resolution() {
    let (interop, _) = interop(OwnershipPolicy::Conceal);
    let report = interop
      .create(&ctx(Some(ALICE)), create_command("draft"))
      .await
      .ok()
      .unwrap();

    let resolved = interop
      .update(
        &ctx(Some(ALICE)),
        report.id,
        UpdateReportCommand {
          content: None,
          status: Some("resolved".to_string()),
        },
      )
      .await
      .ok()
      .unwrap();
    assert_eq!(resolved.status, ReportStatus::Resolved);

    let late_edit = interop
      .update(
        &ctx(Some(ALICE)),
        report.id,
        UpdateReportCommand {
          content: Some("changed my mind".to_string()),
          status: None,
        },
      )
      .await;
    assert_eq!(late_edit.kind(), OutcomeKind::Conflict);
  }

  #[tokio::test]
  async fn test_delete_and_list() {
    let (interop, reports) = interop(OwnershipPolicy::Conceal);
    let first = interop
      .create(&ctx(Some(ALICE)), create_command("first"))
      .await
      .ok()
      .unwrap();
    let second = interop
      .create(&ctx(Some(ALICE)), create_command("second"))
      .await
      .ok()
      .unwrap();

    assert!(interop.delete(&ctx(Some(ALICE)), first.id).await.is_ok());
    assert_eq!(
      interop.delete(&ctx(Some(ALICE)), first.id).await.kind(),
      OutcomeKind::NotFound
    );

    let listed = interop.list(&ctx(Some(ALICE))).await.ok().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(reports.len(), 1);
  }
}
