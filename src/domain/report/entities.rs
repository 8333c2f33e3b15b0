use chrono::{DateTime, Utc};

use super::errors::ReportError;
use super::value_objects::{ReportContent, ReportStatus, ValueObjectError};

/// Report entity, owned by exactly one identity
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
  pub id: i64,
  pub owner_id: i64,
  pub content: ReportContent,
  pub status: ReportStatus,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Report {
  pub fn is_owned_by(&self, identity_id: i64) -> bool {
    self.owner_id == identity_id
  }

  /// Revision a later write must still match to be applied
  pub fn revision(&self) -> ReportRevision {
    ReportRevision {
      status: self.status,
      updated_at: self.updated_at,
    }
  }

  /// Applies a validated patch.
  ///
  /// Content can only change while the report is still open; the status must
  /// follow the allowed transitions.
  pub fn apply(&mut self, patch: ReportPatch) -> Result<(), ReportError> {
    if patch.content.is_some() && self.status.is_terminal() {
      return Err(ReportError::ReportClosed(self.id));
    }

    if let Some(status) = patch.status {
      if !self.status.can_transition_to(status) {
        return Err(ReportError::InvalidStatusTransition {
          from: self.status,
          to: status,
        });
      }
      self.status = status;
    }

    if let Some(content) = patch.content {
      self.content = content;
    }

    self.updated_at = Utc::now();
    Ok(())
  }
}

/// Status and last write time of a report as it was read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRevision {
  pub status: ReportStatus,
  pub updated_at: DateTime<Utc>,
}

/// Report data before the store assigns id and timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
  pub owner_id: i64,
  pub content: ReportContent,
  pub status: ReportStatus,
}

impl NewReport {
  pub fn new(owner_id: i64, content: ReportContent) -> Self {
    Self {
      owner_id,
      content,
      status: ReportStatus::INITIAL,
    }
  }
}

/// Partial update of a report; at least one field is set
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPatch {
  pub content: Option<ReportContent>,
  pub status: Option<ReportStatus>,
}

impl ReportPatch {
  pub fn new(
    content: Option<ReportContent>,
    status: Option<ReportStatus>,
  ) -> Result<Self, ValueObjectError> {
    if content.is_none() && status.is_none() {
      return Err(ValueObjectError::EmptyPatch);
    }

    Ok(Self { content, status })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn report(status: ReportStatus) -> Report {
    let now = Utc::now();
    Report {
      id: 7,
      owner_id: 1,
      content: ReportContent::new("draft").unwrap(),
      status,
      created_at: now,
      updated_at: now,
    }
  }

  #[test]
  fn test_new_report_starts_pending() {
    let new_report = NewReport::new(1, ReportContent::new("draft").unwrap());
    assert_eq!(new_report.status, ReportStatus::Pending);
    assert_eq!(new_report.owner_id, 1);
  }

  #[test]
  fn test_empty_patch_is_rejected() {
    assert_eq!(
      ReportPatch::new(None, None).unwrap_err(),
      ValueObjectError::EmptyPatch
    );
  }

  #[test]
  fn test_apply_content_and_status() {
    let mut report = report(ReportStatus::Pending);
    let patch = ReportPatch::new(
      Some(ReportContent::new("final").unwrap()),
      Some(ReportStatus::Reviewing),
    )
    .unwrap();

    report.apply(patch).unwrap();

    assert_eq!(report.content.value(), "final");
    assert_eq!(report.status, ReportStatus::Reviewing);
  }

  #[test]
  fn test_closed_report_content_is_frozen() {
    let mut report = report(ReportStatus::Resolved);
    let patch = ReportPatch::new(Some(ReportContent::new("late edit").unwrap()), None).unwrap();

    assert!(matches!(
      report.apply(patch),
      Err(ReportError::ReportClosed(7))
    ));
    assert_eq!(report.content.value(), "draft");
  }

  #[test]
  fn test_invalid_transition_is_rejected() {
    let mut report = report(ReportStatus::Rejected);
    let patch = ReportPatch::new(None, Some(ReportStatus::Pending)).unwrap();

    assert!(matches!(
      report.apply(patch),
      Err(ReportError::InvalidStatusTransition { .. })
    ));
    assert_eq!(report.status, ReportStatus::Rejected);
  }

  #[test]
  fn test_apply_moves_past_read_revision() {
    let mut report = report(ReportStatus::Pending);
    let read = report.revision();

    report
      .apply(ReportPatch::new(None, Some(ReportStatus::Reviewing)).unwrap())
      .unwrap();

    assert_eq!(read.status, ReportStatus::Pending);
    assert_ne!(report.revision(), read);
  }
}
