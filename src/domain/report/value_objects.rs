use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueObjectError {
  #[error("Report content cannot be empty")]
  EmptyContent,

  #[error("Report content too long (maximum {max} characters)")]
  ContentTooLong { max: usize },

  #[error("Unknown report status: {0}")]
  UnknownStatus(String),

  #[error("Update contains no changes")]
  EmptyPatch,
}

// ReportContent

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContent(String);

impl ReportContent {
  pub const MAX_LENGTH: usize = 10_000;

  pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
    let value = value.into();
    let trimmed = value.trim();

    if trimmed.is_empty() {
      return Err(ValueObjectError::EmptyContent);
    }

    if trimmed.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::ContentTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// ReportStatus

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
  Pending,
  Reviewing,
  Resolved,
  Rejected,
}

impl ReportStatus {
  /// Status every new report starts in
  pub const INITIAL: ReportStatus = ReportStatus::Pending;

  pub fn can_transition_to(&self, new_status: ReportStatus) -> bool {
    match (self, new_status) {
      (current, next) if *current == next => true,
      // Pending can be picked up or decided right away
      (ReportStatus::Pending, ReportStatus::Reviewing) => true,
      (ReportStatus::Pending, ReportStatus::Resolved) => true,
      (ReportStatus::Pending, ReportStatus::Rejected) => true,
      // Reviewing ends in a decision
      (ReportStatus::Reviewing, ReportStatus::Resolved) => true,
      (ReportStatus::Reviewing, ReportStatus::Rejected) => true,
      // Resolved and Rejected are terminal states
      _ => false,
    }
  }

  pub fn is_terminal(&self) -> bool {
    matches!(self, ReportStatus::Resolved | ReportStatus::Rejected)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      ReportStatus::Pending => "pending",
      ReportStatus::Reviewing => "reviewing",
      ReportStatus::Resolved => "resolved",
      ReportStatus::Rejected => "rejected",
    }
  }
}

impl FromStr for ReportStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "pending" => Ok(ReportStatus::Pending),
      "reviewing" => Ok(ReportStatus::Reviewing),
      "resolved" => Ok(ReportStatus::Resolved),
      "rejected" => Ok(ReportStatus::Rejected),
      _ => Err(ValueObjectError::UnknownStatus(s.to_string())),
    }
  }
}

impl fmt::Display for ReportStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// OwnershipPolicy

/// How a non-owner's access to an existing report is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnershipPolicy {
  /// Answer as if the report did not exist
  #[default]
  Conceal,
  /// Answer that the caller is not entitled
  Disclose,
}
