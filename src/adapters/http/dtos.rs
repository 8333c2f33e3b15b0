use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::auth::entities::Identity;
use crate::domain::report::entities::Report;
use crate::domain::report::value_objects::ReportStatus;

/// Request for creating a report
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReportRequest {
  pub content: String,
}

/// Request for a partial report update
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReportRequest {
  pub content: Option<String>,

  /// One of pending, reviewing, resolved, rejected
  pub status: Option<String>,
}

/// The caller's identity
#[derive(Debug, Clone, Serialize)]
pub struct IdentityResponse {
  pub id: i64,
  /// Subject id assigned by the identity provider
  pub external_id: String,
  pub email: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub display_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub photo_url: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<Identity> for IdentityResponse {
  fn from(identity: Identity) -> Self {
    Self {
      id: identity.id,
      external_id: identity.external_id,
      email: identity.email,
      display_name: identity.display_name,
      photo_url: identity.photo_url,
      created_at: identity.created_at,
      updated_at: identity.updated_at,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
  pub id: i64,
  pub owner_id: i64,
  pub content: String,
  pub status: ReportStatus,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<Report> for ReportResponse {
  fn from(report: Report) -> Self {
    Self {
      id: report.id,
      owner_id: report.owner_id,
      content: report.content.into_inner(),
      status: report.status,
      created_at: report.created_at,
      updated_at: report.updated_at,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportListResponse {
  pub reports: Vec<ReportResponse>,
}

impl From<Vec<Report>> for ReportListResponse {
  fn from(reports: Vec<Report>) -> Self {
    Self {
      reports: reports.into_iter().map(ReportResponse::from).collect(),
    }
  }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,
}
