use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity entity representing a verified user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
  /// Store-assigned identifier
  pub id: i64,
  /// Subject id issued by the identity provider (unique, never rebound)
  pub external_id: String,
  /// Email reported by the identity provider
  pub email: String,
  /// Display name reported by the identity provider
  pub display_name: Option<String>,
  /// Profile picture reported by the identity provider
  pub photo_url: Option<String>,
  /// Timestamp when the identity was first bound
  pub created_at: DateTime<Utc>,
  /// Timestamp when the metadata was last refreshed
  pub updated_at: DateTime<Utc>,
}

impl Identity {
  /// Copies provider metadata from the claims onto the identity.
  ///
  /// Returns `true` when anything changed. The external id is never touched.
  pub fn refresh_from(&mut self, claims: &Claims) -> bool {
    let changed = self.email != claims.email
      || self.display_name != claims.display_name
      || self.photo_url != claims.photo_url;

    if changed {
      self.email = claims.email.clone();
      self.display_name = claims.display_name.clone();
      self.photo_url = claims.photo_url.clone();
      self.updated_at = Utc::now();
    }

    changed
  }
}

/// Identity data for a first-seen subject; the store assigns id and timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct NewIdentity {
  pub external_id: String,
  pub email: String,
  pub display_name: Option<String>,
  pub photo_url: Option<String>,
}

impl From<&Claims> for NewIdentity {
  fn from(claims: &Claims) -> Self {
    Self {
      external_id: claims.subject_id.clone(),
      email: claims.email.clone(),
      display_name: claims.display_name.clone(),
      photo_url: claims.photo_url.clone(),
    }
  }
}

/// Verified attributes about a credential's holder
#[derive(Debug, Clone, PartialEq)]
pub struct Claims {
  pub subject_id: String,
  pub email: String,
  pub display_name: Option<String>,
  pub photo_url: Option<String>,
  pub expires_at: DateTime<Utc>,
}

impl Claims {
  pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
    self.expires_at <= now
  }
}

/// The trusted actor of a request, produced only by a successful authentication
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
  identity: Identity,
}

impl Actor {
  pub(crate) fn resolved(identity: Identity) -> Self {
    Self { identity }
  }

  pub fn id(&self) -> i64 {
    self.identity.id
  }

  pub fn identity(&self) -> &Identity {
    &self.identity
  }

  pub fn into_identity(self) -> Identity {
    self.identity
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  fn claims(email: &str, display_name: Option<&str>) -> Claims {
    Claims {
      subject_id: "sub-42".to_string(),
      email: email.to_string(),
      display_name: display_name.map(str::to_string),
      photo_url: None,
      expires_at: Utc::now() + Duration::hours(1),
    }
  }

  fn identity() -> Identity {
    let now = Utc::now();
    Identity {
      id: 1,
      external_id: "sub-42".to_string(),
      email: "old@example.com".to_string(),
      display_name: None,
      photo_url: None,
      created_at: now,
      updated_at: now,
    }
  }

  #[test]
  fn test_refresh_from_updates_metadata_only() {
    let mut identity = identity();
    let changed = identity.refresh_from(&claims("new@example.com", Some("Ada")));

    assert!(changed);
    assert_eq!(identity.email, "new@example.com");
    assert_eq!(identity.display_name.as_deref(), Some("Ada"));
    assert_eq!(identity.external_id, "sub-42");
    assert_eq!(identity.id, 1);
  }

  #[test]
  fn test_refresh_from_reports_no_change() {
    let mut identity = identity();
    let before = identity.updated_at;

    assert!(!identity.refresh_from(&claims("old@example.com", None)));
    assert_eq!(identity.updated_at, before);
  }

  #[test]
  fn test_claims_expiry() {
    let now = Utc::now();
    let mut claims = claims("a@example.com", None);
    assert!(!claims.is_expired_at(now));

    claims.expires_at = now - Duration::seconds(1);
    assert!(claims.is_expired_at(now));
  }

  #[test]
  fn test_new_identity_from_claims() {
    let new_identity = NewIdentity::from(&claims("a@example.com", Some("Ada")));
    assert_eq!(new_identity.external_id, "sub-42");
    assert_eq!(new_identity.email, "a@example.com");
    assert_eq!(new_identity.display_name.as_deref(), Some("Ada"));
  }
}
