use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::auth::entities::Claims;
use crate::domain::auth::errors::VerifierError;
use crate::domain::auth::ports::IdentityVerifier;
use crate::domain::auth::value_objects::Credential;
use crate::infrastructure::config::IdentityConfig;

/// Claims read from the token payload segment
#[derive(Debug, Deserialize)]
struct TokenPayload {
  exp: i64,
  aud: String,
  sub: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
  #[serde(default)]
  users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
  local_id: String,
  email: Option<String>,
  display_name: Option<String>,
  photo_url: Option<String>,
  #[serde(default)]
  disabled: bool,
}

/// Identity verifier backed by the Firebase Authentication REST API.
///
/// The provider checks signature, expiry and revocation through
/// `accounts:lookup`; the audience and subject are checked locally against
/// the token payload.
pub struct FirebaseIdentityVerifier {
  client: reqwest::Client,
  lookup_url: String,
  api_key: String,
  project_id: String,
}

impl FirebaseIdentityVerifier {
  pub fn new(config: &IdentityConfig) -> Result<Self, VerifierError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.timeout_seconds))
      .build()
      .map_err(|e| VerifierError::Unavailable(format!("Failed to build HTTP client: {}", e)))?;

    Ok(Self {
      client,
      lookup_url: format!(
        "{}/v1/accounts:lookup",
        config.endpoint.trim_end_matches('/')
      ),
      api_key: config.api_key.clone(),
      project_id: config.project_id.clone(),
    })
  }

  fn decode_payload(token: &str) -> Result<TokenPayload, VerifierError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
      (Some(_), Some(payload), Some(_), None) => payload,
      _ => return Err(VerifierError::Rejected("Token is not a JWT".to_string())),
    };

    let bytes = URL_SAFE_NO_PAD
      .decode(payload.trim_end_matches('='))
      .map_err(|e| VerifierError::Rejected(format!("Invalid token payload encoding: {}", e)))?;

    serde_json::from_slice(&bytes)
      .map_err(|e| VerifierError::Rejected(format!("Invalid token payload: {}", e)))
  }

  fn check_payload(&self, payload: &TokenPayload) -> Result<DateTime<Utc>, VerifierError> {
    if payload.aud != self.project_id {
      return Err(VerifierError::Rejected(format!(
        "Token issued for another project: {}",
        payload.aud
      )));
    }

    if payload.sub.is_empty() {
      return Err(VerifierError::Rejected("Token has no subject".to_string()));
    }

    DateTime::from_timestamp(payload.exp, 0)
      .ok_or_else(|| VerifierError::Rejected("Token expiry out of range".to_string()))
  }

  async fn lookup(&self, token: &str) -> Result<LookupUser, VerifierError> {
    let response = self
      .client
      .post(&self.lookup_url)
      .query(&[("key", self.api_key.as_str())])
      .json(&serde_json::json!({ "idToken": token }))
      .send()
      .await
      .map_err(|e| VerifierError::Unavailable(format!("Lookup request failed: {}", e)))?;

    let status = response.status();
    if status == reqwest::StatusCode::BAD_REQUEST {
      let body = response.text().await.unwrap_or_default();
      return Err(VerifierError::Rejected(format!(
        "Provider refused token: {}",
        body
      )));
    }

    if !status.is_success() {
      return Err(VerifierError::Unavailable(format!(
        "Lookup returned status {}",
        status
      )));
    }

    let body: LookupResponse = response
      .json()
      .await
      .map_err(|e| VerifierError::Unavailable(format!("Invalid lookup response: {}", e)))?;

    body
      .users
      .into_iter()
      .next()
      .ok_or_else(|| VerifierError::Rejected("Unknown user".to_string()))
  }
}

#[async_trait]
impl IdentityVerifier for FirebaseIdentityVerifier {
  async fn verify(&self, credential: &Credential) -> Result<Claims, VerifierError> {
    let payload = Self::decode_payload(credential.as_str())?;
    let expires_at = self.check_payload(&payload)?;

    if expires_at <= Utc::now() {
      return Err(VerifierError::Rejected("Token expired".to_string()));
    }

    let user = self.lookup(credential.as_str()).await?;

    if user.local_id != payload.sub {
      return Err(VerifierError::Rejected(
        "Token subject does not match account".to_string(),
      ));
    }

    if user.disabled {
      return Err(VerifierError::Rejected("Account disabled".to_string()));
    }

    tracing::debug!(subject_id = %user.local_id, "Credential verified by identity provider");

    Ok(Claims {
      subject_id: user.local_id,
      email: user.email.unwrap_or_default(),
      display_name: user.display_name,
      photo_url: user.photo_url,
      expires_at,
    })
  }
}
