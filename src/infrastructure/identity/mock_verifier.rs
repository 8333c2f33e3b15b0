use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::domain::auth::entities::Claims;
use crate::domain::auth::errors::VerifierError;
use crate::domain::auth::ports::IdentityVerifier;
use crate::domain::auth::value_objects::Credential;

const TOKEN_PREFIX: &str = "mock:";

/// Mock identity verifier for development/testing
///
/// Accepts credentials of the form `mock:<subject>:<email>[:<display name>]`
/// without contacting the identity provider. Every other credential is
/// rejected. Enable with `identity.mock = true`.
///
/// A credential never contains whitespace, so neither can any of the parts;
/// `mock:ada:ada@example.com:Ada Lovelace` is refused before it gets here.
#[derive(Debug, Clone)]
pub struct MockIdentityVerifier {
  ttl: Duration,
}

impl MockIdentityVerifier {
  pub fn new(ttl: Duration) -> Self {
    Self { ttl }
  }
}

impl Default for MockIdentityVerifier {
  fn default() -> Self {
    Self::new(Duration::hours(1))
  }
}

#[async_trait]
impl IdentityVerifier for MockIdentityVerifier {
  async fn verify(&self, credential: &Credential) -> Result<Claims, VerifierError> {
    let rest = credential
      .as_str()
      .strip_prefix(TOKEN_PREFIX)
      .ok_or_else(|| VerifierError::Rejected("Not a mock credential".to_string()))?;

    let mut parts = rest.splitn(3, ':');
    let subject_id = parts.next().unwrap_or_default();
    let email = parts.next().unwrap_or_default();
    let display_name = parts.next().filter(|name| !name.is_empty());

    if subject_id.is_empty() || email.is_empty() {
      return Err(VerifierError::Rejected(
        "Mock credential must carry a subject and an email".to_string(),
      ));
    }

    Ok(Claims {
      subject_id: subject_id.to_string(),
      email: email.to_string(),
      display_name: display_name.map(str::to_string),
      photo_url: None,
      expires_at: Utc::now() + self.ttl,
    })
  }
}
