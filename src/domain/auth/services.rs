use chrono::Utc;
use std::sync::Arc;

use super::entities::{Actor, Claims, Identity, NewIdentity};
use super::errors::{AuthError, RepositoryError};
use super::ports::{IdentityRepository, IdentityVerifier};
use super::value_objects::Credential;

/// Create/re-read rounds allowed when concurrent first sign-ins race on the
/// unique subject id
pub const MAX_RESOLVE_ATTEMPTS: usize = 3;

/// Authentication service turning an untrusted bearer credential into a
/// trusted `Actor`.
///
/// A request moves through `Credential` (unverified), `Claims` (verified) and
/// `Actor` (resolved). Any failure along the way is terminal for the request.
pub struct AuthService {
  identity_repo: Arc<dyn IdentityRepository>,
  verifier: Arc<dyn IdentityVerifier>,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    identity_repo: Arc<dyn IdentityRepository>,
    verifier: Arc<dyn IdentityVerifier>,
  ) -> Self {
    Self {
      identity_repo,
      verifier,
    }
  }

  /// Authenticates the raw credential of a request
  ///
  /// # Arguments
  /// * `raw_credential` - The bearer token as received, if any
  ///
  /// # Returns
  /// The resolved `Actor`, bound to exactly one stored `Identity`
  ///
  /// # Errors
  /// Returns `AuthError::Unauthenticated` for a missing, malformed, rejected or
  /// expired credential, and `AuthError::Internal` when the provider or the
  /// store fails.
  pub async fn authenticate(&self, raw_credential: Option<&str>) -> Result<Actor, AuthError> {
    let credential = Credential::from_optional(raw_credential)?;
    let claims = self.verify(&credential).await?;
    let identity = self.resolve(&claims).await?;

    tracing::debug!(
      identity_id = identity.id,
      subject_id = %identity.external_id,
      "Credential resolved to identity"
    );

    Ok(Actor::resolved(identity))
  }

  async fn verify(&self, credential: &Credential) -> Result<Claims, AuthError> {
    let claims = self.verifier.verify(credential).await?;

    if claims.is_expired_at(Utc::now()) {
      tracing::warn!(subject_id = %claims.subject_id, "Verified credential is already expired");
      return Err(AuthError::Unauthenticated(
        "Invalid or expired credential".to_string(),
      ));
    }

    Ok(claims)
  }

  /// Finds the identity bound to the claims' subject, binding a new one on
  /// first sight. A duplicate key on create means a concurrent request bound
  /// the subject first, so the next round reads it back.
  async fn resolve(&self, claims: &Claims) -> Result<Identity, AuthError> {
    for attempt in 1..=MAX_RESOLVE_ATTEMPTS {
      if let Some(identity) = self
        .identity_repo
        .find_by_external_id(&claims.subject_id)
        .await?
      {
        return self.refresh_metadata(identity, claims).await;
      }

      match self.identity_repo.create(NewIdentity::from(claims)).await {
        Ok(identity) => {
          tracing::info!(
            identity_id = identity.id,
            subject_id = %identity.external_id,
            "Bound new identity"
          );
          return Ok(identity);
        }
        Err(RepositoryError::DuplicateKey(_)) => {
          tracing::debug!(
            attempt,
            subject_id = %claims.subject_id,
            "Subject bound concurrently, reading it back"
          );
        }
        Err(e) => return Err(e.into()),
      }
    }

    tracing::error!(
      subject_id = %claims.subject_id,
      "Could not resolve identity after {} attempts",
      MAX_RESOLVE_ATTEMPTS
    );
    Err(AuthError::Internal)
  }

  async fn refresh_metadata(
    &self,
    mut identity: Identity,
    claims: &Claims,
  ) -> Result<Identity, AuthError> {
    if !identity.refresh_from(claims) {
      return Ok(identity);
    }

    tracing::debug!(identity_id = identity.id, "Refreshing identity metadata");
    Ok(self.identity_repo.update(identity).await?)
  }
}
