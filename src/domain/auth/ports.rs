use async_trait::async_trait;

use super::entities::{Claims, Identity, NewIdentity};
use super::errors::{RepositoryError, VerifierError};
use super::value_objects::Credential;

/// Repository trait for identity persistence operations
#[async_trait]
pub trait IdentityRepository: Send + Sync {
  /// Finds an identity by the subject id issued by the identity provider
  async fn find_by_external_id(
    &self,
    external_id: &str,
  ) -> Result<Option<Identity>, RepositoryError>;

  /// Binds a new subject id to a store-assigned id.
  ///
  /// Fails with `RepositoryError::DuplicateKey` when the subject id is already bound.
  async fn create(&self, identity: NewIdentity) -> Result<Identity, RepositoryError>;

  /// Persists refreshed metadata of an existing identity
  async fn update(&self, identity: Identity) -> Result<Identity, RepositoryError>;
}

/// Client of the external identity token authority
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
  /// Verifies a bearer credential and returns the claims of its holder
  async fn verify(&self, credential: &Credential) -> Result<Claims, VerifierError>;
}
