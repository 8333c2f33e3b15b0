use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::poisoned;
use crate::domain::auth::entities::{Identity, NewIdentity};
use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::ports::IdentityRepository;

#[derive(Debug)]
struct IdentityStore {
  next_id: i64,
  identities: HashMap<i64, Identity>,
}

/// In-memory identity repository.
///
/// Subject uniqueness is checked under the same write lock that assigns the
/// id, so concurrent creates for one subject yield exactly one identity.
#[derive(Debug, Clone)]
pub struct InMemoryIdentityRepository {
  store: Arc<RwLock<IdentityStore>>,
}

impl InMemoryIdentityRepository {
  pub fn new() -> Self {
    Self {
      store: Arc::new(RwLock::new(IdentityStore {
        next_id: 1,
        identities: HashMap::new(),
      })),
    }
  }

  /// Number of stored identities
  pub fn len(&self) -> usize {
    self
      .store
      .read()
      .map(|store| store.identities.len())
      .unwrap_or(0)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Default for InMemoryIdentityRepository {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
  async fn find_by_external_id(
    &self,
    external_id: &str,
  ) -> Result<Option<Identity>, RepositoryError> {
    let store = self.store.read().map_err(poisoned)?;
    Ok(
      store
        .identities
        .values()
        .find(|identity| identity.external_id == external_id)
        .cloned(),
    )
  }

  async fn create(&self, identity: NewIdentity) -> Result<Identity, RepositoryError> {
    let mut store = self.store.write().map_err(poisoned)?;

    if store
      .identities
      .values()
      .any(|existing| existing.external_id == identity.external_id)
    {
      return Err(RepositoryError::DuplicateKey(format!(
        "external_id {} already bound",
        identity.external_id
      )));
    }

    let now = Utc::now();
    let created = Identity {
      id: store.next_id,
      external_id: identity.external_id,
      email: identity.email,
      display_name: identity.display_name,
      photo_url: identity.photo_url,
      created_at: now,
      updated_at: now,
    };

    store.next_id += 1;
    store.identities.insert(created.id, created.clone());
    Ok(created)
  }

  async fn update(&self, identity: Identity) -> Result<Identity, RepositoryError> {
    let mut store = self.store.write().map_err(poisoned)?;

    let existing = store
      .identities
      .get_mut(&identity.id)
      .ok_or(RepositoryError::NotFound)?;

    // The binding itself is immutable
    existing.email = identity.email;
    existing.display_name = identity.display_name;
    existing.photo_url = identity.photo_url;
    existing.updated_at = identity.updated_at;

    Ok(existing.clone())
  }
}
