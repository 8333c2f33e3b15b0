use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::domain::auth::entities::{Identity, NewIdentity};
use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::ports::IdentityRepository;

/// Database row structure for identities table
#[derive(Debug, FromRow)]
struct IdentityRow {
  id: i64,
  external_id: String,
  email: String,
  display_name: Option<String>,
  photo_url: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<IdentityRow> for Identity {
  fn from(row: IdentityRow) -> Self {
    Identity {
      id: row.id,
      external_id: row.external_id,
      email: row.email,
      display_name: row.display_name,
      photo_url: row.photo_url,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

/// PostgreSQL implementation of the IdentityRepository trait
pub struct PostgresIdentityRepository {
  pool: PgPool,
}

impl PostgresIdentityRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
  async fn find_by_external_id(
    &self,
    external_id: &str,
  ) -> Result<Option<Identity>, RepositoryError> {
    let row = sqlx::query_as::<_, IdentityRow>(
      r#"
            SELECT id, external_id, email, display_name, photo_url, created_at, updated_at
            FROM identities
            WHERE external_id = $1
            "#,
    )
    .bind(external_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to find identity by external id: {}", e);
      RepositoryError::from(e)
    })?;

    Ok(row.map(Identity::from))
  }

  /// Relies on the unique constraint on `external_id`; a concurrent insert for
  /// the same subject surfaces as `RepositoryError::DuplicateKey`
  async fn create(&self, identity: NewIdentity) -> Result<Identity, RepositoryError> {
    let row = sqlx::query_as::<_, IdentityRow>(
      r#"
            INSERT INTO identities (external_id, email, display_name, photo_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, external_id, email, display_name, photo_url, created_at, updated_at
            "#,
    )
    .bind(&identity.external_id)
    .bind(&identity.email)
    .bind(identity.display_name.as_deref())
    .bind(identity.photo_url.as_deref())
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      let error = RepositoryError::from(e);
      if !matches!(error, RepositoryError::DuplicateKey(_)) {
        tracing::error!("Failed to create identity: {}", error);
      }
      error
    })?;

    Ok(row.into())
  }

  async fn update(&self, identity: Identity) -> Result<Identity, RepositoryError> {
    let row = sqlx::query_as::<_, IdentityRow>(
      r#"
            UPDATE identities
            SET email = $2, display_name = $3, photo_url = $4, updated_at = $5
            WHERE id = $1
            RETURNING id, external_id, email, display_name, photo_url, created_at, updated_at
            "#,
    )
    .bind(identity.id)
    .bind(&identity.email)
    .bind(identity.display_name.as_deref())
    .bind(identity.photo_url.as_deref())
    .bind(identity.updated_at)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to update identity: {}", e);
      RepositoryError::from(e)
    })?;

    row.map(Identity::from).ok_or(RepositoryError::NotFound)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::persistence::postgres::test_support::setup_test_db;

  fn new_identity(external_id: &str) -> NewIdentity {
    NewIdentity {
      external_id: external_id.to_string(),
      email: format!("{}@example.com", external_id),
      display_name: Some("Test User".to_string()),
      photo_url: None,
    }
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_create_identity() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresIdentityRepository::new(pool);

    let created = repo.create(new_identity("alice")).await.unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(created.external_id, "alice");
    assert_eq!(created.display_name.as_deref(), Some("Test User"));
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_find_by_external_id() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresIdentityRepository::new(pool);
    let created = repo.create(new_identity("alice")).await.unwrap();

    let found = repo.find_by_external_id("alice").await.unwrap();

    assert_eq!(found.map(|i| i.id), Some(created.id));
    assert!(repo.find_by_external_id("bob").await.unwrap().is_none());
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_duplicate_external_id() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresIdentityRepository::new(pool);
    repo.create(new_identity("alice")).await.unwrap();

    let result = repo.create(new_identity("alice")).await;

    assert!(matches!(result, Err(RepositoryError::DuplicateKey(_))));
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_update_metadata() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresIdentityRepository::new(pool);
    let mut identity = repo.create(new_identity("alice")).await.unwrap();

    identity.email = "alice@new.example.com".to_string();
    identity.display_name = None;
    let updated = repo.update(identity.clone()).await.unwrap();

    assert_eq!(updated.id, identity.id);
    assert_eq!(updated.email, "alice@new.example.com");
    assert!(updated.display_name.is_none());
  }
}
