//! Authentication interop

use std::sync::Arc;

use super::outcome::{Outcome, RequestContext};
use crate::domain::auth::entities::Identity;
use crate::domain::auth::services::AuthService;

/// Interop for the authenticated caller's own identity
pub struct AuthInterop {
  auth_service: Arc<AuthService>,
}

impl AuthInterop {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Identity of the caller; created on first sight of its subject id
  pub async fn me(&self, ctx: &RequestContext) -> Outcome<Identity> {
    match self.auth_service.authenticate(ctx.credential()).await {
      Ok(actor) => {
        tracing::debug!(
          request_id = %ctx.request_id,
          identity_id = actor.id(),
          "Resolved caller identity"
        );
        Outcome::Ok(actor.into_identity())
      }
      Err(error) => error.into(),
    }
  }
}
