pub mod auth;
pub mod report;

use actix_web::HttpRequest;
use actix_web::http::header;
use std::future::Future;
use std::time::Duration;

use crate::adapters::http::middleware::RequestIdExt;
use crate::application::outcome::{Outcome, RequestContext};

/// Upper bound on the time an interop call may take for one request
#[derive(Debug, Clone, Copy)]
pub struct RequestDeadline(pub Duration);

impl Default for RequestDeadline {
  fn default() -> Self {
    Self(Duration::from_secs(10))
  }
}

/// Extracts the bearer token from the Authorization header.
///
/// Any other scheme counts as no credential at all.
fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
  req
    .headers()
    .get(header::AUTHORIZATION)
    .and_then(|h| h.to_str().ok())
    .and_then(|s| {
      s.strip_prefix("Bearer ")
        .or_else(|| s.strip_prefix("bearer "))
    })
    .map(|s| s.to_string())
}

/// Builds the interop context of a request
pub fn request_context(req: &HttpRequest) -> RequestContext {
  let request_id = req.request_id().unwrap_or_default();
  RequestContext::new(extract_bearer_token(req), request_id.value())
}

/// Runs an interop call under the request deadline; expiry is `Internal`
pub async fn with_deadline<T>(
  deadline: RequestDeadline,
  ctx: &RequestContext,
  call: impl Future<Output = Outcome<T>>,
) -> Outcome<T> {
  match tokio::time::timeout(deadline.0, call).await {
    Ok(outcome) => outcome,
    Err(_) => {
      tracing::error!(
        request_id = %ctx.request_id,
        "Request exceeded deadline of {:?}",
        deadline.0
      );
      Outcome::Internal
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[test]
  fn test_bearer_token_extraction() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer abc.def.ghi"))
      .to_http_request();
    assert_eq!(extract_bearer_token(&req).as_deref(), Some("abc.def.ghi"));

    let req = TestRequest::default()
      .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
      .to_http_request();
    assert!(extract_bearer_token(&req).is_none());

    let req = TestRequest::default().to_http_request();
    assert!(extract_bearer_token(&req).is_none());
  }

  #[tokio::test]
  async fn test_deadline_expiry_is_internal() {
    let ctx = request_context(&TestRequest::default().to_http_request());
    let deadline = RequestDeadline(Duration::from_millis(10));

    let outcome = with_deadline(deadline, &ctx, async {
      tokio::time::sleep(Duration::from_secs(5)).await;
      Outcome::Ok(())
    })
    .await;

    assert_eq!(outcome, Outcome::Internal);
  }

  #[tokio::test]
  async fn test_call_within_deadline() {
    let ctx = request_context(&TestRequest::default().to_http_request());

    let outcome = with_deadline(RequestDeadline::default(), &ctx, async { Outcome::Ok(5) }).await;

    assert_eq!(outcome, Outcome::Ok(5));
  }
}
