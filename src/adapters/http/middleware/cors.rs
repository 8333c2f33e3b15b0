use actix_cors::Cors;
use actix_web::http::header;

const ANY_ORIGIN: &str = "*";

/// Builds the CORS layer for the API routes.
///
/// `*` in `allowed_origins` allows any origin. Credentials travel in the
/// Authorization header, so cookies are never allowed.
pub fn cors(allowed_origins: &[String]) -> Cors {
  let cors = Cors::default()
    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
    .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
    .allowed_header("x-request-id")
    .expose_headers(vec!["x-request-id"])
    .max_age(3600);

  if allowed_origins.iter().any(|origin| origin == ANY_ORIGIN) {
    return cors.allow_any_origin();
  }

  allowed_origins
    .iter()
    .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
