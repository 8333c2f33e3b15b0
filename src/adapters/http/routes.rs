use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::application::auth::AuthInterop;
use crate::application::report::ReportInterop;

use super::errors::ApiError;
use super::handlers::RequestDeadline;
use super::handlers::auth::me_handler;
use super::handlers::report::{
  create_report_handler, delete_report_handler, get_report_handler, list_reports_handler,
  update_report_handler,
};

/// Malformed JSON bodies answer with the same error shape as every other failure
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default()
    .error_handler(|err, _req| ApiError::Validation(format!("Invalid JSON body: {}", err)).into())
}

/// Configure authentication routes
///
/// Mounted under `/v2/auth`.
///
/// # Routes
///
/// - GET /me - Identity of the caller, created on first sight
pub fn configure_auth_routes(
  cfg: &mut web::ServiceConfig,
  auth_interop: Arc<AuthInterop>,
  deadline: RequestDeadline,
) {
  cfg
    .app_data(web::Data::new(auth_interop))
    .app_data(web::Data::new(deadline))
    .route("/me", web::get().to(me_handler));
}

/// Configure report routes
///
/// Mounted under `/v2/report`. Every route requires a bearer credential.
///
/// # Routes
///
/// - POST / - Create a report
/// - GET / - List the caller's reports
/// - GET /{id} - Get one report
/// - PUT /{id} - Update content and/or status
/// - DELETE /{id} - Delete a report
pub fn configure_report_routes(
  cfg: &mut web::ServiceConfig,
  report_interop: Arc<ReportInterop>,
  deadline: RequestDeadline,
) {
  cfg
    .app_data(web::Data::new(report_interop))
    .app_data(web::Data::new(deadline))
    .app_data(json_config())
    .route("", web::post().to(create_report_handler))
    .route("", web::get().to(list_reports_handler))
    .route("/{id}", web::get().to(get_report_handler))
    .route("/{id}", web::put().to(update_report_handler))
    .route("/{id}", web::delete().to(delete_report_handler));
}

/// GET /health
pub async fn health_handler() -> HttpResponse {
  HttpResponse::Ok().body("OK")
}
