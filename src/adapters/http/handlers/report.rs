use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use super::{RequestDeadline, request_context, with_deadline};
use crate::adapters::http::{
  dtos::{CreateReportRequest, ReportListResponse, ReportResponse, UpdateReportRequest},
  errors::ApiError,
};
use crate::application::report::{CreateReportCommand, ReportInterop, UpdateReportCommand};

/// POST /v2/report
/// Body: CreateReportRequest (JSON)
/// Response: ReportResponse (JSON) with status 201
pub async fn create_report_handler(
  req: HttpRequest,
  request: web::Json<CreateReportRequest>,
  interop: web::Data<Arc<ReportInterop>>,
  deadline: web::Data<RequestDeadline>,
) -> Result<HttpResponse, ApiError> {
  let ctx = request_context(&req);
  let command = CreateReportCommand {
    content: request.into_inner().content,
  };

  let report = ApiError::from_outcome(
    with_deadline(**deadline, &ctx, interop.create(&ctx, command)).await,
  )?;

  Ok(HttpResponse::Created().json(ReportResponse::from(report)))
}

/// GET /v2/report
/// Response: ReportListResponse (JSON), most recent first
pub async fn list_reports_handler(
  req: HttpRequest,
  interop: web::Data<Arc<ReportInterop>>,
  deadline: web::Data<RequestDeadline>,
) -> Result<HttpResponse, ApiError> {
  let ctx = request_context(&req);

  let reports = ApiError::from_outcome(with_deadline(**deadline, &ctx, interop.list(&ctx)).await)?;

  Ok(HttpResponse::Ok().json(ReportListResponse::from(reports)))
}

/// GET /v2/report/{id}
pub async fn get_report_handler(
  req: HttpRequest,
  path: web::Path<i64>,
  interop: web::Data<Arc<ReportInterop>>,
  deadline: web::Data<RequestDeadline>,
) -> Result<HttpResponse, ApiError> {
  let ctx = request_context(&req);
  let report_id = path.into_inner();

  let report = ApiError::from_outcome(
    with_deadline(**deadline, &ctx, interop.get(&ctx, report_id)).await,
  )?;

  Ok(HttpResponse::Ok().json(ReportResponse::from(report)))
}

/// PUT /v2/report/{id}
/// Body: UpdateReportRequest (JSON), at least one field
pub async fn update_report_handler(
  req: HttpRequest,
  path: web::Path<i64>,
  request: web::Json<UpdateReportRequest>,
  interop: web::Data<Arc<ReportInterop>>,
  deadline: web::Data<RequestDeadline>,
) -> Result<HttpResponse, ApiError> {
  let ctx = request_context(&req);
  let report_id = path.into_inner();
  let request = request.into_inner();
  let command = UpdateReportCommand {
    content: request.content,
    status: request.status,
  };

  let report = ApiError::from_outcome(
    with_deadline(**deadline, &ctx, interop.update(&ctx, report_id, command)).await,
  )?;

  Ok(HttpResponse::Ok().json(ReportResponse::from(report)))
}

/// DELETE /v2/report/{id}
/// Response: 204 No Content
pub async fn delete_report_handler(
  req: HttpRequest,
  path: web::Path<i64>,
  interop: web::Data<Arc<ReportInterop>>,
  deadline: web::Data<RequestDeadline>,
) -> Result<HttpResponse, ApiError> {
  let ctx = request_context(&req);
  let report_id = path.into_inner();

  ApiError::from_outcome(with_deadline(**deadline, &ctx, interop.delete(&ctx, report_id)).await)?;

  Ok(HttpResponse::NoContent().finish())
}
