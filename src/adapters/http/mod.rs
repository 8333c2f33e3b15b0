pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{
  CreateReportRequest, ErrorResponse, IdentityResponse, ReportListResponse, ReportResponse,
  UpdateReportRequest,
};
pub use errors::ApiError;
pub use handlers::RequestDeadline;
pub use middleware::{RequestId, RequestIdExt, RequestIdMiddleware, cors};
pub use routes::{configure_auth_routes, configure_report_routes, health_handler};
