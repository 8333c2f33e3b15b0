//! Application layer
//!
//! Interop operations sit between HTTP delivery and the domain services. They
//! authenticate the request, translate raw payloads into domain values and
//! report every result as an `Outcome`.

pub mod auth;
pub mod outcome;
pub mod report;

pub use auth::AuthInterop;
pub use outcome::{Outcome, OutcomeKind, RequestContext};
pub use report::{CreateReportCommand, ReportInterop, UpdateReportCommand};
