pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{NewReport, Report, ReportPatch, ReportRevision};
pub use errors::ReportError;
pub use ports::ReportRepository;
pub use services::ReportService;
pub use value_objects::{OwnershipPolicy, ReportContent, ReportStatus, ValueObjectError};
