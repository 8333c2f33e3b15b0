pub mod identity_repository;
pub mod report_repository;

pub use identity_repository::PostgresIdentityRepository;
pub use report_repository::PostgresReportRepository;
