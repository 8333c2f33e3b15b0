use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imago::{
  adapters::http::{
    RequestDeadline, RequestIdMiddleware, configure_auth_routes, configure_report_routes, cors,
    health_handler,
  },
  application::{AuthInterop, ReportInterop},
  domain::auth::{AuthService, IdentityVerifier},
  domain::report::ReportService,
  infrastructure::{
    config::Config,
    identity::{FirebaseIdentityVerifier, MockIdentityVerifier},
    persistence::postgres::{PostgresIdentityRepository, PostgresReportRepository},
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "imago=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting imago backend");

  let config = Config::load().map_err(|e| {
    tracing::error!("Failed to load configuration: {}", e);
    std::io::Error::other(format!("Configuration error: {}", e))
  })?;
  tracing::info!("Configuration loaded successfully");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "Could not connect to database. Is PostgreSQL running?",
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to run database migrations: {}", e);
      std::io::Error::other(format!("Migration error: {}", e))
    })?;
  tracing::info!("Database migrations completed");

  // Repositories
  let identity_repo = Arc::new(PostgresIdentityRepository::new(db_pool.clone()));
  let report_repo = Arc::new(PostgresReportRepository::new(db_pool.clone()));

  let verifier: Arc<dyn IdentityVerifier> = if config.identity.mock {
    tracing::warn!("Using mock identity verifier; mock: credentials are accepted");
    Arc::new(MockIdentityVerifier::default())
  } else {
    tracing::info!(
      "Verifying credentials for project {}",
      config.identity.project_id
    );
    Arc::new(FirebaseIdentityVerifier::new(&config.identity).map_err(|e| {
      tracing::error!("Failed to initialize identity verifier: {}", e);
      std::io::Error::other(e.to_string())
    })?)
  };

  // Services
  let auth_service = Arc::new(AuthService::new(identity_repo, verifier));
  let report_service = Arc::new(ReportService::new(
    report_repo,
    config.report.ownership_policy,
  ));
  tracing::info!(
    "Report ownership policy: {:?}",
    config.report.ownership_policy
  );

  // Interops
  let auth_interop = Arc::new(AuthInterop::new(auth_service.clone()));
  let report_interop = Arc::new(ReportInterop::new(auth_service, report_service));

  let deadline = RequestDeadline(Duration::from_secs(config.server.request_timeout_seconds));
  let server_host = config.server.host.clone();
  let server_port = config.server.port;
  let allowed_origins = config.server.cors_allowed_origins.clone();

  if allowed_origins.is_empty() {
    tracing::info!("CORS disabled; no browser origins allowed");
  } else {
    tracing::info!("CORS allowed origins: {:?}", allowed_origins);
  }

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      .wrap(cors(&allowed_origins))
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .service(
        web::scope("/v2/auth")
          .configure(|cfg| configure_auth_routes(cfg, auth_interop.clone(), deadline)),
      )
      .service(
        web::scope("/v2/report")
          .configure(|cfg| configure_report_routes(cfg, report_interop.clone(), deadline)),
      )
      .route("/health", web::get().to(health_handler))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}
