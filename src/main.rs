use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memberly::{
  adapters::http::{RequestIdMiddleware, UserRouteDependencies, configure_user_routes, health_check},
  application::users::{
    CreateUserUseCase, GetUserInfoUseCase, LoginUseCase, RetryPolicy, UserEventsHandler,
    VerifyEmailUseCase,
  },
  domain::users::{
    factory::UserFactory,
    ports::{AuthService, EmailService, EventPublisher},
  },
  infrastructure::{
    config::Config,
    email::{LoggingEmailService, SmtpEmailService},
    events::InProcessEventBus,
    persistence::postgres::PostgresUserRepository,
    security::{JwtAuthService, SecureTokenGenerator, UuidV7Generator},
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "memberly=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting Memberly");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  tracing::info!("Connecting to database");
  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    anyhow::anyhow!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    )
  })?
  .context("Could not connect to database")?;
  tracing::info!("Database connection pool created");

  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .context("Failed to run database migrations")?;
  tracing::info!("Database migrations completed");

  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));

  let auth_service: Arc<dyn AuthService> = Arc::new(JwtAuthService::new(
    &config.auth.jwt_secret,
    config.auth.issuer.clone(),
    config.auth.token_ttl_seconds,
  ));

  let email_service: Arc<dyn EmailService> = if config.email.enabled {
    tracing::info!(host = %config.email.smtp_host, "SMTP delivery enabled");
    Arc::new(
      SmtpEmailService::from_config(&config.email, &config.server.base_url)
        .context("Invalid email configuration")?,
    )
  } else {
    tracing::warn!("SMTP delivery disabled, verification links will be logged");
    Arc::new(LoggingEmailService::new(config.server.base_url.clone()))
  };

  let retry_policy = RetryPolicy {
    max_attempts: config.notification.max_attempts,
    base_delay: config.notification.retry_base_delay(),
  };

  // Subscribers are fixed for the lifetime of the process
  let event_bus = InProcessEventBus::new().subscribe(Arc::new(UserEventsHandler::new(
    email_service,
    retry_policy,
  )));
  tracing::info!(handlers = event_bus.handler_count(), "Event bus ready");
  let event_bus: Arc<dyn EventPublisher> = Arc::new(event_bus);

  let user_factory = Arc::new(UserFactory::new(event_bus));

  let deps = UserRouteDependencies {
    create_user_use_case: Arc::new(CreateUserUseCase::new(
      user_repo.clone(),
      user_factory,
      Arc::new(UuidV7Generator::new()),
      Arc::new(SecureTokenGenerator::new()),
    )),
    verify_email_use_case: Arc::new(VerifyEmailUseCase::new(
      user_repo.clone(),
      auth_service.clone(),
    )),
    login_use_case: Arc::new(LoginUseCase::new(user_repo.clone(), auth_service.clone())),
    get_user_info_use_case: Arc::new(GetUserInfoUseCase::new(user_repo)),
    auth_service,
  };

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    let deps = deps.clone();
    App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .service(web::scope("/users").configure(|cfg| configure_user_routes(cfg, deps)))
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await?;

  Ok(())
}
