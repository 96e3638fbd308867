use actix_files as fs;
use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoicedesk::{
  adapters::http::{RequestIdMiddleware, TemplateEngine, WebRouteDependencies, configure_web_routes},
  application::auth::{AuthenticateUseCase, GetCurrentUserUseCase, LogoutUserUseCase},
  application::invoice::{
    CreateInvoiceUseCase, DeleteInvoiceUseCase, GetInvoiceFormUseCase, ListInvoicesUseCase,
    UpdateInvoiceUseCase,
  },
  domain::auth::{AuthService, AuthServiceConfig},
  domain::invoice::{InvoiceService, InvoiceServiceDependencies, PathRevalidator},
  infrastructure::{
    cache::{InMemoryPageCache, PageCache, RedisPageCache},
    config::{Config, RedisConfig},
    persistence::postgres::{
      PostgresCustomerRepository, PostgresInvoiceRepository, PostgresSessionRepository,
      PostgresUserRepository,
    },
    security::Argon2PasswordHasher,
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invoicedesk=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting invoicedesk");

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
  .with_context(|| {
    format!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    )
  })?
  .context("Failed to connect to database")?;
  tracing::info!("Database connection pool created");

  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .context("Failed to run database migrations")?;
  tracing::info!("Database migrations completed");

  let (page_cache, revalidator) = build_page_cache(&config.redis).await;

  // Repositories
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let session_repo = Arc::new(PostgresSessionRepository::new(db_pool.clone()));
  let customer_repo = Arc::new(PostgresCustomerRepository::new(db_pool.clone()));
  let invoice_repo = Arc::new(PostgresInvoiceRepository::new(db_pool.clone()));

  let password_hasher =
    Arc::new(Argon2PasswordHasher::new().context("Failed to create password hasher")?);

  // Domain services
  let auth_service = Arc::new(AuthService::new(
    user_repo,
    session_repo,
    password_hasher,
    AuthServiceConfig {
      session_ttl_seconds: i64::try_from(config.security.session_ttl_seconds)
        .context("session_ttl_seconds is too large")?,
      password_min_length: config.security.password_min_length,
    },
  ));

  let invoice_service = Arc::new(InvoiceService::new(InvoiceServiceDependencies {
    invoice_repo,
    customer_repo,
    revalidator,
  }));

  if let Some(seed) = &config.seed_user {
    let created = auth_service
      .ensure_user(&seed.name, &seed.email, &seed.password)
      .await
      .context("Failed to seed user")?;
    if created {
      tracing::info!("Seeded user {}", seed.email);
    }
  }

  // Use cases
  let deps = WebRouteDependencies {
    templates: TemplateEngine::new().context("Failed to load templates")?,
    page_cache,
    get_user_use_case: Arc::new(GetCurrentUserUseCase::new(auth_service.clone())),
    authenticate_use_case: Arc::new(AuthenticateUseCase::new(auth_service.clone())),
    logout_use_case: Arc::new(LogoutUserUseCase::new(auth_service)),
    create_invoice_use_case: Arc::new(CreateInvoiceUseCase::new(invoice_service.clone())),
    update_invoice_use_case: Arc::new(UpdateInvoiceUseCase::new(invoice_service.clone())),
    delete_invoice_use_case: Arc::new(DeleteInvoiceUseCase::new(invoice_service.clone())),
    list_invoices_use_case: Arc::new(ListInvoicesUseCase::new(invoice_service.clone())),
    get_invoice_form_use_case: Arc::new(GetInvoiceFormUseCase::new(invoice_service)),
  };

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Listening on {}", config.server.base_url);

  HttpServer::new(move || {
    let deps = deps.clone();
    App::new()
      .wrap(RequestIdMiddleware)
      .wrap(Logger::default())
      .configure(|cfg| configure_web_routes(cfg, deps))
      // Static files
      .service(fs::Files::new("/static", "./static"))
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await?;

  Ok(())
}

/// Redis when configured and reachable, otherwise an in-process cache
async fn build_page_cache(
  config: &RedisConfig,
) -> (Arc<dyn PageCache>, Arc<dyn PathRevalidator>) {
  let ttl = Duration::from_secs(config.page_ttl_seconds);

  if let Some(url) = &config.url {
    match connect_redis(url, config.connect_timeout_seconds).await {
      Ok(conn) => {
        tracing::info!("Redis page cache enabled");
        let cache = Arc::new(RedisPageCache::new(conn, config.page_ttl_seconds));
        let page_cache: Arc<dyn PageCache> = cache.clone();
        let revalidator: Arc<dyn PathRevalidator> = cache;
        return (page_cache, revalidator);
      }
      Err(e) => tracing::warn!("Redis unavailable, caching pages in memory: {:#}", e),
    }
  }

  let cache = Arc::new(InMemoryPageCache::new(ttl));
  let page_cache: Arc<dyn PageCache> = cache.clone();
  let revalidator: Arc<dyn PathRevalidator> = cache;
  (page_cache, revalidator)
}

async fn connect_redis(
  url: &str,
  timeout_seconds: u64,
) -> anyhow::Result<redis::aio::ConnectionManager> {
  let client = redis::Client::open(url).context("Invalid Redis URL")?;

  let conn = tokio::time::timeout(
    Duration::from_secs(timeout_seconds),
    client.get_connection_manager(),
  )
  .await
  .with_context(|| format!("Redis connection timed out after {} seconds", timeout_seconds))?
  .context("Failed to connect to Redis")?;

  Ok(conn)
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
