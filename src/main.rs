//! TTI Academy backend server.
//!
//! Runs against PostgreSQL when `TTI_ACADEMY__DATABASE__URL` is set, otherwise
//! on the in-memory stores, optionally seeded from `TTI_ACADEMY__CATALOG__SEED_PATH`.

use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tti_academy::adapters::http::middleware::AuthState;
use tti_academy::adapters::http::{api_router, AppState};
use tti_academy::adapters::{
    CatalogSeed, InMemoryCatalog, InMemoryEnrollmentStore, InMemoryProgressRepository,
    JwtSessionValidator, PostgresCatalogReader, PostgresEnrollmentStore,
    PostgresProgressRepository,
};
use tti_academy::config::{AppConfig, DatabaseConfig, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.server);
    config.validate().context("invalid configuration")?;

    let state = match config.database.url() {
        Some(url) => postgres_state(url, &config.database).await?,
        None => in_memory_state(config.catalog.seed_path.as_deref()).await?,
    };
    let validator: AuthState = Arc::new(JwtSessionValidator::new(&config.auth.jwt_secret));

    let app = api_router(state, validator)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server)?)
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, environment = ?config.server.environment, "TTI Academy backend listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn postgres_state(url: &str, db: &DatabaseConfig) -> anyhow::Result<AppState> {
    let pool = PgPoolOptions::new()
        .min_connections(db.min_connections)
        .max_connections(db.max_connections)
        .acquire_timeout(db.acquire_timeout())
        .idle_timeout(Some(db.idle_timeout()))
        .connect(url)
        .await
        .context("failed to connect to PostgreSQL")?;

    if db.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run migrations")?;
        info!("database migrations applied");
    }

    let enrollments = Arc::new(PostgresEnrollmentStore::new(pool.clone()));
    Ok(AppState {
        courses: Arc::new(PostgresCatalogReader::new(pool.clone())),
        modules: Arc::new(PostgresCatalogReader::new(pool.clone())),
        progress: Arc::new(PostgresProgressRepository::new(pool)),
        enrollment_checker: enrollments.clone(),
        enrollment_reader: enrollments,
    })
}

async fn in_memory_state(seed_path: Option<&str>) -> anyhow::Result<AppState> {
    let catalog = InMemoryCatalog::new();
    let enrollments = InMemoryEnrollmentStore::new();

    match seed_path {
        Some(path) => {
            let summary = CatalogSeed::from_path(path)?
                .load_into(&catalog, &enrollments)
                .await;
            info!(
                path,
                courses = summary.courses,
                modules = summary.modules,
                enrollments = summary.enrollments,
                "catalog seeded into memory"
            );
        }
        None => warn!("no database or seed configured; catalog is empty"),
    }

    Ok(AppState::in_memory(
        catalog,
        enrollments,
        InMemoryProgressRepository::new(),
    ))
}

fn cors_layer(server: &ServerConfig) -> anyhow::Result<CorsLayer> {
    let origins = server.cors_origins_list();
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.is_empty() {
        if server.is_production() {
            return Ok(layer);
        }
        return Ok(layer.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|o| o.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .context("invalid CORS origin")?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
