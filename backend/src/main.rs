//! Crop Advisor Platform - Backend Server
//!
//! Crop recommendations and profitability projections for smallholder
//! farmers, served over a JSON API.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use sqlx::postgres::PgPoolOptions;

use crop_advisor::{
    audit::{AuditSink, PgAuditSink, TracingAuditSink},
    catalog::postgres::load_catalog,
    create_app, init_tracing, AppState, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    init_tracing(config.logging.json);

    tracing::info!("Starting Crop Advisor Server");
    tracing::info!("Environment: {}", config.environment);

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.is_development() {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    // Reference data is read once; restart to pick up catalog changes
    let catalog = load_catalog(&db_pool).await?;

    let (audit, audit_writer) = if config.audit.enabled {
        let (sink, handle) = PgAuditSink::spawn(db_pool.clone(), config.audit.queue_capacity);
        (Arc::new(sink) as Arc<dyn AuditSink>, Some(handle))
    } else {
        tracing::warn!("Audit persistence disabled, records are only logged");
        (Arc::new(TracingAuditSink) as Arc<dyn AuditSink>, None)
    };

    // Build application
    let app = create_app(AppState::new(db_pool, catalog, audit));

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router and every sink clone are gone; let the writer drain its queue
    if let Some(handle) = audit_writer {
        let drain_timeout = Duration::from_secs(config.audit.drain_timeout_secs);
        match tokio::time::timeout(drain_timeout, handle).await {
            Ok(joined) => joined?,
            Err(_) => tracing::warn!(
                "Audit writer did not drain within {:?}, pending records dropped",
                drain_timeout
            ),
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
