//! Crop Advisor Platform - Backend
//!
//! Recommends crops for a farmer's soil, water and region, and projects
//! per-acre profitability for a chosen crop.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod audit;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use config::Config;

use audit::AuditSink;
use catalog::{CatalogSummary, ReferenceCatalog, ReferenceData};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub catalog: Arc<dyn ReferenceData>,
    pub catalog_summary: CatalogSummary,
    pub audit: Arc<dyn AuditSink>,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, catalog: ReferenceCatalog, audit: Arc<dyn AuditSink>) -> Self {
        let catalog_summary = catalog.summary();
        Self {
            db,
            catalog: Arc::new(catalog),
            catalog_summary,
            audit,
        }
    }
}

/// Install the global tracing subscriber
pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "crop_advisor=debug,crop_advisor_server=debug,tower_http=debug,sqlx=warn".into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Crop Advisor Platform API v1.0"
}
