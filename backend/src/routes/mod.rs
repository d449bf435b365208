//! Route definitions for the Crop Advisor Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/advisor", advisor_routes())
        .nest("/profit", profit_routes())
}

/// Crop recommendation routes
fn advisor_routes() -> Router<AppState> {
    Router::new()
        .route("/recommend", post(handlers::recommend))
        .route("/soils", get(handlers::list_soil_types))
        .route("/crops/:crop_id/history", get(handlers::get_price_history))
}

/// Profitability calculator routes
fn profit_routes() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(handlers::calculate))
        .route("/crops", get(handlers::list_crops))
        .route("/crops/:crop_id/baseline", get(handlers::get_baseline))
}
