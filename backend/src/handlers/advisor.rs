//! HTTP handlers for crop recommendation endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use super::{validate_input, validation_rule};
use crate::error::AppResult;
use crate::services::AdvisorService;
use crate::AppState;
use shared::{
    validate_soil_code, validate_water_availability, CropRecommendation, MarketPriceHistory,
    SoilType,
};

/// Body of `POST /advisor/recommend`
#[derive(Debug, Deserialize, Validate)]
pub struct RecommendationRequest {
    /// RED, BLACK, SANDY, CLAY, LOAMY, LATERITE
    #[validate(custom = "soil_type_rule")]
    pub soil_type: String,

    /// HIGH, MEDIUM, LOW
    #[validate(custom = "water_availability_rule")]
    pub water_availability: String,

    /// Optional district or region, e.g. "Madurai"
    pub region: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PriceHistoryQuery {
    pub region: Option<String>,
}

fn soil_type_rule(value: &str) -> Result<(), validator::ValidationError> {
    validation_rule("soil_type", validate_soil_code(value))
}

fn water_availability_rule(value: &str) -> Result<(), validator::ValidationError> {
    validation_rule("water_availability", validate_water_availability(value))
}

/// Top crop recommendations, best match first
pub async fn recommend(
    State(state): State<AppState>,
    Json(input): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<CropRecommendation>>> {
    validate_input(&input)?;

    let service = AdvisorService::new(state.catalog, state.audit);
    let recommendations = service.recommend(
        input.soil_type.trim(),
        &input.water_availability,
        input.region.as_deref(),
    )?;
    Ok(Json(recommendations))
}

/// All soil types
pub async fn list_soil_types(State(state): State<AppState>) -> Json<Vec<SoilType>> {
    let service = AdvisorService::new(state.catalog, state.audit);
    Json(service.list_soil_types())
}

/// Monthly price history for a crop, optionally filtered by region
pub async fn get_price_history(
    State(state): State<AppState>,
    Path(crop_id): Path<i64>,
    Query(query): Query<PriceHistoryQuery>,
) -> AppResult<Json<Vec<MarketPriceHistory>>> {
    let service = AdvisorService::new(state.catalog, state.audit);
    let history = service.price_history(crop_id, query.region.as_deref())?;
    Ok(Json(history))
}
