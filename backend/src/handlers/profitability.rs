//! HTTP handlers for profitability endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use super::{validate_input, validation_rule};
use crate::error::AppResult;
use crate::services::ProfitabilityService;
use crate::AppState;
use shared::{validate_land_area, CostBaseline, Crop, ProfitBreakdown};

/// Body of `POST /profit/calculate`
#[derive(Debug, Deserialize, Validate)]
pub struct ProfitRequest {
    pub crop_id: i64,

    /// Always in acres; clients convert hectares before sending
    #[validate(custom = "land_area_rule")]
    pub land_area_acres: Decimal,

    /// Optional, only used to attribute the calculation log
    pub farmer_id: Option<i64>,
}

fn land_area_rule(value: &Decimal) -> Result<(), validator::ValidationError> {
    validation_rule("land_area_acres", validate_land_area(*value))
}

/// Project costs, income and profit for a crop on the given land
pub async fn calculate(
    State(state): State<AppState>,
    Json(input): Json<ProfitRequest>,
) -> AppResult<Json<ProfitBreakdown>> {
    validate_input(&input)?;

    let service = ProfitabilityService::new(state.catalog, state.audit);
    let breakdown = service.calculate(input.crop_id, input.land_area_acres, input.farmer_id)?;
    Ok(Json(breakdown))
}

/// Crops with cost data
pub async fn list_crops(State(state): State<AppState>) -> Json<Vec<Crop>> {
    let service = ProfitabilityService::new(state.catalog, state.audit);
    Json(service.crops_with_baseline())
}

/// Newest per-acre cost baseline for a crop
pub async fn get_baseline(
    State(state): State<AppState>,
    Path(crop_id): Path<i64>,
) -> AppResult<Json<CostBaseline>> {
    let service = ProfitabilityService::new(state.catalog, state.audit);
    Ok(Json(service.baseline(crop_id)?))
}
