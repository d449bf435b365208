//! Validation utilities for the Crop Advisor Platform

use rust_decimal::Decimal;

use crate::models::{CostBaseline, Crop, MarketTrend, SoilCompatibility};

/// Largest plot the profitability calculator accepts, in acres
pub const MAX_LAND_AREA_ACRES: i64 = 100_000;

// ============================================================================
// Request Validations
// ============================================================================

/// Validate land area is positive and within a plausible bound
pub fn validate_land_area(acres: Decimal) -> Result<(), &'static str> {
    if acres <= Decimal::ZERO {
        return Err("Land area must be positive");
    }
    if acres > Decimal::from(MAX_LAND_AREA_ACRES) {
        return Err("Land area must be at most 100000 acres");
    }
    Ok(())
}

/// Validate a soil code is present. Unknown codes are reported by the lookup.
pub fn validate_soil_code(code: &str) -> Result<(), &'static str> {
    if code.trim().is_empty() {
        return Err("Soil type is required");
    }
    Ok(())
}

/// Validate water availability is present. Unknown levels are allowed and score zero.
pub fn validate_water_availability(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Water availability is required");
    }
    Ok(())
}

// ============================================================================
// Reference Data Validations
// ============================================================================

/// Validate a 0-100 percentage score
pub fn validate_percentage(value: i32) -> Result<(), &'static str> {
    if !(0..=100).contains(&value) {
        return Err("Percentage must be between 0 and 100");
    }
    Ok(())
}

/// Validate a soil/crop suitability row
pub fn validate_soil_compatibility(entry: &SoilCompatibility) -> Result<(), &'static str> {
    validate_percentage(entry.suitability).map_err(|_| "Suitability must be between 0 and 100")
}

/// Validate a crop's growing window
pub fn validate_crop(crop: &Crop) -> Result<(), &'static str> {
    if crop.name.trim().is_empty() {
        return Err("Crop name is required");
    }
    if crop.growing_weeks_min <= 0 {
        return Err("Minimum growing weeks must be positive");
    }
    if crop.growing_weeks_max < crop.growing_weeks_min {
        return Err("Maximum growing weeks must not be below minimum");
    }
    Ok(())
}

/// Validate a market trend's confidence and forecast band
pub fn validate_market_trend(trend: &MarketTrend) -> Result<(), &'static str> {
    validate_percentage(trend.confidence_pct)
        .map_err(|_| "Confidence must be between 0 and 100")?;
    if trend.forecast_min_6mo < Decimal::ZERO {
        return Err("Forecast prices cannot be negative");
    }
    if trend.forecast_max_6mo < trend.forecast_min_6mo {
        return Err("Forecast maximum must not be below minimum");
    }
    Ok(())
}

/// Validate a cost baseline has no negative figures
pub fn validate_cost_baseline(baseline: &CostBaseline) -> Result<(), &'static str> {
    let figures = [
        baseline.seed_cost_per_acre,
        baseline.fertilizer_cost_per_acre,
        baseline.pesticide_cost_per_acre,
        baseline.labor_cost_per_acre,
        baseline.irrigation_cost_per_acre,
        baseline.other_cost_per_acre,
        baseline.expected_yield_quintals_per_acre,
        baseline.market_price_per_quintal,
    ];
    if figures.iter().any(|f| *f < Decimal::ZERO) {
        return Err("Cost baseline figures cannot be negative");
    }
    if !(1990..=2100).contains(&baseline.reference_year) {
        return Err("Reference year must be between 1990 and 2100");
    }
    Ok(())
}
