//! Append-only audit records written after each engine invocation

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Assessment, CropRecommendation, ProfitBreakdown};

/// Criteria of one recommendation request, echoed as received
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRequestRecord {
    pub id: Uuid,
    pub soil_type_code: String,
    pub water_availability: String,
    pub region: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RecommendationRequestRecord {
    pub fn new(soil_type_code: &str, water_availability: &str, region: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            soil_type_code: soil_type_code.to_string(),
            water_availability: water_availability.to_string(),
            region: region.map(str::to_string),
            created_at: Utc::now(),
        }
    }
}

/// One ranked result of a recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationResultRecord {
    pub request_id: Uuid,
    pub crop_id: i64,
    /// 1-based
    pub rank: i32,
    pub match_score: i32,
}

impl RecommendationResultRecord {
    /// Build result records for `recommendations`, ranked in slice order
    pub fn for_request(
        request_id: Uuid,
        recommendations: &[CropRecommendation],
    ) -> Vec<RecommendationResultRecord> {
        recommendations
            .iter()
            .zip(1..)
            .map(|(rec, rank)| RecommendationResultRecord {
                request_id,
                crop_id: rec.crop_id,
                rank,
                match_score: rec.match_score,
            })
            .collect()
    }
}

/// Inputs and every computed figure of one profitability calculation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfitCalcLogRecord {
    pub id: Uuid,
    pub farmer_id: Option<i64>,
    pub crop_id: i64,
    pub land_area_acres: Decimal,
    pub seed_cost: Decimal,
    pub fertilizer_cost: Decimal,
    pub pesticide_cost: Decimal,
    pub labor_cost: Decimal,
    pub irrigation_cost: Decimal,
    pub other_cost: Decimal,
    pub total_cost: Decimal,
    pub expected_yield_quintals: Decimal,
    pub market_price_per_quintal: Decimal,
    pub gross_income: Decimal,
    pub net_profit: Decimal,
    pub roi_pct: Decimal,
    pub profit_margin_pct: Decimal,
    pub assessment: Assessment,
    pub created_at: DateTime<Utc>,
}

impl ProfitCalcLogRecord {
    pub fn from_breakdown(breakdown: &ProfitBreakdown, farmer_id: Option<i64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            farmer_id,
            crop_id: breakdown.crop_id,
            land_area_acres: breakdown.land_area_acres,
            seed_cost: breakdown.seed_cost,
            fertilizer_cost: breakdown.fertilizer_cost,
            pesticide_cost: breakdown.pesticide_cost,
            labor_cost: breakdown.labor_cost,
            irrigation_cost: breakdown.irrigation_cost,
            other_cost: breakdown.other_cost,
            total_cost: breakdown.total_cost,
            expected_yield_quintals: breakdown.expected_yield_quintals,
            market_price_per_quintal: breakdown.market_price_per_quintal,
            gross_income: breakdown.gross_income,
            net_profit: breakdown.net_profit,
            roi_pct: breakdown.roi_pct,
            profit_margin_pct: breakdown.profit_margin_pct,
            assessment: breakdown.assessment,
            created_at: Utc::now(),
        }
    }
}

/// Any record handed to an audit sink
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditRecord {
    RecommendationRequest(RecommendationRequestRecord),
    RecommendationResult(RecommendationResultRecord),
    ProfitCalc(ProfitCalcLogRecord),
}

impl AuditRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            AuditRecord::RecommendationRequest(_) => "recommendation_request",
            AuditRecord::RecommendationResult(_) => "recommendation_result",
            AuditRecord::ProfitCalc(_) => "profit_calc",
        }
    }
}
