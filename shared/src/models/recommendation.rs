//! Crop recommendation scoring
//!
//! A crop's match score is the sum of four independent components:
//!
//! | Component | Points |
//! |-----------|--------|
//! | Soil      | `suitability × 40 / 100`, truncated (max 40) |
//! | Water     | 35 exact, 15 HIGH-for-MEDIUM, 10 MEDIUM-for-LOW |
//! | Region    | 15 when adapted to the requested region |
//! | Market    | 10 for a rising trend, +5 for confidence above 75% |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Crop, MarketTrend, RegionAdaptation, SoilType};
use crate::types::{PriceTrend, WaterLevel};

/// Crops at or below this soil suitability are never considered
pub const SUITABILITY_FLOOR: i32 = 40;

/// Crops scoring below this total are dropped after scoring
pub const MIN_MATCH_SCORE: i32 = 40;

/// Maximum number of recommendations returned per request
pub const MAX_RECOMMENDATIONS: usize = 5;

const SOIL_WEIGHT: i32 = 40;
const WATER_EXACT_POINTS: i32 = 35;
const WATER_HIGH_FOR_MEDIUM_POINTS: i32 = 15;
const WATER_MEDIUM_FOR_LOW_POINTS: i32 = 10;
const REGION_POINTS: i32 = 15;
const RISING_TREND_POINTS: i32 = 10;
const HIGH_CONFIDENCE_POINTS: i32 = 5;
const HIGH_CONFIDENCE_THRESHOLD: i32 = 75;

/// Soil component: suitability scaled linearly onto 0-40, truncating
pub fn soil_points(suitability: i32) -> i32 {
    suitability * SOIL_WEIGHT / 100
}

/// Water component.
///
/// Partial credit is one-directional: a crop that needs less water than
/// is available earns some points, a thirstier crop earns none. An
/// unrecognised availability (`None`) earns nothing.
pub fn water_points(available: Option<WaterLevel>, need: WaterLevel) -> i32 {
    match (available, need) {
        (Some(available), need) if available == need => WATER_EXACT_POINTS,
        (Some(WaterLevel::High), WaterLevel::Medium) => WATER_HIGH_FOR_MEDIUM_POINTS,
        (Some(WaterLevel::Medium), WaterLevel::Low) => WATER_MEDIUM_FOR_LOW_POINTS,
        _ => 0,
    }
}

/// Region component: awarded when any adaptation contains the requested region
pub fn region_points(region: Option<&str>, adaptations: &[RegionAdaptation]) -> i32 {
    match region {
        Some(region) if adaptations.iter().any(|a| a.matches(region)) => REGION_POINTS,
        _ => 0,
    }
}

/// Market component: rising trend and high confidence are awarded independently
pub fn market_points(trend: Option<&MarketTrend>) -> i32 {
    let Some(trend) = trend else {
        return 0;
    };

    let mut points = 0;
    if trend.trend == PriceTrend::Rising {
        points += RISING_TREND_POINTS;
    }
    if trend.confidence_pct > HIGH_CONFIDENCE_THRESHOLD {
        points += HIGH_CONFIDENCE_POINTS;
    }
    points
}

/// Per-component score for one crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    pub soil: i32,
    pub water: i32,
    pub region: i32,
    pub market: i32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i32 {
        self.soil + self.water + self.region + self.market
    }
}

/// Criteria supplied by the farmer, normalised for scoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCriteria {
    pub water: Option<WaterLevel>,
    /// Trimmed; `None` when absent or blank
    pub region: Option<String>,
}

impl MatchCriteria {
    pub fn new(water_availability: &str, region: Option<&str>) -> Self {
        Self {
            water: WaterLevel::parse(water_availability),
            region: region
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
        }
    }
}

/// Score one candidate crop against the criteria
pub fn score_crop(
    crop: &Crop,
    suitability: i32,
    criteria: &MatchCriteria,
    adaptations: &[RegionAdaptation],
    trend: Option<&MarketTrend>,
) -> ScoreBreakdown {
    ScoreBreakdown {
        soil: soil_points(suitability),
        water: water_points(criteria.water, crop.water_need),
        region: region_points(criteria.region.as_deref(), adaptations),
        market: market_points(trend),
    }
}

/// A crop that passed the suitability floor, with its score
#[derive(Debug, Clone)]
pub struct ScoredCrop {
    pub crop: Crop,
    pub trend: Option<MarketTrend>,
    pub score: ScoreBreakdown,
}

/// Drop low scores, then order by score descending and keep the top results.
///
/// The sort is stable, so equal scores keep their input order.
pub fn rank_scored_crops(mut scored: Vec<ScoredCrop>) -> Vec<ScoredCrop> {
    scored.retain(|s| s.score.total() >= MIN_MATCH_SCORE);
    scored.sort_by(|a, b| b.score.total().cmp(&a.score.total()));
    scored.truncate(MAX_RECOMMENDATIONS);
    scored
}

/// Human-readable advice: water tolerance plus a market comment
pub fn advisory_note(crop: &Crop, trend: Option<&MarketTrend>) -> String {
    let market = match trend.map(|t| t.trend) {
        Some(PriceTrend::Rising) => {
            "Price has been rising — good market outlook for next 3-6 months."
        }
        Some(PriceTrend::Falling) => "Price is declining — consider crop diversification.",
        _ => "Market price is stable. Consistent demand expected.",
    };

    format!(
        "{} suits {} water conditions. {}",
        crop.name,
        crop.water_need.as_str().to_lowercase(),
        market
    )
}

/// One ranked recommendation returned to the farmer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropRecommendation {
    pub crop_id: i64,
    pub crop_name: String,
    pub emoji: String,
    pub category: String,
    pub water_need: WaterLevel,
    /// Display name of the requested soil
    pub soil_match: String,
    pub growing_weeks_min: i32,
    pub growing_weeks_max: i32,
    pub best_sowing_months: String,
    /// ₹ per quintal, zero when no trend is known
    pub forecast_min_price: Decimal,
    pub forecast_max_price: Decimal,
    pub price_trend: PriceTrend,
    /// 0-100, equal to `match_score`
    pub confidence_score: i32,
    pub advisory_note: String,
    pub match_score: i32,
    pub score_breakdown: ScoreBreakdown,
}

impl CropRecommendation {
    pub fn from_scored(scored: &ScoredCrop, soil: &SoilType) -> Self {
        let crop = &scored.crop;
        let trend = scored.trend.as_ref();
        let score = scored.score.total();

        Self {
            crop_id: crop.id,
            crop_name: crop.name.clone(),
            emoji: crop.emoji.clone(),
            category: crop.category.clone(),
            water_need: crop.water_need,
            soil_match: soil.name.clone(),
            growing_weeks_min: crop.growing_weeks_min,
            growing_weeks_max: crop.growing_weeks_max,
            best_sowing_months: crop.best_sowing_months.clone(),
            forecast_min_price: trend.map(|t| t.forecast_min_6mo).unwrap_or(Decimal::ZERO),
            forecast_max_price: trend.map(|t| t.forecast_max_6mo).unwrap_or(Decimal::ZERO),
            price_trend: trend.map(|t| t.trend).unwrap_or_default(),
            confidence_score: score,
            advisory_note: advisory_note(crop, trend),
            match_score: score,
            score_breakdown: scored.score,
        }
    }
}
