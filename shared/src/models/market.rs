//! Market price models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::PriceTrend;

/// Current six-month market outlook for a crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketTrend {
    pub crop_id: i64,
    pub trend: PriceTrend,
    /// 0-100
    pub confidence_pct: i32,
    /// ₹ per quintal
    pub forecast_min_6mo: Decimal,
    /// ₹ per quintal
    pub forecast_max_6mo: Decimal,
}

/// One monthly observed price for a crop in a market region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketPriceHistory {
    pub crop_id: i64,
    pub region_name: String,
    pub price_date: NaiveDate,
    pub price_per_quintal: Decimal,
}
