//! Profitability projection models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CostBaseline, Crop};
use crate::types::{percentage_of, round_money};

/// Qualitative profitability label derived from ROI
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Assessment {
    /// ROI ≥ 80%
    Excellent,
    /// ROI ≥ 40%
    Good,
    /// ROI ≥ 10%
    Moderate,
    /// ROI below 10%
    Poor,
}

impl Assessment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Assessment::Excellent => "Excellent",
            Assessment::Good => "Good",
            Assessment::Moderate => "Moderate",
            Assessment::Poor => "Poor",
        }
    }
}

impl std::fmt::Display for Assessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify profitability by ROI percentage
pub fn assess_roi(roi_pct: Decimal) -> Assessment {
    if roi_pct >= Decimal::from(80) {
        Assessment::Excellent
    } else if roi_pct >= Decimal::from(40) {
        Assessment::Good
    } else if roi_pct >= Decimal::from(10) {
        Assessment::Moderate
    } else {
        Assessment::Poor
    }
}

/// Full cost, income and profit projection for a plot of land
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfitBreakdown {
    pub crop_id: i64,
    pub crop_name: String,
    pub emoji: String,
    pub land_area_acres: Decimal,

    // Cost breakdown
    pub seed_cost: Decimal,
    pub fertilizer_cost: Decimal,
    pub pesticide_cost: Decimal,
    pub labor_cost: Decimal,
    pub irrigation_cost: Decimal,
    pub other_cost: Decimal,
    pub total_cost: Decimal,

    // Income
    pub expected_yield_quintals: Decimal,
    pub market_price_per_quintal: Decimal,
    pub gross_income: Decimal,

    // Profit
    pub net_profit: Decimal,
    pub profit_margin_pct: Decimal,
    pub roi_pct: Decimal,
    pub assessment: Assessment,
}

impl ProfitBreakdown {
    /// Scale a per-acre baseline to `land_area_acres`.
    ///
    /// Every figure is rounded to 2 dp as it is produced; later figures are
    /// computed from the already-rounded ones.
    pub fn project(crop: &Crop, baseline: &CostBaseline, land_area_acres: Decimal) -> Self {
        let scale = |per_acre: Decimal| round_money(per_acre * land_area_acres);

        let seed_cost = scale(baseline.seed_cost_per_acre);
        let fertilizer_cost = scale(baseline.fertilizer_cost_per_acre);
        let pesticide_cost = scale(baseline.pesticide_cost_per_acre);
        let labor_cost = scale(baseline.labor_cost_per_acre);
        let irrigation_cost = scale(baseline.irrigation_cost_per_acre);
        let other_cost = scale(baseline.other_cost_per_acre);
        let total_cost = round_money(
            seed_cost + fertilizer_cost + pesticide_cost + labor_cost + irrigation_cost + other_cost,
        );

        let expected_yield_quintals = scale(baseline.expected_yield_quintals_per_acre);
        let market_price_per_quintal = baseline.market_price_per_quintal;
        let gross_income = round_money(expected_yield_quintals * market_price_per_quintal);
        let net_profit = round_money(gross_income - total_cost);

        let roi_pct = percentage_of(net_profit, total_cost);
        let profit_margin_pct = percentage_of(net_profit, gross_income);

        Self {
            crop_id: crop.id,
            crop_name: crop.name.clone(),
            emoji: crop.emoji.clone(),
            land_area_acres,
            seed_cost,
            fertilizer_cost,
            pesticide_cost,
            labor_cost,
            irrigation_cost,
            other_cost,
            total_cost,
            expected_yield_quintals,
            market_price_per_quintal,
            gross_income,
            net_profit,
            profit_margin_pct,
            roi_pct,
            assessment: assess_roi(roi_pct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WaterLevel;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn groundnut() -> Crop {
        Crop {
            id: 4,
            name: "Groundnut".to_string(),
            emoji: "🥜".to_string(),
            category: "Oilseed".to_string(),
            water_need: WaterLevel::Low,
            growing_weeks_min: 14,
            growing_weeks_max: 18,
            best_sowing_months: "Jun-Jul".to_string(),
        }
    }

    fn baseline() -> CostBaseline {
        CostBaseline {
            crop_id: 4,
            seed_cost_per_acre: dec("1000"),
            fertilizer_cost_per_acre: dec("500"),
            pesticide_cost_per_acre: Decimal::ZERO,
            labor_cost_per_acre: Decimal::ZERO,
            irrigation_cost_per_acre: Decimal::ZERO,
            other_cost_per_acre: Decimal::ZERO,
            expected_yield_quintals_per_acre: dec("10"),
            market_price_per_quintal: dec("2000"),
            reference_year: 2024,
        }
    }

    #[test]
    fn assess_roi_thresholds() {
        assert_eq!(assess_roi(dec("80")), Assessment::Excellent);
        assert_eq!(assess_roi(dec("79.99")), Assessment::Good);
        assert_eq!(assess_roi(dec("40")), Assessment::Good);
        assert_eq!(assess_roi(dec("39.99")), Assessment::Moderate);
        assert_eq!(assess_roi(dec("10")), Assessment::Moderate);
        assert_eq!(assess_roi(dec("9.99")), Assessment::Poor);
        assert_eq!(assess_roi(dec("-50")), Assessment::Poor);
    }

    #[test]
    fn project_two_acres() {
        let p = ProfitBreakdown::project(&groundnut(), &baseline(), dec("2"));
        assert_eq!(p.seed_cost, dec("2000"));
        assert_eq!(p.fertilizer_cost, dec("1000"));
        assert_eq!(p.pesticide_cost, Decimal::ZERO);
        assert_eq!(p.total_cost, dec("3000"));
        assert_eq!(p.expected_yield_quintals, dec("20"));
        assert_eq!(p.gross_income, dec("40000"));
        assert_eq!(p.net_profit, dec("37000"));
        assert_eq!(p.roi_pct, dec("1233.33"));
        assert_eq!(p.profit_margin_pct, dec("92.50"));
        assert_eq!(p.assessment, Assessment::Excellent);
    }

    #[test]
    fn project_zero_cost_keeps_margin() {
        let mut b = baseline();
        b.seed_cost_per_acre = Decimal::ZERO;
        b.fertilizer_cost_per_acre = Decimal::ZERO;
        let p = ProfitBreakdown::project(&groundnut(), &b, dec("1.5"));
        assert_eq!(p.total_cost, Decimal::ZERO);
        assert_eq!(p.roi_pct, Decimal::ZERO);
        assert_eq!(p.profit_margin_pct, dec("100"));
        assert_eq!(p.assessment, Assessment::Poor);
    }

    #[test]
    fn project_rounds_each_component() {
        let mut b = baseline();
        b.seed_cost_per_acre = dec("333.335");
        b.fertilizer_cost_per_acre = dec("0.005");
        let p = ProfitBreakdown::project(&groundnut(), &b, dec("1"));
        assert_eq!(p.seed_cost, dec("333.34"));
        assert_eq!(p.fertilizer_cost, dec("0.01"));
        assert_eq!(p.total_cost, dec("333.35"));
    }

    #[test]
    fn project_loss_is_poor() {
        let mut b = baseline();
        b.market_price_per_quintal = dec("100");
        let p = ProfitBreakdown::project(&groundnut(), &b, dec("1"));
        assert_eq!(p.gross_income, dec("1000"));
        assert_eq!(p.net_profit, dec("-500"));
        assert_eq!(p.roi_pct, dec("-33.33"));
        assert_eq!(p.profit_margin_pct, dec("-50"));
        assert_eq!(p.assessment, Assessment::Poor);
    }
}
