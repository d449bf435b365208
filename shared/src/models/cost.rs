//! Per-acre cost baseline models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-acre cost, yield and price reference figures for a crop, versioned by year
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostBaseline {
    pub crop_id: i64,
    pub seed_cost_per_acre: Decimal,
    pub fertilizer_cost_per_acre: Decimal,
    pub pesticide_cost_per_acre: Decimal,
    pub labor_cost_per_acre: Decimal,
    pub irrigation_cost_per_acre: Decimal,
    pub other_cost_per_acre: Decimal,
    pub expected_yield_quintals_per_acre: Decimal,
    /// ₹ per quintal
    pub market_price_per_quintal: Decimal,
    pub reference_year: i32,
}

/// Pick the baseline with the greatest reference year.
///
/// Callers guarantee reference years are unique per crop; on a tie the
/// first baseline in iteration order is kept.
pub fn latest_baseline<'a, I>(baselines: I) -> Option<&'a CostBaseline>
where
    I: IntoIterator<Item = &'a CostBaseline>,
{
    baselines.into_iter().fold(None, |best, candidate| match best {
        Some(current) if current.reference_year >= candidate.reference_year => Some(current),
        _ => Some(candidate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline(year: i32, seed: i64) -> CostBaseline {
        CostBaseline {
            crop_id: 1,
            seed_cost_per_acre: Decimal::from(seed),
            fertilizer_cost_per_acre: Decimal::from(500),
            pesticide_cost_per_acre: Decimal::ZERO,
            labor_cost_per_acre: Decimal::ZERO,
            irrigation_cost_per_acre: Decimal::ZERO,
            other_cost_per_acre: Decimal::from(25),
            expected_yield_quintals_per_acre: Decimal::from(10),
            market_price_per_quintal: Decimal::from(2000),
            reference_year: year,
        }
    }

    #[test]
    fn latest_baseline_picks_max_year() {
        let baselines = vec![baseline(2022, 1), baseline(2024, 2), baseline(2023, 3)];
        let latest = latest_baseline(&baselines).unwrap();
        assert_eq!(latest.reference_year, 2024);
        assert_eq!(latest.seed_cost_per_acre, Decimal::from(2));
    }

    #[test]
    fn latest_baseline_empty_is_none() {
        let baselines: Vec<CostBaseline> = Vec::new();
        assert!(latest_baseline(&baselines).is_none());
    }

    #[test]
    fn latest_baseline_tie_keeps_first() {
        let baselines = vec![baseline(2024, 1), baseline(2024, 2)];
        let latest = latest_baseline(&baselines).unwrap();
        assert_eq!(latest.seed_cost_per_acre, Decimal::from(1));
    }
}
