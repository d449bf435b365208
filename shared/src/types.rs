//! Common types used across the platform

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Coarse water requirement (for crops) or water availability (for farms)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaterLevel {
    Low,
    Medium,
    High,
}

impl WaterLevel {
    /// Parse a water level, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything outside LOW / MEDIUM / HIGH.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "LOW" => Some(WaterLevel::Low),
            "MEDIUM" => Some(WaterLevel::Medium),
            "HIGH" => Some(WaterLevel::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WaterLevel::Low => "LOW",
            WaterLevel::Medium => "MEDIUM",
            WaterLevel::High => "HIGH",
        }
    }
}

impl std::fmt::Display for WaterLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of market price movement for a crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum PriceTrend {
    Rising,
    #[default]
    Stable,
    Falling,
}

impl PriceTrend {
    /// Parse a stored trend label. Matching is exact, as stored by the catalog.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Rising" => Some(PriceTrend::Rising),
            "Stable" => Some(PriceTrend::Stable),
            "Falling" => Some(PriceTrend::Falling),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTrend::Rising => "Rising",
            PriceTrend::Stable => "Stable",
            PriceTrend::Falling => "Falling",
        }
    }
}

impl std::fmt::Display for PriceTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Round a currency or percentage figure to 2 decimal places, half-up.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / whole × 100`, rounded; zero when `whole` is not positive.
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        round_money(part / whole * Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn water_level_parse_ignores_case() {
        assert_eq!(WaterLevel::parse("medium"), Some(WaterLevel::Medium));
        assert_eq!(WaterLevel::parse(" High "), Some(WaterLevel::High));
        assert_eq!(WaterLevel::parse("LOW"), Some(WaterLevel::Low));
        assert_eq!(WaterLevel::parse("flooded"), None);
        assert_eq!(WaterLevel::parse(""), None);
    }

    #[test]
    fn price_trend_parse_is_exact() {
        assert_eq!(PriceTrend::parse("Rising"), Some(PriceTrend::Rising));
        assert_eq!(PriceTrend::parse("rising"), None);
        assert_eq!(PriceTrend::default(), PriceTrend::Stable);
    }

    #[test]
    fn round_money_half_up() {
        assert_eq!(round_money(dec("1.005")), dec("1.01"));
        assert_eq!(round_money(dec("1.004")), dec("1.00"));
        assert_eq!(round_money(dec("-1.005")), dec("-1.01"));
        assert_eq!(round_money(dec("1233.3333")), dec("1233.33"));
    }

    #[test]
    fn percentage_of_zero_whole_is_zero() {
        assert_eq!(percentage_of(dec("500"), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percentage_of(dec("500"), dec("-10")), Decimal::ZERO);
        assert_eq!(percentage_of(dec("1"), dec("3")), dec("33.33"));
    }
}
