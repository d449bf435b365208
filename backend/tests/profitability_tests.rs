//! Tests for the profitability projection service

use std::sync::Arc;

use crop_advisor::audit::MemoryAuditSink;
use crop_advisor::catalog::{ReferenceCatalog, ReferenceData};
use crop_advisor::error::AppError;
use crop_advisor::services::ProfitabilityService;
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{Assessment, AuditRecord, CostBaseline, Crop, WaterLevel};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn crop(id: i64, name: &str) -> Crop {
    Crop {
        id,
        name: name.to_string(),
        emoji: "🥜".to_string(),
        category: "Oilseed".to_string(),
        water_need: WaterLevel::Low,
        growing_weeks_min: 14,
        growing_weeks_max: 18,
        best_sowing_months: "Jun, Jul".to_string(),
    }
}

fn baseline(crop_id: i64, year: i32, seed: &str, fertilizer: &str) -> CostBaseline {
    CostBaseline {
        crop_id,
        seed_cost_per_acre: dec(seed),
        fertilizer_cost_per_acre: dec(fertilizer),
        pesticide_cost_per_acre: Decimal::ZERO,
        labor_cost_per_acre: Decimal::ZERO,
        irrigation_cost_per_acre: Decimal::ZERO,
        other_cost_per_acre: Decimal::ZERO,
        expected_yield_quintals_per_acre: dec("10"),
        market_price_per_quintal: dec("2000"),
        reference_year: year,
    }
}

/// Groundnut has two baselines, Tomato has none
fn catalog() -> Arc<dyn ReferenceData> {
    let catalog = ReferenceCatalog::builder()
        .crop(crop(1, "Groundnut"))
        .crop(crop(2, "Tomato"))
        .crop(crop(3, "Millet"))
        .cost_baseline(baseline(1, 2023, "900", "400"))
        .cost_baseline(baseline(1, 2024, "1000", "500"))
        .cost_baseline(baseline(3, 2024, "0", "0"))
        .build()
        .unwrap();
    Arc::new(catalog)
}

fn service() -> (ProfitabilityService, Arc<MemoryAuditSink>) {
    let audit = Arc::new(MemoryAuditSink::new());
    (ProfitabilityService::new(catalog(), audit.clone()), audit)
}

// =============================================================================
// Projection
// =============================================================================

mod projection {
    use super::*;

    #[test]
    fn two_acres_of_groundnut() {
        let (service, _) = service();
        let p = service.calculate(1, dec("2"), None).unwrap();

        assert_eq!(p.crop_name, "Groundnut");
        assert_eq!(p.land_area_acres, dec("2"));
        assert_eq!(p.seed_cost, dec("2000"));
        assert_eq!(p.fertilizer_cost, dec("1000"));
        assert_eq!(p.total_cost, dec("3000"));
        assert_eq!(p.expected_yield_quintals, dec("20"));
        assert_eq!(p.market_price_per_quintal, dec("2000"));
        assert_eq!(p.gross_income, dec("40000"));
        assert_eq!(p.net_profit, dec("37000"));
        assert_eq!(p.roi_pct, dec("1233.33"));
        assert_eq!(p.profit_margin_pct, dec("92.5"));
        assert_eq!(p.assessment, Assessment::Excellent);
    }

    #[test]
    fn uses_newest_reference_year() {
        let (service, _) = service();
        assert_eq!(service.baseline(1).unwrap().reference_year, 2024);

        let p = service.calculate(1, dec("1"), None).unwrap();
        assert_eq!(p.seed_cost, dec("1000"));
    }

    #[test]
    fn zero_cost_reports_zero_roi() {
        let (service, _) = service();
        let p = service.calculate(3, dec("1"), None).unwrap();

        assert_eq!(p.total_cost, Decimal::ZERO);
        assert_eq!(p.roi_pct, Decimal::ZERO);
        assert_eq!(p.profit_margin_pct, dec("100"));
        assert_eq!(p.assessment, Assessment::Poor);
    }

    #[test]
    fn fractional_area_rounds_half_up() {
        let (service, _) = service();
        let p = service.calculate(1, dec("0.333"), None).unwrap();

        assert_eq!(p.seed_cost, dec("333"));
        assert_eq!(p.fertilizer_cost, dec("166.50"));
        assert_eq!(p.total_cost, dec("499.50"));
        assert_eq!(p.expected_yield_quintals, dec("3.33"));
    }
}

// =============================================================================
// Errors and audit trail
// =============================================================================

mod errors {
    use super::*;

    #[test]
    fn unknown_crop_is_not_found_and_unrecorded() {
        let (service, audit) = service();
        let err = service.calculate(99, dec("1"), None).unwrap_err();
        assert!(matches!(err, AppError::CropNotFound(99)));
        assert!(audit.is_empty());
    }

    #[test]
    fn crop_without_baseline_is_reported_and_unrecorded() {
        let (service, audit) = service();
        let err = service.calculate(2, dec("1"), None).unwrap_err();
        assert!(matches!(err, AppError::NoCostBaseline(2)));
        assert!(audit.is_empty());
    }

    #[test]
    fn successful_calculation_is_recorded() {
        let (service, audit) = service();
        let p = service.calculate(1, dec("2"), Some(42)).unwrap();

        let records = audit.records();
        assert_eq!(records.len(), 1);
        match &records[0] {
            AuditRecord::ProfitCalc(log) => {
                assert_eq!(log.farmer_id, Some(42));
                assert_eq!(log.crop_id, 1);
                assert_eq!(log.total_cost, p.total_cost);
                assert_eq!(log.net_profit, p.net_profit);
                assert_eq!(log.assessment, Assessment::Excellent);
            }
            other => panic!("expected profit record, got {}", other.kind()),
        }
    }

    #[test]
    fn repeated_calculation_is_identical_but_logged_twice() {
        let (service, audit) = service();
        let first = service.calculate(1, dec("2.5"), Some(42)).unwrap();
        let second = service.calculate(1, dec("2.5"), Some(42)).unwrap();
        assert_eq!(first, second);

        let ids: Vec<_> = audit
            .records()
            .into_iter()
            .map(|r| match r {
                AuditRecord::ProfitCalc(log) => log.id,
                other => panic!("expected profit record, got {}", other.kind()),
            })
            .collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn lists_only_crops_with_baselines() {
        let (service, _) = service();
        let names: Vec<String> = service
            .crops_with_baseline()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Groundnut", "Millet"]);
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn money_fields_have_at_most_two_decimals(
        acres_hundredths in 1i64..1_000_000,
        seed_paise in 0i64..10_000_000,
    ) {
        let acres = Decimal::new(acres_hundredths, 2);
        let catalog = ReferenceCatalog::builder()
            .crop(crop(1, "Groundnut"))
            .cost_baseline(CostBaseline {
                seed_cost_per_acre: Decimal::new(seed_paise, 2),
                ..baseline(1, 2024, "0", "12.34")
            })
            .build()
            .unwrap();
        let service = ProfitabilityService::new(Arc::new(catalog), Arc::new(MemoryAuditSink::new()));
        let p = service.calculate(1, acres, None).unwrap();

        for value in [
            p.seed_cost,
            p.fertilizer_cost,
            p.total_cost,
            p.expected_yield_quintals,
            p.gross_income,
            p.net_profit,
            p.roi_pct,
            p.profit_margin_pct,
        ] {
            prop_assert!(value.scale() <= 2, "{} has scale {}", value, value.scale());
        }
        prop_assert_eq!(p.net_profit, p.gross_income - p.total_cost);
    }
}
