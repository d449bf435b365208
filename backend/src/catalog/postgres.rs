//! Loads the reference catalog snapshot from Postgres

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use super::{CatalogError, ReferenceCatalog};
use crate::error::AppResult;
use shared::{CostBaseline, Crop, MarketPriceHistory, MarketTrend, PriceTrend, SoilType, WaterLevel};

#[derive(Debug, FromRow)]
struct SoilTypeRow {
    id: i64,
    code: String,
    name: String,
}

#[derive(Debug, FromRow)]
struct CropRow {
    id: i64,
    name: String,
    emoji: String,
    category: String,
    water_need: String,
    growing_weeks_min: i32,
    growing_weeks_max: i32,
    best_sowing_months: String,
}

impl TryFrom<CropRow> for Crop {
    type Error = CatalogError;

    fn try_from(row: CropRow) -> Result<Self, Self::Error> {
        let water_need = WaterLevel::parse(&row.water_need).ok_or(CatalogError::Invalid {
            entity: "crop",
            id: row.id,
            reason: "unknown water need",
        })?;

        Ok(Crop {
            id: row.id,
            name: row.name,
            emoji: row.emoji,
            category: row.category,
            water_need,
            growing_weeks_min: row.growing_weeks_min,
            growing_weeks_max: row.growing_weeks_max,
            best_sowing_months: row.best_sowing_months,
        })
    }
}

#[derive(Debug, FromRow)]
struct CompatibilityRow {
    soil_id: i64,
    crop_id: i64,
    suitability: i32,
}

#[derive(Debug, FromRow)]
struct RegionRow {
    crop_id: i64,
    region_name: String,
}

#[derive(Debug, FromRow)]
struct MarketTrendRow {
    crop_id: i64,
    trend: String,
    confidence_pct: i32,
    forecast_min_6mo: Decimal,
    forecast_max_6mo: Decimal,
}

impl TryFrom<MarketTrendRow> for MarketTrend {
    type Error = CatalogError;

    fn try_from(row: MarketTrendRow) -> Result<Self, Self::Error> {
        let trend = PriceTrend::parse(&row.trend).ok_or(CatalogError::Invalid {
            entity: "market trend for crop",
            id: row.crop_id,
            reason: "unknown trend label",
        })?;

        Ok(MarketTrend {
            crop_id: row.crop_id,
            trend,
            confidence_pct: row.confidence_pct,
            forecast_min_6mo: row.forecast_min_6mo,
            forecast_max_6mo: row.forecast_max_6mo,
        })
    }
}

#[derive(Debug, FromRow)]
struct CostBaselineRow {
    crop_id: i64,
    seed_cost_per_acre: Decimal,
    fertilizer_cost_per_acre: Decimal,
    pesticide_cost_per_acre: Decimal,
    labor_cost_per_acre: Decimal,
    irrigation_cost_per_acre: Decimal,
    other_cost_per_acre: Decimal,
    expected_yield_quintals_per_acre: Decimal,
    market_price_per_quintal: Decimal,
    reference_year: i32,
}

impl From<CostBaselineRow> for CostBaseline {
    fn from(row: CostBaselineRow) -> Self {
        CostBaseline {
            crop_id: row.crop_id,
            seed_cost_per_acre: row.seed_cost_per_acre,
            fertilizer_cost_per_acre: row.fertilizer_cost_per_acre,
            pesticide_cost_per_acre: row.pesticide_cost_per_acre,
            labor_cost_per_acre: row.labor_cost_per_acre,
            irrigation_cost_per_acre: row.irrigation_cost_per_acre,
            other_cost_per_acre: row.other_cost_per_acre,
            expected_yield_quintals_per_acre: row.expected_yield_quintals_per_acre,
            market_price_per_quintal: row.market_price_per_quintal,
            reference_year: row.reference_year,
        }
    }
}

#[derive(Debug, FromRow)]
struct PriceHistoryRow {
    crop_id: i64,
    region_name: String,
    price_date: NaiveDate,
    price_per_quintal: Decimal,
}

/// Read every reference table and assemble a validated snapshot.
///
/// Rows are read in primary key order so that catalog enumeration, and
/// with it the order of equally scored recommendations, is stable across
/// restarts.
pub async fn load_catalog(db: &PgPool) -> AppResult<ReferenceCatalog> {
    let soils = sqlx::query_as::<_, SoilTypeRow>(
        "SELECT id, code, name FROM soil_types ORDER BY id",
    )
    .fetch_all(db)
    .await?;

    let crops = sqlx::query_as::<_, CropRow>(
        r#"
        SELECT id, name, emoji, category, water_need,
               growing_weeks_min, growing_weeks_max, best_sowing_months
        FROM crops
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    let compatibilities = sqlx::query_as::<_, CompatibilityRow>(
        "SELECT soil_id, crop_id, suitability FROM crop_soil_compatibility ORDER BY id",
    )
    .fetch_all(db)
    .await?;

    let regions = sqlx::query_as::<_, RegionRow>(
        "SELECT crop_id, region_name FROM crop_regions ORDER BY id",
    )
    .fetch_all(db)
    .await?;

    let trends = sqlx::query_as::<_, MarketTrendRow>(
        r#"
        SELECT crop_id, trend, confidence_pct, forecast_min_6mo, forecast_max_6mo
        FROM market_price_trends
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    let baselines = sqlx::query_as::<_, CostBaselineRow>(
        r#"
        SELECT crop_id, seed_cost_per_acre, fertilizer_cost_per_acre, pesticide_cost_per_acre,
               labor_cost_per_acre, irrigation_cost_per_acre, other_cost_per_acre,
               expected_yield_quintals_per_acre, market_price_per_quintal, reference_year
        FROM crop_cost_baselines
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    let history = sqlx::query_as::<_, PriceHistoryRow>(
        r#"
        SELECT crop_id, region_name, price_date, price_per_quintal
        FROM market_price_history
        ORDER BY price_date, id
        "#,
    )
    .fetch_all(db)
    .await?;

    let mut builder = ReferenceCatalog::builder();
    for row in soils {
        builder = builder.soil(SoilType {
            id: row.id,
            code: row.code,
            name: row.name,
        });
    }
    for row in crops {
        builder = builder.crop(row.try_into()?);
    }
    for row in compatibilities {
        builder = builder.compatibility(row.soil_id, row.crop_id, row.suitability);
    }
    for row in regions {
        builder = builder.region(row.crop_id, row.region_name);
    }
    for row in trends {
        builder = builder.market_trend(row.try_into()?);
    }
    for row in baselines {
        builder = builder.cost_baseline(row.into());
    }
    for row in history {
        builder = builder.price_point(MarketPriceHistory {
            crop_id: row.crop_id,
            region_name: row.region_name,
            price_date: row.price_date,
            price_per_quintal: row.price_per_quintal,
        });
    }

    let catalog = builder.build()?;
    let summary = catalog.summary();
    tracing::info!(
        soil_types = summary.soil_types,
        crops = summary.crops,
        cost_baselines = summary.cost_baselines,
        "Reference catalog loaded"
    );

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_row_rejects_unknown_water_need() {
        let row = CropRow {
            id: 3,
            name: "Paddy".to_string(),
            emoji: "🌾".to_string(),
            category: "Cereal".to_string(),
            water_need: "SWAMP".to_string(),
            growing_weeks_min: 16,
            growing_weeks_max: 20,
            best_sowing_months: "Jun-Jul".to_string(),
        };
        let err = Crop::try_from(row).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { id: 3, .. }));
    }

    #[test]
    fn trend_row_parses_label() {
        let row = MarketTrendRow {
            crop_id: 5,
            trend: "Falling".to_string(),
            confidence_pct: 55,
            forecast_min_6mo: Decimal::from(4000),
            forecast_max_6mo: Decimal::from(4600),
        };
        let trend = MarketTrend::try_from(row).unwrap();
        assert_eq!(trend.trend, PriceTrend::Falling);
    }
}
