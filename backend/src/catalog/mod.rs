//! Read-only crop reference data
//!
//! The engines read soils, crops, suitability, regions, market trends and
//! cost baselines through [`ReferenceData`]. [`ReferenceCatalog`] is the
//! in-memory snapshot implementation, loaded once from Postgres at startup
//! (see [`postgres::load_catalog`]) or assembled by hand in tests.

pub mod postgres;

use serde::Serialize;
use thiserror::Error;

use shared::{
    latest_baseline, validate_cost_baseline, validate_crop, validate_market_trend,
    validate_soil_compatibility, CostBaseline, Crop, MarketPriceHistory, MarketTrend,
    RegionAdaptation, SoilCompatibility, SoilType,
};

/// A crop paired with its suitability for one soil
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibleCrop {
    pub crop: Crop,
    pub suitability: i32,
}

/// Query capability over the crop reference data
pub trait ReferenceData: Send + Sync {
    /// Look up a soil type by code, ignoring case
    fn soil_by_code(&self, code: &str) -> Option<SoilType>;

    /// All soil types in catalog order
    fn soil_types(&self) -> Vec<SoilType>;

    /// Crops whose suitability for `soil_id` is strictly above `floor`, in catalog order
    fn compatible_crops(&self, soil_id: i64, floor: i32) -> Vec<CompatibleCrop>;

    /// Regions where a crop is known to grow well
    fn region_adaptations(&self, crop_id: i64) -> Vec<RegionAdaptation>;

    /// Current market trend for a crop, if any
    fn market_trend(&self, crop_id: i64) -> Option<MarketTrend>;

    /// Cost baseline with the newest reference year for a crop
    fn latest_cost_baseline(&self, crop_id: i64) -> Option<CostBaseline>;

    fn crop_by_id(&self, crop_id: i64) -> Option<Crop>;

    /// Crops that have at least one cost baseline, in catalog order
    fn crops_with_baseline(&self) -> Vec<Crop>;

    /// Monthly prices for a crop ordered by date, optionally filtered by region substring
    fn price_history(&self, crop_id: i64, region: Option<&str>) -> Vec<MarketPriceHistory>;
}

/// Reference data that violates a catalog invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate soil code {0}")]
    DuplicateSoilCode(String),

    #[error("duplicate soil id {0}")]
    DuplicateSoil(i64),

    #[error("duplicate crop id {0}")]
    DuplicateCrop(i64),

    #[error("{entity} references unknown {target} {id}")]
    DanglingReference {
        entity: &'static str,
        target: &'static str,
        id: i64,
    },

    #[error("crop {crop_id} has more than one market trend")]
    DuplicateMarketTrend { crop_id: i64 },

    #[error("crop {crop_id} has more than one cost baseline for {reference_year}")]
    DuplicateCostBaseline { crop_id: i64, reference_year: i32 },

    #[error("duplicate suitability for soil {soil_id} and crop {crop_id}")]
    DuplicateCompatibility { soil_id: i64, crop_id: i64 },

    #[error("invalid {entity} {id}: {reason}")]
    Invalid {
        entity: &'static str,
        id: i64,
        reason: &'static str,
    },
}

/// Row counts, reported by the health endpoint
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CatalogSummary {
    pub soil_types: usize,
    pub crops: usize,
    pub soil_compatibilities: usize,
    pub region_adaptations: usize,
    pub market_trends: usize,
    pub cost_baselines: usize,
    pub price_points: usize,
}

/// Immutable in-memory snapshot of the reference data.
///
/// Every listing preserves insertion order, which the recommendation
/// ranking relies on to order equal scores.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    soils: Vec<SoilType>,
    crops: Vec<Crop>,
    compatibilities: Vec<SoilCompatibility>,
    adaptations: Vec<RegionAdaptation>,
    trends: Vec<MarketTrend>,
    baselines: Vec<CostBaseline>,
    price_history: Vec<MarketPriceHistory>,
}

impl ReferenceCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            soil_types: self.soils.len(),
            crops: self.crops.len(),
            soil_compatibilities: self.compatibilities.len(),
            region_adaptations: self.adaptations.len(),
            market_trends: self.trends.len(),
            cost_baselines: self.baselines.len(),
            price_points: self.price_history.len(),
        }
    }

    fn find_crop(&self, crop_id: i64) -> Option<&Crop> {
        self.crops.iter().find(|c| c.id == crop_id)
    }

    fn has_soil(&self, soil_id: i64) -> bool {
        self.soils.iter().any(|s| s.id == soil_id)
    }
}

impl ReferenceData for ReferenceCatalog {
    fn soil_by_code(&self, code: &str) -> Option<SoilType> {
        self.soils.iter().find(|s| s.matches_code(code)).cloned()
    }

    fn soil_types(&self) -> Vec<SoilType> {
        self.soils.clone()
    }

    fn compatible_crops(&self, soil_id: i64, floor: i32) -> Vec<CompatibleCrop> {
        self.compatibilities
            .iter()
            .filter(|c| c.soil_id == soil_id && c.suitability > floor)
            .filter_map(|c| {
                self.find_crop(c.crop_id).map(|crop| CompatibleCrop {
                    crop: crop.clone(),
                    suitability: c.suitability,
                })
            })
            .collect()
    }

    fn region_adaptations(&self, crop_id: i64) -> Vec<RegionAdaptation> {
        self.adaptations
            .iter()
            .filter(|a| a.crop_id == crop_id)
            .cloned()
            .collect()
    }

    fn market_trend(&self, crop_id: i64) -> Option<MarketTrend> {
        self.trends.iter().find(|t| t.crop_id == crop_id).cloned()
    }

    fn latest_cost_baseline(&self, crop_id: i64) -> Option<CostBaseline> {
        latest_baseline(self.baselines.iter().filter(|b| b.crop_id == crop_id)).cloned()
    }

    fn crop_by_id(&self, crop_id: i64) -> Option<Crop> {
        self.find_crop(crop_id).cloned()
    }

    fn crops_with_baseline(&self) -> Vec<Crop> {
        self.crops
            .iter()
            .filter(|c| self.baselines.iter().any(|b| b.crop_id == c.id))
            .cloned()
            .collect()
    }

    fn price_history(&self, crop_id: i64, region: Option<&str>) -> Vec<MarketPriceHistory> {
        let region = region.map(str::trim).filter(|r| !r.is_empty());
        let needle = region.map(str::to_lowercase);

        let mut history: Vec<MarketPriceHistory> = self
            .price_history
            .iter()
            .filter(|p| p.crop_id == crop_id)
            .filter(|p| match &needle {
                Some(needle) => p.region_name.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        history.sort_by_key(|p| p.price_date);
        history
    }
}

/// Collects reference rows and checks catalog invariants on [`build`](Self::build)
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: ReferenceCatalog,
}

impl CatalogBuilder {
    pub fn soil(mut self, soil: SoilType) -> Self {
        self.catalog.soils.push(soil);
        self
    }

    pub fn crop(mut self, crop: Crop) -> Self {
        self.catalog.crops.push(crop);
        self
    }

    pub fn compatibility(mut self, soil_id: i64, crop_id: i64, suitability: i32) -> Self {
        self.catalog.compatibilities.push(SoilCompatibility {
            soil_id,
            crop_id,
            suitability,
        });
        self
    }

    pub fn region(mut self, crop_id: i64, region_name: impl Into<String>) -> Self {
        self.catalog.adaptations.push(RegionAdaptation {
            crop_id,
            region_name: region_name.into(),
        });
        self
    }

    pub fn market_trend(mut self, trend: MarketTrend) -> Self {
        self.catalog.trends.push(trend);
        self
    }

    pub fn cost_baseline(mut self, baseline: CostBaseline) -> Self {
        self.catalog.baselines.push(baseline);
        self
    }

    pub fn price_point(mut self, point: MarketPriceHistory) -> Self {
        self.catalog.price_history.push(point);
        self
    }

    pub fn build(self) -> Result<ReferenceCatalog, CatalogError> {
        let catalog = self.catalog;

        for (i, soil) in catalog.soils.iter().enumerate() {
            let earlier = &catalog.soils[..i];
            if earlier.iter().any(|s| s.id == soil.id) {
                return Err(CatalogError::DuplicateSoil(soil.id));
            }
            if earlier.iter().any(|s| s.matches_code(&soil.code)) {
                return Err(CatalogError::DuplicateSoilCode(soil.code.clone()));
            }
        }

        for (i, crop) in catalog.crops.iter().enumerate() {
            if catalog.crops[..i].iter().any(|c| c.id == crop.id) {
                return Err(CatalogError::DuplicateCrop(crop.id));
            }
            validate_crop(crop).map_err(|reason| CatalogError::Invalid {
                entity: "crop",
                id: crop.id,
                reason,
            })?;
        }

        for (i, entry) in catalog.compatibilities.iter().enumerate() {
            if !catalog.has_soil(entry.soil_id) {
                return Err(dangling("soil compatibility", "soil", entry.soil_id));
            }
            ensure_crop(&catalog, "soil compatibility", entry.crop_id)?;
            validate_soil_compatibility(entry).map_err(|reason| CatalogError::Invalid {
                entity: "soil compatibility for crop",
                id: entry.crop_id,
                reason,
            })?;
            if catalog.compatibilities[..i]
                .iter()
                .any(|c| c.soil_id == entry.soil_id && c.crop_id == entry.crop_id)
            {
                return Err(CatalogError::DuplicateCompatibility {
                    soil_id: entry.soil_id,
                    crop_id: entry.crop_id,
                });
            }
        }

        for adaptation in &catalog.adaptations {
            ensure_crop(&catalog, "region adaptation", adaptation.crop_id)?;
        }

        for (i, trend) in catalog.trends.iter().enumerate() {
            ensure_crop(&catalog, "market trend", trend.crop_id)?;
            validate_market_trend(trend).map_err(|reason| CatalogError::Invalid {
                entity: "market trend for crop",
                id: trend.crop_id,
                reason,
            })?;
            if catalog.trends[..i].iter().any(|t| t.crop_id == trend.crop_id) {
                return Err(CatalogError::DuplicateMarketTrend {
                    crop_id: trend.crop_id,
                });
            }
        }

        for (i, baseline) in catalog.baselines.iter().enumerate() {
            ensure_crop(&catalog, "cost baseline", baseline.crop_id)?;
            validate_cost_baseline(baseline).map_err(|reason| CatalogError::Invalid {
                entity: "cost baseline for crop",
                id: baseline.crop_id,
                reason,
            })?;
            if catalog.baselines[..i].iter().any(|b| {
                b.crop_id == baseline.crop_id && b.reference_year == baseline.reference_year
            }) {
                return Err(CatalogError::DuplicateCostBaseline {
                    crop_id: baseline.crop_id,
                    reference_year: baseline.reference_year,
                });
            }
        }

        for point in &catalog.price_history {
            ensure_crop(&catalog, "price history", point.crop_id)?;
        }

        Ok(catalog)
    }
}

fn dangling(entity: &'static str, target: &'static str, id: i64) -> CatalogError {
    CatalogError::DanglingReference { entity, target, id }
}

fn ensure_crop(
    catalog: &ReferenceCatalog,
    entity: &'static str,
    crop_id: i64,
) -> Result<(), CatalogError> {
    match catalog.find_crop(crop_id) {
        Some(_) => Ok(()),
        None => Err(dangling(entity, "crop", crop_id)),
    }
}
