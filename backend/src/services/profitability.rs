//! Profitability projection service

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::audit::AuditSink;
use crate::catalog::ReferenceData;
use crate::error::{AppError, AppResult};
use shared::{CostBaseline, Crop, ProfitBreakdown, ProfitCalcLogRecord};

/// Projects costs, income and profit for a crop on a given land area
#[derive(Clone)]
pub struct ProfitabilityService {
    catalog: Arc<dyn ReferenceData>,
    audit: Arc<dyn AuditSink>,
}

impl ProfitabilityService {
    /// Create a new ProfitabilityService instance
    pub fn new(catalog: Arc<dyn ReferenceData>, audit: Arc<dyn AuditSink>) -> Self {
        Self { catalog, audit }
    }

    /// Scale the crop's newest cost baseline to `land_area_acres`.
    ///
    /// The land area must already be validated as positive.
    pub fn calculate(
        &self,
        crop_id: i64,
        land_area_acres: Decimal,
        farmer_id: Option<i64>,
    ) -> AppResult<ProfitBreakdown> {
        let crop = self
            .catalog
            .crop_by_id(crop_id)
            .ok_or(AppError::CropNotFound(crop_id))?;
        let baseline = self.baseline(crop_id)?;

        let breakdown = ProfitBreakdown::project(&crop, &baseline, land_area_acres);

        tracing::debug!(
            crop = %crop.name,
            acres = %land_area_acres,
            reference_year = baseline.reference_year,
            roi_pct = %breakdown.roi_pct,
            assessment = %breakdown.assessment,
            "Profitability computed"
        );

        let record = ProfitCalcLogRecord::from_breakdown(&breakdown, farmer_id);
        if let Err(e) = self.audit.record_profit_calc(&record) {
            tracing::warn!("Failed to record profit calculation {}: {}", record.id, e);
        }

        Ok(breakdown)
    }

    /// Crops that can be used with [`calculate`](Self::calculate)
    pub fn crops_with_baseline(&self) -> Vec<Crop> {
        self.catalog.crops_with_baseline()
    }

    /// Newest per-acre cost baseline for a crop
    pub fn baseline(&self, crop_id: i64) -> AppResult<CostBaseline> {
        self.catalog
            .latest_cost_baseline(crop_id)
            .ok_or(AppError::NoCostBaseline(crop_id))
    }
}
