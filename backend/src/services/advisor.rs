//! Crop recommendation service
//!
//! Scores every crop that grows acceptably in the requested soil against
//! the farmer's water availability, region and current market outlook, and
//! returns the best matches.

use std::sync::Arc;

use crate::audit::AuditSink;
use crate::catalog::ReferenceData;
use crate::error::{AppError, AppResult};
use shared::{
    rank_scored_crops, score_crop, CropRecommendation, MarketPriceHistory, MatchCriteria,
    RecommendationRequestRecord, RecommendationResultRecord, ScoredCrop, SoilType,
    SUITABILITY_FLOOR,
};

/// Recommendation service over a reference catalog
#[derive(Clone)]
pub struct AdvisorService {
    catalog: Arc<dyn ReferenceData>,
    audit: Arc<dyn AuditSink>,
}

impl AdvisorService {
    /// Create a new AdvisorService instance
    pub fn new(catalog: Arc<dyn ReferenceData>, audit: Arc<dyn AuditSink>) -> Self {
        Self { catalog, audit }
    }

    /// Rank up to five crops for a soil, water availability and optional region.
    ///
    /// An unrecognised water availability is not an error; it simply earns
    /// no water points. The request and its ranked results are recorded
    /// after the answer is computed, and a failed recording is only logged.
    pub fn recommend(
        &self,
        soil_code: &str,
        water_availability: &str,
        region: Option<&str>,
    ) -> AppResult<Vec<CropRecommendation>> {
        let soil = self
            .catalog
            .soil_by_code(soil_code)
            .ok_or_else(|| AppError::UnknownSoilType(soil_code.to_string()))?;

        let criteria = MatchCriteria::new(water_availability, region);
        if criteria.water.is_none() {
            tracing::debug!(
                "Water availability {:?} not recognised, scoring without water points",
                water_availability
            );
        }

        let recommendations = self.rank(&soil, &criteria);

        tracing::debug!(
            soil = %soil.code,
            results = recommendations.len(),
            top_score = ?recommendations.first().map(|r| r.match_score),
            "Recommendations computed"
        );

        self.record(soil_code, water_availability, region, &recommendations);

        Ok(recommendations)
    }

    /// All soil types a farmer can choose from
    pub fn list_soil_types(&self) -> Vec<SoilType> {
        self.catalog.soil_types()
    }

    /// Monthly price history for a crop, oldest first
    pub fn price_history(
        &self,
        crop_id: i64,
        region: Option<&str>,
    ) -> AppResult<Vec<MarketPriceHistory>> {
        if self.catalog.crop_by_id(crop_id).is_none() {
            return Err(AppError::CropNotFound(crop_id));
        }
        Ok(self.catalog.price_history(crop_id, region))
    }

    fn rank(&self, soil: &SoilType, criteria: &MatchCriteria) -> Vec<CropRecommendation> {
        let scored: Vec<ScoredCrop> = self
            .catalog
            .compatible_crops(soil.id, SUITABILITY_FLOOR)
            .into_iter()
            .map(|candidate| {
                let adaptations = match criteria.region {
                    Some(_) => self.catalog.region_adaptations(candidate.crop.id),
                    None => Vec::new(),
                };
                let trend = self.catalog.market_trend(candidate.crop.id);
                let score = score_crop(
                    &candidate.crop,
                    candidate.suitability,
                    criteria,
                    &adaptations,
                    trend.as_ref(),
                );

                tracing::trace!(
                    crop = %candidate.crop.name,
                    soil = score.soil,
                    water = score.water,
                    region = score.region,
                    market = score.market,
                    "Scored crop"
                );

                ScoredCrop {
                    crop: candidate.crop,
                    trend,
                    score,
                }
            })
            .collect();

        rank_scored_crops(scored)
            .iter()
            .map(|s| CropRecommendation::from_scored(s, soil))
            .collect()
    }

    fn record(
        &self,
        soil_code: &str,
        water_availability: &str,
        region: Option<&str>,
        recommendations: &[CropRecommendation],
    ) {
        let request = RecommendationRequestRecord::new(soil_code, water_availability, region);
        if let Err(e) = self.audit.record_request(&request) {
            tracing::warn!("Failed to record recommendation request {}: {}", request.id, e);
            return;
        }

        let results = RecommendationResultRecord::for_request(request.id, recommendations);
        if let Err(e) = self.audit.record_results(&results) {
            tracing::warn!(
                "Failed to record {} recommendation results for request {}: {}",
                results.len(),
                request.id,
                e
            );
        }
    }
}
