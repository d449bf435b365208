//! Crop catalog models

use serde::{Deserialize, Serialize};

use crate::types::WaterLevel;

/// A crop in the advisory catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Crop {
    pub id: i64,
    pub name: String,
    pub emoji: String,
    /// Cereal, Pulse, Oilseed, Vegetable, Cash crop...
    pub category: String,
    pub water_need: WaterLevel,
    pub growing_weeks_min: i32,
    pub growing_weeks_max: i32,
    /// Free text, e.g. "Jun-Jul, Oct-Nov"
    pub best_sowing_months: String,
}

/// A region where a crop is known to grow well
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegionAdaptation {
    pub crop_id: i64,
    pub region_name: String,
}

impl RegionAdaptation {
    /// True when the region name contains `query`, ignoring case
    pub fn matches(&self, query: &str) -> bool {
        self.region_name
            .to_lowercase()
            .contains(&query.to_lowercase())
    }
}
