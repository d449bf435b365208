//! Soil reference models

use serde::{Deserialize, Serialize};

/// A soil type farmers can select (RED, BLACK, SANDY, CLAY, LOAMY, LATERITE)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SoilType {
    pub id: i64,
    /// Unique upper-case code, e.g. "BLACK"
    pub code: String,
    /// Display name, e.g. "Black Cotton Soil"
    pub name: String,
}

impl SoilType {
    /// Case-insensitive code comparison
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }
}

/// How well a crop grows in a given soil
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SoilCompatibility {
    pub soil_id: i64,
    pub crop_id: i64,
    /// 0-100
    pub suitability: i32,
}
