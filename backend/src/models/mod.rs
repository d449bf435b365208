//! Domain models for the Crop Advisor Platform
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
pub use shared::types::{PriceTrend, WaterLevel};
