//! Business logic services for the Crop Advisor Platform

pub mod advisor;
pub mod profitability;

pub use advisor::AdvisorService;
pub use profitability::ProfitabilityService;
