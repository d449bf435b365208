//! Shared types and models for the Crop Advisor Platform
//!
//! Holds the crop catalog model, the recommendation scoring rules and the
//! profitability projection math. Nothing here touches storage or I/O.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
