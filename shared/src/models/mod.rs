//! Domain models for the Crop Advisor Platform

mod audit;
mod cost;
mod crop;
mod market;
mod profit;
mod recommendation;
mod soil;

pub use audit::*;
pub use cost::*;
pub use crop::*;
pub use market::*;
pub use profit::*;
pub use recommendation::*;
pub use soil::*;
