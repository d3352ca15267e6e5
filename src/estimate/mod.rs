//! Estimation engine for calculator submissions

mod engine;
mod result;

pub use engine::{estimate, Estimator};
pub use result::{BreakdownCategory, BreakdownEntry, EstimateWarning, EstimationResult, ProjectionPoint};
